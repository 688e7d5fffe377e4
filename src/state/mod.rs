//! Application state management
//!
//! The dashboard state is split into the loaded data, the chart selection,
//! view toggles and UI messages. Only `SelectionState` feeds the pipeline.

mod selection;
mod ui;
mod view;

pub use selection::SelectionState;
pub use ui::{StatusKind, UiState};
pub use view::ViewState;

use crate::config::DashboardConfig;
use crate::data::TimeSeriesStore;
use crate::pipeline::RenderOutcome;

/// Main application state container
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded readings; `None` until a source loads successfully
    pub store: Option<TimeSeriesStore>,

    /// Where `store` came from (path or URL)
    pub current_source: Option<String>,

    pub selection: SelectionState,

    pub view: ViewState,

    pub ui: UiState,

    /// Result of the last recompute pass
    pub outcome: Option<RenderOutcome>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            selection: SelectionState::from_config(&config),
            ui: UiState {
                source_input: config.source.clone(),
                ..UiState::default()
            },
            config,
            store: None,
            current_source: None,
            view: ViewState::default(),
            outcome: None,
        }
    }

    /// Check if data is loaded
    pub fn has_data(&self) -> bool {
        self.store.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Station ids of the loaded store
    pub fn stations(&self) -> Vec<String> {
        self.store
            .as_ref()
            .map(|s| s.stations().iter().map(|id| id.to_string()).collect())
            .unwrap_or_default()
    }

    /// Install a new store and point the selection at it
    pub fn set_store(&mut self, store: TimeSeriesStore, source: String) {
        self.selection.reset_for(&store, &self.config);
        self.store = Some(store);
        self.current_source = Some(source);
        self.outcome = None;
        self.view.reset_bounds = true;
    }

    /// Replace the configuration and re-derive the selection options from it
    pub fn apply_config(&mut self, config: DashboardConfig) {
        let station = self.selection.station.take();
        self.selection = SelectionState::from_config(&config);
        self.selection.station = station;
        if let Some(store) = &self.store {
            self.selection.reset_for(store, &config);
        }
        self.config = config;
        self.view.reset_bounds = true;
    }
}
