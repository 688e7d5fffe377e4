use std::path::PathBuf;

use eframe::egui;
use tracing::{error, info, warn};

use crate::config::DashboardConfig;
use crate::constants::export::{ALL_DATA_FILE_NAME, SELECTION_FILE_NAME};
use crate::error::{GwError, Result};
use crate::fetch;
use crate::pipeline::{self, RenderOutcome, export};
use crate::state::AppState;
use crate::ui;

pub struct GwMonitor {
    pub state: AppState,
}

impl Default for GwMonitor {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl GwMonitor {
    /// Create the app and load the configured source
    pub fn new(config: DashboardConfig) -> Self {
        let source = config.source.clone();
        let mut app = Self {
            state: AppState::new(config),
        };
        if !source.trim().is_empty() {
            app.open_source(&source);
        }
        app
    }

    /// Fetch and install a source (path or URL)
    pub fn load_source(&mut self, source: &str) -> Result<()> {
        let store = fetch::load_source(source, self.state.config.fetch_timeout())?;
        if store.is_empty() {
            return Err(GwError::EmptyStore);
        }

        let report = store.report();
        if report.rows_dropped > 0 {
            self.state.ui.set_warning(format!(
                "{} of {} rows skipped: unreadable time (e.g. '{}')",
                report.rows_dropped,
                report.rows_read,
                report.dropped_samples.first().map(String::as_str).unwrap_or("")
            ));
        } else {
            self.state.ui.set_info(format!(
                "Loaded {} rows, {} stations",
                store.len(),
                store.stations().len()
            ));
        }

        self.state.set_store(store, source.to_string());
        self.state.ui.source_input = source.to_string();
        Ok(())
    }

    /// `load_source`, reporting failures in the UI
    pub fn open_source(&mut self, source: &str) {
        match self.load_source(source) {
            Ok(()) => self.state.ui.clear_error(),
            Err(e) if e.is_empty_state() => {
                warn!(source, "{e}");
                self.state.ui.set_warning(e.user_message());
            }
            Err(e) => {
                error!(source, "failed to load source: {e}");
                self.state.ui.set_error(&e);
            }
        }
    }

    pub fn load_file(&mut self, path: PathBuf) -> Result<()> {
        self.load_source(&path.to_string_lossy())
    }

    pub fn reload(&mut self) {
        if let Some(source) = self.state.current_source.clone() {
            self.open_source(&source);
        }
    }

    /// Run the pipeline if the selection changed since the last pass
    pub fn recompute_if_dirty(&mut self) {
        if !self.state.selection.take_dirty() {
            return;
        }
        let Some(store) = &self.state.store else {
            return;
        };
        let Some(selection) = self.state.selection.selection() else {
            self.state.outcome = None;
            return;
        };

        match pipeline::recompute(store, &selection, &self.state.config.tick_sampler()) {
            Ok(outcome) => {
                self.state.outcome = Some(outcome);
                self.state.view.reset_bounds = true;
            }
            Err(e) => {
                warn!("recompute failed: {e}");
                self.state.outcome = None;
                self.state.ui.set_error(&e);
            }
        }
    }

    /// CSV of the current selection, if one is computed
    fn selection_csv(&self) -> Option<Result<String>> {
        let store = self.state.store.as_ref()?;
        let series = match self.state.outcome.as_ref()? {
            RenderOutcome::Ready(payload) => &payload.series,
            RenderOutcome::NoData { series, .. } => series,
            RenderOutcome::InvalidWindow { .. } => return None,
        };
        Some(export::encode_series(series, store.time_column()))
    }

    pub fn export_selection(&mut self) {
        let Some(csv) = self.selection_csv() else {
            return;
        };
        self.save_csv_with_dialog(csv, SELECTION_FILE_NAME);
    }

    pub fn export_all(&mut self) {
        let Some(store) = &self.state.store else {
            return;
        };
        let csv = export::encode_store(store);
        self.save_csv_with_dialog(csv, ALL_DATA_FILE_NAME);
    }

    pub fn copy_selection(&mut self) {
        let Some(csv) = self.selection_csv() else {
            return;
        };
        match csv.and_then(|csv| export::copy_to_clipboard(&csv)) {
            Ok(()) => self.state.ui.set_info("Selection copied to clipboard"),
            Err(e) => self.state.ui.set_error(&e),
        }
    }

    fn save_csv_with_dialog(&mut self, csv: Result<String>, file_name: &str) {
        let csv = match csv {
            Ok(csv) => csv,
            Err(e) => {
                self.state.ui.set_error(&e);
                return;
            }
        };

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(file_name)
            .save_file()
        {
            match export::save_csv(&path, &csv) {
                Ok(()) => self
                    .state
                    .ui
                    .set_info(format!("Exported {}", path.display())),
                Err(e) => self.state.ui.set_error(&e),
            }
        }
    }

    pub fn save_config(&mut self) {
        let mut config = self.state.config.clone();
        let selection = &self.state.selection;
        config.default_range_multiplier = selection.multiplier;
        config.default_hour = selection.hour_filter().as_option();
        config.default_range_mode = selection.range_mode;
        config.fixed_offset_below = selection.offset_below;
        config.fixed_offset_above = selection.offset_above;
        config.sort_order = selection.sort_order;
        if let Some(source) = &self.state.current_source {
            config.source = source.clone();
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(crate::constants::config::CONFIG_FILE)
            .save_file()
        {
            match config.save(&path) {
                Ok(()) => {
                    self.state.config = config;
                    self.state.ui.set_info(format!("Saved {}", path.display()));
                }
                Err(e) => self.state.ui.set_error(&e),
            }
        }
    }

    pub fn load_config(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match DashboardConfig::load(&path) {
                Ok(config) => {
                    let source_changed = self.state.current_source.as_deref() != Some(config.source.as_str());
                    let source = config.source.clone();
                    self.state.apply_config(config);
                    info!(path = %path.display(), "applied dashboard config");
                    if source_changed {
                        self.open_source(&source);
                    }
                }
                Err(e) => self.state.ui.set_error(&e),
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::R) {
                self.state.view.reset_bounds = true;
            }
            if i.key_pressed(egui::Key::G) {
                self.state.view.show_grid = !self.state.view.show_grid;
            }
            if i.key_pressed(egui::Key::L) {
                self.state.view.show_legend = !self.state.view.show_legend;
            }
            if i.key_pressed(egui::Key::T) {
                self.state.view.dark_mode = !self.state.view.dark_mode;
            }
            if i.key_pressed(egui::Key::H) || i.key_pressed(egui::Key::F1) {
                self.state.view.show_help = !self.state.view.show_help;
            }
            if i.key_pressed(egui::Key::Escape) {
                self.state.view.show_help = false;
            }
        });
    }
}

impl eframe::App for GwMonitor {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::finish_frame!();

        if self.state.view.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Text fields and date pickers own the keyboard while focused
        if !ctx.wants_keyboard_input() {
            self.handle_shortcuts(ctx);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::render_toolbar(self, ctx, ui);
        });

        if self.state.has_data() {
            egui::SidePanel::left("controls")
                .default_width(crate::constants::layout::CONTROL_PANEL_WIDTH)
                .show(ctx, |ui| {
                    ui::render_sidebar(self, ui);
                });
        }

        // Widgets above only edit the selection; the chart follows it here
        self.recompute_if_dirty();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::render_chart_area(self, ui);
        });

        ui::render_help_dialog(self, ctx);
    }
}
