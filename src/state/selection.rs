//! Chart selection state: station, period, hour filter and range options
//!
//! The widgets edit these fields directly; whoever edits them calls
//! `mark_dirty` so the chart is recomputed once, on the next frame.

use chrono::{NaiveDate, NaiveTime};

use crate::config::DashboardConfig;
use crate::constants::window::ALL_HOURS_INDEX;
use crate::data::TimeSeriesStore;
use crate::pipeline::{HourFilter, RangeMode, RangeModeKind, Selection, SortOrder, TimeWindow};

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub station: Option<String>,
    pub start_date: NaiveDate,
    /// Hour of the start-time picker (0-23)
    pub start_hour: u32,
    pub end_date: NaiveDate,
    /// Hour of the end-time picker (0-23)
    pub end_hour: u32,
    /// Hour-of-day filter index; 24 means all hours
    pub hour_index: u32,
    pub multiplier: u32,
    pub range_mode: RangeModeKind,
    pub offset_below: f64,
    pub offset_above: f64,
    pub sort_order: SortOrder,
    dirty: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl SelectionState {
    /// Options from config; no station or period yet
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            station: None,
            start_date: NaiveDate::default(),
            start_hour: 0,
            end_date: NaiveDate::default(),
            end_hour: crate::constants::window::LAST_SELECTABLE_HOUR,
            hour_index: config.hour_filter().index(),
            multiplier: config.default_range_multiplier,
            range_mode: config.default_range_mode,
            offset_below: config.fixed_offset_below,
            offset_above: config.fixed_offset_above,
            sort_order: config.sort_order,
            dirty: true,
        }
    }

    /// Point the selection at a freshly loaded store: first station, default period
    pub fn reset_for(&mut self, store: &TimeSeriesStore, config: &DashboardConfig) {
        let keep_station = self
            .station
            .as_deref()
            .is_some_and(|s| store.has_station(s));
        if !keep_station {
            self.station = store.stations().first().map(|s| s.to_string());
        }

        if let Ok(extent) = store.extent() {
            let window = TimeWindow::default_for(extent, config.default_lookback_days, config.hour_filter());
            self.set_period(&window);
        }
        self.dirty = true;
    }

    /// Set the period pickers from a window (hour precision)
    pub fn set_period(&mut self, window: &TimeWindow) {
        use chrono::Timelike;

        self.start_date = window.start.date();
        self.start_hour = window.start.hour();
        self.end_date = window.end.date();
        self.end_hour = window.end.hour();
        self.dirty = true;
    }

    /// Window described by the pickers
    pub fn window(&self) -> TimeWindow {
        TimeWindow::from_parts(
            self.start_date,
            hour_time(self.start_hour),
            self.end_date,
            hour_time(self.end_hour),
            self.hour_filter(),
        )
    }

    pub fn hour_filter(&self) -> HourFilter {
        HourFilter::from_index(self.hour_index).unwrap_or_default()
    }

    pub fn range_mode(&self) -> RangeMode {
        RangeMode::from_kind(self.range_mode, self.offset_below, self.offset_above)
    }

    /// Pipeline input, if a station is chosen
    pub fn selection(&self) -> Option<Selection> {
        Some(Selection {
            station: self.station.clone()?,
            window: self.window(),
            multiplier: self.multiplier,
            range_mode: self.range_mode(),
            sort_order: self.sort_order,
        })
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return and clear the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn shows_all_hours(&self) -> bool {
        self.hour_index == ALL_HOURS_INDEX
    }
}

fn hour_time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn store() -> TimeSeriesStore {
        TimeSeriesStore::from_csv_str(
            "Time,W1,W2\n\
             2024-01-01 05:00,1,2\n\
             2024-01-10 17:00,3,4\n",
        )
        .unwrap()
    }

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_reset_for_store() {
        let mut state = SelectionState::default();
        state.reset_for(&store(), &DashboardConfig::default());

        assert_eq!(state.station.as_deref(), Some("W1"));
        let window = state.window();
        assert_eq!(window.start, at(7, 0));
        assert_eq!(window.end, at(10, 23));
        assert!(state.shows_all_hours());
        assert!(state.take_dirty());
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_reset_with_unbounded_lookback() {
        let config = DashboardConfig {
            default_lookback_days: 100_000_000,
            ..DashboardConfig::default()
        };
        let mut state = SelectionState::default();
        state.reset_for(&store(), &config);

        let window = state.window();
        assert_eq!(window.start, at(1, 0));
        assert_eq!(window.end, at(10, 23));
    }

    #[test]
    fn test_reset_keeps_existing_station() {
        let mut state = SelectionState::default();
        state.station = Some("W2".to_string());
        state.reset_for(&store(), &DashboardConfig::default());
        assert_eq!(state.station.as_deref(), Some("W2"));

        state.station = Some("gone".to_string());
        state.reset_for(&store(), &DashboardConfig::default());
        assert_eq!(state.station.as_deref(), Some("W1"));
    }

    #[test]
    fn test_selection_reflects_pickers() {
        let mut state = SelectionState::default();
        assert!(state.selection().is_none());

        state.reset_for(&store(), &DashboardConfig::default());
        state.hour_index = 5;
        state.range_mode = RangeModeKind::FixedOffset;

        let selection = state.selection().unwrap();
        assert_eq!(selection.window.hour_filter, HourFilter::Hour(5));
        assert_eq!(selection.range_mode, RangeMode::FixedOffset { below: 3.0, above: 4.0 });
        assert_eq!(selection.multiplier, 5);
    }
}
