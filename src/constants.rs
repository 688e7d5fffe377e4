//! Application-wide constants and default values
//!
//! This module centralizes the magic numbers of the dashboard. Tunable
//! defaults reach the pipeline through `DashboardConfig`; layout values are
//! read by the UI directly.

/// Display range defaults
pub mod range {
    /// Default range-size multiplier (slider start position)
    pub const DEFAULT_MULTIPLIER: u32 = 5;

    /// Smallest selectable multiplier
    pub const MIN_MULTIPLIER: u32 = 1;

    /// Largest selectable multiplier
    pub const MAX_MULTIPLIER: u32 = 20;

    /// Legacy fixed view: distance below the mean
    pub const DEFAULT_OFFSET_BELOW: f64 = 3.0;

    /// Legacy fixed view: distance above the mean
    pub const DEFAULT_OFFSET_ABOVE: f64 = 4.0;

    /// Half-height used when a range collapses to a single value
    pub const FLAT_RANGE_PAD: f64 = 0.5;
}

/// Time axis defaults
pub mod ticks {
    /// Default number of labeled x-axis ticks
    pub const DEFAULT_TARGET_COUNT: usize = 5;

    /// Upper bound accepted from configuration
    pub const MAX_TARGET_COUNT: usize = 24;
}

/// Time window defaults
pub mod window {
    /// Days shown before the newest reading when a dataset is opened
    pub const DEFAULT_LOOKBACK_DAYS: i64 = 3;

    /// Upper bound accepted from configuration (about a century)
    pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

    /// Last hour offered by the end-time picker
    pub const LAST_SELECTABLE_HOUR: u32 = 23;

    /// Hour selector index meaning "all hours"
    pub const ALL_HOURS_INDEX: u32 = 24;
}

/// Export format
pub mod export {
    /// Timestamp format of exported CSV (minute precision)
    pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

    /// Suggested file name for a single-station export
    pub const SELECTION_FILE_NAME: &str = "selected_data.csv";

    /// Suggested file name for a whole-table export
    pub const ALL_DATA_FILE_NAME: &str = "all_data.csv";
}

/// Loading and validation
pub mod load {
    /// Header used when the source names no timestamp column
    pub const DEFAULT_TIME_COLUMN: &str = "Time";

    /// Share of absent cells above which a station gets a load warning
    pub const ABSENT_WARN_RATIO: f64 = 0.05;

    /// Timeout for the one-shot remote fetch, in seconds
    pub const FETCH_TIMEOUT_SECS: u64 = 30;
}

/// UI layout defaults
pub mod layout {
    /// Left panel (controls) default width
    pub const CONTROL_PANEL_WIDTH: f32 = 280.0;

    /// Rows shown in the selection preview table
    pub const PREVIEW_ROWS: usize = 15;

    /// Preview table row height
    pub const PREVIEW_ROW_HEIGHT: f32 = 18.0;

    /// Minimum chart height
    pub const MIN_PLOT_HEIGHT: f32 = 200.0;
}

/// Date/time parsing constants
pub mod datetime {
    /// Minimum string length for compact timestamp parsing
    pub const MIN_TIMESTAMP_LENGTH: usize = 15;

    /// YYYYMMDD format length
    pub const DATE_FORMAT_LENGTH: usize = 8;

    /// HHMMSS format length
    pub const TIME_FORMAT_LENGTH: usize = 6;
}

/// Configuration file paths
pub mod config {
    /// Configuration file name
    pub const CONFIG_FILE: &str = "gw-monitor.json";
}
