//! Error types for gw-monitor
//!
//! One thiserror enum covers loading, filtering, range computation and the
//! thin I/O adapters. Row-level parse failures are absorbed during load and
//! never surface here as fatal errors; the data-availability variants
//! (`EmptyStore`, `InsufficientData`, `InvalidWindow`) are meant to reach the
//! presentation boundary as distinct user-visible states.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Main error type for gw-monitor operations
#[derive(Error, Debug)]
pub enum GwError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars CSV read/write error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Remote source could not be retrieved
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Remote source answered with a non-success status
    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    /// Clipboard unavailable or rejected the text
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A timestamp or value could not be interpreted
    #[error("Parse error: could not interpret '{value}' as {expected}")]
    Parse { value: String, expected: &'static str },

    /// Source table has a timestamp column but no station columns
    #[error("Source has no station columns (found {found} column(s))")]
    MissingStations { found: usize },

    /// Requested station is not a column of the source table
    #[error("Station '{station}' not found in dataset")]
    StationNotFound { station: String },

    /// No reading survived timestamp parsing
    #[error("Dataset is empty: no row has a readable timestamp")]
    EmptyStore,

    /// A statistic was requested on a series without present values
    #[error("Insufficient data: {operation} requires at least 1 value, but got {actual}")]
    InsufficientData { operation: String, actual: usize },

    /// Window start lies after its end
    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// Hour-of-day selector outside 0-23 (24 is the "all hours" sentinel)
    #[error("Invalid hour of day: {0}")]
    InvalidHour(u32),
}

/// Result type alias for gw-monitor operations
pub type Result<T> = std::result::Result<T, GwError>;

/// UI-friendly error message formatting
impl GwError {
    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            GwError::FileIo(e) => format!("File error: {}", e),
            GwError::Polars(e) => format!("Data error: {}", e),
            GwError::Json(e) => format!("JSON error: {}", e),
            GwError::Fetch(e) => format!("Could not download data: {}", e),
            GwError::HttpStatus(code) => format!("Server answered with HTTP {}", code),
            GwError::Clipboard(e) => format!("Clipboard error: {}", e),
            GwError::Config(msg) => format!("Config error: {}", msg),
            GwError::Parse { value, expected } => {
                format!("Could not read '{}' as {}", value, expected)
            }
            GwError::MissingStations { .. } => {
                "The file needs a time column followed by at least one station column".to_string()
            }
            GwError::StationNotFound { station } => format!("Station '{}' not found", station),
            GwError::EmptyStore => "No readings with a valid time were found".to_string(),
            GwError::InsufficientData { .. } => "No data for this selection".to_string(),
            GwError::InvalidWindow { start, end } => format!(
                "Start ({}) is after end ({}); check the selected period",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%Y-%m-%d %H:%M")
            ),
            GwError::InvalidHour(hour) => format!("Hour {} is outside 0-23", hour),
        }
    }

    /// Get a short title for the error (for toast notifications)
    pub fn title(&self) -> &'static str {
        match self {
            GwError::FileIo(_) => "File Error",
            GwError::Polars(_) => "Data Error",
            GwError::Json(_) => "JSON Error",
            GwError::Fetch(_) | GwError::HttpStatus(_) => "Download Error",
            GwError::Clipboard(_) => "Clipboard Error",
            GwError::Config(_) => "Configuration Error",
            GwError::Parse { .. } => "Parse Error",
            GwError::MissingStations { .. } => "No Stations",
            GwError::StationNotFound { .. } => "Station Not Found",
            GwError::EmptyStore => "Empty Dataset",
            GwError::InsufficientData { .. } => "No Data",
            GwError::InvalidWindow { .. } => "Invalid Period",
            GwError::InvalidHour(_) => "Invalid Hour",
        }
    }

    /// True for the data-availability states a dashboard shows as an empty
    /// chart message rather than an error popup
    pub fn is_empty_state(&self) -> bool {
        matches!(
            self,
            GwError::EmptyStore | GwError::InsufficientData { .. } | GwError::InvalidWindow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GwError::StationNotFound {
            station: "GW-07".to_string(),
        };
        assert_eq!(err.user_message(), "Station 'GW-07' not found");
        assert_eq!(err.title(), "Station Not Found");

        let err = GwError::InsufficientData {
            operation: "Recommended range".to_string(),
            actual: 0,
        };
        assert_eq!(err.user_message(), "No data for this selection");
        assert_eq!(
            err.to_string(),
            "Insufficient data: Recommended range requires at least 1 value, but got 0"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let gw_err: GwError = io_err.into();
        assert!(matches!(gw_err, GwError::FileIo(_)));
    }

    #[test]
    fn test_empty_states() {
        assert!(GwError::EmptyStore.is_empty_state());
        assert!(!GwError::InvalidHour(30).is_empty_state());
    }
}
