pub mod source;
pub mod stats;
pub mod store;
pub mod timestamp;

// Re-export key types for convenience
pub use stats::{Stats, calculate_stats};
pub use store::{Coverage, LoadReport, Reading, TimeSeriesStore};
pub use timestamp::{parse_level, parse_timestamp};
