//! Groundwater level monitoring dashboard
//!
//! A table of timestamped readings (one column per station) is filtered to one
//! station and time window, then turned into a chart with a sized y-range and
//! sampled time-axis ticks. `pipeline` holds that logic without any UI; the
//! egui front end lives in `app` and the modules it draws with.

pub mod app;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod state;
pub mod ui;
pub mod widgets;

pub use config::{DashboardConfig, Preset};
pub use data::TimeSeriesStore;
pub use error::{GwError, Result};
