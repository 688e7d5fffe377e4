//! Reusable UI widgets for gw-monitor

mod hour_select;

pub use hour_select::{HourSelect, hour_label};
