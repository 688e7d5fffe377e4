//! View and visualization state

/// Display toggles of the dashboard; none of them affect the computed chart
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Dark mode theme toggle
    pub dark_mode: bool,

    /// Show help panel
    pub show_help: bool,

    /// Grid visibility
    pub show_grid: bool,

    /// Legend visibility
    pub show_legend: bool,

    /// Horizontal line at the selection mean
    pub show_mean_line: bool,

    /// Selection preview table under the chart
    pub show_preview: bool,

    /// Per-station coverage table in the side panel
    pub show_coverage: bool,

    /// Snap the plot back to the computed display range on next frame
    pub reset_bounds: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            dark_mode: true,
            show_help: false,
            show_grid: true,
            show_legend: true,
            show_mean_line: true,
            show_preview: true,
            show_coverage: false,
            reset_bounds: true,
        }
    }
}
