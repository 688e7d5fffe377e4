//! UI interaction state: user-visible messages

use crate::error::GwError;

/// Severity of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Warning,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Error to display as a dismissable banner: (title, message)
    pub error: Option<(String, String)>,

    /// One-line status under the chart
    pub status: Option<(StatusKind, String)>,

    /// Text of the "open URL" field
    pub source_input: String,
}

impl UiState {
    /// Show an error at the presentation boundary
    pub fn set_error(&mut self, error: &GwError) {
        self.error = Some((error.title().to_string(), error.user_message()));
    }

    /// Clear the current error message
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Check if there's an error to display
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.status = Some((StatusKind::Info, message.into()));
    }

    pub fn set_warning(&mut self, message: impl Into<String>) {
        self.status = Some((StatusKind::Warning, message.into()));
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_uses_presentation_text() {
        let mut ui = UiState::default();
        ui.set_error(&GwError::EmptyStore);
        let (title, message) = ui.error.clone().unwrap();
        assert_eq!(title, "Empty Dataset");
        assert_eq!(message, GwError::EmptyStore.user_message());

        ui.clear_error();
        assert!(!ui.has_error());
    }

    #[test]
    fn test_status_replaces_previous() {
        let mut ui = UiState::default();
        ui.set_info("loaded");
        ui.set_warning("2 rows dropped");
        assert_eq!(ui.status, Some((StatusKind::Warning, "2 rows dropped".to_string())));
        ui.clear_status();
        assert!(ui.status.is_none());
    }
}
