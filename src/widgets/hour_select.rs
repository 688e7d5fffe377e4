//! Hour-of-day picker widget

use egui::{ComboBox, Response, Ui};

use crate::constants::window::{ALL_HOURS_INDEX, LAST_SELECTABLE_HOUR};

/// Combo box over `00:00`..`23:00`, optionally with an "All hours" entry
/// stored as index 24
pub struct HourSelect<'a> {
    label: &'a str,
    id_salt: &'a str,
    hour: &'a mut u32,
    allow_all: bool,
}

impl<'a> HourSelect<'a> {
    pub fn new(label: &'a str, id_salt: &'a str, hour: &'a mut u32) -> Self {
        Self {
            label,
            id_salt,
            hour,
            allow_all: false,
        }
    }

    /// Offer the "All hours" entry
    pub fn with_all(mut self) -> Self {
        self.allow_all = true;
        self
    }

    /// Show the widget; `changed()` on the response reports a new pick
    pub fn show(self, ui: &mut Ui) -> Response {
        let before = *self.hour;

        let mut response = ui
            .horizontal(|ui| {
                ui.label(self.label);
                ComboBox::from_id_salt(self.id_salt)
                    .selected_text(hour_label(*self.hour))
                    .width(90.0)
                    .show_ui(ui, |ui| {
                        if self.allow_all {
                            ui.selectable_value(self.hour, ALL_HOURS_INDEX, hour_label(ALL_HOURS_INDEX));
                        }
                        for h in 0..=LAST_SELECTABLE_HOUR {
                            ui.selectable_value(self.hour, h, hour_label(h));
                        }
                    });
            })
            .response;

        if *self.hour != before {
            response.mark_changed();
        }
        response
    }
}

/// `"07:00"`, or `"All hours"` for the sentinel index
pub fn hour_label(hour: u32) -> String {
    if hour >= ALL_HOURS_INDEX {
        "All hours".to_string()
    } else {
        format!("{:02}:00", hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_label() {
        assert_eq!(hour_label(0), "00:00");
        assert_eq!(hour_label(23), "23:00");
        assert_eq!(hour_label(24), "All hours");
    }
}
