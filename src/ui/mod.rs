mod data_table;
mod help_dialog;
mod plot;
mod sidebar;
mod toolbar;

pub use help_dialog::render_help_dialog;
pub use sidebar::render_sidebar;
pub use toolbar::render_toolbar;

use crate::app::GwMonitor;
use crate::pipeline::RenderOutcome;
use crate::state::StatusKind;

/// Render the central area: messages, chart and preview
pub fn render_chart_area(app: &mut GwMonitor, ui: &mut eframe::egui::Ui) {
    render_messages(app, ui);

    if !app.state.has_data() {
        ui.vertical_centered(|ui| {
            ui.heading("No data loaded");
            ui.label("Open a CSV file, enter a URL, or drag and drop a file to get started");
        });
        return;
    }

    // Borrowed out for the frame; nothing below replaces it
    let Some(outcome) = app.state.outcome.take() else {
        return;
    };

    match &outcome {
        RenderOutcome::Ready(payload) => {
            ui.heading(&payload.title);
            ui.horizontal(|ui| {
                let s = &payload.stats;
                ui.label(format!(
                    "n = {}   mean {:.3}   min {:.3}   max {:.3}   view {:.3} .. {:.3}",
                    s.count, s.mean, s.min, s.max, payload.range.low, payload.range.high
                ));
            });

            let show_preview = app.state.view.show_preview;
            if show_preview {
                let preview_height = (crate::constants::layout::PREVIEW_ROWS as f32 + 2.0)
                    * crate::constants::layout::PREVIEW_ROW_HEIGHT;
                let plot_height = (ui.available_height() - preview_height - 16.0)
                    .max(crate::constants::layout::MIN_PLOT_HEIGHT);
                ui.allocate_ui(eframe::egui::vec2(ui.available_width(), plot_height), |ui| {
                    plot::render_plot(app, payload, ui);
                });
                ui.separator();
                data_table::render_preview_table(app, &payload.series, ui);
            } else {
                plot::render_plot(app, payload, ui);
            }
        }
        RenderOutcome::NoData { series, .. } => {
            if let Some(e) = outcome.as_error() {
                ui.vertical_centered(|ui| {
                    ui.heading(e.user_message());
                    ui.label(format!(
                        "{}: {} rows in the period, none with a value",
                        series.station(),
                        series.len()
                    ));
                });
            }
        }
        RenderOutcome::InvalidWindow { .. } => {
            if let Some(e) = outcome.as_error() {
                ui.vertical_centered(|ui| {
                    ui.heading("Invalid period");
                    ui.colored_label(eframe::egui::Color32::from_rgb(255, 165, 0), e.user_message());
                });
            }
        }
    }

    if app.state.outcome.is_none() {
        app.state.outcome = Some(outcome);
    }
}

fn render_messages(app: &mut GwMonitor, ui: &mut eframe::egui::Ui) {
    if let Some((title, message)) = app.state.ui.error.clone() {
        ui.horizontal(|ui| {
            ui.colored_label(
                eframe::egui::Color32::from_rgb(255, 80, 80),
                format!("⚠ {}: {}", title, message),
            );
            if ui.small_button("✖").clicked() {
                app.state.ui.clear_error();
            }
        });
    }

    if let Some((kind, message)) = app.state.ui.status.clone() {
        ui.horizontal(|ui| {
            match kind {
                StatusKind::Info => ui.weak(message),
                StatusKind::Warning => {
                    ui.colored_label(eframe::egui::Color32::from_rgb(255, 165, 0), message)
                }
            };
            if ui.small_button("✖").clicked() {
                app.state.ui.clear_status();
            }
        });
    }

    ui.horizontal(|ui| {
        ui.checkbox(&mut app.state.view.show_preview, "Preview");
        ui.checkbox(&mut app.state.view.show_mean_line, "Mean line");
        ui.checkbox(&mut app.state.view.show_grid, "Grid");
    });
}
