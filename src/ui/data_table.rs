use egui_extras::{Column, TableBuilder};

use crate::app::GwMonitor;
use crate::constants::layout::{PREVIEW_ROWS, PREVIEW_ROW_HEIGHT};
use crate::pipeline::{FilteredSeries, SortOrder, TickGranularity};

/// First rows of the selection in the chosen order
pub fn render_preview_table(app: &mut GwMonitor, series: &FilteredSeries, ui: &mut eframe::egui::Ui) {
    profiling::scope!("render_preview_table");

    let order = app.state.selection.sort_order;
    let rows: Vec<_> = series.ordered(order).into_iter().take(PREVIEW_ROWS).collect();
    let time_header = app
        .state
        .store
        .as_ref()
        .map(|s| s.time_column().to_string())
        .unwrap_or_default();

    ui.horizontal(|ui| {
        ui.strong("Selected data preview");
        ui.label(format!("({} of {} rows)", rows.len(), series.len()));
    });

    TableBuilder::new(ui)
        .id_salt("preview_table")
        .striped(true)
        .cell_layout(eframe::egui::Layout::left_to_right(eframe::egui::Align::Center))
        .column(Column::initial(150.0).resizable(true))
        .column(Column::remainder())
        .header(22.0, |mut header| {
            header.col(|ui| {
                let indicator = match order {
                    SortOrder::Ascending => " ↑",
                    SortOrder::Descending => " ↓",
                };
                let btn = eframe::egui::Button::new(
                    eframe::egui::RichText::new(format!("{}{}", time_header, indicator)).strong(),
                )
                .frame(false);
                if ui.add(btn).on_hover_text("Click to reverse order").clicked() {
                    app.state.selection.sort_order = order.toggled();
                    app.state.selection.mark_dirty();
                }
            });
            header.col(|ui| {
                ui.strong(series.station());
            });
        })
        .body(|body| {
            body.rows(PREVIEW_ROW_HEIGHT, rows.len(), |mut row| {
                let reading = rows[row.index()];
                row.col(|ui| {
                    ui.label(TickGranularity::Minute.label(&reading.timestamp));
                });
                row.col(|ui| match reading.value {
                    Some(v) => {
                        ui.label(format!("{}", v));
                    }
                    None => {
                        ui.weak("–");
                    }
                });
            });
        });
}

/// First and last reporting time of every station
pub fn render_coverage_table(app: &GwMonitor, ui: &mut eframe::egui::Ui) {
    let Some(store) = &app.state.store else {
        return;
    };
    let coverages = store.coverages();

    TableBuilder::new(ui)
        .id_salt("coverage_table")
        .striped(true)
        .column(Column::auto())
        .columns(Column::auto(), 3)
        .header(20.0, |mut header| {
            for title in ["Station", "First", "Last", "Count"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(PREVIEW_ROW_HEIGHT, coverages.len(), |mut row| {
                let (station, coverage) = coverages[row.index()];
                row.col(|ui| {
                    ui.label(station);
                });
                match coverage {
                    Some(c) => {
                        row.col(|ui| {
                            ui.label(TickGranularity::Date.label(&c.first));
                        });
                        row.col(|ui| {
                            ui.label(TickGranularity::Date.label(&c.last));
                        });
                        row.col(|ui| {
                            ui.label(c.count.to_string());
                        });
                    }
                    None => {
                        for _ in 0..3 {
                            row.col(|ui| {
                                ui.weak("no data");
                            });
                        }
                    }
                }
            });
        });
}
