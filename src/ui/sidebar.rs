use egui_extras::DatePickerButton;

use crate::app::GwMonitor;
use crate::constants::range::{MAX_MULTIPLIER, MIN_MULTIPLIER};
use crate::pipeline::{RangeModeKind, SortOrder, TimeWindow};
use crate::widgets::HourSelect;

/// Render the left control panel: station list, period and range options
pub fn render_sidebar(app: &mut GwMonitor, ui: &mut eframe::egui::Ui) {
    let before = app.state.selection.clone();

    eframe::egui::ScrollArea::vertical().show(ui, |ui| {
        render_station_list(app, ui);
        ui.separator();
        render_period(app, ui);
        ui.separator();
        render_range_options(app, ui);

        eframe::egui::CollapsingHeader::new("📅 Station coverage")
            .id_salt("coverage")
            .default_open(app.state.view.show_coverage)
            .show(ui, |ui| {
                super::data_table::render_coverage_table(app, ui);
            });
    });

    if app.state.selection != before {
        app.state.selection.mark_dirty();
    }
}

fn render_station_list(app: &mut GwMonitor, ui: &mut eframe::egui::Ui) {
    ui.heading("Stations");

    let stations = app.state.stations();
    eframe::egui::ScrollArea::vertical()
        .id_salt("station_list")
        .max_height(220.0)
        .show(ui, |ui| {
            for station in stations {
                let is_selected = app.state.selection.station.as_deref() == Some(station.as_str());
                if ui.selectable_label(is_selected, &station).clicked() && !is_selected {
                    app.state.selection.station = Some(station);
                }
            }
        });
}

fn render_period(app: &mut GwMonitor, ui: &mut eframe::egui::Ui) {
    ui.heading("Period");
    let selection = &mut app.state.selection;

    ui.horizontal(|ui| {
        ui.label("Start");
        ui.add(DatePickerButton::new(&mut selection.start_date).id_salt("start_date"));
    });
    HourSelect::new("Start time", "start_hour", &mut selection.start_hour).show(ui);

    ui.horizontal(|ui| {
        ui.label("End");
        ui.add(DatePickerButton::new(&mut selection.end_date).id_salt("end_date"));
    });
    HourSelect::new("End time", "end_hour", &mut selection.end_hour).show(ui);

    ui.add_space(4.0);
    HourSelect::new("Hour of day", "hour_filter", &mut selection.hour_index)
        .with_all()
        .show(ui)
        .on_hover_text("Only show readings taken during this hour");

    let extent = app.state.store.as_ref().and_then(|s| s.extent().ok());
    ui.horizontal(|ui| {
        if let Some(extent) = extent {
            if ui.button("Last days").on_hover_text("Default period").clicked() {
                let window = TimeWindow::default_for(
                    extent,
                    app.state.config.default_lookback_days,
                    app.state.selection.hour_filter(),
                );
                app.state.selection.set_period(&window);
            }
            if ui.button("All").on_hover_text("Whole dataset").clicked() {
                let window = TimeWindow::full(extent, app.state.selection.hour_filter());
                app.state.selection.set_period(&window);
            }
        }
    });
}

fn render_range_options(app: &mut GwMonitor, ui: &mut eframe::egui::Ui) {
    ui.heading("Display range");
    let selection = &mut app.state.selection;

    for kind in RangeModeKind::ALL {
        ui.radio_value(&mut selection.range_mode, kind, kind.label());
    }

    match selection.range_mode {
        RangeModeKind::Recommended => {
            ui.add(
                eframe::egui::Slider::new(&mut selection.multiplier, MIN_MULTIPLIER..=MAX_MULTIPLIER)
                    .text("Range size"),
            )
            .on_hover_text("Multiple of the data spread shown around the mean");
        }
        RangeModeKind::FixedOffset => {
            ui.horizontal(|ui| {
                ui.label("Below mean");
                ui.add(
                    eframe::egui::DragValue::new(&mut selection.offset_below)
                        .speed(0.1)
                        .range(0.0..=f64::MAX),
                );
            });
            ui.horizontal(|ui| {
                ui.label("Above mean");
                ui.add(
                    eframe::egui::DragValue::new(&mut selection.offset_above)
                        .speed(0.1)
                        .range(0.0..=f64::MAX),
                );
            });
        }
        RangeModeKind::FullExtent => {}
    }

    ui.separator();
    ui.horizontal(|ui| {
        ui.label("Order");
        ui.radio_value(&mut selection.sort_order, SortOrder::Ascending, "Oldest first");
        ui.radio_value(&mut selection.sort_order, SortOrder::Descending, "Newest first");
    });
}
