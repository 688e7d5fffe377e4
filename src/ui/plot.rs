use chrono::{DateTime, NaiveDateTime, Utc};
use egui_plot::{GridMark, HLine, Line, Plot, Points};

use crate::app::GwMonitor;
use crate::constants::layout::MIN_PLOT_HEIGHT;
use crate::constants::range::FLAT_RANGE_PAD;
use crate::pipeline::{ChartPayload, TickGranularity};

/// Seconds since the epoch, the x coordinate of a reading
fn to_x(timestamp: &NaiveDateTime) -> f64 {
    timestamp.and_utc().timestamp() as f64
}

fn from_x(x: f64) -> Option<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp(x.round() as i64, 0).map(|dt| dt.naive_utc())
}

/// Render the chart of a ready payload
pub fn render_plot(app: &mut GwMonitor, payload: &ChartPayload, ui: &mut eframe::egui::Ui) {
    profiling::scope!("render_plot");

    let points: Vec<[f64; 2]> = payload.points.iter().map(|(t, v)| [to_x(t), *v]).collect();
    let range = payload.range.padded_if_flat(FLAT_RANGE_PAD);
    let granularity = app.state.config.tick_granularity;

    // Tick positions come from the sampler, not from egui's spacing
    let tick_marks: Vec<GridMark> = {
        let xs: Vec<f64> = payload.ticks.iter().map(|t| to_x(&t.timestamp)).collect();
        let step = xs
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .fold(f64::INFINITY, f64::min);
        let step = if step.is_finite() && step > 0.0 { step } else { 3600.0 };
        xs.into_iter()
            .map(|value| GridMark {
                value,
                step_size: step,
            })
            .collect()
    };
    let tick_labels: Vec<(f64, String)> = payload
        .ticks
        .iter()
        .map(|t| (to_x(&t.timestamp), t.label.clone()))
        .collect();

    let plot_height = ui.available_height().max(MIN_PLOT_HEIGHT);
    let (x_min, x_max) = (to_x(&payload.extent.0), to_x(&payload.extent.1));

    let mut plot = Plot::new("groundwater_plot")
        .show_grid(app.state.view.show_grid)
        .height(plot_height)
        .default_x_bounds(x_min, x_max.max(x_min + 1.0))
        .default_y_bounds(range.low, range.high)
        .x_grid_spacer(move |_input| tick_marks.clone())
        .x_axis_formatter(move |mark, _range| {
            tick_labels
                .iter()
                .find(|(x, _)| (x - mark.value).abs() < 0.5)
                .map(|(_, label)| label.clone())
                .or_else(|| from_x(mark.value).map(|t| granularity.label(&t)))
                .unwrap_or_default()
        })
        .label_formatter(|name, value| {
            let time = from_x(value.x)
                .map(|t| TickGranularity::Minute.label(&t))
                .unwrap_or_default();
            if name.is_empty() {
                format!("{}\n{:.3}", time, value.y)
            } else {
                format!("{}\n{}\n{:.3}", name, time, value.y)
            }
        });

    if app.state.view.reset_bounds {
        plot = plot.reset();
        app.state.view.reset_bounds = false;
    }

    if app.state.view.show_legend {
        plot = plot.legend(egui_plot::Legend::default().position(egui_plot::Corner::RightTop));
    }

    let station = payload.station().to_string();
    let mean = payload.stats.mean;
    let show_mean = app.state.view.show_mean_line;
    let single_point = points.len() == 1;

    let plot_response = plot.show(ui, |plot_ui| {
        if single_point {
            plot_ui.points(Points::new(station.clone(), points.clone()).radius(4.0));
        } else {
            plot_ui.line(Line::new(station.clone(), points.clone()).width(1.5));
        }
        if show_mean {
            plot_ui.hline(
                HLine::new(format!("{} mean", station), mean)
                    .style(egui_plot::LineStyle::Dashed { length: 8.0 })
                    .width(1.0),
            );
        }
    });

    // Handle right-click context menu
    plot_response.response.context_menu(|ui| {
        if ui.button("Reset View").clicked() {
            app.state.view.reset_bounds = true;
            ui.close();
        }
        if ui.button("Toggle Grid").clicked() {
            app.state.view.show_grid = !app.state.view.show_grid;
            ui.close();
        }
        if ui.button("Toggle Legend").clicked() {
            app.state.view.show_legend = !app.state.view.show_legend;
            ui.close();
        }
        if ui.button("Toggle Mean Line").clicked() {
            app.state.view.show_mean_line = !app.state.view.show_mean_line;
            ui.close();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_x_coordinate_round_trip() {
        let t = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        assert_eq!(from_x(to_x(&t)), Some(t));
        assert!(to_x(&t) < to_x(&(t + chrono::Duration::hours(1))));
    }
}
