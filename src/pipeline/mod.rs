//! Selection → chart payload
//!
//! `recompute` is a pure function of the store and the current selection.
//! The GUI calls it whenever the selection changes; the CLI calls it once.

pub mod export;
pub mod range;
pub mod ticks;
pub mod window;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::data::{Stats, TimeSeriesStore, calculate_stats};
use crate::error::{GwError, Result};

pub use range::{DisplayRange, RangeAdvisor, RangeMode, RangeModeKind};
pub use ticks::{Tick, TickGranularity, TickSampler};
pub use window::{FilteredSeries, HourFilter, SortOrder, TimeWindow};

/// Everything the user picked that affects the chart
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub station: String,
    pub window: TimeWindow,
    pub multiplier: u32,
    pub range_mode: RangeMode,
    pub sort_order: SortOrder,
}

/// Data ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPayload {
    pub title: String,
    /// Present points in the selected presentation order
    pub points: Vec<(NaiveDateTime, f64)>,
    pub range: DisplayRange,
    /// First and last plotted instant
    pub extent: (NaiveDateTime, NaiveDateTime),
    pub ticks: Vec<Tick>,
    pub stats: Stats,
    pub series: FilteredSeries,
}

impl ChartPayload {
    pub fn station(&self) -> &str {
        self.series.station()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}

/// Result of one recompute pass
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Ready(Box<ChartPayload>),
    /// Window is valid but holds no present value for the station
    NoData { window: TimeWindow, series: FilteredSeries },
    /// Window start lies after its end
    InvalidWindow { window: TimeWindow },
}

impl RenderOutcome {
    pub fn payload(&self) -> Option<&ChartPayload> {
        match self {
            RenderOutcome::Ready(payload) => Some(&**payload),
            _ => None,
        }
    }

    /// The user-facing explanation when nothing can be drawn
    pub fn as_error(&self) -> Option<GwError> {
        match self {
            RenderOutcome::Ready(_) => None,
            RenderOutcome::NoData { series, .. } => Some(GwError::InsufficientData {
                operation: "chart".to_string(),
                actual: series.values().len(),
            }),
            RenderOutcome::InvalidWindow { window } => Some(GwError::InvalidWindow {
                start: window.start,
                end: window.end,
            }),
        }
    }
}

/// Filter, size and label one chart
pub fn recompute(store: &TimeSeriesStore, selection: &Selection, sampler: &TickSampler) -> Result<RenderOutcome> {
    profiling::scope!("pipeline::recompute");

    let series = window::filter(store, &selection.station, &selection.window)?;
    if series.is_inverted() {
        return Ok(RenderOutcome::InvalidWindow {
            window: selection.window,
        });
    }

    let advisor = RangeAdvisor::new(selection.multiplier);
    let range = match advisor.advise(&series, selection.range_mode) {
        Ok(range) => range,
        Err(GwError::InsufficientData { .. }) => {
            debug!(station = %selection.station, rows = series.len(), "no values in window");
            return Ok(RenderOutcome::NoData {
                window: selection.window,
                series,
            });
        }
        Err(e) => return Err(e),
    };
    let Some(stats) = calculate_stats(&series.values()) else {
        return Ok(RenderOutcome::NoData {
            window: selection.window,
            series,
        });
    };

    let points: Vec<(NaiveDateTime, f64)> = match selection.sort_order {
        SortOrder::Ascending => series.points(),
        SortOrder::Descending => series.points().into_iter().rev().collect(),
    };
    let times: Vec<NaiveDateTime> = points.iter().map(|(t, _)| *t).collect();
    let ticks = sampler.sample_ticks(&times);

    let first = times.iter().min().copied().unwrap_or(selection.window.start);
    let last = times.iter().max().copied().unwrap_or(selection.window.end);

    let title = match selection.window.hour_filter {
        HourFilter::All => format!("{} ({})", selection.station, selection.window.label()),
        hour => format!(
            "{} ({}, {} only)",
            selection.station,
            selection.window.label(),
            hour
        ),
    };

    Ok(RenderOutcome::Ready(Box::new(ChartPayload {
        title,
        points,
        range,
        extent: (first, last),
        ticks,
        stats,
        series,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LoadReport;
    use chrono::{Duration, NaiveDate};

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn store() -> TimeSeriesStore {
        let rows = (0..=48)
            .map(|i| {
                let b = if i < 24 { None } else { Some(1.0) };
                (at(1, 0) + Duration::hours(i), vec![Some(i as f64), b])
            })
            .collect();
        TimeSeriesStore::assemble(
            "Time".into(),
            vec!["A".into(), "B".into()],
            rows,
            LoadReport::default(),
        )
    }

    fn selection(station: &str, start: NaiveDateTime, end: NaiveDateTime) -> Selection {
        Selection {
            station: station.to_string(),
            window: TimeWindow::new(start, end, HourFilter::All),
            multiplier: 5,
            range_mode: RangeMode::Recommended,
            sort_order: SortOrder::Ascending,
        }
    }

    #[test]
    fn test_ready_payload() {
        let store = store();
        let outcome = recompute(&store, &selection("A", at(1, 0), at(3, 0)), &TickSampler::default())
            .unwrap();
        let payload = outcome.payload().unwrap();

        assert_eq!(payload.station(), "A");
        assert_eq!(payload.point_count(), 49);
        assert_eq!(payload.range, DisplayRange::new(-96.0, 144.0));
        assert_eq!(payload.extent, (at(1, 0), at(3, 0)));
        assert_eq!(payload.ticks.len(), 5);
        assert_eq!(payload.stats.mean, 24.0);
        assert!(outcome.as_error().is_none());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let store = store();
        let sel = selection("A", at(1, 6), at(2, 6));
        let sampler = TickSampler::default();
        assert_eq!(
            recompute(&store, &sel, &sampler).unwrap(),
            recompute(&store, &sel, &sampler).unwrap()
        );
    }

    #[test]
    fn test_no_data_outcome() {
        let store = store();
        let outcome =
            recompute(&store, &selection("B", at(1, 0), at(1, 12)), &TickSampler::default()).unwrap();
        match &outcome {
            RenderOutcome::NoData { series, .. } => assert_eq!(series.len(), 13),
            other => panic!("expected NoData, got {other:?}"),
        }
        assert!(matches!(outcome.as_error(), Some(GwError::InsufficientData { .. })));
    }

    #[test]
    fn test_inverted_outcome() {
        let store = store();
        let outcome =
            recompute(&store, &selection("A", at(2, 0), at(1, 0)), &TickSampler::default()).unwrap();
        assert!(matches!(outcome, RenderOutcome::InvalidWindow { .. }));
        assert!(matches!(outcome.as_error(), Some(GwError::InvalidWindow { .. })));
    }

    #[test]
    fn test_descending_order_and_hour_title() {
        let store = store();
        let mut sel = selection("A", at(1, 0), at(3, 0));
        sel.sort_order = SortOrder::Descending;
        sel.window.hour_filter = HourFilter::Hour(12);

        let outcome = recompute(&store, &sel, &TickSampler::default()).unwrap();
        let payload = outcome.payload().unwrap();
        assert_eq!(payload.points, vec![(at(2, 12), 36.0), (at(1, 12), 12.0)]);
        assert_eq!(payload.ticks[0].timestamp, at(2, 12));
        assert_eq!(payload.extent, (at(1, 12), at(2, 12)));
        assert!(payload.title.contains("12:00 only"));
    }

    #[test]
    fn test_unknown_station_is_an_error() {
        let store = store();
        assert!(matches!(
            recompute(&store, &selection("Z", at(1, 0), at(2, 0)), &TickSampler::default()),
            Err(GwError::StationNotFound { .. })
        ));
    }
}
