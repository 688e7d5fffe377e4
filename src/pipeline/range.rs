//! Y-axis display bounds for a filtered series

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::window::FilteredSeries;
use crate::constants::range::{MAX_MULTIPLIER, MIN_MULTIPLIER};
use crate::data::{Stats, calculate_stats};
use crate::error::{GwError, Result};

/// Y-axis bounds of a chart; not necessarily the data min/max
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRange {
    pub low: f64,
    pub high: f64,
}

impl DisplayRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    pub fn center(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Widen a zero-height range by `pad` on each side so it can be drawn
    pub fn padded_if_flat(self, pad: f64) -> Self {
        if self.span() > 0.0 {
            self
        } else {
            Self::new(self.low - pad, self.high + pad)
        }
    }
}

/// Which bounds the chart shows
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RangeMode {
    /// Centered on the mean, sized by spread × multiplier
    #[default]
    Recommended,
    /// Data min to data max
    FullExtent,
    /// Fixed distances below and above the mean
    FixedOffset { below: f64, above: f64 },
}

/// Serializable selector of a `RangeMode`; offsets are stored separately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeModeKind {
    #[default]
    Recommended,
    FullExtent,
    FixedOffset,
}

impl RangeModeKind {
    pub const ALL: [RangeModeKind; 3] = [
        RangeModeKind::Recommended,
        RangeModeKind::FullExtent,
        RangeModeKind::FixedOffset,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RangeModeKind::Recommended => "Recommended",
            RangeModeKind::FullExtent => "Full extent",
            RangeModeKind::FixedOffset => "Fixed offset",
        }
    }
}

impl RangeMode {
    pub fn from_kind(kind: RangeModeKind, below: f64, above: f64) -> Self {
        match kind {
            RangeModeKind::Recommended => RangeMode::Recommended,
            RangeModeKind::FullExtent => RangeMode::FullExtent,
            RangeModeKind::FixedOffset => RangeMode::FixedOffset { below, above },
        }
    }

    pub fn kind(&self) -> RangeModeKind {
        match self {
            RangeMode::Recommended => RangeModeKind::Recommended,
            RangeMode::FullExtent => RangeModeKind::FullExtent,
            RangeMode::FixedOffset { .. } => RangeModeKind::FixedOffset,
        }
    }
}

/// Computes display ranges with a fixed range-size multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeAdvisor {
    multiplier: u32,
}

impl Default for RangeAdvisor {
    fn default() -> Self {
        Self {
            multiplier: crate::constants::range::DEFAULT_MULTIPLIER,
        }
    }
}

impl RangeAdvisor {
    /// Multiplier is clamped to the selectable 1..=20
    pub fn new(multiplier: u32) -> Self {
        let clamped = clamp_multiplier(multiplier);
        if clamped != multiplier {
            debug!(requested = multiplier, used = clamped, "range multiplier clamped");
        }
        Self { multiplier: clamped }
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// `mean ± spread * multiplier / 2`
    pub fn recommend(&self, series: &FilteredSeries) -> Result<DisplayRange> {
        let stats = require_stats(series, "recommend")?;
        let half = stats.spread() * f64::from(self.multiplier) / 2.0;
        Ok(DisplayRange::new(stats.mean - half, stats.mean + half))
    }

    /// Data min to data max
    pub fn full_extent(&self, series: &FilteredSeries) -> Result<DisplayRange> {
        let stats = require_stats(series, "full_extent")?;
        Ok(DisplayRange::new(stats.min, stats.max))
    }

    /// `mean - below .. mean + above`
    pub fn fixed_offset(&self, series: &FilteredSeries, below: f64, above: f64) -> Result<DisplayRange> {
        let stats = require_stats(series, "fixed_offset")?;
        Ok(DisplayRange::new(stats.mean - below, stats.mean + above))
    }

    pub fn advise(&self, series: &FilteredSeries, mode: RangeMode) -> Result<DisplayRange> {
        match mode {
            RangeMode::Recommended => self.recommend(series),
            RangeMode::FullExtent => self.full_extent(series),
            RangeMode::FixedOffset { below, above } => self.fixed_offset(series, below, above),
        }
    }
}

pub fn clamp_multiplier(multiplier: u32) -> u32 {
    multiplier.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
}

fn require_stats(series: &FilteredSeries, operation: &str) -> Result<Stats> {
    calculate_stats(&series.values()).ok_or_else(|| GwError::InsufficientData {
        operation: operation.to_string(),
        actual: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{LoadReport, TimeSeriesStore};
    use crate::pipeline::window::{HourFilter, TimeWindow, filter};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn store_with(values: &[Option<f64>]) -> TimeSeriesStore {
        let rows = values
            .iter()
            .enumerate()
            .map(|(i, v)| (start() + Duration::hours(i as i64), vec![*v]))
            .collect();
        TimeSeriesStore::assemble("Time".into(), vec!["A".into()], rows, LoadReport::default())
    }

    fn whole(store: &TimeSeriesStore) -> FilteredSeries {
        filter(store, "A", &TimeWindow::full(store.extent().unwrap(), HourFilter::All)).unwrap()
    }

    fn hourly() -> TimeSeriesStore {
        let values: Vec<_> = (0..=48).map(|i| Some(i as f64)).collect();
        store_with(&values)
    }

    #[test]
    fn test_recommend_hourly_scenario() {
        let store = hourly();
        let range = RangeAdvisor::new(5).recommend(&whole(&store)).unwrap();
        assert_eq!(range, DisplayRange::new(-96.0, 144.0));
    }

    #[test]
    fn test_recommend_is_centered_and_sized() {
        let store = store_with(&[Some(2.0), Some(4.0), None, Some(9.0)]);
        let series = whole(&store);

        for m in 1..=20 {
            let range = RangeAdvisor::new(m).recommend(&series).unwrap();
            assert!((range.center() - 5.0).abs() < 1e-9);
            assert!((range.span() - 7.0 * f64::from(m)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let store = hourly();
        let series = whole(&store);
        let advisor = RangeAdvisor::new(7);
        assert_eq!(advisor.recommend(&series).unwrap(), advisor.recommend(&series).unwrap());
    }

    #[test]
    fn test_full_extent() {
        let store = store_with(&[Some(3.5), None, Some(-1.0), Some(2.0)]);
        let range = RangeAdvisor::default().full_extent(&whole(&store)).unwrap();
        assert_eq!(range, DisplayRange::new(-1.0, 3.5));
    }

    #[test]
    fn test_fixed_offset_matches_legacy_view() {
        let store = store_with(&[Some(10.0), Some(12.0)]);
        let series = whole(&store);
        let range = RangeAdvisor::default()
            .advise(&series, RangeMode::FixedOffset { below: 3.0, above: 4.0 })
            .unwrap();
        assert_eq!(range, DisplayRange::new(8.0, 15.0));
    }

    #[test]
    fn test_insufficient_data() {
        let store = store_with(&[None, None]);
        let series = whole(&store);
        let advisor = RangeAdvisor::default();

        assert!(matches!(
            advisor.recommend(&series),
            Err(GwError::InsufficientData { ref operation, actual: 0 }) if operation == "recommend"
        ));
        assert!(matches!(
            advisor.full_extent(&series),
            Err(GwError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_inverted_window_has_no_range() {
        let store = hourly();
        let (min, max) = store.extent().unwrap();
        let series = filter(&store, "A", &TimeWindow::new(max, min, HourFilter::All)).unwrap();
        let advisor = RangeAdvisor::default();

        assert!(series.is_inverted());
        assert!(matches!(advisor.recommend(&series), Err(GwError::InsufficientData { .. })));
        assert!(matches!(advisor.full_extent(&series), Err(GwError::InsufficientData { .. })));
    }

    #[test]
    fn test_multiplier_is_clamped() {
        assert_eq!(RangeAdvisor::new(0).multiplier(), 1);
        assert_eq!(RangeAdvisor::new(99).multiplier(), 20);
        assert_eq!(RangeAdvisor::new(5).multiplier(), 5);
    }

    #[test]
    fn test_flat_range_padding() {
        let store = store_with(&[Some(4.0), Some(4.0)]);
        let range = RangeAdvisor::default().recommend(&whole(&store)).unwrap();
        assert_eq!(range, DisplayRange::new(4.0, 4.0));

        let padded = range.padded_if_flat(0.5);
        assert_eq!(padded, DisplayRange::new(3.5, 4.5));
        assert!(padded.contains(4.0));
        assert_eq!(DisplayRange::new(0.0, 1.0).padded_if_flat(0.5), DisplayRange::new(0.0, 1.0));
    }

    #[test]
    fn test_mode_kind_round_trip() {
        for kind in RangeModeKind::ALL {
            assert_eq!(RangeMode::from_kind(kind, 3.0, 4.0).kind(), kind);
        }
    }
}
