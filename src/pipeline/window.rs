//! Time-window selection over one station's readings

use std::fmt;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::window::{ALL_HOURS_INDEX, LAST_SELECTABLE_HOUR};
use crate::data::{Reading, TimeSeriesStore};
use crate::error::{GwError, Result};

/// Optional hour-of-day constraint of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourFilter {
    #[default]
    All,
    /// Keep only readings taken during this hour (0-23)
    Hour(u8),
}

impl HourFilter {
    /// A specific hour of day
    pub fn hour(hour: u32) -> Result<Self> {
        if hour <= LAST_SELECTABLE_HOUR {
            Ok(HourFilter::Hour(hour as u8))
        } else {
            Err(GwError::InvalidHour(hour))
        }
    }

    /// Selector index: 0-23 pick an hour, 24 means all hours
    pub fn from_index(index: u32) -> Result<Self> {
        if index == ALL_HOURS_INDEX {
            Ok(HourFilter::All)
        } else {
            Self::hour(index)
        }
    }

    /// Inverse of `from_index`
    pub fn index(&self) -> u32 {
        match self {
            HourFilter::All => ALL_HOURS_INDEX,
            HourFilter::Hour(h) => u32::from(*h),
        }
    }

    /// Config representation: `None` means all hours
    pub fn from_option(hour: Option<u8>) -> Result<Self> {
        match hour {
            None => Ok(HourFilter::All),
            Some(h) => Self::hour(u32::from(h)),
        }
    }

    pub fn as_option(&self) -> Option<u8> {
        match self {
            HourFilter::All => None,
            HourFilter::Hour(h) => Some(*h),
        }
    }

    pub fn matches(&self, timestamp: &NaiveDateTime) -> bool {
        match self {
            HourFilter::All => true,
            HourFilter::Hour(h) => timestamp.hour() == u32::from(*h),
        }
    }
}

impl fmt::Display for HourFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HourFilter::All => write!(f, "All hours"),
            HourFilter::Hour(h) => write!(f, "{:02}:00", h),
        }
    }
}

/// Presentation order of a filtered series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// A closed time interval, optionally narrowed to one hour of day.
///
/// `start <= end` is not enforced here; `filter` treats an inverted window as
/// selecting nothing and flags the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub hour_filter: HourFilter,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, hour_filter: HourFilter) -> Self {
        Self {
            start,
            end,
            hour_filter,
        }
    }

    /// Compose a window from date pickers and time-of-day pickers
    pub fn from_parts(
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_date: NaiveDate,
        end_time: NaiveTime,
        hour_filter: HourFilter,
    ) -> Self {
        Self::new(
            start_date.and_time(start_time),
            end_date.and_time(end_time),
            hour_filter,
        )
    }

    /// Window covering a whole store extent
    pub fn full(extent: (NaiveDateTime, NaiveDateTime), hour_filter: HourFilter) -> Self {
        Self::new(extent.0, extent.1, hour_filter)
    }

    /// Window shown when a dataset is first opened.
    ///
    /// Starts at midnight of the day `lookback_days` before the newest reading
    /// (never before the oldest reading's day) and ends at the last selectable
    /// hour of the newest reading's day.
    pub fn default_for(
        extent: (NaiveDateTime, NaiveDateTime),
        lookback_days: i64,
        hour_filter: HourFilter,
    ) -> Self {
        let (min, max) = extent;
        let lookback = Duration::try_days(lookback_days.max(0))
            .and_then(|days| max.checked_sub_signed(days));
        let start_day = match lookback {
            Some(lookback) if lookback > min => lookback.date(),
            _ => min.date(),
        };

        Self::from_parts(
            start_day,
            NaiveTime::MIN,
            max.date(),
            last_selectable_time(),
            hour_filter,
        )
    }

    /// True when start lies after end
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Selection predicate: inclusive on both ends, then the hour constraint
    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        self.start <= *timestamp && *timestamp <= self.end && self.hour_filter.matches(timestamp)
    }

    /// Human-readable period, e.g. for chart titles
    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}

/// `23:00:00`, the latest value of the hourly end-time picker
pub fn last_selectable_time() -> NaiveTime {
    NaiveTime::from_hms_opt(LAST_SELECTABLE_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Readings of one station that fall inside a window, ascending by time
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSeries {
    station: Arc<str>,
    window: TimeWindow,
    readings: Vec<Reading>,
}

impl FilteredSeries {
    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Number of readings, present or absent
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Empty because the window itself was inverted, not for lack of data
    pub fn is_inverted(&self) -> bool {
        self.window.is_inverted()
    }

    /// Readings ascending by timestamp
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Readings in the requested presentation order
    pub fn ordered(&self, order: SortOrder) -> Vec<&Reading> {
        match order {
            SortOrder::Ascending => self.readings.iter().collect(),
            SortOrder::Descending => self.readings.iter().rev().collect(),
        }
    }

    /// Present values only, ascending
    pub fn values(&self) -> Vec<f64> {
        self.readings.iter().filter_map(|r| r.value).collect()
    }

    /// `(timestamp, value)` pairs with a present value, ascending
    pub fn points(&self) -> Vec<(NaiveDateTime, f64)> {
        self.readings
            .iter()
            .filter_map(|r| r.value.map(|v| (r.timestamp, v)))
            .collect()
    }

    /// First `rows` readings, ascending
    pub fn preview(&self, rows: usize) -> &[Reading] {
        &self.readings[..rows.min(self.readings.len())]
    }
}

/// Select the readings of `station_id` inside `window`.
///
/// An inverted window yields an empty, flagged series instead of an error so
/// that callers render one consistent "nothing selected" path; the inversion
/// is logged and remains visible through `FilteredSeries::is_inverted`.
pub fn filter(store: &TimeSeriesStore, station_id: &str, window: &TimeWindow) -> Result<FilteredSeries> {
    profiling::scope!("window::filter");

    if !store.has_station(station_id) {
        return Err(GwError::StationNotFound {
            station: station_id.to_string(),
        });
    }

    let readings = if window.is_inverted() {
        warn!(
            station = station_id,
            start = %window.start,
            end = %window.end,
            "window start is after its end; selecting nothing"
        );
        Vec::new()
    } else {
        // Timestamps are sorted, so the closed interval is one contiguous run
        let timestamps = store.timestamps();
        let from = timestamps.partition_point(|t| *t < window.start);
        let to = timestamps.partition_point(|t| *t <= window.end);

        let mut readings = store.slice(station_id, from, to)?;
        readings.retain(|r| window.hour_filter.matches(&r.timestamp));
        readings
    };

    Ok(FilteredSeries {
        station: Arc::from(station_id),
        window: *window,
        readings,
    })
}
