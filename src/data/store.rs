//! In-memory table of groundwater readings, one column per station

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::error::{GwError, Result};

/// One observation of one station
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub station_id: Arc<str>,
    /// `None` for a missing or unrecorded measurement
    pub value: Option<f64>,
}

/// First and last timestamps at which a station has a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
    /// Number of present values
    pub count: usize,
}

/// What happened while the source was normalized
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Data rows found in the source
    pub rows_read: usize,
    /// Rows excluded because their timestamp could not be parsed
    pub rows_dropped: usize,
    /// First few rejected timestamp cells, for diagnostics
    pub dropped_samples: Vec<String>,
    /// Per station (source order), cells coerced to absent
    pub absent_cells: Vec<(String, usize)>,
}

impl LoadReport {
    /// Rows that made it into the store
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }
}

#[derive(Debug, Clone)]
struct StationColumn {
    id: Arc<str>,
    values: Vec<Option<f64>>,
}

/// Readings grouped by station and indexed by timestamp.
///
/// Rows are kept sorted ascending by timestamp (stable, so duplicate
/// timestamps keep their source order). The store is immutable once built.
#[derive(Debug, Clone)]
pub struct TimeSeriesStore {
    time_column: String,
    timestamps: Vec<NaiveDateTime>,
    stations: Vec<StationColumn>,
    report: LoadReport,
}

impl TimeSeriesStore {
    /// Assemble a store from already-parsed rows.
    ///
    /// Every row must carry one value slot per station.
    pub(crate) fn assemble(
        time_column: String,
        station_ids: Vec<String>,
        mut rows: Vec<(NaiveDateTime, Vec<Option<f64>>)>,
        report: LoadReport,
    ) -> Self {
        rows.sort_by_key(|(timestamp, _)| *timestamp);

        let mut stations: Vec<StationColumn> = station_ids
            .into_iter()
            .map(|id| StationColumn {
                id: Arc::from(id),
                values: Vec::with_capacity(rows.len()),
            })
            .collect();

        let mut timestamps = Vec::with_capacity(rows.len());
        for (timestamp, values) in rows {
            timestamps.push(timestamp);
            for (idx, column) in stations.iter_mut().enumerate() {
                column.values.push(values.get(idx).copied().flatten());
            }
        }

        Self {
            time_column,
            timestamps,
            stations,
            report,
        }
    }

    /// Header of the timestamp column, as found in the source
    pub fn time_column(&self) -> &str {
        &self.time_column
    }

    /// Station ids in source column order
    pub fn stations(&self) -> Vec<&str> {
        self.stations.iter().map(|s| s.id.as_ref()).collect()
    }

    /// Check whether a station exists
    pub fn has_station(&self, station_id: &str) -> bool {
        self.stations.iter().any(|s| s.id.as_ref() == station_id)
    }

    /// Number of rows (timestamps) in the store
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// True when no row survived parsing
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Load diagnostics
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// All timestamps, ascending
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Raw value column of a station, aligned with `timestamps()`
    pub fn values(&self, station_id: &str) -> Result<&[Option<f64>]> {
        self.column(station_id).map(|c| c.values.as_slice())
    }

    /// Readings of one station ordered by timestamp ascending
    pub fn series(&self, station_id: &str) -> Result<Vec<Reading>> {
        let column = self.column(station_id)?;
        Ok(self.readings_between(column, 0, self.timestamps.len()))
    }

    /// Readings of one station in the row range `[from, to)`
    pub(crate) fn slice(&self, station_id: &str, from: usize, to: usize) -> Result<Vec<Reading>> {
        let column = self.column(station_id)?;
        Ok(self.readings_between(column, from, to.min(self.timestamps.len())))
    }

    /// Earliest and latest timestamp in the store
    pub fn extent(&self) -> Result<(NaiveDateTime, NaiveDateTime)> {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(&min), Some(&max)) => Ok((min, max)),
            _ => Err(GwError::EmptyStore),
        }
    }

    /// First/last timestamps with a value for one station
    pub fn coverage(&self, station_id: &str) -> Result<Option<Coverage>> {
        let column = self.column(station_id)?;
        let mut present = self
            .timestamps
            .iter()
            .zip(&column.values)
            .filter(|(_, v)| v.is_some())
            .map(|(t, _)| *t);

        let Some(first) = present.next() else {
            return Ok(None);
        };
        let (last, count) = present.fold((first, 1), |(_, n), t| (t, n + 1));
        Ok(Some(Coverage { first, last, count }))
    }

    /// Coverage of every station, in source column order
    pub fn coverages(&self) -> Vec<(&str, Option<Coverage>)> {
        self.stations
            .iter()
            .map(|s| (s.id.as_ref(), self.coverage(&s.id).ok().flatten()))
            .collect()
    }

    fn column(&self, station_id: &str) -> Result<&StationColumn> {
        self.stations
            .iter()
            .find(|s| s.id.as_ref() == station_id)
            .ok_or_else(|| GwError::StationNotFound {
                station: station_id.to_string(),
            })
    }

    fn readings_between(&self, column: &StationColumn, from: usize, to: usize) -> Vec<Reading> {
        if from >= to {
            return Vec::new();
        }
        self.timestamps[from..to]
            .iter()
            .zip(&column.values[from..to])
            .map(|(&timestamp, &value)| Reading {
                timestamp,
                station_id: Arc::clone(&column.id),
                value,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn sample_store() -> TimeSeriesStore {
        TimeSeriesStore::assemble(
            "Time".to_string(),
            vec!["A".to_string(), "B".to_string()],
            vec![
                (at(2, 0), vec![Some(3.0), None]),
                (at(1, 0), vec![None, Some(1.0)]),
                (at(1, 12), vec![Some(2.0), Some(1.5)]),
                (at(3, 0), vec![None, None]),
            ],
            LoadReport::default(),
        )
    }

    #[test]
    fn test_rows_sorted_by_timestamp() {
        let store = sample_store();
        assert_eq!(store.timestamps(), &[at(1, 0), at(1, 12), at(2, 0), at(3, 0)]);
        assert_eq!(store.values("A").unwrap(), &[None, Some(2.0), Some(3.0), None]);
    }

    #[test]
    fn test_series_keeps_absent_values() {
        let store = sample_store();
        let series = store.series("A").unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].value, None);
        assert_eq!(series[1].value, Some(2.0));
        assert!(series.iter().all(|r| r.station_id.as_ref() == "A"));
        assert!(series.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_unknown_station() {
        let store = sample_store();
        assert!(matches!(
            store.series("Z"),
            Err(GwError::StationNotFound { station }) if station == "Z"
        ));
    }

    #[test]
    fn test_extent_and_empty_store() {
        let store = sample_store();
        assert_eq!(store.extent().unwrap(), (at(1, 0), at(3, 0)));

        let empty = TimeSeriesStore::assemble(
            "Time".to_string(),
            vec!["A".to_string()],
            Vec::new(),
            LoadReport::default(),
        );
        assert!(empty.is_empty());
        assert!(matches!(empty.extent(), Err(GwError::EmptyStore)));
    }

    #[test]
    fn test_coverage_uses_present_values_only() {
        let store = sample_store();
        let cov = store.coverage("A").unwrap().unwrap();
        assert_eq!(cov.first, at(1, 12));
        assert_eq!(cov.last, at(2, 0));
        assert_eq!(cov.count, 2);

        let cov = store.coverage("B").unwrap().unwrap();
        assert_eq!((cov.first, cov.last, cov.count), (at(1, 0), at(1, 12), 2));
    }

    #[test]
    fn test_duplicate_timestamps_pass_through() {
        let store = TimeSeriesStore::assemble(
            "Time".to_string(),
            vec!["A".to_string()],
            vec![(at(1, 0), vec![Some(1.0)]), (at(1, 0), vec![Some(2.0)])],
            LoadReport::default(),
        );
        let values: Vec<_> = store.series("A").unwrap().iter().map(|r| r.value).collect();
        assert_eq!(values, vec![Some(1.0), Some(2.0)]);
    }
}
