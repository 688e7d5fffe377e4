//! CSV export of a filtered selection or the whole table
//!
//! Timestamps are written at minute precision; absent values become empty
//! cells. Export never feeds back into loading.

use std::path::Path;

use polars::prelude::*;
use tracing::info;

use super::window::FilteredSeries;
use crate::constants::export::TIME_FORMAT;
use crate::data::TimeSeriesStore;
use crate::error::Result;

/// Selection export: `<time column>,<station>` then one row per reading
pub fn encode_series(series: &FilteredSeries, time_column: &str) -> Result<String> {
    profiling::scope!("export::encode_series");

    let times: Vec<String> = series
        .readings()
        .iter()
        .map(|r| r.timestamp.format(TIME_FORMAT).to_string())
        .collect();
    let values: Vec<Option<f64>> = series.readings().iter().map(|r| r.value).collect();

    let mut df = DataFrame::new(vec![
        Column::new(time_column.into(), times),
        Column::new(series.station().into(), values),
    ])?;
    write_frame(&mut df)
}

/// Whole-table export with stations in source column order
pub fn encode_store(store: &TimeSeriesStore) -> Result<String> {
    profiling::scope!("export::encode_store");

    let times: Vec<String> = store
        .timestamps()
        .iter()
        .map(|t| t.format(TIME_FORMAT).to_string())
        .collect();

    let mut columns = vec![Column::new(store.time_column().into(), times)];
    for station in store.stations() {
        columns.push(Column::new(station.into(), store.values(station)?.to_vec()));
    }

    let mut df = DataFrame::new(columns)?;
    write_frame(&mut df)
}

/// Write encoded CSV to disk
pub fn save_csv(path: &Path, csv: &str) -> Result<()> {
    std::fs::write(path, csv)?;
    info!(path = %path.display(), bytes = csv.len(), "exported CSV");
    Ok(())
}

/// Place encoded CSV on the system clipboard
pub fn copy_to_clipboard(csv: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(csv.to_owned())?;
    info!(bytes = csv.len(), "copied CSV to clipboard");
    Ok(())
}

fn write_frame(df: &mut DataFrame) -> Result<String> {
    let mut buf = Vec::new();
    CsvWriter::new(&mut buf).include_header(true).finish(df)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::window::{HourFilter, TimeWindow, filter};
    use tempfile::NamedTempFile;

    const SOURCE: &str = "Time,GW-1,GW-2\n\
                          2024-01-01 00:00:45,12.5,\n\
                          2024-01-01 01:00:00,,8.25\n\
                          2024-01-01 02:00:00,13,9\n";

    fn store() -> TimeSeriesStore {
        TimeSeriesStore::from_csv_str(SOURCE).unwrap()
    }

    #[test]
    fn test_selection_header_and_rows() {
        let store = store();
        let series =
            filter(&store, "GW-1", &TimeWindow::full(store.extent().unwrap(), HourFilter::All))
                .unwrap();
        let csv = encode_series(&series, store.time_column()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Time,GW-1");
        // seconds are truncated, absent values are empty cells
        assert_eq!(lines[1], "2024-01-01 00:00,12.5");
        assert_eq!(lines[2], "2024-01-01 01:00,");
        assert!(lines[3].starts_with("2024-01-01 02:00,13"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_empty_selection_is_header_only() {
        let store = store();
        let (min, max) = store.extent().unwrap();
        let series = filter(&store, "GW-2", &TimeWindow::new(max, min, HourFilter::All)).unwrap();
        let csv = encode_series(&series, store.time_column()).unwrap();
        assert_eq!(csv.trim_end(), "Time,GW-2");
    }

    #[test]
    fn test_whole_store_layout() {
        let csv = encode_store(&store()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Time,GW-1,GW-2");
        assert_eq!(lines[1], "2024-01-01 00:00,12.5,");
        assert_eq!(lines[2], "2024-01-01 01:00,,8.25");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_export_reloads_to_same_values() {
        use chrono::Timelike;

        let to_minute = |t: &chrono::NaiveDateTime| {
            t.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap()
        };

        let original = store();
        let reloaded = TimeSeriesStore::from_csv_str(&encode_store(&original).unwrap()).unwrap();

        assert_eq!(reloaded.stations(), original.stations());
        assert_eq!(reloaded.len(), original.len());
        let expected_times: Vec<_> = original.timestamps().iter().map(to_minute).collect();
        assert_eq!(reloaded.timestamps(), expected_times.as_slice());
        for station in original.stations() {
            assert_eq!(reloaded.values(station).unwrap(), original.values(station).unwrap());
        }

        // A single-station export reloads to the same (minute, value) pairs
        let (min, max) = original.extent().unwrap();
        let series = filter(&original, "GW-1", &TimeWindow::full((min, max), HourFilter::All)).unwrap();
        let csv = encode_series(&series, original.time_column()).unwrap();
        let reloaded = TimeSeriesStore::from_csv_str(&csv).unwrap();
        let expected: Vec<_> = series
            .readings()
            .iter()
            .map(|r| (to_minute(&r.timestamp), r.value))
            .collect();
        let actual: Vec<_> = reloaded
            .series("GW-1")
            .unwrap()
            .into_iter()
            .map(|r| (r.timestamp, r.value))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_save_csv() {
        let file = NamedTempFile::new().unwrap();
        save_csv(file.path(), "Time,A\n").unwrap();
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "Time,A\n");
    }
}
