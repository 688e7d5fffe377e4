//! Building a `TimeSeriesStore` from raw rows or CSV text
//!
//! CSV is read through polars with every column kept as text, then each
//! cell is normalized here: the first column through the tolerant timestamp
//! parser, the remaining columns as station levels. Rows whose timestamp
//! cannot be read are dropped and counted, never substituted.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, info, warn};

use super::store::{LoadReport, TimeSeriesStore};
use super::timestamp::{parse_level, parse_timestamp};
use crate::constants::load::{ABSENT_WARN_RATIO, DEFAULT_TIME_COLUMN};
use crate::error::{GwError, Result};

/// How many rejected timestamp cells are kept in the report
const MAX_DROPPED_SAMPLES: usize = 5;

impl TimeSeriesStore {
    /// Normalize raw rows into a store.
    ///
    /// `header[0]` names the timestamp column and every following entry is a
    /// station. Each row lists its cells in header order; `None` is an empty
    /// cell.
    pub fn load<'a, I>(header: &[String], rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<Option<&'a str>>>,
    {
        profiling::scope!("TimeSeriesStore::load");

        if header.is_empty() {
            return Err(GwError::Parse {
                value: String::new(),
                expected: "a header row",
            });
        }
        if header.len() < 2 {
            return Err(GwError::MissingStations { found: header.len() });
        }

        let time_column = match header[0].trim() {
            "" => DEFAULT_TIME_COLUMN.to_string(),
            name => name.to_string(),
        };
        let station_ids: Vec<String> = header[1..].iter().map(|h| h.trim().to_string()).collect();

        let mut report = LoadReport::default();
        let mut absent = vec![0usize; station_ids.len()];
        let mut parsed = Vec::new();

        for row in rows {
            report.rows_read += 1;
            let mut cells = row.into_iter();
            let raw_time = cells.next().flatten().unwrap_or("");

            let timestamp = match parse_timestamp(raw_time) {
                Ok(timestamp) => timestamp,
                Err(err) => {
                    report.rows_dropped += 1;
                    if report.dropped_samples.len() < MAX_DROPPED_SAMPLES {
                        report.dropped_samples.push(raw_time.to_string());
                    }
                    debug!(row = report.rows_read, "dropping row: {err}");
                    continue;
                }
            };

            let values: Vec<Option<f64>> = absent
                .iter_mut()
                .map(|absent_count| {
                    let value = cells.next().flatten().and_then(parse_level);
                    if value.is_none() {
                        *absent_count += 1;
                    }
                    value
                })
                .collect();
            parsed.push((timestamp, values));
        }

        let kept = parsed.len();
        for (station, &count) in station_ids.iter().zip(&absent) {
            if kept > 0 && count as f64 / kept as f64 > ABSENT_WARN_RATIO {
                warn!(
                    station = %station,
                    "{}/{} values ({:.1}%) missing or unreadable",
                    count,
                    kept,
                    count as f64 / kept as f64 * 100.0
                );
            }
        }
        report.absent_cells = station_ids.iter().cloned().zip(absent).collect();

        if report.rows_dropped > 0 {
            warn!(
                dropped = report.rows_dropped,
                samples = ?report.dropped_samples,
                "rows without a readable timestamp were dropped"
            );
        }
        info!(
            rows = kept,
            stations = station_ids.len(),
            "loaded groundwater table"
        );

        Ok(Self::assemble(time_column, station_ids, parsed, report))
    }

    /// Load from CSV text (header row first)
    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_bytes(text.as_bytes().to_vec())
    }

    /// Load CSV from a file on disk
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Load CSV from raw bytes, e.g. a fetched response body
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::load(&[], Vec::<Vec<Option<&str>>>::new());
        }
        let df = CsvReadOptions::default()
            .with_has_header(true)
            // Schema length 0 keeps every column as text; normalization happens in `load`
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;
        Self::from_dataframe(&df)
    }

    /// Load from an already-read DataFrame; non-text columns are cast to text first
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let header: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let columns = df
            .get_columns()
            .iter()
            .map(|c| {
                let text = c.as_materialized_series().cast(&DataType::String)?;
                Ok(text.str()?.clone())
            })
            .collect::<Result<Vec<StringChunked>>>()?;

        let rows = (0..df.height()).map(|i| {
            columns
                .iter()
                .map(|ca| ca.get(i))
                .collect::<Vec<Option<&str>>>()
        });

        Self::load(&header, rows)
    }
}
