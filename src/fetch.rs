//! One-shot retrieval of the readings CSV
//!
//! A source is either a local path or an `http(s)://` URL. Remote sources are
//! fetched once per load with a blocking client and a hard timeout.

use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::data::TimeSeriesStore;
use crate::error::{GwError, Result};

/// True for sources that must be downloaded
pub fn is_remote(source: &str) -> bool {
    let lower = source.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Raw bytes of a source
pub fn fetch_source(source: &str, timeout: Duration) -> Result<Vec<u8>> {
    profiling::scope!("fetch_source");

    let source = source.trim();
    if !is_remote(source) {
        return Ok(std::fs::read(Path::new(source))?);
    }

    let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
    let response = client.get(source).header("Accept", "text/csv").send()?;

    if !response.status().is_success() {
        return Err(GwError::HttpStatus(response.status().as_u16()));
    }

    let bytes = response.bytes()?.to_vec();
    info!(url = source, bytes = bytes.len(), "fetched source");
    Ok(bytes)
}

/// Fetch and normalize a source into a store
pub fn load_source(source: &str, timeout: Duration) -> Result<TimeSeriesStore> {
    let bytes = fetch_source(source, timeout)?;
    TimeSeriesStore::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.org/a.csv"));
        assert!(is_remote(" HTTP://example.org/a.csv"));
        assert!(!is_remote("data/levels.csv"));
        assert!(!is_remote("/tmp/https.csv"));
    }

    #[test]
    fn test_local_source() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Time,W1").unwrap();
        writeln!(file, "2024-05-01 00:00,3.5").unwrap();
        file.flush().unwrap();

        let source = file.path().to_string_lossy().to_string();
        let store = load_source(&source, Duration::from_secs(1)).unwrap();
        assert_eq!(store.stations(), vec!["W1"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_local_source() {
        assert!(matches!(
            fetch_source("/no/such/levels.csv", Duration::from_secs(1)),
            Err(GwError::FileIo(_))
        ));
    }
}
