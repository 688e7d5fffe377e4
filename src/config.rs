//! Dashboard configuration
//!
//! Every deployment of the dashboard is the same pipeline with a different
//! `DashboardConfig`. Configs are JSON files; missing fields take defaults
//! and out-of-range values are clamped with a warning.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{load, range, ticks, window};
use crate::error::{GwError, Result};
use crate::pipeline::{HourFilter, RangeMode, RangeModeKind, SortOrder, TickGranularity, TickSampler};

const DATA_BASE_URL: &str = "https://raw.githubusercontent.com/cgwatertech/GW_mnt/main";
const BANNER_BASE_URL: &str = "https://raw.githubusercontent.com/cgwatertech/gwmonitoring/main";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Local path or http(s) URL of the readings CSV
    pub source: String,
    pub title: String,
    pub banner_url: Option<String>,
    pub default_range_multiplier: u32,
    /// `None` shows all hours
    pub default_hour: Option<u8>,
    pub tick_target_count: usize,
    pub tick_granularity: TickGranularity,
    pub default_lookback_days: i64,
    pub default_range_mode: RangeModeKind,
    pub fixed_offset_below: f64,
    pub fixed_offset_above: f64,
    pub fetch_timeout_secs: u64,
    pub sort_order: SortOrder,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Preset::Cgwt.config()
    }
}

impl DashboardConfig {
    /// Read a JSON config file and clamp its values
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: DashboardConfig = serde_json::from_str(&contents)?;
        info!(path = %path.display(), "loaded dashboard config");
        Ok(config.validated())
    }

    /// Explicit path must exist; otherwise `gw-monitor.json` in the working
    /// directory is used when present, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(crate::constants::config::CONFIG_FILE);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "saved dashboard config");
        Ok(())
    }

    /// Clamp every field into its accepted range
    pub fn validated(mut self) -> Self {
        let multiplier = crate::pipeline::range::clamp_multiplier(self.default_range_multiplier);
        if multiplier != self.default_range_multiplier {
            warn!(
                value = self.default_range_multiplier,
                used = multiplier,
                "default_range_multiplier out of range"
            );
            self.default_range_multiplier = multiplier;
        }

        if let Some(hour) = self.default_hour {
            if u32::from(hour) > window::LAST_SELECTABLE_HOUR {
                warn!(hour, "default_hour out of range; showing all hours");
                self.default_hour = None;
            }
        }

        let count = self.tick_target_count.clamp(1, ticks::MAX_TARGET_COUNT);
        if count != self.tick_target_count {
            warn!(value = self.tick_target_count, used = count, "tick_target_count out of range");
            self.tick_target_count = count;
        }

        let lookback = self.default_lookback_days.clamp(0, window::MAX_LOOKBACK_DAYS);
        if lookback != self.default_lookback_days {
            warn!(value = self.default_lookback_days, used = lookback, "default_lookback_days out of range");
            self.default_lookback_days = lookback;
        }

        for (name, offset) in [
            ("fixed_offset_below", &mut self.fixed_offset_below),
            ("fixed_offset_above", &mut self.fixed_offset_above),
        ] {
            if !offset.is_finite() || *offset < 0.0 {
                warn!(field = name, value = *offset, "invalid offset; using absolute value or 0");
                *offset = if offset.is_finite() { offset.abs() } else { 0.0 };
            }
        }

        if self.fetch_timeout_secs == 0 {
            warn!("fetch_timeout_secs of 0; using default");
            self.fetch_timeout_secs = load::FETCH_TIMEOUT_SECS;
        }

        self
    }

    /// Reject a source that cannot possibly be loaded
    pub fn check_source(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(GwError::Config("no data source configured".to_string()));
        }
        Ok(())
    }

    pub fn hour_filter(&self) -> HourFilter {
        HourFilter::from_option(self.default_hour).unwrap_or_default()
    }

    pub fn range_mode(&self) -> RangeMode {
        RangeMode::from_kind(
            self.default_range_mode,
            self.fixed_offset_below,
            self.fixed_offset_above,
        )
    }

    pub fn tick_sampler(&self) -> TickSampler {
        TickSampler::new(self.tick_target_count, self.tick_granularity)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Built-in deployments; they differ only in source, title and banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    Cgwt,
    YujinBd,
    YujinNonhyun,
}

impl Preset {
    pub fn config(self) -> DashboardConfig {
        let (file, title, banner) = match self {
            Preset::Cgwt => (
                "cgwt.csv",
                "Groundwater Level Monitoring",
                format!("{DATA_BASE_URL}/desKTOP_IMG.png"),
            ),
            Preset::YujinBd => (
                "cgwt_bd.csv",
                "Groundwater Level Monitoring (Yujin BD)",
                format!("{BANNER_BASE_URL}/Yujin_bd.png"),
            ),
            Preset::YujinNonhyun => (
                "cgwt_nnhn.csv",
                "Groundwater Level Monitoring (Yujin Nonhyun)",
                format!("{BANNER_BASE_URL}/Yujin_nonhyun.png"),
            ),
        };

        DashboardConfig {
            source: format!("{DATA_BASE_URL}/{file}"),
            title: title.to_string(),
            banner_url: Some(banner),
            default_range_multiplier: range::DEFAULT_MULTIPLIER,
            default_hour: None,
            tick_target_count: ticks::DEFAULT_TARGET_COUNT,
            tick_granularity: TickGranularity::Minute,
            default_lookback_days: window::DEFAULT_LOOKBACK_DAYS,
            default_range_mode: RangeModeKind::Recommended,
            fixed_offset_below: range::DEFAULT_OFFSET_BELOW,
            fixed_offset_above: range::DEFAULT_OFFSET_ABOVE,
            fetch_timeout_secs: load::FETCH_TIMEOUT_SECS,
            sort_order: SortOrder::Ascending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.default_range_multiplier, 5);
        assert_eq!(config.tick_target_count, 5);
        assert_eq!(config.hour_filter(), HourFilter::All);
        assert_eq!(config.range_mode(), RangeMode::Recommended);
        assert!(config.source.ends_with("/cgwt.csv"));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_presets_differ_only_in_identity() {
        let a = Preset::YujinBd.config();
        let b = Preset::YujinNonhyun.config();
        assert!(a.source.ends_with("cgwt_bd.csv"));
        assert!(b.source.ends_with("cgwt_nnhn.csv"));
        assert_ne!(a.title, b.title);

        let strip = |c: DashboardConfig| DashboardConfig {
            source: String::new(),
            title: String::new(),
            banner_url: None,
            ..c
        };
        assert_eq!(strip(a), strip(b));
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"source": "levels.csv", "default_hour": 6, "tick_granularity": "hour"}}"#
        )
        .unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.source, "levels.csv");
        assert_eq!(config.hour_filter(), HourFilter::Hour(6));
        assert_eq!(config.tick_granularity, TickGranularity::Hour);
        assert_eq!(config.default_range_multiplier, 5);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"default_range_multiplier": 50, "default_hour": 30, "tick_target_count": 0,
                "default_lookback_days": -2, "fixed_offset_below": -3.0, "fetch_timeout_secs": 0}}"#
        )
        .unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.default_range_multiplier, 20);
        assert_eq!(config.default_hour, None);
        assert_eq!(config.tick_target_count, 1);
        assert_eq!(config.default_lookback_days, 0);
        assert_eq!(config.fixed_offset_below, 3.0);
        assert_eq!(config.fetch_timeout_secs, 30);
    }

    #[test]
    fn test_huge_lookback_is_clamped() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_lookback_days": 100000000}}"#).unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.default_lookback_days, window::MAX_LOOKBACK_DAYS);
    }

    #[test]
    fn test_save_and_reload() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Preset::YujinBd.config();
        config.default_range_mode = RangeModeKind::FixedOffset;
        config.sort_order = SortOrder::Descending;
        config.save(file.path()).unwrap();

        let reloaded = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(
            reloaded.range_mode(),
            RangeMode::FixedOffset { below: 3.0, above: 4.0 }
        );
    }

    #[test]
    fn test_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(DashboardConfig::load(file.path()), Err(GwError::Json(_))));
    }

    #[test]
    fn test_empty_source_rejected() {
        let config = DashboardConfig {
            source: "  ".to_string(),
            ..DashboardConfig::default()
        };
        assert!(matches!(config.check_source(), Err(GwError::Config(_))));
    }
}
