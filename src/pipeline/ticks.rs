//! Evenly spaced, labeled x-axis positions

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::ticks::DEFAULT_TARGET_COUNT;

/// Label precision of time-axis ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickGranularity {
    Date,
    Hour,
    #[default]
    Minute,
}

impl TickGranularity {
    pub const ALL: [TickGranularity; 3] = [
        TickGranularity::Date,
        TickGranularity::Hour,
        TickGranularity::Minute,
    ];

    /// chrono format string of the label
    pub fn format(&self) -> &'static str {
        match self {
            TickGranularity::Date => "%Y-%m-%d",
            TickGranularity::Hour => "%Y-%m-%d %H:00",
            TickGranularity::Minute => "%Y-%m-%d %H:%M",
        }
    }

    pub fn label(&self, timestamp: &NaiveDateTime) -> String {
        timestamp.format(self.format()).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub timestamp: NaiveDateTime,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSampler {
    target_count: usize,
    granularity: TickGranularity,
}

impl Default for TickSampler {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_COUNT, TickGranularity::default())
    }
}

impl TickSampler {
    /// A target of zero is treated as one
    pub fn new(target_count: usize, granularity: TickGranularity) -> Self {
        Self {
            target_count: target_count.max(1),
            granularity,
        }
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn granularity(&self) -> TickGranularity {
        self.granularity
    }

    /// Pick at most `target_count` ticks at positions `0, step, 2*step, ...`
    /// where `step = len / target_count` (at least 1).
    ///
    /// Positions follow the order of `timestamps`, so a descending series
    /// yields descending ticks.
    pub fn sample_ticks(&self, timestamps: &[NaiveDateTime]) -> Vec<Tick> {
        let step = (timestamps.len() / self.target_count).max(1);

        timestamps
            .iter()
            .step_by(step)
            .take(self.target_count)
            .map(|timestamp| Tick {
                timestamp: *timestamp,
                label: self.granularity.label(timestamp),
            })
            .collect()
    }
}
