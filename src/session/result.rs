use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::analysis::{self, ChartSeries, KeyReport};
use crate::engine::key_stats::KeyAccuracyStore;
use crate::generator::TestMode;

/// One point on the per-second performance curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystrokeSample {
    pub elapsed_ms: u64,
    pub wpm: u32,
    pub accuracy: u32,
}

/// Final metrics of a finished session, frozen at the moment the countdown hit zero.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub wpm: u32,
    pub accuracy: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub duration_secs: u32,
    pub mode: TestMode,
    pub samples: Vec<KeystrokeSample>,
    pub key_stats: KeyAccuracyStore,
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn strong_keys(&self) -> Vec<KeyReport> {
        analysis::strong_keys(&self.key_stats)
    }

    pub fn weak_keys(&self) -> Vec<KeyReport> {
        analysis::weak_keys(&self.key_stats)
    }

    pub fn chart(&self) -> ChartSeries {
        analysis::chart_series(&self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_serializes_to_json() {
        let mut key_stats = KeyAccuracyStore::default();
        key_stats.record('t', true);
        let summary = SessionSummary {
            wpm: 42,
            accuracy: 97,
            correct: 210,
            incorrect: 6,
            duration_secs: 60,
            mode: TestMode::Adjectives,
            samples: vec![KeystrokeSample {
                elapsed_ms: 1000,
                wpm: 36,
                accuracy: 100,
            }],
            key_stats,
            finished_at: Utc::now(),
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"mode\":\"adjectives\""));
        let back: SessionSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.wpm, 42);
        assert_eq!(back.key_stats.get('t').unwrap().correct, 1);
    }
}
