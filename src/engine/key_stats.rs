use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAccuracy {
    pub correct: u32,
    pub incorrect: u32,
}

impl KeyAccuracy {
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Percentage of correct presses; an unobserved key reports 0.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.correct as f64 / total as f64 * 100.0
    }
}

/// Cumulative per-key counters for one session. Counters only grow.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyAccuracyStore {
    pub stats: HashMap<char, KeyAccuracy>,
}

impl KeyAccuracyStore {
    pub fn record(&mut self, key: char, correct: bool) {
        let stat = self.stats.entry(key).or_default();
        if correct {
            stat.correct += 1;
        } else {
            stat.incorrect += 1;
        }
    }

    pub fn get(&self, key: char) -> Option<&KeyAccuracy> {
        self.stats.get(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &KeyAccuracy)> {
        self.stats.iter().map(|(&k, v)| (k, v))
    }
}
