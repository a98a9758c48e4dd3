use crate::engine::key_stats::{KeyAccuracy, KeyAccuracyStore};
use crate::session::result::KeystrokeSample;

pub const STRONG_KEY_ACCURACY: f64 = 90.0;
pub const WEAK_KEY_ACCURACY: f64 = 70.0;
pub const MIN_KEY_OBSERVATIONS: u32 = 3;
pub const MAX_LISTED_KEYS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyReport {
    pub key: char,
    pub total: u32,
    pub accuracy: f64,
}

impl KeyReport {
    fn new(key: char, stat: &KeyAccuracy) -> Self {
        Self {
            key,
            total: stat.total(),
            accuracy: stat.accuracy(),
        }
    }
}

/// Observed keys ordered by how often they were pressed, most first.
/// Equal counts are ordered by key so the listing is stable.
fn ranked(store: &KeyAccuracyStore) -> Vec<KeyReport> {
    let mut reports: Vec<KeyReport> = store
        .iter()
        .filter(|(_, stat)| stat.total() > 0)
        .map(|(key, stat)| KeyReport::new(key, stat))
        .collect();
    reports.sort_by(|a, b| b.total.cmp(&a.total).then(a.key.cmp(&b.key)));
    reports
}

fn select(store: &KeyAccuracyStore, keep: impl Fn(f64) -> bool) -> Vec<KeyReport> {
    ranked(store)
        .into_iter()
        .filter(|r| r.total >= MIN_KEY_OBSERVATIONS && keep(r.accuracy))
        .take(MAX_LISTED_KEYS)
        .collect()
}

pub fn strong_keys(store: &KeyAccuracyStore) -> Vec<KeyReport> {
    select(store, |acc| acc >= STRONG_KEY_ACCURACY)
}

pub fn weak_keys(store: &KeyAccuracyStore) -> Vec<KeyReport> {
    select(store, |acc| acc < WEAK_KEY_ACCURACY)
}

/// Points for charting, one per recorded second. The x value is the 1-based second.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSeries {
    pub wpm: Vec<(f64, f64)>,
    pub accuracy: Vec<(f64, f64)>,
}

pub fn chart_series(samples: &[KeystrokeSample]) -> ChartSeries {
    let mut series = ChartSeries::default();
    for (i, sample) in samples.iter().enumerate() {
        let second = (i + 1) as f64;
        series.wpm.push((second, sample.wpm as f64));
        series.accuracy.push((second, sample.accuracy as f64));
    }
    series
}
