use rand::Rng;
use serde::Deserialize;

const CORPUS_JSON: &str = include_str!("../../assets/corpus.json");

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub adjectives: Vec<String>,
    #[serde(default)]
    pub characters: Vec<String>,
}

impl Corpus {
    pub fn load() -> Self {
        serde_json::from_str(CORPUS_JSON).unwrap_or_default()
    }
}

/// Uniform pick from a pool; an empty pool yields an empty token.
pub fn pick<'a, R: Rng + ?Sized>(pool: &'a [String], rng: &mut R) -> &'a str {
    if pool.is_empty() {
        return "";
    }
    &pool[rng.gen_range(0..pool.len())]
}
