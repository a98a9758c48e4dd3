pub mod corpus;
pub mod numbers;
pub mod punctuate;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::corpus::Corpus;

/// Probability that a `Punctuation` mode token gets a punctuated form.
const PUNCTUATION_PROB: f64 = 0.35;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestMode {
    #[default]
    Words,
    Adjectives,
    Numbers,
    Characters,
    Punctuation,
}

impl TestMode {
    pub const ALL: [TestMode; 5] = [
        TestMode::Words,
        TestMode::Adjectives,
        TestMode::Numbers,
        TestMode::Characters,
        TestMode::Punctuation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TestMode::Words => "words",
            TestMode::Adjectives => "adjectives",
            TestMode::Numbers => "numbers",
            TestMode::Characters => "characters",
            TestMode::Punctuation => "punctuation",
        }
    }
}

impl fmt::Display for TestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown test mode `{0}`")]
pub struct UnknownMode(pub String);

impl FromStr for TestMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

/// Supplies batches of tokens to a typing session.
pub trait TokenSource {
    fn generate(&mut self, count: usize, mode: TestMode) -> Vec<String>;
}

pub struct WordGenerator {
    corpus: Corpus,
    rng: SmallRng,
}

impl WordGenerator {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            corpus: Corpus::load(),
            rng,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    fn next_token(&mut self, mode: TestMode) -> String {
        let pool = match mode {
            TestMode::Adjectives => &self.corpus.adjectives,
            TestMode::Characters => &self.corpus.characters,
            TestMode::Words | TestMode::Numbers | TestMode::Punctuation => &self.corpus.words,
        };
        let token = corpus::pick(pool, &mut self.rng).to_string();

        match mode {
            TestMode::Numbers => numbers::maybe_number(token, &mut self.rng),
            TestMode::Punctuation if self.rng.gen_bool(PUNCTUATION_PROB) => {
                punctuate::punctuate(&token, &mut self.rng)
            }
            _ => token,
        }
    }
}

impl TokenSource for WordGenerator {
    fn generate(&mut self, count: usize, mode: TestMode) -> Vec<String> {
        (0..count).map(|_| self.next_token(mode)).collect()
    }
}
