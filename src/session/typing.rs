use std::collections::HashMap;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, trace};

use crate::engine::key_stats::KeyAccuracyStore;
use crate::generator::{TestMode, TokenSource};
use crate::session::input::{self, CharPos, Key, TypedChar};
use crate::session::metrics;
use crate::session::result::{KeystrokeSample, SessionSummary};

pub const WORDS_PER_BATCH: usize = 70;
/// Refill once the word after the cursor is within this many words of the tail.
pub const REFILL_THRESHOLD: usize = 20;
pub const DURATION_PRESETS: [u32; 3] = [15, 30, 60];
pub const DEFAULT_DURATION_SECS: u32 = 30;
pub const MAX_DURATION_SECS: u32 = 300;

pub fn is_valid_duration(secs: u32) -> bool {
    (1..=MAX_DURATION_SECS).contains(&secs)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Running,
    Finished,
}

/// A timed typing test over an endless stream of generated words.
pub struct TypingSession {
    pub(super) source: Box<dyn TokenSource>,
    pub(super) mode: TestMode,
    pub(super) words: Vec<String>,
    pub(super) word_index: usize,
    pub(super) char_index: usize,
    pub(super) typed: HashMap<CharPos, TypedChar>,
    pub(super) correct: u32,
    pub(super) incorrect: u32,
    pub(super) key_stats: KeyAccuracyStore,
    duration_secs: u32,
    remaining_secs: u32,
    status: SessionStatus,
    samples: Vec<KeystrokeSample>,
    started_at: Option<Instant>,
    epoch: u64,
    summary: Option<SessionSummary>,
}

/// Read-only view of a session for the render step.
pub struct SessionView<'a> {
    pub words: &'a [String],
    pub word_index: usize,
    pub char_index: usize,
    pub typed: &'a HashMap<CharPos, TypedChar>,
    pub remaining_secs: u32,
    pub duration_secs: u32,
    pub status: SessionStatus,
    pub mode: TestMode,
    pub wpm: u32,
    pub accuracy: u32,
}

impl<'a> SessionView<'a> {
    pub fn typed_at(&self, word: usize, ch: usize) -> Option<&'a TypedChar> {
        self.typed.get(&CharPos { word, ch })
    }
}

impl TypingSession {
    pub fn new(source: Box<dyn TokenSource>, mode: TestMode, duration_secs: u32) -> Self {
        let duration_secs = if is_valid_duration(duration_secs) {
            duration_secs
        } else {
            DEFAULT_DURATION_SECS
        };
        let mut session = Self {
            source,
            mode,
            words: Vec::new(),
            word_index: 0,
            char_index: 0,
            typed: HashMap::new(),
            correct: 0,
            incorrect: 0,
            key_stats: KeyAccuracyStore::default(),
            duration_secs,
            remaining_secs: duration_secs,
            status: SessionStatus::Idle,
            samples: Vec::new(),
            started_at: None,
            epoch: 0,
            summary: None,
        };
        session.words = session.source.generate(WORDS_PER_BATCH, mode);
        session
    }

    /// Feeds one key press. Returns whether the session state changed.
    pub fn on_key(&mut self, key: Key) -> bool {
        match self.status {
            SessionStatus::Finished => return false,
            SessionStatus::Idle => match key {
                Key::Char(c) if c.is_ascii_alphabetic() => self.start(),
                _ => return false,
            },
            SessionStatus::Running => {}
        }

        match key {
            Key::Space => input::process_space(self),
            Key::Backspace => input::process_backspace(self),
            Key::Char(ch) => input::process_char(self, ch),
            Key::Other => false,
        }
    }

    fn start(&mut self) {
        self.status = SessionStatus::Running;
        self.started_at = Some(Instant::now());
        info!(mode = %self.mode, duration = self.duration_secs, "session started");
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.samples.push(KeystrokeSample {
            elapsed_ms: u64::from(self.elapsed_secs()) * 1000,
            wpm: self.wpm(),
            accuracy: self.accuracy(),
        });
        if self.remaining_secs == 0 {
            self.finish();
        }
        true
    }

    /// `tick` for a countdown armed at `epoch`; ticks from before the last restart are dropped.
    pub fn tick_for(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            trace!(stale = epoch, current = self.epoch, "dropping stale tick");
            return false;
        }
        self.tick()
    }

    fn finish(&mut self) {
        self.status = SessionStatus::Finished;
        let summary = SessionSummary {
            wpm: self.wpm(),
            accuracy: self.accuracy(),
            correct: self.correct,
            incorrect: self.incorrect,
            duration_secs: self.duration_secs,
            mode: self.mode,
            samples: self.samples.clone(),
            key_stats: self.key_stats.clone(),
            finished_at: Utc::now(),
        };
        info!(
            wpm = summary.wpm,
            accuracy = summary.accuracy,
            correct = summary.correct,
            incorrect = summary.incorrect,
            "session finished"
        );
        self.summary = Some(summary);
    }

    pub fn restart(&mut self, mode: TestMode, duration_secs: u32) {
        if is_valid_duration(duration_secs) {
            self.duration_secs = duration_secs;
        }
        self.mode = mode;
        self.words = self.source.generate(WORDS_PER_BATCH, mode);
        self.word_index = 0;
        self.char_index = 0;
        self.typed.clear();
        self.correct = 0;
        self.incorrect = 0;
        self.key_stats = KeyAccuracyStore::default();
        self.remaining_secs = self.duration_secs;
        self.status = SessionStatus::Idle;
        self.samples.clear();
        self.started_at = None;
        self.summary = None;
        self.epoch += 1;
        debug!(mode = %mode, duration = self.duration_secs, epoch = self.epoch, "session reset");
    }

    /// Switches corpus and starts over. Refused while a test is running.
    pub fn set_mode(&mut self, mode: TestMode) -> bool {
        if self.status == SessionStatus::Running {
            return false;
        }
        self.restart(mode, self.duration_secs);
        true
    }

    /// Refused while running or when `secs` is out of range; the prior duration is kept.
    pub fn set_duration(&mut self, secs: u32) -> bool {
        if self.status == SessionStatus::Running || !is_valid_duration(secs) {
            debug!(secs, status = ?self.status, "duration change ignored");
            return false;
        }
        match self.status {
            SessionStatus::Finished => self.restart(self.mode, secs),
            _ => {
                self.duration_secs = secs;
                self.remaining_secs = secs;
            }
        }
        true
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.duration_secs - self.remaining_secs
    }

    pub fn wpm(&self) -> u32 {
        match &self.summary {
            Some(summary) => summary.wpm,
            None => metrics::wpm(self.correct, self.elapsed_secs()),
        }
    }

    pub fn accuracy(&self) -> u32 {
        match &self.summary {
            Some(summary) => summary.accuracy,
            None => metrics::accuracy(self.correct, self.incorrect),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn mode(&self) -> TestMode {
        self.mode
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.word_index, self.char_index)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn typed_at(&self, word: usize, ch: usize) -> Option<&TypedChar> {
        self.typed.get(&CharPos { word, ch })
    }

    pub fn typed_count(&self) -> usize {
        self.typed.len()
    }

    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect
    }

    pub fn key_stats(&self) -> &KeyAccuracyStore {
        &self.key_stats
    }

    pub fn samples(&self) -> &[KeystrokeSample] {
        &self.samples
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    pub fn snapshot(&self) -> SessionView<'_> {
        SessionView {
            words: &self.words,
            word_index: self.word_index,
            char_index: self.char_index,
            typed: &self.typed,
            remaining_secs: self.remaining_secs,
            duration_secs: self.duration_secs,
            status: self.status,
            mode: self.mode,
            wpm: self.wpm(),
            accuracy: self.accuracy(),
        }
    }
}
