use tracing::debug;

use crate::session::typing::{REFILL_THRESHOLD, TypingSession, WORDS_PER_BATCH};

/// A key press normalised away from any particular terminal or toolkit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Backspace,
    Other,
}

impl Key {
    /// Maps raw key names: `" "`, `"Backspace"`, or a single character.
    pub fn from_name(name: &str) -> Self {
        match name {
            " " => Key::Space,
            "Backspace" => Key::Backspace,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Key::from(ch),
                    _ => Key::Other,
                }
            }
        }
    }
}

impl From<char> for Key {
    fn from(ch: char) -> Self {
        match ch {
            ' ' => Key::Space,
            c if c.is_control() => Key::Other,
            c => Key::Char(c),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypedChar {
    pub status: CharStatus,
    pub ch: char,
}

/// Position of a typed character: word index into the stream, char index into the word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharPos {
    pub word: usize,
    pub ch: usize,
}

pub fn process_char(session: &mut TypingSession, ch: char) -> bool {
    let expected = session
        .words
        .get(session.word_index)
        .and_then(|w| w.chars().nth(session.char_index));
    // Past the end of the word there is nothing to match: an overflow keystroke.
    let correct = expected == Some(ch);
    let status = if correct {
        CharStatus::Correct
    } else {
        CharStatus::Incorrect
    };

    session.typed.insert(
        CharPos {
            word: session.word_index,
            ch: session.char_index,
        },
        TypedChar { status, ch },
    );
    if correct {
        session.correct += 1;
    } else {
        session.incorrect += 1;
    }
    session.key_stats.record(ch, correct);
    session.char_index += 1;
    true
}

pub fn process_space(session: &mut TypingSession) -> bool {
    if session.char_index == 0 {
        return false;
    }

    let next = session.word_index + 1;
    if next + REFILL_THRESHOLD > session.words.len() {
        let batch = session.source.generate(WORDS_PER_BATCH, session.mode);
        debug!(
            buffered = session.words.len(),
            added = batch.len(),
            "refilling token stream"
        );
        session.words.extend(batch);
    }
    if next >= session.words.len() {
        return false;
    }

    session.word_index = next;
    session.char_index = 0;
    true
}

pub fn process_backspace(session: &mut TypingSession) -> bool {
    if session.char_index == 0 {
        return false;
    }
    session.char_index -= 1;
    session.typed.remove(&CharPos {
        word: session.word_index,
        ch: session.char_index,
    });
    true
}
