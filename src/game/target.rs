use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A falling word. `x` is the horizontal centre, `y` grows towards the floor.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub typed_index: usize,
}

impl Target {
    pub fn new(id: TargetId, text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            text: text.into(),
            x,
            y,
            typed_index: 0,
        }
    }

    pub fn next_char(&self) -> Option<char> {
        self.text.chars().nth(self.typed_index)
    }

    pub fn is_complete(&self) -> bool {
        self.typed_index >= self.text.chars().count()
    }

    pub fn typed(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.typed_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }

    pub fn remaining(&self) -> &str {
        &self.text[self.typed().len()..]
    }

    /// Advances past the next character if it matches `key`.
    pub fn advance(&mut self, key: char) -> bool {
        match self.next_char() {
            Some(expected) if expected.eq_ignore_ascii_case(&key) => {
                self.typed_index += 1;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_only_on_match() {
        let mut t = Target::new(TargetId(1), "cat", 100.0, 0.0);
        assert!(!t.advance('x'));
        assert!(t.advance('c'));
        assert_eq!(t.typed(), "c");
        assert_eq!(t.remaining(), "at");
        assert!(t.advance('a'));
        assert!(t.advance('t'));
        assert!(t.is_complete());
        assert_eq!(t.next_char(), None);
        assert!(!t.advance('t'));
    }
}
