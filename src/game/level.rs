#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Level {
    pub name: &'static str,
    pub words: &'static [&'static str],
    pub spawn_interval_ms: f64,
    /// Fall speed in field units per second.
    pub speed: f64,
    pub required_kills: u32,
}

pub const LEVELS: &[Level] = &[
    Level {
        name: "Level 1: Warm-up",
        words: &["cat", "dog", "sun", "star", "ship", "code", "grid"],
        spawn_interval_ms: 1600.0,
        speed: 60.0,
        required_kills: 12,
    },
    Level {
        name: "Level 2: Faster",
        words: &["react", "space", "rocket", "planet", "galaxy", "typing"],
        spawn_interval_ms: 1400.0,
        speed: 85.0,
        required_kills: 20,
    },
    Level {
        name: "Level 3: Chaos",
        words: &[
            "asteroid",
            "keyboard",
            "velocity",
            "supernova",
            "gravity",
            "satellite",
            "blackhole",
        ],
        spawn_interval_ms: 1100.0,
        speed: 110.0,
        required_kills: 30,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_get_harder() {
        for pair in LEVELS.windows(2) {
            assert!(pair[1].speed > pair[0].speed);
            assert!(pair[1].spawn_interval_ms < pair[0].spawn_interval_ms);
            assert!(pair[1].required_kills > pair[0].required_kills);
        }
    }

    #[test]
    fn level_words_are_lowercase_letters() {
        for level in LEVELS {
            assert!(!level.words.is_empty());
            for word in level.words {
                assert!(word.chars().all(|c| c.is_ascii_lowercase()), "{word}");
            }
        }
    }
}
