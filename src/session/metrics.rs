/// Words per minute over correct characters, with five characters to a word.
pub fn wpm(correct_chars: u32, elapsed_secs: u32) -> u32 {
    if elapsed_secs == 0 {
        return 0;
    }
    let minutes = elapsed_secs as f64 / 60.0;
    ((correct_chars as f64 / 5.0) / minutes).round() as u32
}

/// Rounded percentage of correct keystrokes; 100 before anything is typed.
pub fn accuracy(correct_chars: u32, incorrect_chars: u32) -> u32 {
    let total = correct_chars + incorrect_chars;
    if total == 0 {
        return 100;
    }
    (correct_chars as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_elapsed_is_zero_wpm() {
        for correct in [0, 1, 250] {
            assert_eq!(wpm(correct, 0), 0);
        }
    }

    #[test]
    fn wpm_matches_formula() {
        assert_eq!(wpm(25, 10), 30);
        assert_eq!(wpm(100, 60), 20);
        // 7 chars in 4s: (7/5)/(4/60) = 21.0
        assert_eq!(wpm(7, 4), 21);
        // 3 chars in 7s: 5.142... rounds down
        assert_eq!(wpm(3, 7), 5);
    }

    #[test]
    fn accuracy_is_rounded_ratio() {
        assert_eq!(accuracy(0, 0), 100);
        assert_eq!(accuracy(3, 1), 75);
        assert_eq!(accuracy(2, 1), 67);
        assert_eq!(accuracy(1, 2), 33);
        assert_eq!(accuracy(0, 4), 0);
        for correct in 0..20u32 {
            for incorrect in 0..20u32 {
                if correct + incorrect == 0 {
                    continue;
                }
                let expected =
                    (100.0 * correct as f64 / (correct + incorrect) as f64).round() as u32;
                assert_eq!(accuracy(correct, incorrect), expected);
            }
        }
    }
}
