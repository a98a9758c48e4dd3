use rand::Rng;

/// Rewrites a word into one of its punctuated forms using a single uniform roll.
pub fn punctuate<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    punctuate_with_roll(word, rng.r#gen::<f64>())
}

/// Band boundaries over `roll` in `[0, 1)`:
/// period, comma, standalone hyphen, leading apostrophe, possessive, unchanged.
pub fn punctuate_with_roll(word: &str, roll: f64) -> String {
    if roll < 0.25 {
        format!("{word}.")
    } else if roll < 0.45 {
        format!("{word},")
    } else if roll < 0.55 {
        "-".to_string()
    } else if roll < 0.70 {
        format!("'{word}")
    } else if roll < 0.85 {
        format!("{word}'s")
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn bands_are_disjoint_and_ordered() {
        assert_eq!(punctuate_with_roll("day", 0.0), "day.");
        assert_eq!(punctuate_with_roll("day", 0.2499), "day.");
        assert_eq!(punctuate_with_roll("day", 0.25), "day,");
        assert_eq!(punctuate_with_roll("day", 0.45), "-");
        assert_eq!(punctuate_with_roll("day", 0.55), "'day");
        assert_eq!(punctuate_with_roll("day", 0.70), "day's");
        assert_eq!(punctuate_with_roll("day", 0.85), "day");
        assert_eq!(punctuate_with_roll("day", 0.9999), "day");
    }

    #[test]
    fn hyphen_band_frequency() {
        let mut rng = SmallRng::seed_from_u64(42);
        let n = 20_000;
        let hyphens = (0..n).filter(|_| punctuate("word", &mut rng) == "-").count();
        let rate = hyphens as f64 / n as f64;
        assert!((rate - 0.10).abs() < 0.02, "hyphen rate {rate}");
    }
}
