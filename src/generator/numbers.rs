use std::ops::RangeInclusive;

use rand::Rng;

/// Chance that a token in `Numbers` mode is replaced by a number.
pub const NUMBER_PROB: f64 = 0.25;
/// Chance that a substituted number is a year rather than a plain integer.
pub const YEAR_PROB: f64 = 0.6;
pub const YEAR_RANGE: RangeInclusive<u32> = 1935..=2024;
/// Plain integers are drawn from `0..PLAIN_NUMBER_LIMIT`.
pub const PLAIN_NUMBER_LIMIT: u32 = 9999;

/// Post-processing pass for one token: keeps it, or swaps in a year or an integer.
pub fn maybe_number<R: Rng + ?Sized>(token: String, rng: &mut R) -> String {
    if !rng.gen_bool(NUMBER_PROB) {
        return token;
    }
    if rng.gen_bool(YEAR_PROB) {
        rng.gen_range(YEAR_RANGE).to_string()
    } else {
        rng.gen_range(0..PLAIN_NUMBER_LIMIT).to_string()
    }
}
