pub mod analysis;
pub mod key_stats;
