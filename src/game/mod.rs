pub mod arcade;
pub mod level;
pub mod target;

pub use arcade::{ArcadeGame, ArcadeSnapshot, FieldSize, Phase};
pub use target::{Target, TargetId};
