pub mod input;
pub mod metrics;
pub mod result;
pub mod timer;
pub mod typing;

pub use input::Key;
pub use typing::{SessionStatus, TypingSession};
