//! Timed typing test engine and a falling-words arcade, with no terminal dependency.
//! The `typerush` binary is the terminal front end over these modules.

pub mod config;
pub mod engine;
pub mod game;
pub mod generator;
pub mod session;
