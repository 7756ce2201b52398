//! Request handlers.

pub mod health;
pub mod transcripts;

pub use health::*;
pub use transcripts::*;
