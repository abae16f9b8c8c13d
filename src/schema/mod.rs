//! Schema module - Configuration and seeding types for the game.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
