//! The nose-steered shooter itself.
//!
//! A fixed-timestep arcade game: the ship slides along the bottom edge
//! following the player's nose, fires automatically on a cooldown, and
//! earns points for every descending enemy it shoots down.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
