//! Five-card-draw game engine - entities, hand evaluation, and the
//! session state machine.
//!
//! This module provides the in-memory core of a game session:
//! - Strongly-typed cards, the session deck, and player state
//! - Hand ranking and winner selection
//! - The Joining → Exchanging → Resolved state machine

// Submodules
pub mod entities;
pub mod errors;
pub mod functional;
pub mod state_machine;

pub use errors::{GameError, GameResult};
pub use state_machine::{Game, MAX_SEATS, MIN_SEATS, Phase};
