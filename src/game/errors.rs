//! Game error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{GameId, PlayerId};
use super::state_machine::Phase;

/// Errors that can occur during game operations.
///
/// Every failure in the core surfaces as one of these variants; nothing
/// is retried or swallowed internally. Retry policy belongs to the
/// caller.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("game {0} does not exist")]
    GameNotFound(GameId),
    #[error("{0} is not seated at this game")]
    PlayerNotFound(PlayerId),
    #[error("game {0} already exists")]
    DuplicateGame(GameId),
    #[error("{0} already joined this game")]
    AlreadyJoined(PlayerId),
    #[error("all {seats} seats are taken")]
    GameFull { seats: usize },
    #[error("not allowed while the game is {0}")]
    WrongPhase(Phase),
    #[error("{0} already exchanged their cards")]
    AlreadyExchanged(PlayerId),
    #[error("invalid discard position {index}")]
    InvalidIndex { index: usize },
    #[error("a hand must hold exactly 5 distinct cards")]
    InvalidHand,
    #[error("only {remaining} cards left in the deck, needed {requested}")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("malformed card code {0:?}")]
    InvalidCardCode(String),
    #[error("seat count must be between {min} and {max}, got {seats}")]
    InvalidSeats { seats: usize, min: usize, max: usize },
    #[error("player id can't be empty")]
    InvalidPlayerId,
}

/// Result type for game operations
pub type GameResult<T> = std::result::Result<T, GameError>;
