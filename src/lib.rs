//! # Draw Poker
//!
//! A multiplayer five-card-draw session engine.
//!
//! This library provides the in-memory core of a draw-poker game:
//! dealing from a single continuous deck, per-player exchange
//! bookkeeping, hand ranking, and winner determination. Transport,
//! rendering, and persistence belong to the embedding application;
//! it talks to the core through [`GameRegistry`].
//!
//! ## Architecture
//!
//! Each game session moves through three phases, strictly forward:
//!
//! - **Joining**: seats fill one player at a time. Filling the last
//!   seat deals five cards to every player in join order.
//! - **Exchanging**: each player discards any subset of their hand
//!   exactly once and draws replacements. Discards never return to
//!   the deck.
//! - **Resolved**: every player has exchanged; hands are ranked and
//!   winners (including exact ties) are reported.
//!
//! ## Core Modules
//!
//! - [`game`]: entities, hand evaluation, and the session state machine
//! - [`registry`]: process-wide session lookup and the boundary
//!   operations the embedding layer calls
//!
//! ## Example
//!
//! ```
//! use draw_poker::GameRegistry;
//!
//! let registry = GameRegistry::new();
//! let game_id = registry.create_game(2).unwrap();
//! registry.join_game(&game_id, "alice").unwrap();
//! registry.join_game(&game_id, "bob").unwrap();
//! assert!(registry.is_full(&game_id).unwrap());
//!
//! registry.exchange_cards(&game_id, "alice", &[0, 3]).unwrap();
//! registry.exchange_cards(&game_id, "bob", &[]).unwrap();
//!
//! let results = registry.compute_results(&game_id, "alice").unwrap();
//! assert!(!results.winners.is_empty());
//! ```

/// Core game logic, entities, and the session state machine.
pub mod game;
pub use game::{
    Game, GameError, GameResult, MAX_SEATS, MIN_SEATS, Phase,
    entities::{
        self, Card, Deck, GameId, Player, PlayerId, PlayerView, ResultsView, Suit, Value,
        WinningHand,
    },
    functional::{self, HandCategory, HandRank},
};

/// Process-wide game lookup and the collaborator-facing boundary.
pub mod registry;
pub use registry::GameRegistry;
