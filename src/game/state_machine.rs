//! The session state machine: joining, exchanging, and resolution.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::{
    Card, DECK_SIZE, Deck, GameId, HAND_SIZE, Player, PlayerId, PlayerView, ResultsView,
    WinningHand,
};
use super::errors::{GameError, GameResult};
use super::functional::{argmax, eval};

/// Fewest seats a game can be created with.
pub const MIN_SEATS: usize = 2;

/// Most seats a game can be created with. A session runs on one
/// continuous deck, so the initial deal plus a full exchange for every
/// seat must fit: `2 * HAND_SIZE * seats <= DECK_SIZE`.
pub const MAX_SEATS: usize = DECK_SIZE / (2 * HAND_SIZE);

/// The stage a game session is in. Strictly linear: Joining →
/// Exchanging → Resolved, no backward transitions.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Phase {
    /// Waiting for seats to fill.
    Joining,
    /// All seats filled and hands dealt; waiting for every player's
    /// one exchange.
    Exchanging,
    /// Every player has exchanged; results are available.
    Resolved,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Joining => "joining",
            Self::Exchanging => "exchanging",
            Self::Resolved => "resolved",
        };
        write!(f, "{repr}")
    }
}

/// One five-card-draw session: a fixed number of seats, the players
/// that filled them in join order, a single continuous deck, and the
/// cards discarded from play.
///
/// The phase is stored, not recomputed: each transition happens
/// atomically inside the mutation that triggers it.
#[derive(Debug)]
pub struct Game {
    id: GameId,
    seats: usize,
    players: Vec<Player>,
    deck: Deck,
    discards: Vec<Card>,
    phase: Phase,
    created_at: DateTime<Utc>,
}

impl Game {
    /// New game in the Joining phase with a freshly shuffled deck and
    /// no players.
    pub fn new(id: GameId, seats: usize) -> GameResult<Self> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
            return Err(GameError::InvalidSeats {
                seats,
                min: MIN_SEATS,
                max: MAX_SEATS,
            });
        }
        Ok(Self {
            id,
            seats,
            players: Vec::with_capacity(seats),
            deck: Deck::new(),
            discards: Vec::new(),
            phase: Phase::Joining,
            created_at: Utc::now(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &GameId {
        &self.id
    }

    #[must_use]
    pub fn seats(&self) -> usize {
        self.seats
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// When the game was created. The core never evicts games; this is
    /// what an external TTL policy keys on.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Cards discarded through exchanges, permanently out of play.
    #[must_use]
    pub fn discards(&self) -> &[Card] {
        &self.discards
    }

    /// Cards still undealt.
    #[must_use]
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Whether every seat is taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.players.len() == self.seats
    }

    /// Whether every seated player has exchanged.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.phase == Phase::Resolved
    }

    fn seat_of(&self, player_id: &PlayerId) -> GameResult<usize> {
        self.players
            .iter()
            .position(|player| &player.id == player_id)
            .ok_or_else(|| GameError::PlayerNotFound(player_id.clone()))
    }

    /// Seat a player. Filling the last seat deals five cards to every
    /// player in join order and moves the game to Exchanging, all
    /// within this call.
    pub fn join(&mut self, player_id: PlayerId) -> GameResult<()> {
        if self.is_full() {
            return Err(GameError::GameFull { seats: self.seats });
        }
        if self.players.iter().any(|player| player.id == player_id) {
            return Err(GameError::AlreadyJoined(player_id));
        }
        let seat_idx = self.players.len();
        debug!("{player_id} took seat {seat_idx} in game {}", self.id);
        self.players.push(Player::new(player_id, seat_idx));
        if self.is_full() {
            for player in &mut self.players {
                let cards = self.deck.deal(HAND_SIZE)?;
                player.assign_hand(cards)?;
            }
            self.phase = Phase::Exchanging;
            info!("game {} filled, dealt {} hands", self.id, self.seats);
        }
        Ok(())
    }

    /// Perform a player's one exchange: discard the cards at
    /// `indices`, draw the same count of replacements, and mark the
    /// player exchanged. An empty index set keeps the hand intact but
    /// still counts as the exchange. The last exchange moves the game
    /// to Resolved within this call.
    pub fn exchange(&mut self, player_id: &PlayerId, indices: &[usize]) -> GameResult<()> {
        if self.phase != Phase::Exchanging {
            return Err(GameError::WrongPhase(self.phase));
        }
        let seat_idx = self.seat_of(player_id)?;
        let positions = self.players[seat_idx].validate_discards(indices)?;
        let replacements = self.deck.deal(positions.len())?;
        let discards = self.players[seat_idx].exchange(&positions, replacements);
        self.discards.extend(discards);
        debug!(
            "{player_id} exchanged {} cards in game {}",
            positions.len(),
            self.id,
        );
        if self.players.iter().all(|player| player.exchanged) {
            self.phase = Phase::Resolved;
            info!("game {} resolved", self.id);
        }
        Ok(())
    }

    /// The requesting player's own view: their cards and whether
    /// they've exchanged.
    pub fn player_view(&self, player_id: &PlayerId) -> GameResult<PlayerView> {
        let player = &self.players[self.seat_of(player_id)?];
        Ok(PlayerView {
            cards: player.cards.clone(),
            exchanged: player.exchanged,
        })
    }

    /// Rank every hand and report the outcome from the requesting
    /// player's perspective. Ties are real outcomes: every player
    /// holding the top rank is listed, in join order, and each of them
    /// is reported as a winner.
    pub fn results(&self, player_id: &PlayerId) -> GameResult<ResultsView> {
        if self.phase != Phase::Resolved {
            return Err(GameError::WrongPhase(self.phase));
        }
        let requester_idx = self.seat_of(player_id)?;
        let ranks = self
            .players
            .iter()
            .map(|player| eval(&player.cards))
            .collect::<GameResult<Vec<_>>>()?;
        let winner_idxs = argmax(&ranks);
        let winners = winner_idxs
            .iter()
            .map(|&idx| WinningHand {
                player_id: self.players[idx].id.clone(),
                cards: self.players[idx].cards.clone(),
            })
            .collect();
        Ok(ResultsView {
            own_cards: self.players[requester_idx].cards.clone(),
            own_description: ranks[requester_idx].to_string(),
            winners,
            winning_description: ranks[winner_idxs[0]].to_string(),
            is_winner: winner_idxs.contains(&requester_idx),
        })
    }
}
