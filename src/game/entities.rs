//! Core entities: cards, the deck, players, and the views handed to
//! the collaborator layer.

use rand::{rng, seq::SliceRandom};
use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::BTreeSet, fmt};

use super::errors::{GameError, GameResult};

/// Number of cards in a dealt hand.
pub const HAND_SIZE: usize = 5;

/// Number of cards in a fresh deck.
pub const DECK_SIZE: usize = 52;

const MAX_PLAYER_ID_LENGTH: usize = 32;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    /// Single-character suit symbol used in card codes.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Club => 'C',
            Self::Spade => 'S',
            Self::Diamond => 'D',
            Self::Heart => 'H',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

const SUITS: [Suit; 4] = [Suit::Club, Suit::Spade, Suit::Diamond, Suit::Heart];

/// Placeholder for card values. Deuce is 2, ace is 14; the ace only
/// drops to 1 inside the kicker sequence of a wheel straight.
pub type Value = u8;

/// A card is a tuple of a uInt8 value (deuce=2u8 ... ace=14u8)
/// and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl Card {
    /// Single-character rank symbol. Ten is always `T`; the external
    /// `0` spelling is accepted on decode only.
    #[must_use]
    pub const fn rank_symbol(self) -> char {
        match self.0 {
            14 => 'A',
            13 => 'K',
            12 => 'Q',
            11 => 'J',
            10 => 'T',
            v => (b'0' + v) as char,
        }
    }

    /// Two-character boundary token: rank symbol + suit symbol.
    #[must_use]
    pub fn code(self) -> String {
        let mut code = String::with_capacity(2);
        code.push(self.rank_symbol());
        code.push(self.1.symbol());
        code
    }

    /// Parse a two-character card token, normalizing the rank-ten
    /// variants: both `T` and the card-image API's `0` decode to ten.
    pub fn decode(code: &str) -> GameResult<Self> {
        let mut chars = code.chars();
        let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(GameError::InvalidCardCode(code.to_string()));
        };
        let value = match rank.to_ascii_uppercase() {
            'A' => 14,
            'K' => 13,
            'Q' => 12,
            'J' => 11,
            'T' | '0' => 10,
            c @ '2'..='9' => c as Value - b'0',
            _ => return Err(GameError::InvalidCardCode(code.to_string())),
        };
        let suit = match suit.to_ascii_uppercase() {
            'C' => Suit::Club,
            'S' => Suit::Spade,
            'D' => Suit::Diamond,
            'H' => Suit::Heart,
            _ => return Err(GameError::InvalidCardCode(code.to_string())),
        };
        Ok(Self(value, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank_symbol(), self.1)
    }
}

/// Check that `cards` form a well-formed hand: exactly [`HAND_SIZE`]
/// cards with no duplicates.
pub(crate) fn validate_hand(cards: &[Card]) -> GameResult<()> {
    if cards.len() != HAND_SIZE {
        return Err(GameError::InvalidHand);
    }
    let distinct: BTreeSet<_> = cards.iter().collect();
    if distinct.len() != cards.len() {
        return Err(GameError::InvalidHand);
    }
    Ok(())
}

/// A single continuous deck for one game session. Cards are consumed
/// front-to-back as they're dealt and never put back; discards leave
/// circulation entirely.
#[derive(Debug)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
    deck_idx: usize,
}

impl Deck {
    /// A full 52-card deck in uniformly random order.
    #[must_use]
    pub fn new() -> Self {
        let mut cards: [Card; DECK_SIZE] =
            std::array::from_fn(|i| Card(2 + (i / SUITS.len()) as Value, SUITS[i % SUITS.len()]));
        cards.shuffle(&mut rng());
        Self { cards, deck_idx: 0 }
    }

    /// Remove and return the next `n` cards.
    pub fn deal(&mut self, n: usize) -> GameResult<Vec<Card>> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(GameError::InsufficientCards {
                requested: n,
                remaining,
            });
        }
        let dealt = self.cards[self.deck_idx..self.deck_idx + n].to_vec();
        self.deck_idx += n;
        Ok(dealt)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        DECK_SIZE - self.deck_idx
    }

    #[cfg(test)]
    pub(crate) fn undealt(&self) -> &[Card] {
        &self.cards[self.deck_idx..]
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque game identifier.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct GameId(String);

impl GameId {
    #[must_use]
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<uuid::Uuid> for GameId {
    fn from(value: uuid::Uuid) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GameId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Opaque player identifier, supplied by the collaborator layer and
/// normalized at the boundary.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Normalize an externally supplied id: surrounding whitespace is
    /// trimmed, inner whitespace becomes `_`, and the result is capped
    /// in length. An id that normalizes to nothing is rejected.
    pub fn new(s: &str) -> GameResult<Self> {
        let mut id: String = s
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        id.truncate(MAX_PLAYER_ID_LENGTH);
        if id.is_empty() {
            return Err(GameError::InvalidPlayerId);
        }
        Ok(Self(id))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Per-participant state within one game session.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub cards: Vec<Card>,
    pub exchanged: bool,
    pub seat_idx: usize,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, seat_idx: usize) -> Self {
        Self {
            id,
            cards: Vec::with_capacity(HAND_SIZE),
            exchanged: false,
            seat_idx,
        }
    }

    /// Set the player's 5-card hand.
    pub fn assign_hand(&mut self, cards: Vec<Card>) -> GameResult<()> {
        validate_hand(&cards)?;
        self.cards = cards;
        Ok(())
    }

    /// Validate a set of discard positions without touching any state.
    /// The owning game only deals replacements once this passes, so a
    /// rejected exchange leaves no trace.
    pub(crate) fn validate_discards(&self, indices: &[usize]) -> GameResult<BTreeSet<usize>> {
        if self.exchanged {
            return Err(GameError::AlreadyExchanged(self.id.clone()));
        }
        let mut positions = BTreeSet::new();
        for &index in indices {
            if index >= self.cards.len() || !positions.insert(index) {
                return Err(GameError::InvalidIndex { index });
            }
        }
        Ok(positions)
    }

    /// Swap the cards at `positions` for `replacements` and mark the
    /// player exchanged. Returns the discarded cards.
    pub(crate) fn exchange(
        &mut self,
        positions: &BTreeSet<usize>,
        replacements: Vec<Card>,
    ) -> Vec<Card> {
        let mut discards = Vec::with_capacity(positions.len());
        for (&index, replacement) in positions.iter().zip(replacements) {
            discards.push(std::mem::replace(&mut self.cards[index], replacement));
        }
        self.exchanged = true;
        discards
    }
}

/// What a seated player is allowed to see about themselves: their own
/// cards and whether they've exchanged yet.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerView {
    pub cards: Vec<Card>,
    pub exchanged: bool,
}

/// One winning hand with its owner. Several of these coexist when the
/// top rank is tied.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct WinningHand {
    pub player_id: PlayerId,
    pub cards: Vec<Card>,
}

/// Per-requester result summary for a resolved game.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResultsView {
    pub own_cards: Vec<Card>,
    pub own_description: String,
    pub winners: Vec<WinningHand>,
    pub winning_description: String,
    pub is_winner: bool,
}
