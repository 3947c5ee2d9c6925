//! Process-wide game lookup and the collaborator-facing boundary.

use log::info;
use std::collections::{HashMap, hash_map::Entry};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use uuid::Uuid;

use crate::game::entities::{GameId, PlayerId, PlayerView, ResultsView};
use crate::game::errors::{GameError, GameResult};
use crate::game::state_machine::Game;

/// Registry of every live game session, keyed by game id.
///
/// Constructed once at process start and passed around by handle;
/// there is no hidden global. Each game sits behind its own mutex, so
/// mutations against one game are serialized while other games stay
/// untouched, and every facade call observes a consistent snapshot.
/// Games live until the process exits; an external policy may evict
/// them through [`Game::created_at`].
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: RwLock<HashMap<GameId, Arc<Mutex<Game>>>>,
}

impl GameRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a new game, returning its generated id.
    pub fn create_game(&self, seats: usize) -> GameResult<GameId> {
        let id = GameId::from(Uuid::new_v4());
        let game = Game::new(id.clone(), seats)?;
        self.put_game(game)?;
        info!("created game {id} with {seats} seats");
        Ok(id)
    }

    /// Register an already constructed game under its own id.
    pub fn put_game(&self, game: Game) -> GameResult<()> {
        let mut games = write_lock(&self.games);
        match games.entry(game.id().clone()) {
            Entry::Occupied(entry) => Err(GameError::DuplicateGame(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Mutex::new(game)));
                Ok(())
            }
        }
    }

    /// Look up a game handle.
    pub fn get_game(&self, id: &GameId) -> GameResult<Arc<Mutex<Game>>> {
        read_lock(&self.games)
            .get(id)
            .cloned()
            .ok_or_else(|| GameError::GameNotFound(id.clone()))
    }

    /// Number of registered games.
    #[must_use]
    pub fn game_count(&self) -> usize {
        read_lock(&self.games).len()
    }

    /// Seat a player. The player id arrives as the collaborator's
    /// opaque string and is normalized here at the boundary.
    pub fn join_game(&self, game_id: &GameId, player_id: &str) -> GameResult<()> {
        let player_id = PlayerId::new(player_id)?;
        let game = self.get_game(game_id)?;
        let mut game = lock_game(&game);
        game.join(player_id)
    }

    /// Whether every seat of the game is taken.
    pub fn is_full(&self, game_id: &GameId) -> GameResult<bool> {
        let game = self.get_game(game_id)?;
        let game = lock_game(&game);
        Ok(game.is_full())
    }

    /// Perform a player's one exchange.
    pub fn exchange_cards(
        &self,
        game_id: &GameId,
        player_id: &str,
        indices: &[usize],
    ) -> GameResult<()> {
        let player_id = PlayerId::new(player_id)?;
        let game = self.get_game(game_id)?;
        let mut game = lock_game(&game);
        game.exchange(&player_id, indices)
    }

    /// Whether every seated player has exchanged.
    pub fn is_resolved(&self, game_id: &GameId) -> GameResult<bool> {
        let game = self.get_game(game_id)?;
        let game = lock_game(&game);
        Ok(game.is_resolved())
    }

    /// The requesting player's own cards and exchange flag.
    pub fn player_view(&self, game_id: &GameId, player_id: &str) -> GameResult<PlayerView> {
        let player_id = PlayerId::new(player_id)?;
        let game = self.get_game(game_id)?;
        let game = lock_game(&game);
        game.player_view(&player_id)
    }

    /// Results of a resolved game from the requesting player's
    /// perspective.
    pub fn compute_results(&self, game_id: &GameId, player_id: &str) -> GameResult<ResultsView> {
        let player_id = PlayerId::new(player_id)?;
        let game = self.get_game(game_id)?;
        let game = lock_game(&game);
        game.results(&player_id)
    }
}

// A poisoned lock only means another thread panicked mid-access; the
// data itself is still structurally sound, so recover the guard.
fn lock_game(game: &Arc<Mutex<Game>>) -> MutexGuard<'_, Game> {
    game.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
