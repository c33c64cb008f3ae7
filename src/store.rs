//! Game-progress state store
//!
//! This module contains the session state and the store that owns it: the
//! rules governing which questions are available to a player, how
//! completion, correctness, scoring, and tie-breaker allocation interact,
//! and how the whole state is persisted and rehydrated.
//!
//! The store is an explicit object owned by the application's composition
//! root. All mutations go through its operations; each one writes the whole
//! snapshot through the injected [`Repository`].

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    player::{Id, Player},
    storage::Repository,
};

/// The complete persisted session state
///
/// This struct is the snapshot written to and read from durable storage.
/// Serializing and deserializing it reproduces identical query results for
/// every store operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Registered players, in registration order (order matters for display)
    pub players: Vec<Player>,
    /// Weak reference to the active player; cleared when that player is removed
    pub current_player_id: Option<Id>,
    /// Question ordinals completed by any player (the global unlock gate)
    pub completed_numbers: BTreeSet<usize>,
    /// Answer index recorded when each ordinal was first completed
    pub question_answers: BTreeMap<usize, usize>,
    /// Size of the question catalog
    pub total_questions: usize,
    /// Ordinals currently designated as tie-breakers
    pub tie_breakers: BTreeSet<usize>,
}

impl SessionState {
    /// Creates the empty initial state for a catalog of the given size
    pub fn new(total_questions: usize) -> Self {
        Self {
            players: Vec::new(),
            current_player_id: None,
            completed_numbers: BTreeSet::new(),
            question_answers: BTreeMap::new(),
            total_questions,
            tie_breakers: BTreeSet::new(),
        }
    }
}

/// The game state store
///
/// Owns the [`SessionState`] and exposes every query and mutation consumed
/// by the presentation layer. Mutations persist write-through; if the
/// repository fails, the store logs once and keeps operating in memory for
/// the rest of the session.
pub struct GameStore<R> {
    state: SessionState,
    repository: R,
    degraded: bool,
}

impl<R: Repository> GameStore<R> {
    /// Opens the store, rehydrating any previously persisted session
    ///
    /// A missing snapshot yields the empty initial state; a corrupt one is
    /// discarded with a warning rather than failing startup. If the catalog
    /// size changed since the snapshot was written, the live size wins and
    /// tie-breakers are recomputed.
    ///
    /// # Arguments
    ///
    /// * `total_questions` - size of the (immutable) question catalog
    /// * `repository` - storage backend for the session snapshot
    pub fn open(total_questions: usize, repository: R) -> Self {
        let state = match repository.load() {
            Ok(Some(state)) => state,
            Ok(None) => SessionState::new(total_questions),
            Err(e) => {
                log::warn!("discarding stored session: {e}");
                SessionState::new(total_questions)
            }
        };

        let mut store = Self {
            state,
            repository,
            degraded: false,
        };

        if store.state.total_questions != total_questions {
            log::debug!(
                "catalog size changed from {} to {total_questions}, resyncing",
                store.state.total_questions
            );
            store.state.total_questions = total_questions;
            store.recalculate_tie_breakers();
        }

        store
    }

    /// Read access to the current snapshot
    pub fn snapshot(&self) -> &SessionState {
        &self.state
    }

    /// All registered players, in registration order
    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    /// Looks up a player by id
    pub fn player(&self, id: Id) -> Option<&Player> {
        self.state.players.iter().find(|player| player.id == id)
    }

    /// The active player, if one is set and still registered
    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player_id.and_then(|id| self.player(id))
    }

    /// Players sorted by score, highest first
    ///
    /// Ties keep registration order.
    pub fn player_rankings(&self) -> Vec<&Player> {
        self.state
            .players
            .iter()
            .sorted_by_key(|player| std::cmp::Reverse(player.score))
            .collect_vec()
    }

    /// Size of the question catalog
    pub fn total_questions(&self) -> usize {
        self.state.total_questions
    }

    /// Registers a new player and recomputes tie-breakers
    ///
    /// The name is taken as given: callers are expected to reject blank
    /// input and cap it at [`MAX_NAME_LENGTH`] before calling. Returns the
    /// fresh player's id.
    ///
    /// [`MAX_NAME_LENGTH`]: crate::constants::session::MAX_NAME_LENGTH
    pub fn add_player(&mut self, name: &str) -> Id {
        let player = Player::new(name);
        let id = player.id;
        self.state.players.push(player);
        self.recalculate_tie_breakers();
        self.persist();
        id
    }

    /// Removes a player and recomputes tie-breakers
    ///
    /// Clears the active-player reference if it pointed at the removed
    /// player. Silently does nothing for an unknown id.
    pub fn remove_player(&mut self, id: Id) {
        let Some(index) = self.state.players.iter().position(|player| player.id == id) else {
            return;
        };
        self.state.players.remove(index);
        if self.state.current_player_id == Some(id) {
            self.state.current_player_id = None;
        }
        self.recalculate_tie_breakers();
        self.persist();
    }

    /// Sets or clears the active player reference
    ///
    /// The id is not validated against the player list; a dangling
    /// reference simply behaves as "no current player".
    pub fn set_current_player(&mut self, id: Option<Id>) {
        self.state.current_player_id = id;
        self.persist();
    }

    /// Records a completed question
    ///
    /// Globally idempotent per ordinal: the first call adds the ordinal to
    /// the completed set and records its answer index; later calls leave
    /// both untouched. The current player's personal tallies are updated on
    /// every call regardless: a player keeps credit for each recorded
    /// attempt. Without a current player only the global sets move.
    ///
    /// # Arguments
    ///
    /// * `ordinal` - 1-based ordinal of the completed question
    /// * `answer_index` - the answer recorded for the completion
    /// * `is_correct` - whether that answer was correct
    pub fn mark_question_as_completed(
        &mut self,
        ordinal: usize,
        answer_index: usize,
        is_correct: bool,
    ) {
        if self.state.completed_numbers.insert(ordinal) {
            self.state.question_answers.insert(ordinal, answer_index);
        }

        if let Some(id) = self.state.current_player_id {
            if let Some(player) = self.state.players.iter_mut().find(|player| player.id == id) {
                player.record_answer(ordinal, is_correct);
            }
        }

        self.persist();
    }

    /// Clears the whole session back to the empty initial state
    ///
    /// The catalog size is immutable and survives the reset.
    pub fn reset_game(&mut self) {
        self.state = SessionState::new(self.state.total_questions);
        self.persist();
    }

    /// Whether any player has completed the given ordinal
    pub fn is_question_completed(&self, ordinal: usize) -> bool {
        self.state.completed_numbers.contains(&ordinal)
    }

    /// Whether a specific player has attempted the given ordinal
    pub fn is_question_completed_by_player(&self, id: Id, ordinal: usize) -> bool {
        self.player(id)
            .is_some_and(|player| player.has_answered(ordinal))
    }

    /// The answer index recorded when the ordinal was completed
    ///
    /// Returns `None` for ordinals that have not been completed, including
    /// out-of-range ones.
    pub fn correct_answer_index(&self, ordinal: usize) -> Option<usize> {
        self.state.question_answers.get(&ordinal).copied()
    }

    /// Ordinals the current player may still pick
    ///
    /// All not-yet-completed ordinals in `1..=total_questions`, narrowed to
    /// tie-breakers once the player has used up their regular quota.
    /// Returns the empty list when no current player is set.
    pub fn available_questions_for_current_player(&self) -> Vec<usize> {
        let Some(player) = self.current_player() else {
            return Vec::new();
        };

        let unanswered = (1..=self.state.total_questions)
            .filter(|ordinal| !self.state.completed_numbers.contains(ordinal));

        if self.has_player_reached_max_questions(player.id) {
            unanswered
                .filter(|ordinal| self.state.tie_breakers.contains(ordinal))
                .collect_vec()
        } else {
            unanswered.collect_vec()
        }
    }

    /// The regular-question quota: `floor(total / player count)`
    ///
    /// Returns 0 when no players are registered.
    pub fn max_questions_per_player(&self) -> usize {
        match self.state.players.len() {
            0 => 0,
            count => self.state.total_questions / count,
        }
    }

    /// Ceiling counterpart of the quota, used for display
    pub fn questions_per_player(&self) -> usize {
        match self.state.players.len() {
            0 => 0,
            count => self.state.total_questions.div_ceil(count),
        }
    }

    /// Whether the given ordinal is currently a tie-breaker
    pub fn is_tie_breaker_question(&self, ordinal: usize) -> bool {
        self.state.tie_breakers.contains(&ordinal)
    }

    /// Whether a player has exhausted their regular-question quota
    ///
    /// Only non-tie-breaker answers count against the quota. Returns
    /// `false` for an unknown id.
    pub fn has_player_reached_max_questions(&self, id: Id) -> bool {
        let Some(player) = self.player(id) else {
            return false;
        };
        player.regular_answered(&self.state.tie_breakers) >= self.max_questions_per_player()
    }

    /// Recomputes the tie-breaker set from the current player count
    ///
    /// With `r = total mod player count` (0 without players), the
    /// tie-breakers are exactly the `r` highest-numbered ordinals.
    fn recalculate_tie_breakers(&mut self) {
        let total = self.state.total_questions;
        let remainder = match self.state.players.len() {
            0 => 0,
            count => total % count,
        };
        self.state.tie_breakers = (total - remainder + 1..=total).collect();
    }

    /// Writes the snapshot through the repository
    ///
    /// The first failure disables persistence for the rest of the session;
    /// the store keeps operating in memory.
    fn persist(&mut self) {
        if self.degraded {
            return;
        }
        if let Err(e) = self.repository.save(&self.state) {
            log::warn!("session persistence disabled: {e}");
            self.degraded = true;
        }
    }
}
