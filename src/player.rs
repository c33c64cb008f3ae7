//! Player records and identity
//!
//! This module defines player identifiers and the per-player answer
//! bookkeeping: which question ordinals a player has attempted, how many
//! were correct or incorrect, and the player's accumulated score.

use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use uuid::Uuid;

use crate::constants;

/// A unique identifier for a player in the session
///
/// Each registered player gets a unique ID that persists across sessions
/// through the stored snapshot. IDs are serialized as UUID strings.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr, SerializeDisplay,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random player ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    /// Creates a new random player ID (same as `new()`)
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Id {
    /// Formats the ID as a UUID string
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Id {
    type Err = uuid::Error;

    /// Parses an ID from a UUID string
    ///
    /// # Errors
    ///
    /// Returns a `uuid::Error` if the string is not a valid UUID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// A registered player and their answer record
///
/// The answer record tracks the set of question ordinals the player has
/// attempted together with correct/incorrect tallies and the accumulated
/// score. Attempted ordinals are a set: attempting the same ordinal twice
/// does not grow `questions_answered`, though the tallies still move (see
/// [`Player::record_answer`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier of the player
    pub id: Id,
    /// Display name chosen at registration
    pub name: String,
    /// Question ordinals this player has attempted
    pub questions_answered: BTreeSet<usize>,
    /// Number of answers recorded as correct
    pub correct_count: u64,
    /// Number of answers recorded as incorrect
    pub incorrect_count: u64,
    /// Accumulated score
    pub score: u64,
}

impl Player {
    /// Creates a new player with a fresh random ID and zeroed counters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Id::new(),
            name: name.into(),
            questions_answered: BTreeSet::new(),
            correct_count: 0,
            incorrect_count: 0,
            score: 0,
        }
    }

    /// Records an answer against this player's tallies
    ///
    /// The ordinal is added to `questions_answered` with set semantics.
    /// The correct/incorrect counter and the score move unconditionally,
    /// even when the ordinal was already present: a player keeps personal
    /// credit for every recorded attempt.
    ///
    /// # Arguments
    ///
    /// * `ordinal` - 1-based ordinal of the attempted question
    /// * `is_correct` - whether the recorded answer was correct
    pub fn record_answer(&mut self, ordinal: usize, is_correct: bool) {
        self.questions_answered.insert(ordinal);
        if is_correct {
            self.correct_count += 1;
            self.score += constants::scoring::POINTS_PER_CORRECT;
        } else {
            self.incorrect_count += 1;
        }
    }

    /// Counts answered ordinals that are not tie-breakers
    ///
    /// This is the quantity compared against the regular-question quota:
    /// tie-breaker answers never consume quota.
    ///
    /// # Arguments
    ///
    /// * `tie_breakers` - the session's current tie-breaker ordinals
    pub fn regular_answered(&self, tie_breakers: &BTreeSet<usize>) -> usize {
        self.questions_answered
            .iter()
            .filter(|ordinal| !tie_breakers.contains(ordinal))
            .count()
    }

    /// Whether this player has attempted the given question ordinal
    pub fn has_answered(&self, ordinal: usize) -> bool {
        self.questions_answered.contains(&ordinal)
    }
}
