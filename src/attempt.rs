//! Per-question answer flow
//!
//! This module models the life of a single opened question: a player picks
//! options until they hit the correct one, run out of incorrect attempts,
//! run out of time, or ask for the answer to be revealed. Already-tried
//! options are locked out, and every terminal state maps onto one
//! [`mark_question_as_completed`] call.
//!
//! [`mark_question_as_completed`]: crate::store::GameStore::mark_question_as_completed

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{catalog::Question, constants};

/// Terminal state of an attempt session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// The correct option was picked
    Correct {
        /// Index of the picked (correct) option
        answer: usize,
    },
    /// The incorrect-attempt allowance was used up
    Exhausted {
        /// Index of the final incorrect pick
        answer: usize,
    },
    /// The countdown ran out before a resolving pick
    TimedOut,
    /// The answer was revealed without a resolving pick
    Revealed,
}

/// Result of a single option pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The pick was correct and resolved the session
    Correct,
    /// The pick was incorrect; the session stays open
    Incorrect {
        /// Incorrect attempts left before the session resolves
        attempts_left: usize,
    },
    /// The pick was incorrect and used up the final attempt
    Exhausted,
    /// The pick was ignored: option already tried, or session resolved
    Rejected,
}

/// The state of one opened question for the current player
///
/// A session starts open and moves to exactly one [`Resolution`]; all
/// transitions after that are rejected. The session is serializable so a
/// half-answered question survives a page reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptSession {
    ordinal: usize,
    correct_option: usize,
    incorrect_choices: BTreeSet<usize>,
    resolution: Option<Resolution>,
}

impl AttemptSession {
    /// Opens a session for the given question
    ///
    /// # Arguments
    ///
    /// * `ordinal` - 1-based ordinal of the question being attempted
    /// * `question` - the catalog entry behind that ordinal
    pub fn new(ordinal: usize, question: &Question) -> Self {
        Self {
            ordinal,
            correct_option: question.correct_option,
            incorrect_choices: BTreeSet::new(),
            resolution: None,
        }
    }

    /// The ordinal this session is about
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Picks an answer option
    ///
    /// A correct pick resolves the session. An incorrect pick locks that
    /// option out and counts against the allowance of
    /// [`MAX_INCORRECT_ATTEMPTS`](constants::attempt::MAX_INCORRECT_ATTEMPTS);
    /// the final incorrect pick resolves the session as exhausted. Picks of
    /// already-tried options or into a resolved session are rejected.
    pub fn select(&mut self, answer: usize) -> SelectOutcome {
        if self.resolution.is_some() || self.incorrect_choices.contains(&answer) {
            return SelectOutcome::Rejected;
        }

        if answer == self.correct_option {
            self.resolution = Some(Resolution::Correct { answer });
            return SelectOutcome::Correct;
        }

        self.incorrect_choices.insert(answer);
        if self.incorrect_choices.len() >= constants::attempt::MAX_INCORRECT_ATTEMPTS {
            self.resolution = Some(Resolution::Exhausted { answer });
            SelectOutcome::Exhausted
        } else {
            SelectOutcome::Incorrect {
                attempts_left: constants::attempt::MAX_INCORRECT_ATTEMPTS
                    - self.incorrect_choices.len(),
            }
        }
    }

    /// Resolves the session because the countdown expired
    ///
    /// Returns `true` if the session resolved now, `false` if it had
    /// already resolved (the transition is one-way, so a late timer cannot
    /// overwrite an answer).
    pub fn time_up(&mut self) -> bool {
        if self.resolution.is_some() {
            return false;
        }
        self.resolution = Some(Resolution::TimedOut);
        true
    }

    /// Resolves the session by revealing the correct answer
    ///
    /// Returns `true` if the session resolved now, `false` if it had
    /// already resolved.
    pub fn reveal(&mut self) -> bool {
        if self.resolution.is_some() {
            return false;
        }
        self.resolution = Some(Resolution::Revealed);
        true
    }

    /// Number of incorrect picks so far
    pub fn incorrect_attempts(&self) -> usize {
        self.incorrect_choices.len()
    }

    /// Whether the given option was already picked incorrectly
    pub fn is_locked_out(&self, answer: usize) -> bool {
        self.incorrect_choices.contains(&answer)
    }

    /// The terminal state, if the session has resolved
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Whether the session has reached a terminal state
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    /// The completion record for a resolved session
    ///
    /// Returns the `(answer_index, is_correct)` pair to pass to the store.
    /// Timed-out and revealed sessions record the correct option index with
    /// `is_correct == false`. Open sessions return `None`.
    pub fn completion(&self) -> Option<(usize, bool)> {
        Some(match self.resolution? {
            Resolution::Correct { answer } => (answer, true),
            Resolution::Exhausted { answer } => (answer, false),
            Resolution::TimedOut | Resolution::Revealed => (self.correct_option, false),
        })
    }
}
