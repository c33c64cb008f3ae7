//! Configuration constants for the quizboard game system
//!
//! This module contains all the configuration limits and constraints
//! used throughout the game system to ensure data integrity and
//! provide consistent boundaries for different game components.

/// Main session configuration constants
pub mod session {
    /// Maximum number of players allowed in a single game session
    pub const MAX_PLAYER_COUNT: usize = 50;
    /// Maximum number of questions a catalog may hold
    pub const MAX_QUESTION_COUNT: usize = 500;
    /// Maximum length of a player name in characters
    pub const MAX_NAME_LENGTH: usize = 30;
}

/// Scoring configuration constants
pub mod scoring {
    /// Points awarded for answering a question correctly
    pub const POINTS_PER_CORRECT: u64 = 10;
}

/// Question content configuration constants
pub mod question {
    /// Maximum length of a question prompt in characters
    pub const MAX_PROMPT_LENGTH: usize = 500;
    /// Minimum number of answer options for a question
    pub const MIN_OPTION_COUNT: usize = 2;
    /// Maximum number of answer options for a question
    pub const MAX_OPTION_COUNT: usize = 8;
    /// Maximum length of a single answer option in characters
    pub const MAX_OPTION_LENGTH: usize = 200;
}

/// Answer attempt configuration constants
pub mod attempt {
    /// Number of incorrect attempts before a question resolves as missed
    pub const MAX_INCORRECT_ATTEMPTS: usize = 3;
}

/// Countdown timer configuration constants
pub mod timer {
    /// Time limit in seconds for answering a question
    pub const QUESTION_TIME_LIMIT: u64 = 45;
    /// Default duration in seconds for a free-standing countdown
    pub const DEFAULT_TIME_LIMIT: u64 = 30;
    /// Remaining seconds at which the low-time warning starts
    pub const WARNING_SECONDS: u64 = 10;
}

/// Persistent storage configuration constants
pub mod storage {
    /// Fixed name of the persisted session snapshot blob
    pub const STORAGE_NAME: &str = "quiz-game-storage";
}
