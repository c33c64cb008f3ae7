//! Question catalog loading and lookup
//!
//! This module defines the immutable question catalog: an ordered list of
//! multiple-choice questions loaded once from a static JSON source.
//! Questions are addressed by their 1-based ordinal throughout the crate,
//! and every lookup tolerates out-of-range ordinals by returning `None`
//! instead of faulting.

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

/// A single multiple-choice question
///
/// Questions are immutable once loaded. `correct_option` is an index into
/// `options`; the catalog loader rejects data where it is out of range.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Question {
    /// Stable identifier carried by the data source
    #[garde(skip)]
    pub id: u32,
    /// The question text shown to players
    #[garde(length(max = constants::question::MAX_PROMPT_LENGTH))]
    pub prompt: String,
    /// The ordered answer options
    #[garde(
        length(min = constants::question::MIN_OPTION_COUNT, max = constants::question::MAX_OPTION_COUNT),
        inner(length(max = constants::question::MAX_OPTION_LENGTH))
    )]
    pub options: Vec<String>,
    /// Index of the correct entry in `options`
    #[garde(skip)]
    pub correct_option: usize,
}

/// Errors that can occur while loading a catalog
#[derive(Error, Debug)]
pub enum Error {
    /// The JSON source could not be parsed
    #[error("malformed catalog data: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A question failed content validation
    #[error("invalid question {ordinal}: {report}")]
    Invalid {
        /// 1-based ordinal of the offending question
        ordinal: usize,
        /// The validation report
        report: garde::Report,
    },
    /// A question's correct-option index does not point into its options
    #[error("question {ordinal}: correct option {index} is out of range")]
    CorrectOptionOutOfRange {
        /// 1-based ordinal of the offending question
        ordinal: usize,
        /// The out-of-range index
        index: usize,
    },
    /// The catalog holds more questions than the session supports
    #[error("catalog exceeds {} questions", constants::session::MAX_QUESTION_COUNT)]
    TooLarge,
}

/// The ordered, immutable list of quiz questions
///
/// The store only ever reads the catalog's length and individual entries;
/// it never mutates it. Construction always runs validation, so a catalog
/// in hand is a valid one.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Loads and validates a catalog from its JSON source
    ///
    /// The source is an array of question objects. Each question is
    /// validated for content bounds, and its correct-option index is
    /// checked against its options.
    ///
    /// # Errors
    ///
    /// * [`Error::Malformed`] - the source is not valid JSON for a question list
    /// * [`Error::Invalid`] - a question violates the content bounds
    /// * [`Error::CorrectOptionOutOfRange`] - a correct-option index does not
    ///   point into the question's options
    /// * [`Error::TooLarge`] - the list exceeds the supported question count
    pub fn from_json(source: &str) -> Result<Self, Error> {
        let questions: Vec<Question> = serde_json::from_str(source)?;
        Self::from_questions(questions)
    }

    /// Builds and validates a catalog from already-deserialized questions
    ///
    /// # Errors
    ///
    /// Same validation failures as [`Catalog::from_json`], minus parsing.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, Error> {
        if questions.len() > constants::session::MAX_QUESTION_COUNT {
            return Err(Error::TooLarge);
        }
        for (index, question) in questions.iter().enumerate() {
            let ordinal = index + 1;
            question
                .validate()
                .map_err(|report| Error::Invalid { ordinal, report })?;
            if question.correct_option >= question.options.len() {
                return Err(Error::CorrectOptionOutOfRange {
                    ordinal,
                    index: question.correct_option,
                });
            }
        }
        Ok(Self { questions })
    }

    /// Number of questions in the catalog
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the catalog holds no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Looks up a question by its 1-based ordinal
    ///
    /// Returns `None` for ordinal 0 or any ordinal past the end, so route
    /// handlers can treat bad addresses as "question not found".
    pub fn get(&self, ordinal: usize) -> Option<&Question> {
        ordinal.checked_sub(1).and_then(|i| self.questions.get(i))
    }

    /// Checks an answer index against a question's correct option
    ///
    /// Returns `None` when the ordinal is out of range.
    pub fn is_correct(&self, ordinal: usize, answer_index: usize) -> Option<bool> {
        self.get(ordinal)
            .map(|question| question.correct_option == answer_index)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn sample_question(prompt: &str, options: &[&str], correct: usize) -> Question {
        Question {
            id: 1,
            prompt: prompt.to_owned(),
            options: options.iter().map(|s| (*s).to_owned()).collect(),
            correct_option: correct,
        }
    }

    #[test]
    fn test_catalog_from_json() {
        let source = r#"[
            {
                "id": 1,
                "prompt": "Which planet is known as the Red Planet?",
                "options": ["Earth", "Mars", "Jupiter", "Venus"],
                "correct_option": 1
            },
            {
                "id": 2,
                "prompt": "What is 2 + 2?",
                "options": ["3", "4", "5", "6"],
                "correct_option": 1
            }
        ]"#;

        let catalog = Catalog::from_json(source).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().prompt, "Which planet is known as the Red Planet?");
        assert_eq!(catalog.get(2).unwrap().correct_option, 1);
    }

    #[test]
    fn test_catalog_from_json_malformed() {
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(Error::Malformed(_))
        ));
    }

    #[test]
    fn test_catalog_rejects_out_of_range_correct_option() {
        let result =
            Catalog::from_questions(vec![sample_question("Q", &["a", "b"], 2)]);
        assert!(matches!(
            result,
            Err(Error::CorrectOptionOutOfRange { ordinal: 1, index: 2 })
        ));
    }

    #[test]
    fn test_catalog_rejects_too_few_options() {
        let result = Catalog::from_questions(vec![sample_question("Q", &["only"], 0)]);
        assert!(matches!(result, Err(Error::Invalid { ordinal: 1, .. })));
    }

    #[test]
    fn test_catalog_rejects_oversized_prompt() {
        let prompt = "q".repeat(constants::question::MAX_PROMPT_LENGTH + 1);
        let result = Catalog::from_questions(vec![sample_question(&prompt, &["a", "b"], 0)]);
        assert!(matches!(result, Err(Error::Invalid { ordinal: 1, .. })));
    }

    #[test]
    fn test_ordinal_lookup_bounds() {
        let catalog =
            Catalog::from_questions(vec![sample_question("Q", &["a", "b"], 0)]).unwrap();

        assert!(catalog.get(0).is_none());
        assert!(catalog.get(1).is_some());
        assert!(catalog.get(2).is_none());
        assert!(catalog.get(usize::MAX).is_none());
    }

    #[test]
    fn test_is_correct() {
        let catalog =
            Catalog::from_questions(vec![sample_question("Q", &["a", "b", "c"], 2)]).unwrap();

        assert_eq!(catalog.is_correct(1, 2), Some(true));
        assert_eq!(catalog.is_correct(1, 0), Some(false));
        assert_eq!(catalog.is_correct(9, 0), None);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::from_questions(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.get(1).is_none());
    }
}
