//! Quiz and catalog error types.
//!
//! Every `QuizError` is recoverable: the operation that produced it left the
//! attempt, tie or session exactly as it was, so the caller can retry with a
//! valid action.

use thiserror::Error;

use crate::model::ProfileCategory;

/// Errors raised by quiz progression, scoring and tie resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// `select` was given an id that is not an option of the current question.
    #[error("option '{option_id}' does not belong to question {question}")]
    InvalidOptionSelection { question: u32, option_id: String },

    /// `confirm` was called before any option was selected.
    #[error("no option selected for question {question}")]
    PrematureConfirm { question: u32 },

    /// The attempt already holds a vote for every question.
    #[error("attempt already completed")]
    AttemptCompleted,

    /// The chosen category is not one of the tied candidates.
    #[error("{choice} is not among the tied profiles")]
    InvalidTieChoice { choice: ProfileCategory },

    /// A choice was already made for this tie.
    #[error("tie already resolved as {chosen}")]
    TieAlreadyResolved { chosen: ProfileCategory },

    /// Tie resolution needs at least two candidates.
    #[error("tie resolution needs at least two candidates, got {candidates}")]
    NotATie { candidates: usize },

    /// Scoring was invoked on a partial vote sequence.
    #[error("attempt is incomplete: {answered} of {expected} questions answered")]
    IncompleteAttempt { answered: usize, expected: usize },

    /// Scoring was invoked with more votes than questions.
    #[error("too many votes: {answered} for {expected} questions")]
    TooManyVotes { answered: usize, expected: usize },

    /// A session operation was invoked in the wrong phase.
    #[error("cannot {action} while {phase}")]
    PhaseMismatch {
        action: &'static str,
        phase: &'static str,
    },
}

/// Structural defects that make a catalog unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no questions")]
    NoQuestions,

    #[error("question {question} has {count} option(s), at least 2 required")]
    TooFewOptions { question: u32, count: usize },

    #[error("question {question} has duplicate option id '{option_id}'")]
    DuplicateOptionId { question: u32, option_id: String },

    #[error("question {question} has an option with an empty id")]
    EmptyOptionId { question: u32 },

    #[error("no profile definition for {0}")]
    MissingProfile(ProfileCategory),

    #[error("more than one definition for {0}")]
    DuplicateProfile(ProfileCategory),

    #[error("profile definition keyed {key} describes {declared}")]
    ProfileKeyMismatch {
        key: ProfileCategory,
        declared: ProfileCategory,
    },

    #[error("{0} is not the target of any option and can never win")]
    UnreachableProfile(ProfileCategory),

    #[error("unknown profile category: {0}")]
    UnknownCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = QuizError::InvalidOptionSelection {
            question: 3,
            option_id: "Z".into(),
        };
        assert_eq!(err.to_string(), "option 'Z' does not belong to question 3");

        let err = QuizError::IncompleteAttempt {
            answered: 2,
            expected: 5,
        };
        assert!(err.to_string().contains("2 of 5"));

        let err = CatalogError::UnreachableProfile(ProfileCategory::Reflexivo);
        assert!(err.to_string().starts_with("REFLEXIVO"));
    }
}
