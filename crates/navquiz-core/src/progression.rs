//! Quiz progression state machine.
//!
//! A `QuizAttempt` walks the catalog's questions in order. Each question is
//! answered in two steps: `select` highlights an option (any number of times),
//! `confirm` records its category as a vote and moves on. The attempt is
//! complete once every question holds a vote.

use std::sync::Arc;

use crate::error::QuizError;
use crate::model::{Catalog, ProfileCategory, Question};
use crate::scoring::{self, ScoreTally};

/// Where an attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// No option chosen for the current question.
    AwaitingSelection,
    /// An option is highlighted but not confirmed.
    SelectionMade,
    /// Every question has been answered.
    Completed,
}

/// Result of a successful `confirm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The vote was recorded and the attempt moved to the next question.
    Advanced { next_index: usize },
    /// The last question was answered. Emitted exactly once per run.
    Completed { votes: Vec<ProfileCategory> },
}

/// One run through a catalog.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    catalog: Arc<Catalog>,
    index: usize,
    pending: Option<String>,
    votes: Vec<ProfileCategory>,
}

impl QuizAttempt {
    /// Start a fresh attempt at the first question.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            index: 0,
            pending: None,
            votes: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// 0-based index of the current question.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The highlighted, unconfirmed option id.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Confirmed votes in question order.
    pub fn votes(&self) -> &[ProfileCategory] {
        &self.votes
    }

    pub fn is_complete(&self) -> bool {
        self.votes.len() == self.catalog.question_count()
    }

    pub fn state(&self) -> AttemptState {
        if self.is_complete() {
            AttemptState::Completed
        } else if self.pending.is_some() {
            AttemptState::SelectionMade
        } else {
            AttemptState::AwaitingSelection
        }
    }

    /// The question awaiting an answer, or `None` once complete.
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            None
        } else {
            self.catalog.question(self.index)
        }
    }

    /// 1-based position of the current question and the total count.
    pub fn position(&self) -> (usize, usize) {
        let total = self.catalog.question_count();
        ((self.index + 1).min(total), total)
    }

    /// Highlight an option of the current question, replacing any earlier
    /// highlight. Votes are never touched. Unknown ids leave state unchanged.
    pub fn select(&mut self, option_id: &str) -> Result<(), QuizError> {
        let question = self.current_question().ok_or(QuizError::AttemptCompleted)?;
        let Some(option) = question.option(option_id) else {
            let err = QuizError::InvalidOptionSelection {
                question: question.id,
                option_id: option_id.trim().to_string(),
            };
            tracing::debug!("select rejected: {err}");
            return Err(err);
        };

        tracing::debug!(question = question.id, option = %option.id, "option selected");
        self.pending = Some(option.id.clone());
        Ok(())
    }

    /// Record the highlighted option's category as a vote.
    ///
    /// Advances to the next question, or completes the attempt on the last
    /// one. Without a highlight the call is rejected and nothing moves.
    pub fn confirm(&mut self) -> Result<ConfirmOutcome, QuizError> {
        let question = self.current_question().ok_or(QuizError::AttemptCompleted)?;
        let Some(pending) = self.pending.as_deref() else {
            tracing::debug!(question = question.id, "confirm rejected: nothing selected");
            return Err(QuizError::PrematureConfirm {
                question: question.id,
            });
        };
        let target = question
            .option(pending)
            .map(|o| o.target)
            .ok_or_else(|| QuizError::InvalidOptionSelection {
                question: question.id,
                option_id: pending.to_string(),
            })?;
        let question_id = question.id;

        self.votes.push(target);
        self.pending = None;

        if self.index + 1 < self.catalog.question_count() {
            self.index += 1;
            tracing::debug!(question = question_id, vote = %target, "answer confirmed");
            Ok(ConfirmOutcome::Advanced {
                next_index: self.index,
            })
        } else {
            tracing::debug!(votes = self.votes.len(), "attempt completed");
            Ok(ConfirmOutcome::Completed {
                votes: self.votes.clone(),
            })
        }
    }

    /// Discard all progress and return to the first question.
    pub fn restart(&mut self) {
        self.index = 0;
        self.pending = None;
        self.votes.clear();
    }

    /// Tally the votes. Fails unless every question has been answered.
    pub fn tally(&self) -> Result<ScoreTally, QuizError> {
        scoring::tally(&self.votes, self.catalog.question_count())
    }
}
