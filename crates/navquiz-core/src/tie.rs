//! Tie resolution.
//!
//! When two or more categories share the top count the quiz taker picks one.
//! The pick is final: a different answer requires restarting the quiz.

use crate::error::QuizError;
use crate::model::{Catalog, ProfileCategory, ProfileDefinition};

/// A tie between candidates, resolved at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieResolution {
    candidates: Vec<ProfileCategory>,
    chosen: Option<ProfileCategory>,
}

impl TieResolution {
    /// Open a tie between `candidates` (duplicates are dropped, order kept).
    pub fn new(candidates: Vec<ProfileCategory>) -> Result<Self, QuizError> {
        let mut unique: Vec<ProfileCategory> = Vec::with_capacity(candidates.len());
        for c in candidates {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        if unique.len() < 2 {
            return Err(QuizError::NotATie {
                candidates: unique.len(),
            });
        }
        Ok(Self {
            candidates: unique,
            chosen: None,
        })
    }

    pub fn candidates(&self) -> &[ProfileCategory] {
        &self.candidates
    }

    pub fn chosen(&self) -> Option<ProfileCategory> {
        self.chosen
    }

    pub fn is_resolved(&self) -> bool {
        self.chosen.is_some()
    }

    /// Candidate at a 1-based display position.
    pub fn candidate_at(&self, position: usize) -> Option<ProfileCategory> {
        position
            .checked_sub(1)
            .and_then(|i| self.candidates.get(i))
            .copied()
    }

    /// Pick the final profile among the candidates.
    pub fn choose(&mut self, choice: ProfileCategory) -> Result<ProfileCategory, QuizError> {
        if let Some(chosen) = self.chosen {
            return Err(QuizError::TieAlreadyResolved { chosen });
        }
        if !self.candidates.contains(&choice) {
            tracing::debug!(%choice, "tie choice rejected");
            return Err(QuizError::InvalidTieChoice { choice });
        }
        tracing::debug!(%choice, candidates = self.candidates.len(), "tie resolved");
        self.chosen = Some(choice);
        Ok(choice)
    }
}

/// Resolve a tie without keeping state: returns the definition of `choice`
/// if it is one of at least two `winners`.
pub fn resolve_tie<'c>(
    catalog: &'c Catalog,
    winners: &[ProfileCategory],
    choice: ProfileCategory,
) -> Result<&'c ProfileDefinition, QuizError> {
    let mut tie = TieResolution::new(winners.to_vec())?;
    let chosen = tie.choose(choice)?;
    Ok(catalog.profile(chosen))
}
