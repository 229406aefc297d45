//! Vote tallying and winner selection.
//!
//! Tallies keep categories in the order they were first voted for, so the
//! winners of a tie come out in a stable, reproducible order.

use serde::Serialize;

use crate::error::QuizError;
use crate::model::ProfileCategory;
use crate::tie::TieResolution;

/// Vote count for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TallyEntry {
    pub category: ProfileCategory,
    pub count: u32,
}

/// Per-category vote counts of a completed attempt.
///
/// Only categories with at least one vote appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreTally {
    entries: Vec<TallyEntry>,
}

impl ScoreTally {
    /// Entries in first-encounter order.
    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }

    /// Votes for a category (0 if it received none).
    pub fn get(&self, category: ProfileCategory) -> u32 {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// Total number of votes.
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// The highest count.
    pub fn max_count(&self) -> u32 {
        self.entries.iter().map(|e| e.count).max().unwrap_or(0)
    }

    /// Fraction of all votes that went to a category.
    pub fn share(&self, category: ProfileCategory) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(category) as f64 / total as f64
    }
}

/// Count votes per category.
///
/// Fails fast unless exactly `expected` votes are given: partial data is
/// never scored as if it were final.
pub fn tally(votes: &[ProfileCategory], expected: usize) -> Result<ScoreTally, QuizError> {
    if votes.len() < expected || votes.is_empty() {
        return Err(QuizError::IncompleteAttempt {
            answered: votes.len(),
            expected,
        });
    }
    if votes.len() > expected {
        return Err(QuizError::TooManyVotes {
            answered: votes.len(),
            expected,
        });
    }

    let mut entries: Vec<TallyEntry> = Vec::new();
    for &vote in votes {
        match entries.iter_mut().find(|e| e.category == vote) {
            Some(entry) => entry.count += 1,
            None => entries.push(TallyEntry {
                category: vote,
                count: 1,
            }),
        }
    }

    Ok(ScoreTally { entries })
}

/// Every category whose count equals the maximum, in first-encounter order.
pub fn winners(tally: &ScoreTally) -> Vec<ProfileCategory> {
    let max = tally.max_count();
    tally
        .entries
        .iter()
        .filter(|e| e.count == max)
        .map(|e| e.category)
        .collect()
}

/// Outcome of scoring: a single winner, or a tie awaiting a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Decided(ProfileCategory),
    Tied(TieResolution),
}

/// Classify a tally. `None` only for an empty tally, which `tally` never
/// produces.
pub fn verdict(tally: &ScoreTally) -> Option<Verdict> {
    let mut top = winners(tally);
    if top.len() > 1 {
        return TieResolution::new(top).ok().map(Verdict::Tied);
    }
    top.pop().map(Verdict::Decided)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProfileCategory::*;

    #[test]
    fn counts_in_encounter_order() {
        let t = tally(&[Resiliente, Intuitivo, Resiliente, Resolutivo, Resiliente], 5).unwrap();
        let entries: Vec<(ProfileCategory, u32)> =
            t.entries().iter().map(|e| (e.category, e.count)).collect();
        assert_eq!(
            entries,
            vec![(Resiliente, 3), (Intuitivo, 1), (Resolutivo, 1)]
        );
        assert_eq!(t.get(Reflexivo), 0);
        assert_eq!(t.total(), 5);
        assert_eq!(t.max_count(), 3);
    }

    #[test]
    fn share_is_fraction_of_total() {
        let t = tally(&[Intuitivo, Intuitivo, Reflexivo, Resolutivo], 4).unwrap();
        assert!((t.share(Intuitivo) - 0.5).abs() < f64::EPSILON);
        assert!((t.share(Resiliente) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_votes_are_rejected() {
        assert_eq!(
            tally(&[Intuitivo, Reflexivo], 5).unwrap_err(),
            QuizError::IncompleteAttempt {
                answered: 2,
                expected: 5
            }
        );
        assert!(matches!(
            tally(&[], 0).unwrap_err(),
            QuizError::IncompleteAttempt { .. }
        ));
    }

    #[test]
    fn extra_votes_are_rejected() {
        assert_eq!(
            tally(&[Intuitivo, Reflexivo, Reflexivo], 2).unwrap_err(),
            QuizError::TooManyVotes {
                answered: 3,
                expected: 2
            }
        );
    }

    #[test]
    fn unique_maximum_is_decided() {
        let t = tally(&[Resiliente, Intuitivo, Reflexivo, Resolutivo, Intuitivo], 5).unwrap();
        assert_eq!(winners(&t), vec![Intuitivo]);
        assert_eq!(verdict(&t), Some(Verdict::Decided(Intuitivo)));
    }

    #[test]
    fn shared_maximum_is_a_tie() {
        let t = tally(&[Resiliente, Resolutivo, Resiliente, Resolutivo, Reflexivo], 5).unwrap();
        assert_eq!(winners(&t), vec![Resiliente, Resolutivo]);
        match verdict(&t) {
            Some(Verdict::Tied(tie)) => assert_eq!(tie.candidates(), &[Resiliente, Resolutivo]),
            other => panic!("expected tie, got {other:?}"),
        }
    }

    #[test]
    fn all_distinct_votes_tie_every_category() {
        let t = tally(&[Reflexivo, Intuitivo, Resiliente, Resolutivo], 4).unwrap();
        assert_eq!(
            winners(&t),
            vec![Reflexivo, Intuitivo, Resiliente, Resolutivo]
        );
    }
}
