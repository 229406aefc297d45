//! Quiz session orchestrator.
//!
//! Composes progression, scoring and tie resolution behind one object, with
//! the presentation phase kept as an explicit value instead of global state.

use std::sync::Arc;

use crate::error::QuizError;
use crate::model::{Catalog, ProfileCategory, ProfileDefinition};
use crate::progression::{ConfirmOutcome, QuizAttempt};
use crate::report::ResultCard;
use crate::scoring::{self, ScoreTally, Verdict};
use crate::tie::TieResolution;

/// Which screen a front-end should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the first question.
    Intro,
    /// Questions are being answered.
    Answering,
    /// Scoring ended in a tie; waiting for a choice.
    TieBreak,
    /// The final profile is known.
    Revealed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Answering => "answering",
            Phase::TieBreak => "tie-break",
            Phase::Revealed => "revealed",
        }
    }
}

/// Session event hooks.
pub trait SessionObserver {
    fn on_answer(&self, question: u32, vote: ProfileCategory);
    fn on_complete(&self, tally: &ScoreTally);
    fn on_tie(&self, candidates: &[ProfileCategory]);
    fn on_revealed(&self, profile: &ProfileDefinition);
    fn on_restart(&self);
}

/// No-op session observer.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_answer(&self, _: u32, _: ProfileCategory) {}
    fn on_complete(&self, _: &ScoreTally) {}
    fn on_tie(&self, _: &[ProfileCategory]) {}
    fn on_revealed(&self, _: &ProfileDefinition) {}
    fn on_restart(&self) {}
}

/// One quiz taker's run, from intro to revealed profile.
pub struct QuizSession {
    attempt: QuizAttempt,
    phase: Phase,
    tally: Option<ScoreTally>,
    tie: Option<TieResolution>,
    revealed: Option<ProfileCategory>,
    observer: Box<dyn SessionObserver>,
}

impl QuizSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            attempt: QuizAttempt::new(catalog),
            phase: Phase::Intro,
            tally: None,
            tie: None,
            revealed: None,
            observer: Box::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn catalog(&self) -> &Catalog {
        self.attempt.catalog()
    }

    pub fn attempt(&self) -> &QuizAttempt {
        &self.attempt
    }

    /// The tally, once every question is answered.
    pub fn tally(&self) -> Option<&ScoreTally> {
        self.tally.as_ref()
    }

    /// The open or resolved tie, if scoring ended in one.
    pub fn tie(&self) -> Option<&TieResolution> {
        self.tie.as_ref()
    }

    /// The final profile, once revealed.
    pub fn final_profile(&self) -> Option<&ProfileDefinition> {
        self.revealed.map(|c| self.catalog().profile(c))
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), QuizError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(QuizError::PhaseMismatch {
                action,
                phase: self.phase.as_str(),
            })
        }
    }

    /// Leave the intro and show the first question.
    pub fn start(&mut self) -> Result<(), QuizError> {
        self.expect_phase(Phase::Intro, "start")?;
        self.phase = Phase::Answering;
        tracing::debug!(catalog = self.catalog().id(), "session started");
        Ok(())
    }

    pub fn select(&mut self, option_id: &str) -> Result<(), QuizError> {
        self.expect_phase(Phase::Answering, "select an option")?;
        self.attempt.select(option_id)
    }

    /// Confirm the highlighted option. After the last question the session
    /// scores the attempt and moves to `TieBreak` or `Revealed`.
    pub fn confirm(&mut self) -> Result<Phase, QuizError> {
        self.expect_phase(Phase::Answering, "confirm")?;
        let question = self.attempt.current_question().map(|q| q.id);

        let outcome = self.attempt.confirm()?;
        if let (Some(question), Some(&vote)) = (question, self.attempt.votes().last()) {
            self.observer.on_answer(question, vote);
        }

        let ConfirmOutcome::Completed { votes } = outcome else {
            return Ok(self.phase);
        };

        let tally = scoring::tally(&votes, self.catalog().question_count())?;
        self.observer.on_complete(&tally);

        match scoring::verdict(&tally) {
            Some(Verdict::Tied(tie)) => {
                tracing::info!(candidates = ?tie.candidates(), "attempt ended in a tie");
                self.observer.on_tie(tie.candidates());
                self.tie = Some(tie);
                self.phase = Phase::TieBreak;
            }
            Some(Verdict::Decided(winner)) => {
                self.reveal(winner);
            }
            None => {
                return Err(QuizError::IncompleteAttempt {
                    answered: votes.len(),
                    expected: self.catalog().question_count(),
                });
            }
        }
        self.tally = Some(tally);

        Ok(self.phase)
    }

    /// Pick the final profile among tied candidates. Only one pick is allowed
    /// per run.
    pub fn choose(&mut self, choice: ProfileCategory) -> Result<&ProfileDefinition, QuizError> {
        let tie = match (self.phase, self.tie.as_mut()) {
            (Phase::TieBreak | Phase::Revealed, Some(tie)) => tie,
            _ => {
                return Err(QuizError::PhaseMismatch {
                    action: "choose a tied profile",
                    phase: self.phase.as_str(),
                })
            }
        };
        let chosen = tie.choose(choice)?;
        self.reveal(chosen);
        Ok(self.catalog().profile(chosen))
    }

    fn reveal(&mut self, category: ProfileCategory) {
        self.revealed = Some(category);
        self.phase = Phase::Revealed;
        let profile = self.attempt.catalog().profile(category);
        tracing::info!(profile = %category, "profile revealed");
        self.observer.on_revealed(profile);
    }

    /// Throw away the run and go back to the intro.
    pub fn restart(&mut self) {
        self.attempt.restart();
        self.phase = Phase::Intro;
        self.tally = None;
        self.tie = None;
        self.revealed = None;
        tracing::debug!("session restarted");
        self.observer.on_restart();
    }

    /// Build the exportable result card, once the profile is revealed.
    pub fn result_card(&self) -> Option<ResultCard> {
        let profile = self.final_profile()?;
        let tally = self.tally.as_ref()?;
        let tie_candidates = self
            .tie
            .as_ref()
            .map(|t| t.candidates().to_vec())
            .unwrap_or_default();
        Some(ResultCard::new(
            self.catalog(),
            profile.clone(),
            tally.clone(),
            self.attempt.votes().to_vec(),
            tie_candidates,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::catalog;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl SessionObserver for Recorder {
        fn on_answer(&self, question: u32, vote: ProfileCategory) {
            self.events.lock().unwrap().push(format!("answer {question} {vote}"));
        }
        fn on_complete(&self, tally: &ScoreTally) {
            self.events.lock().unwrap().push(format!("complete {}", tally.total()));
        }
        fn on_tie(&self, candidates: &[ProfileCategory]) {
            self.events.lock().unwrap().push(format!("tie {}", candidates.len()));
        }
        fn on_revealed(&self, profile: &ProfileDefinition) {
            self.events.lock().unwrap().push(format!("revealed {}", profile.category));
        }
        fn on_restart(&self) {
            self.events.lock().unwrap().push("restart".into());
        }
    }

    fn answer_all(session: &mut QuizSession, ids: &[&str]) -> Phase {
        let mut phase = session.phase();
        for id in ids {
            session.select(id).unwrap();
            phase = session.confirm().unwrap();
        }
        phase
    }

    #[test]
    fn operations_require_the_right_phase() {
        let mut s = QuizSession::new(Arc::new(catalog(2)));
        assert_eq!(s.phase(), Phase::Intro);
        assert!(matches!(
            s.select("A").unwrap_err(),
            QuizError::PhaseMismatch { phase: "intro", .. }
        ));
        s.start().unwrap();
        assert!(s.start().is_err());
        assert!(matches!(
            s.choose(ProfileCategory::Intuitivo).unwrap_err(),
            QuizError::PhaseMismatch { .. }
        ));
    }

    #[test]
    fn unique_winner_is_revealed_directly() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut s = QuizSession::new(Arc::new(catalog(3))).with_observer(Box::new(Recorder {
            events: Arc::clone(&events),
        }));
        s.start().unwrap();
        assert_eq!(answer_all(&mut s, &["A", "B", "A"]), Phase::Revealed);
        assert_eq!(
            s.final_profile().unwrap().category,
            ProfileCategory::Intuitivo
        );
        assert!(s.tie().is_none());
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "answer 1 INTUITIVO",
                "answer 2 REFLEXIVO",
                "answer 3 INTUITIVO",
                "complete 3",
                "revealed INTUITIVO",
            ]
        );
        assert!(matches!(
            s.choose(ProfileCategory::Reflexivo).unwrap_err(),
            QuizError::PhaseMismatch { .. }
        ));
    }

    #[test]
    fn tie_waits_for_a_choice() {
        let mut s = QuizSession::new(Arc::new(catalog(2)));
        s.start().unwrap();
        assert_eq!(answer_all(&mut s, &["D", "C"]), Phase::TieBreak);
        assert!(s.final_profile().is_none());
        assert!(s.result_card().is_none());
        assert_eq!(
            s.tie().unwrap().candidates(),
            &[ProfileCategory::Resiliente, ProfileCategory::Resolutivo]
        );

        assert!(s.choose(ProfileCategory::Intuitivo).is_err());
        assert_eq!(s.phase(), Phase::TieBreak);

        let profile = s.choose(ProfileCategory::Resolutivo).unwrap();
        assert_eq!(profile.category, ProfileCategory::Resolutivo);
        assert_eq!(s.phase(), Phase::Revealed);

        assert_eq!(
            s.choose(ProfileCategory::Resiliente).unwrap_err(),
            QuizError::TieAlreadyResolved {
                chosen: ProfileCategory::Resolutivo
            }
        );
        let card = s.result_card().unwrap();
        assert_eq!(card.tie_candidates.len(), 2);
        assert_eq!(card.profile.category, ProfileCategory::Resolutivo);
    }

    #[test]
    fn restart_returns_to_intro() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut s = QuizSession::new(Arc::new(catalog(2))).with_observer(Box::new(Recorder {
            events: Arc::clone(&events),
        }));
        s.start().unwrap();
        answer_all(&mut s, &["D", "C"]);
        s.restart();

        assert_eq!(s.phase(), Phase::Intro);
        assert!(s.tally().is_none());
        assert!(s.tie().is_none());
        assert!(s.final_profile().is_none());
        assert_eq!(s.attempt().votes().len(), 0);
        assert_eq!(events.lock().unwrap().last().unwrap(), "restart");

        s.start().unwrap();
        assert_eq!(answer_all(&mut s, &["B", "B"]), Phase::Revealed);
    }
}
