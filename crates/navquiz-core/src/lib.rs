//! navquiz-core — Catalog model, quiz progression, scoring and tie resolution.
//!
//! This crate defines the data model and the deterministic scoring core that
//! the navquiz front-ends build on. Nothing here renders or persists anything.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod progression;
pub mod report;
pub mod scoring;
pub mod session;
pub mod tie;

pub use error::{CatalogError, QuizError};
pub use model::{AnswerOption, Catalog, ProfileCategory, ProfileDefinition, Question, ThemeToken};
pub use progression::{AttemptState, ConfirmOutcome, QuizAttempt};
pub use scoring::{ScoreTally, Verdict};
pub use session::{NoopObserver, Phase, QuizSession, SessionObserver};
pub use tie::TieResolution;
