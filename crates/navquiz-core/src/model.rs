//! Core data model types for navquiz.
//!
//! A `Catalog` is the immutable quiz definition: ordered questions whose
//! options each vote for one `ProfileCategory`, plus one `ProfileDefinition`
//! per category. Catalog invariants are checked once, at construction.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// The closed set of profiles a quiz taker can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProfileCategory {
    Intuitivo,
    Reflexivo,
    Resolutivo,
    Resiliente,
}

impl ProfileCategory {
    /// All categories in definition order.
    pub const ALL: [ProfileCategory; 4] = [
        ProfileCategory::Intuitivo,
        ProfileCategory::Reflexivo,
        ProfileCategory::Resolutivo,
        ProfileCategory::Resiliente,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileCategory::Intuitivo => "INTUITIVO",
            ProfileCategory::Reflexivo => "REFLEXIVO",
            ProfileCategory::Resolutivo => "RESOLUTIVO",
            ProfileCategory::Resiliente => "RESILIENTE",
        }
    }

    /// Position in definition order.
    pub fn index(&self) -> usize {
        match self {
            ProfileCategory::Intuitivo => 0,
            ProfileCategory::Reflexivo => 1,
            ProfileCategory::Resolutivo => 2,
            ProfileCategory::Resiliente => 3,
        }
    }
}

impl fmt::Display for ProfileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INTUITIVO" => Ok(ProfileCategory::Intuitivo),
            "REFLEXIVO" => Ok(ProfileCategory::Reflexivo),
            "RESOLUTIVO" => Ok(ProfileCategory::Resolutivo),
            "RESILIENTE" => Ok(ProfileCategory::Resiliente),
            other => Err(format!("unknown profile category: {other}")),
        }
    }
}

/// Opaque visual theme token. The core never interprets it; presentation
/// layers map it to a glyph and colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeToken(String);

impl ThemeToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThemeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display content for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDefinition {
    /// The category this definition describes.
    pub category: ProfileCategory,
    /// Human-readable profile name.
    pub name: String,
    /// What the profile says about the quiz taker.
    pub description: String,
    /// Advice shown alongside the description.
    pub advice: String,
    /// Visual theme token, passed through untouched.
    pub theme: ThemeToken,
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Identifier, unique within its question (e.g. "A").
    pub id: String,
    /// Answer text.
    pub text: String,
    /// Category this answer votes for.
    pub target: ProfileCategory,
}

/// A question with its ordered options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position in the quiz.
    pub id: u32,
    /// Prompt text.
    pub prompt: String,
    /// Options in display order.
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Look up an option by id, ignoring case and surrounding whitespace.
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        let wanted = option_id.trim();
        self.options
            .iter()
            .find(|o| o.id.eq_ignore_ascii_case(wanted))
    }
}

/// A validated quiz definition.
#[derive(Debug, Clone)]
pub struct Catalog {
    id: String,
    title: String,
    intro: String,
    export_name: String,
    questions: Vec<Question>,
    /// Indexed by `ProfileCategory::index`.
    profiles: Vec<ProfileDefinition>,
}

impl Catalog {
    /// Build a catalog, enforcing the structural invariants:
    /// at least one question, at least two options per question, option ids
    /// unique per question, a definition for every category, and every
    /// category reachable from some option.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        intro: impl Into<String>,
        export_name: Option<String>,
        mut questions: Vec<Question>,
        mut profiles: BTreeMap<ProfileCategory, ProfileDefinition>,
    ) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::NoQuestions);
        }

        let mut reachable = HashSet::new();
        for question in &mut questions {
            if question.options.len() < 2 {
                return Err(CatalogError::TooFewOptions {
                    question: question.id,
                    count: question.options.len(),
                });
            }
            let mut seen_ids = HashSet::new();
            for option in &mut question.options {
                // Ids are stored trimmed; lookup trims the requested id too.
                option.id = option.id.trim().to_string();
                let key = option.id.to_ascii_uppercase();
                if key.is_empty() {
                    return Err(CatalogError::EmptyOptionId {
                        question: question.id,
                    });
                }
                if !seen_ids.insert(key) {
                    return Err(CatalogError::DuplicateOptionId {
                        question: question.id,
                        option_id: option.id.clone(),
                    });
                }
                reachable.insert(option.target);
            }
        }

        let mut ordered = Vec::with_capacity(ProfileCategory::ALL.len());
        for category in ProfileCategory::ALL {
            let definition = profiles
                .remove(&category)
                .ok_or(CatalogError::MissingProfile(category))?;
            if definition.category != category {
                return Err(CatalogError::ProfileKeyMismatch {
                    key: category,
                    declared: definition.category,
                });
            }
            if !reachable.contains(&category) {
                return Err(CatalogError::UnreachableProfile(category));
            }
            ordered.push(definition);
        }

        let id = id.into();
        let export_name = export_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| id.clone());

        Ok(Self {
            id,
            title: title.into(),
            intro: intro.into(),
            export_name,
            questions,
            profiles: ordered,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn intro(&self) -> &str {
        &self.intro
    }

    /// Prefix used when naming exported result cards.
    pub fn export_name(&self) -> &str {
        &self.export_name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question at a 0-based index.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// The definition for a category. Always present in a built catalog.
    pub fn profile(&self, category: ProfileCategory) -> &ProfileDefinition {
        &self.profiles[category.index()]
    }

    /// All profile definitions in definition order.
    pub fn profiles(&self) -> &[ProfileDefinition] {
        &self.profiles
    }
}
