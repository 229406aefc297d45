//! Result card: the exportable summary of a revealed profile.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::model::{Catalog, ProfileCategory, ProfileDefinition};
use crate::scoring::ScoreTally;

/// Summary of a catalog (without questions or profile texts).
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub id: String,
    pub title: String,
    pub export_name: String,
    pub question_count: usize,
}

/// A revealed profile together with how it was reached.
#[derive(Debug, Clone, Serialize)]
pub struct ResultCard {
    /// Unique card identifier.
    pub id: Uuid,
    /// When the card was created.
    pub created_at: DateTime<Utc>,
    /// Catalog the quiz was taken from.
    pub catalog: CatalogSummary,
    /// The final profile.
    pub profile: ProfileDefinition,
    /// Vote counts behind it.
    pub tally: ScoreTally,
    /// Votes in question order.
    pub votes: Vec<ProfileCategory>,
    /// Tied candidates the profile was picked from; empty without a tie.
    pub tie_candidates: Vec<ProfileCategory>,
}

impl ResultCard {
    pub fn new(
        catalog: &Catalog,
        profile: ProfileDefinition,
        tally: ScoreTally,
        votes: Vec<ProfileCategory>,
        tie_candidates: Vec<ProfileCategory>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            catalog: CatalogSummary {
                id: catalog.id().to_string(),
                title: catalog.title().to_string(),
                export_name: catalog.export_name().to_string(),
                question_count: catalog.question_count(),
            },
            profile,
            tally,
            votes,
            tie_candidates,
        }
    }

    pub fn was_tied(&self) -> bool {
        !self.tie_candidates.is_empty()
    }

    /// File name stem for exports, e.g. `Perfil-Navegante-Capitán-Reflexivo`.
    pub fn file_stem(&self) -> String {
        let name = self
            .profile
            .name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("{}-{}", self.catalog.export_name, name).replace(['/', '\\'], "-")
    }

    /// Save the card as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize result card")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result card to {}", path.display()))?;
        Ok(())
    }

    /// Plain-text rendering, used on terminals and as the print fallback.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.profile.name));
        out.push_str(&format!("{}\n\n", "=".repeat(self.profile.name.chars().count())));
        out.push_str(&format!("{}\n\n", self.profile.description));
        out.push_str(&format!("> {}\n\n", self.profile.advice));

        let counts: Vec<String> = self
            .tally
            .entries()
            .iter()
            .map(|e| format!("{} {}", e.category, e.count))
            .collect();
        out.push_str(&format!("Votes: {}\n", counts.join(", ")));
        if self.was_tied() {
            let tied: Vec<&str> = self.tie_candidates.iter().map(|c| c.as_str()).collect();
            out.push_str(&format!("Chosen from a tie between: {}\n", tied.join(", ")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::catalog;
    use crate::scoring::tally;
    use ProfileCategory::*;

    fn card(tie: Vec<ProfileCategory>) -> ResultCard {
        let c = catalog(3);
        let votes = vec![Resiliente, Resiliente, Intuitivo];
        ResultCard::new(
            &c,
            c.profile(Resiliente).clone(),
            tally(&votes, 3).unwrap(),
            votes,
            tie,
        )
    }

    #[test]
    fn file_stem_joins_export_name_and_profile_name() {
        let mut c = card(vec![]);
        c.catalog.export_name = "Perfil-Navegante".into();
        c.profile.name = "Viajero  Resiliente".into();
        assert_eq!(c.file_stem(), "Perfil-Navegante-Viajero-Resiliente");

        c.profile.name = "A/B".into();
        assert_eq!(c.file_stem(), "Perfil-Navegante-A-B");
    }

    #[test]
    fn text_mentions_tie_only_when_tied() {
        let plain = card(vec![]).to_text();
        assert!(plain.contains("resiliente name"));
        assert!(plain.contains("RESILIENTE 2, INTUITIVO 1"));
        assert!(!plain.contains("tie"));

        let tied = card(vec![Resiliente, Resolutivo]).to_text();
        assert!(tied.contains("tie between: RESILIENTE, RESOLUTIVO"));
    }

    #[test]
    fn save_json_writes_card() {
        let c = card(vec![]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("card.json");
        c.save_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["profile"]["category"], "RESILIENTE");
        assert_eq!(value["catalog"]["question_count"], 3);
        assert_eq!(value["tally"]["entries"][0]["count"], 2);
    }
}
