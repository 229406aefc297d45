//! Markdown result card.

use anyhow::Result;

use navquiz_core::report::ResultCard;

use crate::{CardExporter, ExportFormat};

/// Format the card as markdown.
pub fn to_markdown(card: &ResultCard) -> String {
    let profile = &card.profile;
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", profile.name));
    md.push_str(&format!("*{}*\n\n", card.catalog.title));
    md.push_str(&format!("{}\n\n", profile.description));
    md.push_str(&format!("> {}\n\n", profile.advice));

    md.push_str("| Perfil | Votos | % |\n");
    md.push_str("|--------|-------|---|\n");
    for entry in card.tally.entries() {
        let label = if entry.category == profile.category {
            format!("**{}**", entry.category)
        } else {
            entry.category.to_string()
        };
        md.push_str(&format!(
            "| {label} | {} | {:.0}% |\n",
            entry.count,
            card.tally.share(entry.category) * 100.0
        ));
    }

    if card.was_tied() {
        let tied: Vec<&str> = card.tie_candidates.iter().map(|c| c.as_str()).collect();
        md.push_str(&format!("\nElegido entre: {}\n", tied.join(", ")));
    }

    md
}

/// Markdown card exporter.
pub struct MarkdownExporter;

impl CardExporter for MarkdownExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    fn render(&self, card: &ResultCard) -> Result<String> {
        Ok(to_markdown(card))
    }
}
