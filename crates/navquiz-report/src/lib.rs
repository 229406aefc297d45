//! navquiz-report — Result-card export.
//!
//! Each format is a `CardExporter`. `export_all` runs every requested
//! exporter and reports each outcome on its own, so one failing format
//! never hides the others and never touches quiz state.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;

use navquiz_core::report::ResultCard;

pub mod html;
pub mod markdown;
pub mod theme;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Html,
    Markdown,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Html, ExportFormat::Markdown, ExportFormat::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }

    /// Parse a comma-separated list; `all` expands to every format.
    pub fn parse_list(s: &str) -> Result<Vec<ExportFormat>> {
        let mut formats = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if part.eq_ignore_ascii_case("all") {
                return Ok(Self::ALL.to_vec());
            }
            let format: ExportFormat = part.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        anyhow::ensure!(!formats.is_empty(), "no export format given");
        Ok(formats)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Writes a result card in one format.
pub trait CardExporter {
    fn format(&self) -> ExportFormat;

    /// Render the card to a string.
    fn render(&self, card: &ResultCard) -> Result<String>;

    /// Write the card into `dir`, returning the file path.
    fn export(&self, card: &ResultCard, dir: &Path) -> Result<PathBuf> {
        let content = self.render(card)?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.{}", card.file_stem(), self.format().extension()));
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

/// Pretty JSON.
pub struct JsonExporter;

impl CardExporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn render(&self, card: &ResultCard) -> Result<String> {
        Ok(serde_json::to_string_pretty(card)?)
    }
}

/// The exporter for a format.
pub fn exporter_for(format: ExportFormat) -> Box<dyn CardExporter> {
    match format {
        ExportFormat::Html => Box::new(html::HtmlExporter),
        ExportFormat::Markdown => Box::new(markdown::MarkdownExporter),
        ExportFormat::Json => Box::new(JsonExporter),
    }
}

/// Outcome of exporting one format.
#[derive(Debug)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub result: Result<PathBuf>,
}

impl ExportOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Export a card in every requested format, collecting each outcome.
pub fn export_all(card: &ResultCard, dir: &Path, formats: &[ExportFormat]) -> Vec<ExportOutcome> {
    formats
        .iter()
        .map(|&format| {
            let result = exporter_for(format).export(card, dir);
            match &result {
                Ok(path) => tracing::info!(%format, "result card written to {}", path.display()),
                Err(e) => tracing::warn!(%format, "result card export failed: {e:#}"),
            }
            ExportOutcome { format, result }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use navquiz_core::parser::builtin_catalog;
    use navquiz_core::report::ResultCard;
    use navquiz_core::{Phase, ProfileCategory, QuizSession};

    /// A card from the built-in catalog, tied between RESILIENTE and
    /// RESOLUTIVO and resolved as RESOLUTIVO.
    pub fn tied_card() -> ResultCard {
        let mut session = QuizSession::new(Arc::new(builtin_catalog().unwrap()));
        session.start().unwrap();
        for id in ["A", "B", "A", "A", "C"] {
            session.select(id).unwrap();
            session.confirm().unwrap();
        }
        assert_eq!(session.phase(), Phase::TieBreak);
        session.choose(ProfileCategory::Resolutivo).unwrap();
        session.result_card().unwrap()
    }
}
