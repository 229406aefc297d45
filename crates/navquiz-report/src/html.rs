//! HTML result card.
//!
//! Produces a self-contained, printable HTML file with all CSS inlined.

use anyhow::Result;

use navquiz_core::report::ResultCard;

use crate::theme;
use crate::{CardExporter, ExportFormat};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate the HTML card.
pub fn generate_html(card: &ResultCard) -> String {
    let profile = &card.profile;
    let visuals = theme::resolve(&profile.theme);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} — {}</title>\n",
        html_escape(&card.catalog.title),
        html_escape(&profile.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str(&format!(":root {{ --accent: {}; }}\n", visuals.color));
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<main class=\"card\">\n");

    // Visual side
    html.push_str("<section class=\"visual\">\n");
    html.push_str(&format!("<div class=\"glyph\">{}</div>\n", visuals.glyph));
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&profile.name)));
    html.push_str("</section>\n");

    // Content side
    html.push_str("<section class=\"content\">\n");
    html.push_str(&format!(
        "<p class=\"description\">{}</p>\n",
        html_escape(&profile.description)
    ));
    html.push_str(&format!(
        "<blockquote class=\"advice\">{}</blockquote>\n",
        html_escape(&profile.advice)
    ));

    html.push_str("<table class=\"tally\">\n");
    html.push_str("<thead><tr><th>Perfil</th><th>Votos</th><th>%</th></tr></thead>\n<tbody>\n");
    for entry in card.tally.entries() {
        let class = if entry.category == profile.category {
            " class=\"winner\""
        } else {
            ""
        };
        html.push_str(&format!(
            "<tr{}><td>{}</td><td>{}</td><td>{:.0}%</td></tr>\n",
            class,
            entry.category,
            entry.count,
            card.tally.share(entry.category) * 100.0
        ));
    }
    html.push_str("</tbody></table>\n");

    if card.was_tied() {
        let tied: Vec<&str> = card.tie_candidates.iter().map(|c| c.as_str()).collect();
        html.push_str(&format!(
            "<p class=\"tie\">Elegido entre: {}</p>\n",
            tied.join(", ")
        ));
    }
    html.push_str("</section>\n");
    html.push_str("</main>\n");

    html.push_str(&format!(
        "<footer>{} | {}</footer>\n",
        html_escape(&card.catalog.title),
        card.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    html.push_str("</body>\n</html>");
    html
}

/// HTML card exporter.
pub struct HtmlExporter;

impl CardExporter for HtmlExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    fn render(&self, card: &ResultCard) -> Result<String> {
        Ok(generate_html(card))
    }
}

const CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: #efecdd; color: #1e1b4b; }
.card { display: flex; max-width: 56rem; margin: 0 auto; background: #fff; border-radius: 2rem; overflow: hidden; box-shadow: 0 10px 30px rgba(30, 27, 75, 0.1); }
.visual { flex: 2; background: var(--accent); color: #fff; display: flex; flex-direction: column; align-items: center; justify-content: center; padding: 3rem; text-align: center; }
.glyph { font-size: 5rem; margin-bottom: 1.5rem; }
.content { flex: 3; padding: 3rem; }
.description { font-size: 1.25rem; line-height: 1.6; }
.advice { border-left: 0.5rem solid #65a30d; background: #efecdd; margin: 2rem 0; padding: 1.5rem; font-style: italic; border-radius: 1rem; }
.tally { border-collapse: collapse; width: 100%; }
.tally th, .tally td { border-bottom: 1px solid #e5e7eb; padding: 0.4rem; text-align: left; }
.tally .winner { font-weight: bold; }
.tie { color: #6b7280; }
footer { text-align: center; color: #6b7280; margin-top: 1.5rem; font-size: 0.85rem; }
@media print { body { background: #fff; } .card { box-shadow: none; } }
@media (max-width: 40rem) { .card { flex-direction: column; } }
"#;
