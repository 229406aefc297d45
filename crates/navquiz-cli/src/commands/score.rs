//! The `navquiz score` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use navquiz_core::parser::load_catalog;
use navquiz_core::{Phase, ProfileCategory, QuizSession};
use navquiz_report::{export_all, ExportFormat};

pub fn execute(
    answers: String,
    choose: Option<String>,
    catalog_path: Option<PathBuf>,
    format: String,
    export: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        format == "text" || format == "json",
        "unknown output format: {format} (expected text or json)"
    );

    let catalog = Arc::new(load_catalog(catalog_path.as_deref())?);
    let choice = choose
        .map(|c| c.parse::<ProfileCategory>().map_err(anyhow::Error::msg))
        .transpose()?;

    let ids: Vec<&str> = answers
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    anyhow::ensure!(
        ids.len() == catalog.question_count(),
        "expected {} answers, got {}",
        catalog.question_count(),
        ids.len()
    );

    let mut session = QuizSession::new(Arc::clone(&catalog));
    session.start()?;
    for (i, id) in ids.iter().enumerate() {
        session
            .select(id)
            .with_context(|| format!("answer {} is invalid", i + 1))?;
        session.confirm()?;
    }

    match (session.phase(), choice) {
        (Phase::TieBreak, Some(choice)) => {
            session.choose(choice)?;
        }
        (Phase::Revealed, Some(choice)) => {
            eprintln!("No tie to break, ignoring --choose {choice}.");
        }
        _ => {}
    }

    let tally = session.tally().context("answers were not scored")?;
    let card = session.result_card();
    let candidates: Vec<ProfileCategory> = session
        .tie()
        .map(|t| t.candidates().to_vec())
        .unwrap_or_default();

    if format == "json" {
        let json = match &card {
            Some(card) => serde_json::to_string_pretty(card)?,
            None => serde_json::to_string_pretty(&serde_json::json!({
                "tally": tally,
                "tie_candidates": candidates,
            }))?,
        };
        println!("{json}");
    } else {
        println!("{}", super::tally_table(&catalog, tally));
        match &card {
            Some(card) => println!("\n{}", card.to_text()),
            None => {
                let tied: Vec<&str> = candidates.iter().map(|c| c.as_str()).collect();
                println!("\nTie between: {}", tied.join(", "));
                println!("Pass --choose <PROFILE> to pick one.");
            }
        }
    }

    if let Some(dir) = export {
        match &card {
            Some(card) => {
                for outcome in export_all(card, &dir, &ExportFormat::ALL) {
                    match &outcome.result {
                        Ok(path) => eprintln!("Result card ({}): {}", outcome.format, path.display()),
                        Err(e) => eprintln!("Could not export {}: {e:#}", outcome.format),
                    }
                }
            }
            None => eprintln!("Nothing exported: the tie is unresolved."),
        }
    }

    Ok(())
}
