//! The `navquiz play` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use navquiz_core::config::load_config_from;
use navquiz_core::parser::load_catalog;
use navquiz_core::report::ResultCard;
use navquiz_core::{
    Catalog, Phase, ProfileCategory, ProfileDefinition, QuizSession, ScoreTally, SessionObserver,
    TieResolution,
};
use navquiz_report::{export_all, ExportFormat};

/// Console session observer. Writes to stderr so stdout stays for the quiz.
struct ConsoleObserver;

impl SessionObserver for ConsoleObserver {
    fn on_answer(&self, question: u32, vote: ProfileCategory) {
        tracing::debug!(question, %vote, "answer recorded");
    }

    fn on_complete(&self, tally: &ScoreTally) {
        eprintln!("  All questions answered ({} votes).", tally.total());
    }

    fn on_tie(&self, candidates: &[ProfileCategory]) {
        eprintln!("  Tie between {} profiles.", candidates.len());
    }

    fn on_revealed(&self, profile: &ProfileDefinition) {
        eprintln!("  Profile: {}", profile.category);
    }

    fn on_restart(&self) {
        eprintln!("  Restarted.");
    }
}

pub fn execute(
    catalog_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<String>,
    no_export: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let catalog_path = catalog_path.or(config.catalog);
    let catalog = Arc::new(load_catalog(catalog_path.as_deref())?);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let Some(card) = run(catalog, stdin.lock(), &mut stdout)? else {
        return Ok(());
    };

    if no_export {
        return Ok(());
    }

    let formats = match format {
        Some(f) => ExportFormat::parse_list(&f)?,
        None => ExportFormat::parse_list(&config.formats.join(","))
            .context("invalid formats in config")?,
    };
    let output = output.unwrap_or(config.output_dir);

    let outcomes = export_all(&card, &output, &formats);
    for outcome in &outcomes {
        match &outcome.result {
            Ok(path) => eprintln!("Result card ({}): {}", outcome.format, path.display()),
            Err(e) => eprintln!("Could not export {}: {e:#}", outcome.format),
        }
    }
    if !outcomes.iter().any(|o| o.is_ok()) {
        writeln!(stdout, "\n{}", card.to_text())?;
    }

    Ok(())
}

enum Input {
    Line(String),
    Quit,
}

fn read_input<R: BufRead>(input: &mut R) -> Result<Input> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Input::Quit);
    }
    let line = line.trim();
    if line.eq_ignore_ascii_case("quit") {
        return Ok(Input::Quit);
    }
    Ok(Input::Line(line.to_string()))
}

/// Drive a session over line-based input.
///
/// Returns the result card once a profile is revealed, or `None` if the
/// player quits or input ends first.
pub fn run<R: BufRead, W: Write>(
    catalog: Arc<Catalog>,
    mut input: R,
    out: &mut W,
) -> Result<Option<ResultCard>> {
    let mut session = QuizSession::new(catalog).with_observer(Box::new(ConsoleObserver));
    let mut shown: Option<usize> = None;

    loop {
        match session.phase() {
            Phase::Intro => {
                let catalog = session.catalog();
                writeln!(out, "{}\n", catalog.title())?;
                writeln!(out, "{}\n", catalog.intro())?;
                writeln!(out, "Press Enter to start ('quit' to exit).")?;
                out.flush()?;

                match read_input(&mut input)? {
                    Input::Quit => return Ok(None),
                    Input::Line(_) => {
                        session.start()?;
                        shown = None;
                    }
                }
            }
            Phase::Answering => {
                let index = session.attempt().index();
                if shown != Some(index) {
                    show_question(&session, out)?;
                    shown = Some(index);
                }
                out.flush()?;

                let line = match read_input(&mut input)? {
                    Input::Quit => return Ok(None),
                    Input::Line(line) => line,
                };
                if line.is_empty() {
                    if let Err(e) = session.confirm() {
                        writeln!(out, "  {e}")?;
                    }
                } else if line.eq_ignore_ascii_case("restart") {
                    session.restart();
                } else {
                    match session.select(&line) {
                        Ok(()) => writeln!(
                            out,
                            "Selected {}. Press Enter to confirm.",
                            session.attempt().pending().unwrap_or(line.as_str())
                        )?,
                        Err(e) => writeln!(out, "  {e}")?,
                    }
                }
            }
            Phase::TieBreak => {
                let candidates = session
                    .tie()
                    .map(|t| t.candidates().to_vec())
                    .unwrap_or_default();
                writeln!(out, "\nIt's a tie! Pick the profile that fits you best:")?;
                for (i, &category) in candidates.iter().enumerate() {
                    writeln!(out, "  {}. {}", i + 1, session.catalog().profile(category).name)?;
                }
                out.flush()?;

                let line = match read_input(&mut input)? {
                    Input::Quit => return Ok(None),
                    Input::Line(line) => line,
                };
                if line.eq_ignore_ascii_case("restart") {
                    session.restart();
                    continue;
                }
                let choice = match session.tie().and_then(|t| parse_tie_choice(&line, t)) {
                    Some(choice) => choice,
                    None => {
                        writeln!(out, "  Enter a number from 1 to {}.", candidates.len())?;
                        continue;
                    }
                };
                if let Err(e) = session.choose(choice) {
                    writeln!(out, "  {e}")?;
                }
            }
            Phase::Revealed => {
                let card = session
                    .result_card()
                    .context("revealed session has no result card")?;
                writeln!(out, "\n{}", card.to_text())?;
                return Ok(Some(card));
            }
        }
    }
}

fn show_question<W: Write>(session: &QuizSession, out: &mut W) -> Result<()> {
    let Some(question) = session.attempt().current_question() else {
        return Ok(());
    };
    let (position, total) = session.attempt().position();
    writeln!(out, "\n[{position}/{total}] {}", question.prompt)?;
    for option in &question.options {
        writeln!(out, "  {}) {}", option.id, option.text)?;
    }
    writeln!(out, "Type an option, Enter to confirm ('restart', 'quit').")?;
    Ok(())
}

/// A 1-based candidate number, or a category name.
fn parse_tie_choice(line: &str, tie: &TieResolution) -> Option<ProfileCategory> {
    if let Ok(n) = line.parse::<usize>() {
        return tie.candidate_at(n);
    }
    line.parse::<ProfileCategory>().ok()
}
