//! navquiz CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "navquiz", version, about = "Personality profile quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz interactively
    Play {
        /// Catalog TOML file (default: built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output directory for the result card
        #[arg(long)]
        output: Option<PathBuf>,

        /// Export formats: html, md, json, all (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Do not export the result card
        #[arg(long)]
        no_export: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a sequence of answers without prompting
    Score {
        /// Option ids in question order (e.g. "A,B,A,A,C")
        #[arg(long)]
        answers: String,

        /// Profile to pick if the answers end in a tie
        #[arg(long)]
        choose: Option<String>,

        /// Catalog TOML file (default: built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the result card (all formats) into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// List the profiles of a catalog
    Profiles {
        /// Catalog TOML file (default: built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Create starter config and example catalog
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("navquiz_core=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            catalog,
            output,
            format,
            no_export,
            config,
        } => commands::play::execute(catalog, output, format, no_export, config),
        Commands::Score {
            answers,
            choose,
            catalog,
            format,
            export,
        } => commands::score::execute(answers, choose, catalog, format, export),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Profiles { catalog } => commands::profiles::execute(catalog),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
