//! The `navquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("navquiz.toml").exists() {
        println!("navquiz.toml already exists, skipping.");
    } else {
        std::fs::write("navquiz.toml", SAMPLE_CONFIG)?;
        println!("Created navquiz.toml");
    }

    std::fs::create_dir_all("catalogs")?;
    let example_path = std::path::Path::new("catalogs/example.toml");
    if example_path.exists() {
        println!("catalogs/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)?;
        println!("Created catalogs/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit catalogs/example.toml with your own questions");
    println!("  2. Run: navquiz validate --catalog catalogs/example.toml");
    println!("  3. Run: navquiz play --catalog catalogs/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# navquiz configuration

# Catalog to play (the built-in catalog when unset)
# catalog = "catalogs/example.toml"

output_dir = "./navquiz-results"
formats = ["html"]
"#;

const EXAMPLE_CATALOG: &str = r#"[catalog]
id = "example"
title = "Example Quiz"
intro = "Two quick questions to get started."
export_name = "Example-Profile"

[profiles.INTUITIVO]
name = "Intuitive Navigator"
description = "You follow your instincts and read people well."
advice = "Trust your compass, but mark the shoals too."
theme = "wind"

[profiles.REFLEXIVO]
name = "Reflective Captain"
description = "You think things through before acting."
advice = "Sometimes the tide will not wait for a full plan."
theme = "anchor"

[profiles.RESOLUTIVO]
name = "Resolute Explorer"
description = "You find solutions quickly and act on them."
advice = "Check the crew is still aboard before setting sail."
theme = "compass"

[profiles.RESILIENTE]
name = "Resilient Voyager"
description = "You recover from setbacks and keep going."
advice = "Rest in port now and then."
theme = "zap"

[[questions]]
prompt = "A storm is coming. What do you do first?"

[[questions.options]]
id = "A"
text = "Ask the crew how they feel about it."
target = "INTUITIVO"

[[questions.options]]
id = "B"
text = "Study the charts and the forecast."
target = "REFLEXIVO"

[[questions]]
prompt = "The plan fails halfway through. What now?"

[[questions.options]]
id = "A"
text = "Improvise a new route on the spot."
target = "RESOLUTIVO"

[[questions.options]]
id = "B"
text = "Regroup and try again tomorrow."
target = "RESILIENTE"
"#;
