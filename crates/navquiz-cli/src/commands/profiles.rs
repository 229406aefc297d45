//! The `navquiz profiles` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use navquiz_core::parser::load_catalog;

pub fn execute(catalog_path: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    println!("{}", catalog.title());

    let mut table = Table::new();
    table.set_header(vec!["Profile", "Name", "Theme", "Description"]);
    for profile in catalog.profiles() {
        table.add_row(vec![
            Cell::new(profile.category),
            Cell::new(&profile.name),
            Cell::new(profile.theme.as_str()),
            Cell::new(&profile.description),
        ]);
    }

    println!("{table}");
    Ok(())
}
