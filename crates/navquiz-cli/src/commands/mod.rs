pub mod init;
pub mod play;
pub mod profiles;
pub mod score;
pub mod validate;

use comfy_table::{Cell, Table};

use navquiz_core::{Catalog, ScoreTally};

/// Vote table: one row per category that received votes.
pub fn tally_table(catalog: &Catalog, tally: &ScoreTally) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Profile", "Name", "Votes", "Share"]);

    for entry in tally.entries() {
        table.add_row(vec![
            Cell::new(entry.category),
            Cell::new(&catalog.profile(entry.category).name),
            Cell::new(entry.count),
            Cell::new(format!("{:.0}%", tally.share(entry.category) * 100.0)),
        ]);
    }

    table
}
