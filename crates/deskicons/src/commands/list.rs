use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use deskicons_core::Config;

use super::desktop;

pub fn execute(config: &Config) {
    let snapshot = desktop::run(config, |manager| manager.icons());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Index").set_alignment(CellAlignment::Right),
            Cell::new("Name"),
            Cell::new("X").set_alignment(CellAlignment::Right),
            Cell::new("Y").set_alignment(CellAlignment::Right),
        ]);

    for entry in &snapshot {
        table.add_row(vec![
            Cell::new(entry.index).set_alignment(CellAlignment::Right),
            Cell::new(&entry.name),
            Cell::new(entry.position.x).set_alignment(CellAlignment::Right),
            Cell::new(entry.position.y).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
    println!("\n{} icons found", snapshot.len());
}
