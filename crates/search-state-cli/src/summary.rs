use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use search_state_core::StateEntry;

pub fn print_entries(entries: &[StateEntry<'_>]) {
    if entries.is_empty() {
        println!("Search state is empty.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Index"),
        header_cell("Widget"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    for entry in entries {
        let index_cell = match entry.index {
            Some(index) => Cell::new(index),
            None => dim_cell("(shared)"),
        };
        table.add_row(vec![
            index_cell,
            Cell::new(entry.widget_id()).add_attribute(Attribute::Bold),
            Cell::new(entry.value),
        ]);
    }
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Left);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
