use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::report::{Record, Skipped},
    quantity::cost::Euros,
};

#[must_use]
pub fn build_records_table(records: &[Record]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec![
        "Measure",
        "Name",
        "Case",
        "Load change",
        "Optimized for",
        "CO₂",
        "Cost",
        "Activations",
    ]);
    for record in records {
        let savings = record.savings;
        table.add_row(vec![
            Cell::new(&record.measure),
            Cell::new(&record.name).add_attribute(Attribute::Dim),
            Cell::new(record.variant),
            Cell::new(record.load_change).fg(record.load_change.color()),
            Cell::new(record.metric),
            Cell::new(savings.emission)
                .set_alignment(CellAlignment::Right)
                .fg(if savings.emission.is_positive() { Color::Green } else { Color::Reset }),
            Cell::new(savings.cost)
                .set_alignment(CellAlignment::Right)
                .fg(if savings.cost >= Euros::ONE_CENT {
                    Color::Green
                } else if savings.cost < Euros::ZERO {
                    Color::Red
                } else {
                    Color::Reset
                }),
            Cell::new(record.n_activations).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_skipped_table(skipped: &[Skipped]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Measure", "Case", "Reason"]);
    for skipped in skipped {
        table.add_row(vec![
            Cell::new(&skipped.measure),
            Cell::new(skipped.variant),
            Cell::new(&skipped.error).fg(Color::Red),
        ]);
    }
    table
}
