//! Table rendering for derived orders and reorder reports.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use deck_model::{IdentifierList, Permutation, ReorderReport, StepStatus};

/// One row per new position: the identifier and the slide it comes from.
pub fn order_table(current: &IdentifierList, order: &Permutation) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Position"),
        header_cell("Identifier"),
        header_cell("Source slide"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (offset, source_index) in order.iter().enumerate() {
        let identifier = current.get(source_index).unwrap_or("-");
        let moved = source_index != offset + 1;
        table.add_row(vec![
            Cell::new(offset + 1),
            Cell::new(identifier),
            if moved {
                Cell::new(source_index).fg(Color::Yellow)
            } else {
                dim_cell(source_index)
            },
        ]);
    }
    table
}

/// One row per step of a reorder run.
pub fn report_table(report: &ReorderReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Position"),
        header_cell("Source slide"),
        header_cell("Status"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for step in &report.steps {
        let (status, reason) = match &step.status {
            StepStatus::Placed => (
                Cell::new("placed").fg(Color::Green),
                dim_cell("-"),
            ),
            StepStatus::Skipped { reason } => (
                Cell::new("SKIPPED")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
                Cell::new(reason),
            ),
        };
        table.add_row(vec![
            Cell::new(step.position),
            Cell::new(step.source_index),
            status,
            reason,
        ]);
    }
    table
}

pub fn print_order(current: &IdentifierList, order: &Permutation) {
    println!("Slide order: {order}");
    println!("{}", order_table(current, order));
}

pub fn print_report(report: &ReorderReport) {
    println!("Source: {}", report.source.display());
    println!("Output: {}", report.output.display());
    println!("{}", report_table(report));
    println!(
        "{} of {} slides placed",
        report.placed_count(),
        report.steps.len()
    );
    if !report.is_complete() {
        eprintln!("Skipped slides:");
        for step in report.skipped() {
            if let StepStatus::Skipped { reason } = &step.status {
                eprintln!("- slide {} (position {}): {reason}", step.source_index, step.position);
            }
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
