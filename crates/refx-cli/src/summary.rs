use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use refx_compare::Comparison;
use refx_export::ExportOutcome;

use crate::commands::ExportSummary;

pub fn print_export_summary(summary: &ExportSummary) {
    println!("Library: {}", summary.library.display());
    match &summary.outcome {
        ExportOutcome::Written {
            records,
            skipped,
            path,
        } => {
            println!("Output: {}", path.display());
            let mut table = Table::new();
            table.set_header(vec![header_cell("Exported"), header_cell("Skipped")]);
            apply_table_style(&mut table);
            table.add_row(vec![
                Cell::new(records),
                count_cell(*skipped, Color::Yellow),
            ]);
            println!("{table}");
        }
        ExportOutcome::Empty { skipped } => {
            println!("No records to export; no document written ({skipped} skipped).");
        }
    }
}

pub fn print_compare_report(comparison: &Comparison) {
    let mut counts = Table::new();
    counts.set_header(vec![
        header_cell("Reference"),
        header_cell("Candidate"),
        header_cell("Matched"),
        header_cell("Only reference"),
        header_cell("Only candidate"),
    ]);
    apply_table_style(&mut counts);
    counts.add_row(vec![
        Cell::new(comparison.counts.reference),
        Cell::new(comparison.counts.candidate),
        Cell::new(comparison.counts.matched),
        count_cell(comparison.counts.only_reference, Color::Red),
        count_cell(comparison.counts.only_candidate, Color::Red),
    ]);
    println!("{counts}");

    if comparison.field_issues.is_empty() {
        println!("All matched records agree on every compared field.");
    } else {
        let mut issues = Table::new();
        issues.set_header(vec![
            header_cell("Field"),
            header_cell("Issue"),
            header_cell("Count"),
        ]);
        apply_table_style(&mut issues);
        align_column(&mut issues, 2, CellAlignment::Right);
        for issue in &comparison.field_issues {
            issues.add_row(vec![
                Cell::new(&issue.field),
                Cell::new(issue.kind.as_str()),
                Cell::new(issue.count),
            ]);
        }
        println!("{issues}");
    }

    if !comparison.detailed.is_empty() {
        let mut details = Table::new();
        details.set_header(vec![
            header_cell("Record"),
            header_cell("Field"),
            header_cell("Reference"),
            header_cell("Candidate"),
        ]);
        apply_table_style(&mut details);
        for record in &comparison.detailed {
            for field in &record.missing_in_reference {
                details.add_row(vec![
                    Cell::new(&record.key),
                    Cell::new(field),
                    dim_cell("(missing)"),
                    Cell::new(""),
                ]);
            }
            for field in &record.missing_in_candidate {
                details.add_row(vec![
                    Cell::new(&record.key),
                    Cell::new(field),
                    Cell::new(""),
                    dim_cell("(missing)"),
                ]);
            }
            for (field, pair) in &record.diffs {
                details.add_row(vec![
                    Cell::new(&record.key),
                    Cell::new(field),
                    Cell::new(&pair.reference),
                    Cell::new(&pair.candidate),
                ]);
            }
        }
        println!("{details}");
    }

    for key in &comparison.only_reference {
        println!("only in reference: {key}");
    }
    for key in &comparison.only_candidate {
        println!("only in candidate: {key}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn dim_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Dim)
}
