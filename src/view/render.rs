//! Plain-text and JSON output.

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::models::{header_label, ColumnHeader, DerivedRecord, Field};

use super::Profile;

fn new_table(lead: &str, columns: &[Field], headers: &[ColumnHeader]) -> Table {
    let mut header = vec![Cell::new(lead)];
    header.extend(
        columns
            .iter()
            .map(|column| Cell::new(header_label(headers, &column.to_string()))),
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn push_record(table: &mut Table, lead: String, record: &DerivedRecord, columns: &[Field]) {
    let mut row = vec![Cell::new(lead).set_alignment(CellAlignment::Right)];
    row.extend(columns.iter().map(|column| {
        let cell = Cell::new(column.value(record));
        if column.is_categorical() {
            cell
        } else {
            cell.set_alignment(CellAlignment::Right)
        }
    }));
    table.add_row(row);
}

fn ranked_table(rows: &[DerivedRecord], columns: &[Field], headers: &[ColumnHeader]) -> Table {
    let mut table = new_table("#", columns, headers);
    for (rank, record) in rows.iter().enumerate() {
        push_record(&mut table, (rank + 1).to_string(), record, columns);
    }
    table
}

fn profile_table(profile: &Profile, columns: &[Field], headers: &[ColumnHeader]) -> Table {
    let mut table = new_table("Season", columns, headers);
    for row in &profile.seasons {
        push_record(&mut table, row.season.to_string(), &row.record, columns);
    }
    if let Some(career) = &profile.career {
        push_record(&mut table, "Career".to_string(), career, columns);
    }
    table
}

fn headers_table(headers: &[ColumnHeader]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Abbr", "Column", "Description"]);
    for h in headers {
        table.add_row(vec![&h.abbreviation, &h.name, &h.description]);
    }
    table
}

/// Ranked text table of `rows` showing `columns`.
pub fn render_table(rows: &[DerivedRecord], columns: &[Field], headers: &[ColumnHeader]) -> String {
    ranked_table(rows, columns, headers).to_string()
}

/// Text table of a profile: one line per season, then the career line.
pub fn render_profile(profile: &Profile, columns: &[Field], headers: &[ColumnHeader]) -> String {
    profile_table(profile, columns, headers).to_string()
}

/// Column header metadata as a table.
pub fn render_headers(headers: &[ColumnHeader]) -> String {
    headers_table(headers).to_string()
}

/// Pretty-printed JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
