use crate::filter::FilterState;
use crate::registry::RecordFilterRegistry;
use crate::selection::{SelectionParseError, SelectionSet};
use crate::settings::TestNumberFilterSetting;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde_json::json;
use std::fmt::Write;

const MAX_TABLE_ROWS: usize = 50;

fn to_pretty(value: serde_json::Value) -> String {
    serde_json::to_string_pretty(&value)
        .unwrap_or_else(|_| "{\"error\":\"failed to serialize output\"}".into())
}

/// Create a table with the shared header style
pub fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
    table
}

/// The diagnostic line shown for an invalid selection
pub fn format_selection_error(err: &SelectionParseError) -> String {
    format!("{} (offending token: '{}')", err.hint().red(), err.token())
}

pub fn format_selection_text(selection: &SelectionSet) -> String {
    let mut out = String::new();
    let canonical = if selection.is_empty() {
        "(none)".to_string()
    } else {
        selection.to_string()
    };
    let _ = writeln!(out, "Selection:    {canonical}");
    let _ = writeln!(out, "Test numbers: {}", selection.len());
    out
}

pub fn format_selection_json(
    text: &str,
    result: &Result<SelectionSet, SelectionParseError>,
) -> String {
    let value = match result {
        Ok(selection) => json!({
            "input": text,
            "valid": true,
            "canonical": selection.to_string(),
            "count": selection.len(),
        }),
        Err(e) => json!({
            "input": text,
            "valid": false,
            "token": e.token(),
            "error": e.hint(),
        }),
    };
    to_pretty(value)
}

pub fn format_apply_text(registry: &RecordFilterRegistry, state: &FilterState) -> String {
    let mut out = String::new();
    let status = if state.active {
        "active".green()
    } else {
        "inactive".yellow()
    };
    let _ = writeln!(out, "Filter:    {} ({status})", state.kind);
    let _ = writeln!(
        out,
        "Selection: {}",
        if state.selection.is_empty() {
            "(none)".to_string()
        } else {
            state.selection.to_string()
        }
    );
    let _ = writeln!(
        out,
        "Visible:   {} of {} records",
        registry.visible().len(),
        registry.records().len()
    );

    if registry.visible().is_empty() {
        let _ = writeln!(out, "No records match the filter.");
        return out;
    }

    let mut table = create_styled_table(&["#", "Type", "TEST_NUM"]);
    for &idx in registry.visible().iter().take(MAX_TABLE_ROWS) {
        let record = &registry.records()[idx];
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(record.record_type),
            Cell::new(
                record
                    .test_number()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    let _ = writeln!(out, "{table}");

    if registry.visible().len() > MAX_TABLE_ROWS {
        let _ = writeln!(
            out,
            "... +{} more",
            registry.visible().len() - MAX_TABLE_ROWS
        );
    }
    out
}

pub fn format_apply_json(registry: &RecordFilterRegistry, state: &FilterState) -> String {
    let records: Vec<_> = registry
        .visible()
        .iter()
        .map(|&idx| {
            json!({
                "index": idx + 1,
                "record": registry.records()[idx],
            })
        })
        .collect();

    to_pretty(json!({
        "filter": state,
        "total": registry.records().len(),
        "visible": registry.visible().len(),
        "records": records,
    }))
}

pub fn format_setting_text(key: &str, setting: Option<&TestNumberFilterSetting>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Key:       {key}");
    match setting {
        Some(setting) => {
            let _ = writeln!(out, "Enabled:   {}", setting.enabled);
            let _ = writeln!(out, "Selection: {}", setting.selected_test_numbers);
        }
        None => {
            let _ = writeln!(out, "No setting stored.");
        }
    }
    out
}

pub fn format_setting_json(key: &str, setting: Option<&TestNumberFilterSetting>) -> String {
    to_pretty(json!({
        "key": key,
        "setting": setting,
    }))
}
