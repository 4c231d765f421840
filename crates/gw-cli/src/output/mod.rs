//! Rendering of command results as JSON, compact JSON or aligned tables.

use std::io::IsTerminal;

use serde::Serialize;
use serde_json::Value;

use crate::cli::{GlobalFlags, OutputFormat};

pub mod table;

/// Render a serializable value in the requested format.
///
/// Tables flatten one level: an array of objects becomes one row per item,
/// an object becomes key/value rows, and nested values are shown as JSON.
pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    options: table::TableOptions,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => Ok(render_value_table(serde_json::to_value(value)?, options)),
    }
}

/// Print a serializable value in the format chosen by `flags`.
pub fn output<T: Serialize>(value: &T, flags: &GlobalFlags) -> anyhow::Result<()> {
    println!("{}", render(value, flags.format, table_options(flags))?);
    Ok(())
}

fn table_options(flags: &GlobalFlags) -> table::TableOptions {
    let color = flags.format == OutputFormat::Table
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();
    let max_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);
    table::TableOptions { max_width, color }
}

fn render_value_table(value: Value, options: table::TableOptions) -> String {
    match value {
        Value::Array(items) if items.is_empty() => "(no rows)".to_string(),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let mut headers: Vec<String> = Vec::new();
            for map in items.iter().filter_map(Value::as_object) {
                for key in map.keys() {
                    if !headers.contains(key) {
                        headers.push(key.clone());
                    }
                }
            }
            let rows = items
                .iter()
                .filter_map(Value::as_object)
                .map(|map| {
                    headers
                        .iter()
                        .map(|h| map.get(h).map_or_else(|| "-".to_string(), cell))
                        .collect()
                })
                .collect::<Vec<_>>();
            let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
            table::render_table(&header_refs, &rows, options)
        }
        Value::Array(items) => {
            let rows: Vec<Vec<String>> = items.iter().map(|item| vec![cell(item)]).collect();
            table::render_table(&["value"], &rows, options)
        }
        Value::Object(map) => {
            let rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect();
            table::render_table(&["key", "value"], &rows, options)
        }
        scalar => cell(&scalar),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
