pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;
pub mod text;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
        OutputFormat::Text => text::print_text(value),
    }
}

/// Row-shaped payloads: rendered statement lines or reconciliation checks.
fn row_array(map: &Map<String, Value>) -> Option<&Vec<Value>> {
    ["lines", "checks"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_array))
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
