use serde_json::Value;

use super::{format_scalar, row_array};

/// Print just the key answer value from the output.
///
/// Looks for the deepest profit figure available, falling back to the
/// first field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "net_profit",
        "total_profit",
        "operating_profit",
        "gross_profit",
        "is_consistent",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_scalar(val));
                    return;
                }
            }
        }

        // Rendered statement: the net profit row
        if let Some(rows) = row_array(map) {
            let net = rows
                .iter()
                .find(|r| r.get("row").and_then(Value::as_str) == Some("net_profit"));
            if let Some(amount) = net.and_then(|r| r.get("amount")) {
                println!("{}", format_scalar(amount));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(result_obj));
}
