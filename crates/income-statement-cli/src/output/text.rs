use serde_json::Value;

use super::format_scalar;

/// Plain text. Rendered statements print as-is; computation envelopes print
/// one `field: value` line per result field followed by any warnings.
pub fn print_text(value: &Value) {
    if let Some(Value::String(text)) = value.get("text") {
        print!("{}", text);
        return;
    }

    match value.get("result") {
        Some(Value::Object(result)) => {
            for (key, val) in result {
                if val.is_object() {
                    continue;
                }
                println!("{}: {}", key, format_scalar(val));
            }
            if let Some(Value::Array(warnings)) = value.get("warnings") {
                for w in warnings.iter().filter_map(Value::as_str) {
                    println!("warning: {}", w);
                }
            }
        }
        _ => super::json::print_json(value),
    }
}
