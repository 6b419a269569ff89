use std::io::{self, Write};

use serde_json::Value;

/// Pretty-print a payload to stdout.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(&mut stdout.lock(), value) {
        eprintln!("JSON output error: {}", e);
    }
}

/// Pretty JSON followed by a newline. Numbers are written with the digits
/// they were parsed or computed with.
pub fn write_json<W: Write>(writer: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)
}
