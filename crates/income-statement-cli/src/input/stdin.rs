use serde_json::Value;
use std::io::{self, Read};
use tracing::debug;

/// Read a piped JSON statement from stdin.
/// Returns None when stdin is a TTY or the pipe is empty.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    debug!(bytes = trimmed.len(), "statement read from stdin");
    let value: Value = serde_json::from_str(trimmed)?;
    Ok(Some(value))
}
