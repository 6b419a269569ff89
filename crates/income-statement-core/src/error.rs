use thiserror::Error;

#[derive(Debug, Error)]
pub enum IncomeStatementError {
    #[error("Unknown field: {path}")]
    UnknownField { path: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for IncomeStatementError {
    fn from(e: serde_json::Error) -> Self {
        IncomeStatementError::SerializationError(e.to_string())
    }
}
