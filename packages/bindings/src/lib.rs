use napi::Result as NapiResult;
use napi_derive::napi;

use income_statement_core::render::RenderRequest;
use income_statement_core::statement::analysis;
use income_statement_core::IncomeStatement;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_statement(input_json: &str) -> NapiResult<IncomeStatement> {
    IncomeStatement::from_json(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_income_statement(input_json: String) -> NapiResult<String> {
    let statement = parse_statement(&input_json)?;
    let output = analysis::analyze_income_statement(&statement);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn reconcile_income_statement(input_json: String) -> NapiResult<String> {
    let statement = parse_statement(&input_json)?;
    serde_json::to_string(&statement.reconcile()).map_err(to_napi_error)
}

#[napi]
pub fn income_statement_template() -> NapiResult<String> {
    serde_json::to_string(&IncomeStatement::new()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render to plain text. Input: `{ "statement": {...}, "labels": "chinese" }`.
#[napi]
pub fn render_income_statement(input_json: String) -> NapiResult<String> {
    let request = RenderRequest::from_json(&input_json).map_err(to_napi_error)?;
    Ok(request.render_text())
}

/// Render to a JSON array of `{ row, label, amount }` lines.
#[napi]
pub fn render_income_statement_lines(input_json: String) -> NapiResult<String> {
    let request = RenderRequest::from_json(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&request.render_lines()).map_err(to_napi_error)
}
