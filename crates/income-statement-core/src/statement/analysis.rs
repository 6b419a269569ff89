use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::statement::model::IncomeStatement;
use crate::statement::reconcile::ReconciliationReport;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Derived figures for one income statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementAnalysis {
    pub gross_profit: Money,
    pub operating_profit: Money,
    pub total_profit: Money,
    pub net_profit: Money,
    /// Gross profit / operating revenue. `None` when revenue is zero or the
    /// ratio overflows. Same for the other margins below.
    pub gross_margin: Option<Rate>,
    /// Operating profit / operating revenue.
    pub operating_margin: Option<Rate>,
    /// Net profit / operating revenue.
    pub net_margin: Option<Rate>,
    /// Income tax expense / total profit. `None` when total profit is zero
    /// or the ratio overflows.
    pub effective_tax_rate: Option<Rate>,
    pub reconciliation: ReconciliationReport,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive every profit figure and margin from the statement, and flag
/// breakdowns or tracked-only fields that disagree with the aggregates.
pub fn analyze_income_statement(
    statement: &IncomeStatement,
) -> ComputationOutput<IncomeStatementAnalysis> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let gross_profit = statement.gross_profit();
    let operating_profit = statement.operating_profit();
    let total_profit = statement.total_profit();
    let net_profit = statement.net_profit();

    let revenue = statement.operating_revenue;
    let reconciliation = statement.reconcile();

    // A breakdown left entirely at zero is treated as "not itemised".
    for check in reconciliation.mismatches() {
        if check.detail_total != Decimal::ZERO {
            warnings.push(format!(
                "{} ({}) differs from its breakdown total ({}) by {}",
                check.parent_field.as_str(),
                check.aggregate,
                check.detail_total,
                check.difference
            ));
        }
    }

    if statement.interest_expense != Decimal::ZERO {
        warnings.push(format!(
            "interest_expense ({}) is tracked separately and not included in financial_expenses ({})",
            statement.interest_expense, statement.financial_expenses
        ));
    }

    if statement.government_grants > statement.non_operating_income {
        warnings.push(format!(
            "government_grants ({}) exceed non_operating_income ({})",
            statement.government_grants, statement.non_operating_income
        ));
    }

    if revenue == Decimal::ZERO {
        warnings.push("operating_revenue is zero; margins are undefined".into());
    }

    let analysis = IncomeStatementAnalysis {
        gross_profit,
        operating_profit,
        total_profit,
        net_profit,
        gross_margin: safe_divide(gross_profit, revenue),
        operating_margin: safe_divide(operating_profit, revenue),
        net_margin: safe_divide(net_profit, revenue),
        effective_tax_rate: safe_divide(statement.income_tax_expense, total_profit),
        reconciliation,
    };

    debug!(
        %net_profit,
        warnings = warnings.len(),
        "income statement analysed"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Multi-step income statement (gross -> operating -> total -> net profit)",
        statement,
        warnings,
        elapsed,
        analysis,
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `None` on a zero denominator or when the quotient overflows.
fn safe_divide(numerator: Money, denominator: Money) -> Option<Decimal> {
    numerator.checked_div(denominator)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
