//! Text rendering of an income statement.
//!
//! The renderer reads a statement snapshot and lays it out as thirteen
//! labelled rows in statutory order. It has no logic beyond picking the
//! amount for each row and formatting it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IncomeStatementError;
use crate::statement::model::IncomeStatement;
use crate::types::Money;
use crate::IncomeStatementResult;

// ---------------------------------------------------------------------------
// Rows and labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementRow {
    OperatingRevenue,
    OperatingCost,
    TaxesAndSurcharges,
    SellingExpenses,
    AdministrativeExpenses,
    FinancialExpenses,
    InvestmentIncome,
    OperatingProfit,
    NonOperatingIncome,
    NonOperatingExpenses,
    TotalProfit,
    IncomeTaxExpense,
    NetProfit,
}

impl StatementRow {
    /// Every row, in the order it is printed.
    pub const ORDER: [StatementRow; 13] = [
        StatementRow::OperatingRevenue,
        StatementRow::OperatingCost,
        StatementRow::TaxesAndSurcharges,
        StatementRow::SellingExpenses,
        StatementRow::AdministrativeExpenses,
        StatementRow::FinancialExpenses,
        StatementRow::InvestmentIncome,
        StatementRow::OperatingProfit,
        StatementRow::NonOperatingIncome,
        StatementRow::NonOperatingExpenses,
        StatementRow::TotalProfit,
        StatementRow::IncomeTaxExpense,
        StatementRow::NetProfit,
    ];

    /// Amount shown on this row. Subtotal rows are derived on each call.
    pub fn amount(self, statement: &IncomeStatement) -> Money {
        match self {
            StatementRow::OperatingRevenue => statement.operating_revenue,
            StatementRow::OperatingCost => statement.operating_cost,
            StatementRow::TaxesAndSurcharges => statement.taxes_and_surcharges,
            StatementRow::SellingExpenses => statement.selling_expenses,
            StatementRow::AdministrativeExpenses => statement.administrative_expenses,
            StatementRow::FinancialExpenses => statement.financial_expenses,
            StatementRow::InvestmentIncome => statement.investment_income,
            StatementRow::OperatingProfit => statement.operating_profit(),
            StatementRow::NonOperatingIncome => statement.non_operating_income,
            StatementRow::NonOperatingExpenses => statement.non_operating_expenses,
            StatementRow::TotalProfit => statement.total_profit(),
            StatementRow::IncomeTaxExpense => statement.income_tax_expense,
            StatementRow::NetProfit => statement.net_profit(),
        }
    }

    pub fn is_subtotal(self) -> bool {
        matches!(
            self,
            StatementRow::OperatingProfit | StatementRow::TotalProfit | StatementRow::NetProfit
        )
    }
}

/// Which fixed label set to print with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSet {
    #[default]
    English,
    /// Statutory PRC format (利润表).
    Chinese,
}

impl LabelSet {
    pub fn title(self) -> &'static str {
        match self {
            LabelSet::English => "Income Statement",
            LabelSet::Chinese => "利润表",
        }
    }

    pub fn label(self, row: StatementRow) -> &'static str {
        match self {
            LabelSet::English => english_label(row),
            LabelSet::Chinese => chinese_label(row),
        }
    }
}

impl FromStr for LabelSet {
    type Err = IncomeStatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(LabelSet::English),
            "chinese" | "zh" | "cn" => Ok(LabelSet::Chinese),
            other => Err(IncomeStatementError::InvalidInput {
                field: "labels".into(),
                reason: format!("unknown label set '{other}' (expected english or chinese)"),
            }),
        }
    }
}

fn english_label(row: StatementRow) -> &'static str {
    match row {
        StatementRow::OperatingRevenue => "I. Operating revenue",
        StatementRow::OperatingCost => "Less: Operating cost",
        StatementRow::TaxesAndSurcharges => "    Taxes and surcharges",
        StatementRow::SellingExpenses => "    Selling expenses",
        StatementRow::AdministrativeExpenses => "    Administrative expenses",
        StatementRow::FinancialExpenses => "    Financial expenses",
        StatementRow::InvestmentIncome => "Add: Investment income",
        StatementRow::OperatingProfit => "II. Operating profit",
        StatementRow::NonOperatingIncome => "Add: Non-operating income",
        StatementRow::NonOperatingExpenses => "Less: Non-operating expenses",
        StatementRow::TotalProfit => "III. Total profit",
        StatementRow::IncomeTaxExpense => "Less: Income tax expense",
        StatementRow::NetProfit => "IV. Net profit",
    }
}

fn chinese_label(row: StatementRow) -> &'static str {
    match row {
        StatementRow::OperatingRevenue => "一、营业收入",
        StatementRow::OperatingCost => "减：营业成本",
        StatementRow::TaxesAndSurcharges => "    税金及附加",
        StatementRow::SellingExpenses => "    销售费用",
        StatementRow::AdministrativeExpenses => "    管理费用",
        StatementRow::FinancialExpenses => "    财务费用",
        StatementRow::InvestmentIncome => "加：投资收益",
        StatementRow::OperatingProfit => "二、营业利润",
        StatementRow::NonOperatingIncome => "加：营业外收入",
        StatementRow::NonOperatingExpenses => "减：营业外支出",
        StatementRow::TotalProfit => "三、利润总额",
        StatementRow::IncomeTaxExpense => "减：所得税费用",
        StatementRow::NetProfit => "四、净利润",
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    pub row: StatementRow,
    pub label: String,
    pub amount: Money,
}

impl fmt::Display for StatementLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.amount)
    }
}

/// One labelled line per row, in statutory order.
pub fn render_lines(statement: &IncomeStatement, labels: LabelSet) -> Vec<StatementLine> {
    StatementRow::ORDER
        .iter()
        .map(|&row| StatementLine {
            row,
            label: labels.label(row).to_string(),
            amount: row.amount(statement),
        })
        .collect()
}

/// Title line followed by every statement line, newline-terminated.
pub fn render_text(statement: &IncomeStatement, labels: LabelSet) -> String {
    StatementDisplay { statement, labels }.to_string()
}

/// `Display` adapter over a borrowed statement.
pub struct StatementDisplay<'a> {
    pub statement: &'a IncomeStatement,
    pub labels: LabelSet,
}

impl fmt::Display for StatementDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.labels.title())?;
        for line in render_lines(self.statement, self.labels) {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// JSON request to render a statement: `{ "statement": {...}, "labels": "chinese" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderRequest {
    pub statement: IncomeStatement,
    #[serde(default)]
    pub labels: LabelSet,
}

impl RenderRequest {
    pub fn from_json(json: &str) -> IncomeStatementResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn render_text(&self) -> String {
        render_text(&self.statement, self.labels)
    }

    pub fn render_lines(&self) -> Vec<StatementLine> {
        render_lines(&self.statement, self.labels)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
