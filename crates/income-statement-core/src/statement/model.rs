use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::IncomeStatementError;
use crate::statement::details::{
    AdministrativeExpenseCategory, AdministrativeExpenseDetails, Breakdown, DetailKey,
    NonOperatingExpenseCategory, NonOperatingExpenseDetails, SellingExpenseCategory,
    SellingExpenseDetails, TaxCategory, TaxDetails,
};
use crate::types::Money;
use crate::IncomeStatementResult;

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

/// The flat (non-itemised) amounts on an income statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItem {
    OperatingRevenue,
    OperatingCost,
    TaxesAndSurcharges,
    SellingExpenses,
    AdministrativeExpenses,
    FinancialExpenses,
    InterestExpense,
    InvestmentIncome,
    NonOperatingIncome,
    GovernmentGrants,
    NonOperatingExpenses,
    IncomeTaxExpense,
}

impl LineItem {
    pub const ALL: &'static [LineItem] = &[
        LineItem::OperatingRevenue,
        LineItem::OperatingCost,
        LineItem::TaxesAndSurcharges,
        LineItem::SellingExpenses,
        LineItem::AdministrativeExpenses,
        LineItem::FinancialExpenses,
        LineItem::InterestExpense,
        LineItem::InvestmentIncome,
        LineItem::NonOperatingIncome,
        LineItem::GovernmentGrants,
        LineItem::NonOperatingExpenses,
        LineItem::IncomeTaxExpense,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LineItem::OperatingRevenue => "operating_revenue",
            LineItem::OperatingCost => "operating_cost",
            LineItem::TaxesAndSurcharges => "taxes_and_surcharges",
            LineItem::SellingExpenses => "selling_expenses",
            LineItem::AdministrativeExpenses => "administrative_expenses",
            LineItem::FinancialExpenses => "financial_expenses",
            LineItem::InterestExpense => "interest_expense",
            LineItem::InvestmentIncome => "investment_income",
            LineItem::NonOperatingIncome => "non_operating_income",
            LineItem::GovernmentGrants => "government_grants",
            LineItem::NonOperatingExpenses => "non_operating_expenses",
            LineItem::IncomeTaxExpense => "income_tax_expense",
        }
    }

    pub fn parse(name: &str) -> Option<LineItem> {
        LineItem::ALL.iter().copied().find(|item| item.as_str() == name)
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// One income statement for one reporting period.
///
/// Fields are public and mutated directly; there is no setter layer and no
/// validation. A fresh statement is all zeros.
///
/// The `*_details` breakdowns are informational. They are never summed into
/// their parent aggregates and never participate in the profit derivations.
/// Likewise `interest_expense` and `government_grants` are tracked alongside
/// `financial_expenses` and `non_operating_income` but are not consumed by
/// any derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncomeStatement {
    pub operating_revenue: Money,
    pub operating_cost: Money,
    pub taxes_and_surcharges: Money,
    pub tax_details: TaxDetails,
    pub selling_expenses: Money,
    pub selling_expenses_details: SellingExpenseDetails,
    pub administrative_expenses: Money,
    pub administrative_expenses_details: AdministrativeExpenseDetails,
    pub financial_expenses: Money,
    /// Interest expense; interest income is recorded as a negative value.
    pub interest_expense: Money,
    pub investment_income: Money,
    pub non_operating_income: Money,
    pub government_grants: Money,
    pub non_operating_expenses: Money,
    pub non_operating_expenses_details: NonOperatingExpenseDetails,
    pub income_tax_expense: Money,
}

impl IncomeStatement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON statement document. Missing fields are zero.
    pub fn from_json(json: &str) -> IncomeStatementResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Revenue less operating cost and taxes and surcharges.
    pub fn gross_profit(&self) -> Money {
        self.operating_revenue - self.operating_cost - self.taxes_and_surcharges
    }

    /// Gross profit less period expenses, plus investment income.
    pub fn operating_profit(&self) -> Money {
        self.gross_profit() - self.selling_expenses - self.administrative_expenses
            - self.financial_expenses
            + self.investment_income
    }

    /// Operating profit plus non-operating income, less non-operating expenses.
    pub fn total_profit(&self) -> Money {
        self.operating_profit() + self.non_operating_income - self.non_operating_expenses
    }

    /// Total profit less income tax expense.
    pub fn net_profit(&self) -> Money {
        self.total_profit() - self.income_tax_expense
    }

    pub fn line_item(&self, item: LineItem) -> Money {
        match item {
            LineItem::OperatingRevenue => self.operating_revenue,
            LineItem::OperatingCost => self.operating_cost,
            LineItem::TaxesAndSurcharges => self.taxes_and_surcharges,
            LineItem::SellingExpenses => self.selling_expenses,
            LineItem::AdministrativeExpenses => self.administrative_expenses,
            LineItem::FinancialExpenses => self.financial_expenses,
            LineItem::InterestExpense => self.interest_expense,
            LineItem::InvestmentIncome => self.investment_income,
            LineItem::NonOperatingIncome => self.non_operating_income,
            LineItem::GovernmentGrants => self.government_grants,
            LineItem::NonOperatingExpenses => self.non_operating_expenses,
            LineItem::IncomeTaxExpense => self.income_tax_expense,
        }
    }

    pub fn line_item_mut(&mut self, item: LineItem) -> &mut Money {
        match item {
            LineItem::OperatingRevenue => &mut self.operating_revenue,
            LineItem::OperatingCost => &mut self.operating_cost,
            LineItem::TaxesAndSurcharges => &mut self.taxes_and_surcharges,
            LineItem::SellingExpenses => &mut self.selling_expenses,
            LineItem::AdministrativeExpenses => &mut self.administrative_expenses,
            LineItem::FinancialExpenses => &mut self.financial_expenses,
            LineItem::InterestExpense => &mut self.interest_expense,
            LineItem::InvestmentIncome => &mut self.investment_income,
            LineItem::NonOperatingIncome => &mut self.non_operating_income,
            LineItem::GovernmentGrants => &mut self.government_grants,
            LineItem::NonOperatingExpenses => &mut self.non_operating_expenses,
            LineItem::IncomeTaxExpense => &mut self.income_tax_expense,
        }
    }

    fn slot_mut(&mut self, path: &str) -> Option<&mut Money> {
        match path.split_once('.') {
            None => {
                let item = LineItem::parse(path)?;
                Some(self.line_item_mut(item))
            }
            Some(("tax_details", key)) => {
                let key = TaxCategory::parse(key)?;
                Some(self.tax_details.get_mut(key))
            }
            Some(("selling_expenses_details", key)) => {
                let key = SellingExpenseCategory::parse(key)?;
                Some(self.selling_expenses_details.get_mut(key))
            }
            Some(("administrative_expenses_details", key)) => {
                let key = AdministrativeExpenseCategory::parse(key)?;
                Some(self.administrative_expenses_details.get_mut(key))
            }
            Some(("non_operating_expenses_details", key)) => {
                let key = NonOperatingExpenseCategory::parse(key)?;
                Some(self.non_operating_expenses_details.get_mut(key))
            }
            Some(_) => None,
        }
    }

    /// Set a single amount by path.
    ///
    /// `path` is either a line item (`operating_revenue`) or a breakdown entry
    /// (`tax_details.consumption_tax`). Setting a breakdown entry leaves the
    /// parent aggregate untouched.
    pub fn assign(&mut self, path: &str, amount: Money) -> IncomeStatementResult<()> {
        match self.slot_mut(path) {
            Some(slot) => {
                trace!(path, %amount, "assign");
                *slot = amount;
                Ok(())
            }
            None => Err(IncomeStatementError::UnknownField {
                path: path.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
