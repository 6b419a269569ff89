use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::debug;

use income_statement_core::render::{self, LabelSet};
use income_statement_core::statement::analysis;
use income_statement_core::{IncomeStatement, IncomeStatementError, LineItem};

use crate::input;

/// Arguments shared by every command that takes a statement
#[derive(Args, Default)]
#[command(allow_hyphen_values = true)]
pub struct StatementArgs {
    /// Path to JSON statement file (individual flags override its values)
    #[arg(long)]
    pub input: Option<String>,

    /// Operating revenue
    #[arg(long)]
    pub operating_revenue: Option<Decimal>,

    /// Operating cost (cost of sales)
    #[arg(long)]
    pub operating_cost: Option<Decimal>,

    /// Taxes and surcharges
    #[arg(long)]
    pub taxes_and_surcharges: Option<Decimal>,

    /// Selling expenses
    #[arg(long)]
    pub selling_expenses: Option<Decimal>,

    /// Administrative expenses
    #[arg(long)]
    pub administrative_expenses: Option<Decimal>,

    /// Financial expenses
    #[arg(long)]
    pub financial_expenses: Option<Decimal>,

    /// Interest expense (interest income as a negative value)
    #[arg(long)]
    pub interest_expense: Option<Decimal>,

    /// Investment income
    #[arg(long)]
    pub investment_income: Option<Decimal>,

    /// Non-operating income
    #[arg(long)]
    pub non_operating_income: Option<Decimal>,

    /// Government grants
    #[arg(long)]
    pub government_grants: Option<Decimal>,

    /// Non-operating expenses
    #[arg(long)]
    pub non_operating_expenses: Option<Decimal>,

    /// Income tax expense
    #[arg(long)]
    pub income_tax_expense: Option<Decimal>,

    /// Set any amount by path, e.g. tax_details.consumption_tax=12.5 (repeatable)
    #[arg(long = "set", value_name = "PATH=AMOUNT")]
    pub assignments: Vec<String>,
}

/// Arguments for rendering a statement
#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub statement: StatementArgs,

    /// Label set for row names
    #[arg(long, default_value = "english")]
    pub labels: Labels,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Labels {
    English,
    Chinese,
}

impl From<Labels> for LabelSet {
    fn from(labels: Labels) -> Self {
        match labels {
            Labels::English => LabelSet::English,
            Labels::Chinese => LabelSet::Chinese,
        }
    }
}

impl StatementArgs {
    fn flag(&self, item: LineItem) -> Option<Decimal> {
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

    /// Build the statement: JSON document (file, then stdin, then all zeros),
    /// then line-item flags, then `--set` assignments.
    fn load(&self) -> Result<IncomeStatement, Box<dyn std::error::Error>> {
        let mut statement: IncomeStatement = if let Some(ref path) = self.input {
            input::file::read_json(path)?
        } else if let Some(data) = input::stdin::read_stdin()? {
            serde_json::from_value(data)?
        } else {
            IncomeStatement::new()
        };

        for &item in LineItem::ALL {
            if let Some(amount) = self.flag(item) {
                *statement.line_item_mut(item) = amount;
            }
        }

        for raw in &self.assignments {
            let (path, amount) = parse_assignment(raw)?;
            statement.assign(path, amount)?;
        }

        debug!(
            overrides = self.assignments.len(),
            "statement loaded"
        );
        Ok(statement)
    }
}

/// Split `path=amount` into its parts.
fn parse_assignment(raw: &str) -> Result<(&str, Decimal), IncomeStatementError> {
    let (path, amount) = raw
        .split_once('=')
        .ok_or_else(|| IncomeStatementError::InvalidInput {
            field: raw.to_string(),
            reason: "expected PATH=AMOUNT".into(),
        })?;
    let path = path.trim();
    let amount = amount
        .trim()
        .parse::<Decimal>()
        .map_err(|e| IncomeStatementError::InvalidInput {
            field: path.to_string(),
            reason: format!("'{}' is not a decimal amount: {}", amount.trim(), e),
        })?;
    Ok((path, amount))
}

pub fn run_compute(args: StatementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let statement = args.load()?;
    let result = analysis::analyze_income_statement(&statement);
    Ok(serde_json::to_value(result)?)
}

pub fn run_render(args: RenderArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let statement = args.statement.load()?;
    let labels = LabelSet::from(args.labels);
    let lines = render::render_lines(&statement, labels);
    Ok(json!({
        "title": labels.title(),
        "lines": lines,
        "text": render::render_text(&statement, labels),
    }))
}

pub fn run_reconcile(args: StatementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let statement = args.load()?;
    let report = statement.reconcile();
    Ok(json!({
        "is_consistent": report.is_consistent(),
        "checks": report.checks,
    }))
}

pub fn run_template() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(IncomeStatement::new())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_parse_assignment() {
        let (path, amount) = parse_assignment("tax_details.resource_tax = -3.5").unwrap();
        assert_eq!(path, "tax_details.resource_tax");
        assert_eq!(amount, dec!(-3.5));
    }

    #[test]
    fn test_parse_assignment_missing_equals() {
        assert!(matches!(
            parse_assignment("operating_revenue"),
            Err(IncomeStatementError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_parse_assignment_bad_amount() {
        match parse_assignment("operating_cost=lots") {
            Err(IncomeStatementError::InvalidInput { field, .. }) => {
                assert_eq!(field, "operating_cost")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    fn write_statement_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn args_for(file: &tempfile::NamedTempFile) -> StatementArgs {
        StatementArgs {
            input: Some(file.path().to_string_lossy().into_owned()),
            ..StatementArgs::default()
        }
    }

    #[test]
    fn test_load_applies_file_then_flags_then_set() {
        let file = write_statement_file(
            r#"{"operating_revenue": 1000, "operating_cost": 400, "tax_details": {"consumption_tax": 5}}"#,
        );
        let args = StatementArgs {
            operating_cost: Some(dec!(450)),
            income_tax_expense: Some(dec!(10)),
            assignments: vec![
                "operating_cost=475".into(),
                "tax_details.consumption_tax=7".into(),
            ],
            ..args_for(&file)
        };

        let statement = args.load().unwrap();
        // File value, untouched by flags or --set
        assert_eq!(statement.operating_revenue, dec!(1000));
        // File 400, flag 450, --set 475
        assert_eq!(statement.operating_cost, dec!(475));
        // Flag only
        assert_eq!(statement.income_tax_expense, dec!(10));
        // --set on a breakdown entry leaves the aggregate alone
        assert_eq!(statement.tax_details.consumption_tax, dec!(7));
        assert_eq!(statement.taxes_and_surcharges, Decimal::ZERO);
    }

    #[test]
    fn test_load_flag_overrides_file() {
        let file = write_statement_file(r#"{"operating_revenue": "1000", "operating_cost": 400}"#);
        let args = StatementArgs {
            operating_revenue: Some(dec!(1500)),
            ..args_for(&file)
        };
        let statement = args.load().unwrap();
        assert_eq!(statement.operating_revenue, dec!(1500));
        assert_eq!(statement.gross_profit(), dec!(1100));
    }

    #[test]
    fn test_load_unknown_set_path() {
        let file = write_statement_file("{}");
        let args = StatementArgs {
            assignments: vec!["tax_details.vat=1".into()],
            ..args_for(&file)
        };
        let err = args.load().unwrap_err();
        match err.downcast_ref::<IncomeStatementError>() {
            Some(IncomeStatementError::UnknownField { path }) => {
                assert_eq!(path, "tax_details.vat")
            }
            other => panic!("expected UnknownField, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let args = StatementArgs {
            input: Some("/nonexistent/statement.json".into()),
            ..StatementArgs::default()
        };
        let err = args.load().unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_render_payload() {
        let file = write_statement_file(r#"{"operating_revenue": 1000, "income_tax_expense": 250}"#);
        let args = RenderArgs {
            statement: args_for(&file),
            labels: Labels::Chinese,
        };
        let value = run_render(args).unwrap();
        assert_eq!(value["title"], json!("利润表"));
        assert_eq!(value["lines"].as_array().map(Vec::len), Some(13));
        assert_eq!(value["lines"][12]["row"], json!("net_profit"));
        let text = value["text"].as_str().unwrap();
        assert!(text.starts_with("利润表\n"));
        assert!(text.ends_with("四、净利润: 750\n"));
    }

    #[test]
    fn test_template_is_zero_statement() {
        let value = run_template().unwrap();
        let statement: IncomeStatement = serde_json::from_value(value).unwrap();
        assert_eq!(statement, IncomeStatement::new());
    }
}
