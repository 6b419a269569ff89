use income_statement_core::statement::details::{Breakdown, TaxCategory};
use income_statement_core::statement::reconcile::BreakdownKind;
use income_statement_core::{IncomeStatement, LineItem};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Strategies
// ===========================================================================

/// Signed amounts with two decimal places, well inside Decimal range.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn statement_strategy() -> impl Strategy<Value = IncomeStatement> {
    prop::collection::vec(amount_strategy(), LineItem::ALL.len()).prop_map(|amounts| {
        let mut s = IncomeStatement::new();
        for (item, amount) in LineItem::ALL.iter().zip(amounts) {
            *s.line_item_mut(*item) = amount;
        }
        s
    })
}

fn expanded_net_profit(s: &IncomeStatement) -> Decimal {
    s.operating_revenue - s.operating_cost - s.taxes_and_surcharges - s.selling_expenses
        - s.administrative_expenses
        - s.financial_expenses
        + s.investment_income
        + s.non_operating_income
        - s.non_operating_expenses
        - s.income_tax_expense
}

fn derived(s: &IncomeStatement) -> [Decimal; 4] {
    [
        s.gross_profit(),
        s.operating_profit(),
        s.total_profit(),
        s.net_profit(),
    ]
}

// ===========================================================================
// Worked example
// ===========================================================================

#[test]
fn test_worked_example() {
    let mut s = IncomeStatement::new();
    s.operating_revenue = dec!(1000);
    s.operating_cost = dec!(400);
    s.taxes_and_surcharges = dec!(50);
    s.selling_expenses = dec!(100);
    s.administrative_expenses = dec!(80);
    s.financial_expenses = dec!(20);
    s.investment_income = dec!(30);
    s.non_operating_income = dec!(10);
    s.non_operating_expenses = dec!(5);
    s.income_tax_expense = dec!(77);

    assert_eq!(s.gross_profit(), dec!(550));
    assert_eq!(s.operating_profit(), dec!(380));
    assert_eq!(s.total_profit(), dec!(385));
    assert_eq!(s.net_profit(), dec!(308));
}

#[test]
fn test_zero_state() {
    assert_eq!(derived(&IncomeStatement::new()), [Decimal::ZERO; 4]);
}

#[test]
fn test_fractional_amounts_are_exact() {
    let mut s = IncomeStatement::new();
    s.operating_revenue = dec!(0.3);
    s.operating_cost = dec!(0.1);
    s.taxes_and_surcharges = dec!(0.2);
    assert_eq!(s.gross_profit(), Decimal::ZERO);
}

#[test]
fn test_negative_interest_expense_accepted() {
    let mut s = IncomeStatement::new();
    s.financial_expenses = dec!(20);
    s.interest_expense = dec!(-8);
    assert_eq!(s.operating_profit(), dec!(-20));
    assert_eq!(s.net_profit(), dec!(-20));
}

#[test]
fn test_json_document_round_trip_keeps_breakdowns() {
    let mut s = IncomeStatement::new();
    s.operating_revenue = dec!(1200.50);
    s.tax_details.set(TaxCategory::PropertyRelatedTax, dec!(4.25));
    s.non_operating_expenses_details.long_term_equity_investment_loss = dec!(9);

    let json = serde_json::to_string(&s).unwrap();
    let back: IncomeStatement = serde_json::from_str(&json).unwrap();
    assert_eq!(back, s);
    assert_eq!(back.detail_total(BreakdownKind::Taxes), dec!(4.25));
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Net profit equals the fully expanded formula for any field assignment.
    #[test]
    fn prop_net_profit_matches_expansion(s in statement_strategy()) {
        prop_assert_eq!(s.net_profit(), expanded_net_profit(&s));
    }

    /// Each layer is the previous layer adjusted by its own line items.
    #[test]
    fn prop_layers_chain(s in statement_strategy()) {
        prop_assert_eq!(
            s.gross_profit(),
            s.operating_revenue - s.operating_cost - s.taxes_and_surcharges
        );
        prop_assert_eq!(
            s.total_profit() - s.operating_profit(),
            s.non_operating_income - s.non_operating_expenses
        );
        prop_assert_eq!(s.total_profit() - s.net_profit(), s.income_tax_expense);
    }

    /// Breakdown entries never move any derived figure.
    #[test]
    fn prop_breakdowns_are_informational(
        s in statement_strategy(),
        tax in amount_strategy(),
        repair in amount_strategy(),
        research in amount_strategy(),
        bad_debt in amount_strategy(),
    ) {
        let before = derived(&s);
        let mut changed = s.clone();
        changed.tax_details.consumption_tax = tax;
        changed.selling_expenses_details.repair_cost = repair;
        changed.administrative_expenses_details.research_cost = research;
        changed.non_operating_expenses_details.bad_debt_loss = bad_debt;
        prop_assert_eq!(derived(&changed), before);
    }

    /// Raising revenue by delta raises every derived figure by exactly delta.
    #[test]
    fn prop_revenue_monotonic(s in statement_strategy(), delta in amount_strategy()) {
        let before = derived(&s);
        let mut raised = s.clone();
        raised.operating_revenue += delta;
        let after = derived(&raised);
        for (b, a) in before.iter().zip(after.iter()) {
            prop_assert_eq!(*a - *b, delta);
        }
    }

    /// Tracked-only fields never reach the derivations.
    #[test]
    fn prop_tracked_only_fields_ignored(
        s in statement_strategy(),
        interest in amount_strategy(),
        grants in amount_strategy(),
    ) {
        let before = derived(&s);
        let mut changed = s.clone();
        changed.interest_expense = interest;
        changed.government_grants = grants;
        prop_assert_eq!(derived(&changed), before);
    }

    /// Syncing from breakdowns always leaves a consistent statement.
    #[test]
    fn prop_sync_reconciles(
        s in statement_strategy(),
        tax in amount_strategy(),
        advertising in amount_strategy(),
    ) {
        let mut s = s;
        s.tax_details.resource_tax = tax;
        s.selling_expenses_details.advertising_cost = advertising;
        s.sync_aggregates_from_details();
        prop_assert!(s.reconcile().is_consistent());
        prop_assert_eq!(s.taxes_and_surcharges, tax);
        prop_assert_eq!(s.selling_expenses, advertising);
    }
}
