//! Breakdown-to-aggregate reconciliation.
//!
//! Aggregates (`taxes_and_surcharges`, `selling_expenses`, ...) and their
//! itemised breakdowns are set independently. [`IncomeStatement::reconcile`]
//! reports where they disagree without changing anything;
//! [`IncomeStatement::sync_aggregates_from_details`] overwrites each aggregate
//! with its breakdown total, and only runs when a caller asks for it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::statement::details::Breakdown;
use crate::statement::model::{IncomeStatement, LineItem};
use crate::types::Money;

/// The four itemised aggregates on the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownKind {
    Taxes,
    SellingExpenses,
    AdministrativeExpenses,
    NonOperatingExpenses,
}

impl BreakdownKind {
    pub const ALL: &'static [BreakdownKind] = &[
        BreakdownKind::Taxes,
        BreakdownKind::SellingExpenses,
        BreakdownKind::AdministrativeExpenses,
        BreakdownKind::NonOperatingExpenses,
    ];

    /// The aggregate line item this breakdown itemises.
    pub fn parent(self) -> LineItem {
        match self {
            BreakdownKind::Taxes => LineItem::TaxesAndSurcharges,
            BreakdownKind::SellingExpenses => LineItem::SellingExpenses,
            BreakdownKind::AdministrativeExpenses => LineItem::AdministrativeExpenses,
            BreakdownKind::NonOperatingExpenses => LineItem::NonOperatingExpenses,
        }
    }

    /// Field name of the breakdown on [`IncomeStatement`].
    pub fn field_name(self) -> &'static str {
        match self {
            BreakdownKind::Taxes => "tax_details",
            BreakdownKind::SellingExpenses => "selling_expenses_details",
            BreakdownKind::AdministrativeExpenses => "administrative_expenses_details",
            BreakdownKind::NonOperatingExpenses => "non_operating_expenses_details",
        }
    }
}

/// Comparison of one aggregate against its breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownCheck {
    pub kind: BreakdownKind,
    pub parent_field: LineItem,
    pub aggregate: Money,
    pub detail_total: Money,
    /// `aggregate - detail_total`
    pub difference: Money,
    pub is_consistent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub checks: Vec<BreakdownCheck>,
}

impl ReconciliationReport {
    pub fn is_consistent(&self) -> bool {
        self.checks.iter().all(|c| c.is_consistent)
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &BreakdownCheck> {
        self.checks.iter().filter(|c| !c.is_consistent)
    }

    pub fn check(&self, kind: BreakdownKind) -> Option<&BreakdownCheck> {
        self.checks.iter().find(|c| c.kind == kind)
    }
}

impl IncomeStatement {
    /// Total of the breakdown behind `kind`.
    pub fn detail_total(&self, kind: BreakdownKind) -> Money {
        match kind {
            BreakdownKind::Taxes => self.tax_details.total(),
            BreakdownKind::SellingExpenses => self.selling_expenses_details.total(),
            BreakdownKind::AdministrativeExpenses => self.administrative_expenses_details.total(),
            BreakdownKind::NonOperatingExpenses => self.non_operating_expenses_details.total(),
        }
    }

    /// Compare every aggregate against its breakdown. Read-only.
    pub fn reconcile(&self) -> ReconciliationReport {
        let checks: Vec<BreakdownCheck> = BreakdownKind::ALL
            .iter()
            .map(|&kind| {
                let parent_field = kind.parent();
                let aggregate = self.line_item(parent_field);
                let detail_total = self.detail_total(kind);
                let difference = aggregate - detail_total;
                BreakdownCheck {
                    kind,
                    parent_field,
                    aggregate,
                    detail_total,
                    difference,
                    is_consistent: difference == Decimal::ZERO,
                }
            })
            .collect();

        debug!(
            mismatches = checks.iter().filter(|c| !c.is_consistent).count(),
            "reconciled breakdowns"
        );
        ReconciliationReport { checks }
    }

    /// Overwrite each aggregate with the total of its breakdown.
    pub fn sync_aggregates_from_details(&mut self) {
        for &kind in BreakdownKind::ALL {
            let total = self.detail_total(kind);
            *self.line_item_mut(kind.parent()) = total;
        }
        debug!("aggregates synced from breakdowns");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_statement_is_consistent() {
        let report = IncomeStatement::new().reconcile();
        assert_eq!(report.checks.len(), 4);
        assert!(report.is_consistent());
        assert_eq!(report.mismatches().count(), 0);
    }

    #[test]
    fn test_aggregate_without_details_is_mismatch() {
        let mut s = IncomeStatement::new();
        s.taxes_and_surcharges = dec!(50);
        let report = s.reconcile();
        assert!(!report.is_consistent());

        let check = report.check(BreakdownKind::Taxes).unwrap();
        assert_eq!(check.parent_field, LineItem::TaxesAndSurcharges);
        assert_eq!(check.aggregate, dec!(50));
        assert_eq!(check.detail_total, Decimal::ZERO);
        assert_eq!(check.difference, dec!(50));
        assert!(!check.is_consistent);
        assert_eq!(report.mismatches().count(), 1);
    }

    #[test]
    fn test_matching_details_are_consistent() {
        let mut s = IncomeStatement::new();
        s.selling_expenses = dec!(100);
        s.selling_expenses_details.repair_cost = dec!(35);
        s.selling_expenses_details.advertising_cost = dec!(65);
        let check = s.reconcile().check(BreakdownKind::SellingExpenses).cloned().unwrap();
        assert!(check.is_consistent);
        assert_eq!(check.difference, Decimal::ZERO);
    }

    #[test]
    fn test_details_exceeding_aggregate_give_negative_difference() {
        let mut s = IncomeStatement::new();
        s.administrative_expenses = dec!(80);
        s.administrative_expenses_details.research_cost = dec!(95);
        let check = s
            .reconcile()
            .check(BreakdownKind::AdministrativeExpenses)
            .cloned()
            .unwrap();
        assert_eq!(check.difference, dec!(-15));
    }

    #[test]
    fn test_reconcile_does_not_mutate() {
        let mut s = IncomeStatement::new();
        s.non_operating_expenses = dec!(5);
        s.non_operating_expenses_details.bad_debt_loss = dec!(2);
        let before = s.clone();
        let _ = s.reconcile();
        assert_eq!(s, before);
    }

    #[test]
    fn test_sync_sets_aggregates_to_detail_totals() {
        let mut s = IncomeStatement::new();
        s.operating_revenue = dec!(1000);
        s.taxes_and_surcharges = dec!(50);
        s.tax_details.consumption_tax = dec!(20);
        s.tax_details.education_surcharge = dec!(10);
        s.non_operating_expenses_details.tax_late_fee = dec!(3);

        s.sync_aggregates_from_details();

        assert_eq!(s.taxes_and_surcharges, dec!(30));
        assert_eq!(s.non_operating_expenses, dec!(3));
        assert_eq!(s.selling_expenses, Decimal::ZERO);
        assert!(s.reconcile().is_consistent());
        assert_eq!(s.gross_profit(), dec!(970));
    }

    #[test]
    fn test_breakdown_field_names_are_assignable_paths() {
        let mut s = IncomeStatement::new();
        s.assign(
            &format!("{}.research_cost", BreakdownKind::AdministrativeExpenses.field_name()),
            dec!(7),
        )
        .unwrap();
        assert_eq!(s.detail_total(BreakdownKind::AdministrativeExpenses), dec!(7));
    }
}
