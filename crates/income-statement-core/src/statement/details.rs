//! Itemised breakdowns of aggregate line items.
//!
//! Each breakdown is a fixed-key record: one named field per category, keyed
//! by a small enum. The key set is closed at compile time, so a breakdown can
//! never gain or lose an entry.
//!
//! Breakdowns are informational. Nothing here (or in the model) keeps a
//! breakdown's total equal to its parent aggregate; see
//! [`crate::statement::reconcile`] for the explicit comparison.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A category key within a fixed-key breakdown.
pub trait DetailKey: Copy + Eq + fmt::Debug + 'static {
    /// Every key, in display order.
    const ALL: &'static [Self];

    /// The snake_case name used in JSON documents and field paths.
    fn as_str(self) -> &'static str;

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }
}

/// A fixed-key record of amounts.
pub trait Breakdown {
    type Key: DetailKey;

    fn get(&self, key: Self::Key) -> Money;

    fn get_mut(&mut self, key: Self::Key) -> &mut Money;

    fn set(&mut self, key: Self::Key, amount: Money) {
        *self.get_mut(key) = amount;
    }

    /// Key/amount pairs in key order.
    fn entries(&self) -> Vec<(Self::Key, Money)> {
        <Self::Key as DetailKey>::ALL.iter().map(|k| (*k, self.get(*k))).collect()
    }

    /// Sum of every entry.
    fn total(&self) -> Money {
        <Self::Key as DetailKey>::ALL
            .iter()
            .fold(Decimal::ZERO, |acc, k| acc + self.get(*k))
    }
}

// ---------------------------------------------------------------------------
// Taxes and surcharges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxCategory {
    ConsumptionTax,
    BusinessTax,
    UrbanMaintenanceTax,
    ResourceTax,
    LandAppreciationTax,
    /// Urban land use, property, vehicle and vessel, and stamp taxes.
    PropertyRelatedTax,
    /// Education surcharge, mineral resource compensation and pollutant fees.
    EducationSurcharge,
}

impl DetailKey for TaxCategory {
    const ALL: &'static [Self] = &[
        TaxCategory::ConsumptionTax,
        TaxCategory::BusinessTax,
        TaxCategory::UrbanMaintenanceTax,
        TaxCategory::ResourceTax,
        TaxCategory::LandAppreciationTax,
        TaxCategory::PropertyRelatedTax,
        TaxCategory::EducationSurcharge,
    ];

    fn as_str(self) -> &'static str {
        match self {
            TaxCategory::ConsumptionTax => "consumption_tax",
            TaxCategory::BusinessTax => "business_tax",
            TaxCategory::UrbanMaintenanceTax => "urban_maintenance_tax",
            TaxCategory::ResourceTax => "resource_tax",
            TaxCategory::LandAppreciationTax => "land_appreciation_tax",
            TaxCategory::PropertyRelatedTax => "property_related_tax",
            TaxCategory::EducationSurcharge => "education_surcharge",
        }
    }
}

/// Breakdown of `taxes_and_surcharges`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxDetails {
    pub consumption_tax: Money,
    pub business_tax: Money,
    pub urban_maintenance_tax: Money,
    pub resource_tax: Money,
    pub land_appreciation_tax: Money,
    pub property_related_tax: Money,
    pub education_surcharge: Money,
}

impl Breakdown for TaxDetails {
    type Key = TaxCategory;

    fn get(&self, key: TaxCategory) -> Money {
        match key {
            TaxCategory::ConsumptionTax => self.consumption_tax,
            TaxCategory::BusinessTax => self.business_tax,
            TaxCategory::UrbanMaintenanceTax => self.urban_maintenance_tax,
            TaxCategory::ResourceTax => self.resource_tax,
            TaxCategory::LandAppreciationTax => self.land_appreciation_tax,
            TaxCategory::PropertyRelatedTax => self.property_related_tax,
            TaxCategory::EducationSurcharge => self.education_surcharge,
        }
    }

    fn get_mut(&mut self, key: TaxCategory) -> &mut Money {
        match key {
            TaxCategory::ConsumptionTax => &mut self.consumption_tax,
            TaxCategory::BusinessTax => &mut self.business_tax,
            TaxCategory::UrbanMaintenanceTax => &mut self.urban_maintenance_tax,
            TaxCategory::ResourceTax => &mut self.resource_tax,
            TaxCategory::LandAppreciationTax => &mut self.land_appreciation_tax,
            TaxCategory::PropertyRelatedTax => &mut self.property_related_tax,
            TaxCategory::EducationSurcharge => &mut self.education_surcharge,
        }
    }
}

// ---------------------------------------------------------------------------
// Selling expenses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellingExpenseCategory {
    /// Product repair costs.
    RepairCost,
    /// Advertising and promotion.
    AdvertisingCost,
}

impl DetailKey for SellingExpenseCategory {
    const ALL: &'static [Self] = &[
        SellingExpenseCategory::RepairCost,
        SellingExpenseCategory::AdvertisingCost,
    ];

    fn as_str(self) -> &'static str {
        match self {
            SellingExpenseCategory::RepairCost => "repair_cost",
            SellingExpenseCategory::AdvertisingCost => "advertising_cost",
        }
    }
}

/// Breakdown of `selling_expenses`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SellingExpenseDetails {
    pub repair_cost: Money,
    pub advertising_cost: Money,
}

impl Breakdown for SellingExpenseDetails {
    type Key = SellingExpenseCategory;

    fn get(&self, key: SellingExpenseCategory) -> Money {
        match key {
            SellingExpenseCategory::RepairCost => self.repair_cost,
            SellingExpenseCategory::AdvertisingCost => self.advertising_cost,
        }
    }

    fn get_mut(&mut self, key: SellingExpenseCategory) -> &mut Money {
        match key {
            SellingExpenseCategory::RepairCost => &mut self.repair_cost,
            SellingExpenseCategory::AdvertisingCost => &mut self.advertising_cost,
        }
    }
}

// ---------------------------------------------------------------------------
// Administrative expenses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdministrativeExpenseCategory {
    /// Start-up (pre-operating) costs.
    SetupCost,
    EntertainmentCost,
    ResearchCost,
}

impl DetailKey for AdministrativeExpenseCategory {
    const ALL: &'static [Self] = &[
        AdministrativeExpenseCategory::SetupCost,
        AdministrativeExpenseCategory::EntertainmentCost,
        AdministrativeExpenseCategory::ResearchCost,
    ];

    fn as_str(self) -> &'static str {
        match self {
            AdministrativeExpenseCategory::SetupCost => "setup_cost",
            AdministrativeExpenseCategory::EntertainmentCost => "entertainment_cost",
            AdministrativeExpenseCategory::ResearchCost => "research_cost",
        }
    }
}

/// Breakdown of `administrative_expenses`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdministrativeExpenseDetails {
    pub setup_cost: Money,
    pub entertainment_cost: Money,
    pub research_cost: Money,
}

impl Breakdown for AdministrativeExpenseDetails {
    type Key = AdministrativeExpenseCategory;

    fn get(&self, key: AdministrativeExpenseCategory) -> Money {
        match key {
            AdministrativeExpenseCategory::SetupCost => self.setup_cost,
            AdministrativeExpenseCategory::EntertainmentCost => self.entertainment_cost,
            AdministrativeExpenseCategory::ResearchCost => self.research_cost,
        }
    }

    fn get_mut(&mut self, key: AdministrativeExpenseCategory) -> &mut Money {
        match key {
            AdministrativeExpenseCategory::SetupCost => &mut self.setup_cost,
            AdministrativeExpenseCategory::EntertainmentCost => &mut self.entertainment_cost,
            AdministrativeExpenseCategory::ResearchCost => &mut self.research_cost,
        }
    }
}

// ---------------------------------------------------------------------------
// Non-operating expenses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonOperatingExpenseCategory {
    BadDebtLoss,
    /// Unrecoverable long-term bond investments.
    LongTermBondInvestmentLoss,
    /// Unrecoverable long-term equity investments.
    LongTermEquityInvestmentLoss,
    /// Natural disasters and other force majeure.
    ForceMajeureLoss,
    TaxLateFee,
}

impl DetailKey for NonOperatingExpenseCategory {
    const ALL: &'static [Self] = &[
        NonOperatingExpenseCategory::BadDebtLoss,
        NonOperatingExpenseCategory::LongTermBondInvestmentLoss,
        NonOperatingExpenseCategory::LongTermEquityInvestmentLoss,
        NonOperatingExpenseCategory::ForceMajeureLoss,
        NonOperatingExpenseCategory::TaxLateFee,
    ];

    fn as_str(self) -> &'static str {
        match self {
            NonOperatingExpenseCategory::BadDebtLoss => "bad_debt_loss",
            NonOperatingExpenseCategory::LongTermBondInvestmentLoss => {
                "long_term_bond_investment_loss"
            }
            NonOperatingExpenseCategory::LongTermEquityInvestmentLoss => {
                "long_term_equity_investment_loss"
            }
            NonOperatingExpenseCategory::ForceMajeureLoss => "force_majeure_loss",
            NonOperatingExpenseCategory::TaxLateFee => "tax_late_fee",
        }
    }
}

/// Breakdown of `non_operating_expenses`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NonOperatingExpenseDetails {
    pub bad_debt_loss: Money,
    pub long_term_bond_investment_loss: Money,
    pub long_term_equity_investment_loss: Money,
    pub force_majeure_loss: Money,
    pub tax_late_fee: Money,
}

impl Breakdown for NonOperatingExpenseDetails {
    type Key = NonOperatingExpenseCategory;

    fn get(&self, key: NonOperatingExpenseCategory) -> Money {
        match key {
            NonOperatingExpenseCategory::BadDebtLoss => self.bad_debt_loss,
            NonOperatingExpenseCategory::LongTermBondInvestmentLoss => {
                self.long_term_bond_investment_loss
            }
            NonOperatingExpenseCategory::LongTermEquityInvestmentLoss => {
                self.long_term_equity_investment_loss
            }
            NonOperatingExpenseCategory::ForceMajeureLoss => self.force_majeure_loss,
            NonOperatingExpenseCategory::TaxLateFee => self.tax_late_fee,
        }
    }

    fn get_mut(&mut self, key: NonOperatingExpenseCategory) -> &mut Money {
        match key {
            NonOperatingExpenseCategory::BadDebtLoss => &mut self.bad_debt_loss,
            NonOperatingExpenseCategory::LongTermBondInvestmentLoss => {
                &mut self.long_term_bond_investment_loss
            }
            NonOperatingExpenseCategory::LongTermEquityInvestmentLoss => {
                &mut self.long_term_equity_investment_loss
            }
            NonOperatingExpenseCategory::ForceMajeureLoss => &mut self.force_majeure_loss,
            NonOperatingExpenseCategory::TaxLateFee => &mut self.tax_late_fee,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
