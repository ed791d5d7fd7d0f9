//! Customs value (CIF value) of an import shipment.
//!
//! The customs value is the base on which every import tax is assessed:
//! FOB merchandise value plus international freight plus cargo insurance
//! plus any other dutiable costs (commissions, special packaging, etc.).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Raw cost components of a shipment, all USD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostInput {
    /// Merchandise value at the origin port, excluding freight and insurance.
    pub fob: Money,
    /// International transport cost.
    pub freight: Money,
    /// Cargo insurance cost.
    pub insurance: Money,
    /// Additional dutiable costs. Omitted means zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_costs: Option<Money>,
}

impl CostInput {
    /// Other costs with the absent case collapsed to zero.
    pub fn other_costs_or_zero(&self) -> Money {
        self.other_costs.unwrap_or(Decimal::ZERO)
    }
}

/// Customs value = FOB + freight + insurance + other costs.
///
/// Pure additive formula. Inputs are not validated here: the engine accepts
/// whatever amounts the caller parsed, and negative components flow through
/// arithmetically (the calculators surface them as warnings, not errors).
pub fn compute_customs_value(input: &CostInput) -> Money {
    input.fob + input.freight + input.insurance + input.other_costs_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn sums_all_four_components() {
        let input = CostInput {
            fob: dec!(1000),
            freight: dec!(200),
            insurance: dec!(50),
            other_costs: Some(dec!(30)),
        };
        assert_eq!(compute_customs_value(&input), dec!(1280));
    }

    #[test]
    fn missing_other_costs_counts_as_zero() {
        let input = CostInput {
            fob: dec!(1000),
            freight: dec!(200),
            insurance: dec!(50),
            other_costs: None,
        };
        assert_eq!(compute_customs_value(&input), dec!(1250));
    }

    #[test]
    fn negative_components_flow_through() {
        let input = CostInput {
            fob: dec!(100),
            freight: dec!(-20),
            insurance: dec!(0),
            other_costs: None,
        };
        assert_eq!(compute_customs_value(&input), dec!(80));
    }
}
