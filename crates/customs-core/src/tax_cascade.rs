//! Import tax cascade: ad valorem duty, IGV, and perception.
//!
//! Peruvian import taxes stack ("tax on tax"): duty is assessed on the
//! customs value, IGV on the customs value plus duty, and the perception
//! advance on the customs value plus duty plus IGV. The cascade order is
//! fixed; every later base includes all earlier stages.
//!
//! One canonical cascade serves both the basic customs calculator and the
//! landed-cost estimator, each supplying its own [`RateSet`].
//!
//! All arithmetic uses `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::customs_value::{compute_customs_value, CostInput};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::CustomsResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The three rates driving the cascade, as decimals (0.06 = 6%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSet {
    /// Ad valorem duty rate, set by the product's tariff heading.
    pub duty_rate: Rate,
    /// IGV rate (for the landed-cost estimator this is IGV + IPM combined).
    pub igv_rate: Rate,
    /// Perception advance rate. Zero means exempt.
    pub perception_rate: Rate,
}

/// Fully itemized result of the cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Customs value (CIF) the cascade was run on.
    pub customs_value: Money,
    /// Ad valorem duty = customs value × duty rate.
    pub duty: Money,
    /// IGV taxable base = customs value + duty.
    pub igv_base: Money,
    /// IGV = IGV base × IGV rate.
    pub igv: Money,
    /// Perception base = IGV base + IGV.
    pub perception_base: Money,
    /// Perception advance = perception base × perception rate.
    pub perception: Money,
    /// Customs tax debt proper: duty + IGV. Perception is excluded because
    /// it is a creditable advance, not a final tax.
    pub total_taxes: Money,
    /// Cash actually required to release the goods: total taxes + perception.
    pub total_amount: Money,
}

// ---------------------------------------------------------------------------
// Cascade primitive
// ---------------------------------------------------------------------------

/// Run the cascade on an already-computed customs value.
///
/// Stage order is load-bearing: each base includes every prior stage's
/// output. A zero rate zeroes only its own stage; dependent bases still
/// include the stages before it. Rates are applied as given, without
/// clamping.
pub fn cascade(customs_value: Money, rates: &RateSet) -> TaxBreakdown {
    let duty = customs_value * rates.duty_rate;
    let igv_base = customs_value + duty;
    let igv = igv_base * rates.igv_rate;
    let perception_base = igv_base + igv;
    let perception = perception_base * rates.perception_rate;
    let total_taxes = duty + igv;
    let total_amount = total_taxes + perception;

    TaxBreakdown {
        customs_value,
        duty,
        igv_base,
        igv,
        perception_base,
        perception,
        total_taxes,
        total_amount,
    }
}

/// Collect warnings for inputs the engines accept but a reviewer should see.
pub(crate) fn rate_warnings(rates: &RateSet, warnings: &mut Vec<String>) {
    for (name, rate) in [
        ("duty_rate", rates.duty_rate),
        ("igv_rate", rates.igv_rate),
        ("perception_rate", rates.perception_rate),
    ] {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            warnings.push(format!(
                "{} = {} is outside [0, 1]; applied without clamping",
                name, rate
            ));
        }
    }
}

fn amount_warnings(input: &CostInput, warnings: &mut Vec<String>) {
    for (name, amount) in [
        ("fob", input.fob),
        ("freight", input.freight),
        ("insurance", input.insurance),
        ("other_costs", input.other_costs_or_zero()),
    ] {
        if amount < Decimal::ZERO {
            warnings.push(format!("{} = {} is negative", name, amount));
        }
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute the full customs tax breakdown for a shipment.
///
/// This is the basic calculator's entry point: customs value from the cost
/// components, then the duty / IGV / perception cascade with the supplied
/// rates. The output is referential, not a legal determination.
pub fn compute_customs_taxes(
    input: &CostInput,
    rates: &RateSet,
) -> CustomsResult<ComputationOutput<TaxBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    amount_warnings(input, &mut warnings);
    rate_warnings(rates, &mut warnings);

    let customs_value = compute_customs_value(input);
    let breakdown = cascade(customs_value, rates);

    let assumptions = serde_json::json!({
        "cost_input": input,
        "rates": rates,
        "perception_base": "igv_base + igv",
    });

    Ok(with_metadata(
        "Cascaded ad valorem / IGV / perception on tax-inclusive bases",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        breakdown,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn basic_input() -> CostInput {
        CostInput {
            fob: dec!(1000),
            freight: dec!(200),
            insurance: dec!(50),
            other_costs: None,
        }
    }

    fn basic_rates() -> RateSet {
        RateSet {
            duty_rate: dec!(0.06),
            igv_rate: dec!(0.18),
            perception_rate: dec!(0),
        }
    }

    #[test]
    fn reference_example_without_perception() {
        let out = compute_customs_taxes(&basic_input(), &basic_rates()).unwrap();
        let r = out.result;
        assert_eq!(r.customs_value, dec!(1250));
        assert_eq!(r.duty, dec!(75.00));
        assert_eq!(r.igv_base, dec!(1325.00));
        assert_eq!(r.igv, dec!(238.5000));
        assert_eq!(r.total_taxes, dec!(313.5000));
        assert_eq!(r.perception, dec!(0));
        assert_eq!(r.total_amount, dec!(313.5000));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn reference_example_with_perception() {
        let rates = RateSet {
            perception_rate: dec!(0.035),
            ..basic_rates()
        };
        let r = compute_customs_taxes(&basic_input(), &rates).unwrap().result;
        assert_eq!(r.perception_base, dec!(1563.5000));
        assert_eq!(r.perception, dec!(54.722500));
        assert_eq!(r.total_amount, dec!(368.222500));
    }

    #[test]
    fn zero_duty_still_cascades_igv_and_perception() {
        let rates = RateSet {
            duty_rate: dec!(0),
            igv_rate: dec!(0.18),
            perception_rate: dec!(0.035),
        };
        let r = cascade(dec!(1000), &rates);
        assert_eq!(r.duty, dec!(0));
        assert_eq!(r.igv_base, dec!(1000));
        assert_eq!(r.igv, dec!(180.00));
        assert_eq!(r.perception_base, dec!(1180.00));
        assert_eq!(r.perception, dec!(41.300000));
    }

    #[test]
    fn total_amount_is_sum_of_all_three_taxes() {
        let rates = RateSet {
            duty_rate: dec!(0.11),
            igv_rate: dec!(0.18),
            perception_rate: dec!(0.10),
        };
        let r = cascade(dec!(5432.10), &rates);
        assert_eq!(r.total_amount, r.duty + r.igv + r.perception);
    }

    #[test]
    fn cascade_is_referentially_transparent() {
        let rates = basic_rates();
        let a = cascade(dec!(1250), &rates);
        let b = cascade(dec!(1250), &rates);
        assert_eq!(a.total_amount, b.total_amount);
        assert_eq!(a.igv_base, b.igv_base);
    }

    #[test]
    fn out_of_range_rate_warns_without_clamping() {
        let rates = RateSet {
            duty_rate: dec!(1.5),
            igv_rate: dec!(0.18),
            perception_rate: dec!(0),
        };
        let out = compute_customs_taxes(&basic_input(), &rates).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.duty, dec!(1875.0));
    }

    #[test]
    fn negative_amount_warns_but_computes() {
        let input = CostInput {
            fob: dec!(-100),
            ..basic_input()
        };
        let out = compute_customs_taxes(&input, &basic_rates()).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.customs_value, dec!(150));
    }
}
