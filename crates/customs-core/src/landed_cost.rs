//! End-to-end landed-cost estimate for a China → Peru import.
//!
//! Composes the tariff tier resolution, the insurance rule, and the tax
//! cascade into one breakdown:
//!
//! 1. Tier lookup by origin + CBM gives freight and the two fixed
//!    logistics expense fields.
//! 2. Insurance = (FOB + freight) × rate, rate resolved as
//!    override > category factor > global default.
//! 3. CIF = FOB + freight + insurance.
//! 4. Tax cascade with the category's duty rate, the combined IGV + IPM
//!    rate, and a perception rate resolved as override > global default.
//! 5. Landed total = CIF + duty + IGV + perception + origin expenses +
//!    destination expenses, converted to PEN at the referential rate.
//!
//! Every call is independent: overrides never touch the reference tables
//! or any prior result, so scenario re-runs are free.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::reference::ReferenceTables;
use crate::tariff::resolve_tariff;
use crate::tax_cascade::{cascade, rate_warnings, RateSet, TaxBreakdown};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Volume};
use crate::CustomsResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Shipment description for the estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandedCostInput {
    /// Product category id from the reference tables.
    pub category: String,
    /// Merchandise value at origin, USD.
    pub fob_value: Money,
    /// Shipment volume in cubic meters.
    pub cbm: Volume,
    /// Origin key for tariff lookup, e.g. `"china"`.
    pub origin: String,
    /// Destination label. Carried for display; the referential tariff
    /// table is destination-agnostic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Unit count for the per-unit figure. Omitted means 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

/// Scenario overrides. Each call resolves them fresh; nothing is retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perception_rate: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_rate: Option<Rate>,
}

/// Assembled end-to-end cost breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportCostBreakdown {
    pub fob: Money,
    /// Base freight from the resolved tariff tier.
    pub freight: Money,
    /// (FOB + freight) × resolved insurance rate.
    pub insurance: Money,
    /// Customs value: FOB + freight + insurance.
    pub cif: Money,
    /// Full duty / IGV / perception cascade on the CIF.
    pub taxes: TaxBreakdown,
    pub origin_expenses: Money,
    pub destination_expenses: Money,
    pub total_landed_cost_usd: Money,
    pub total_landed_cost_pen: Money,
    pub unit_cost_usd: Money,
    /// Exchange rate the PEN figure was converted at.
    pub exchange_rate: Rate,
    pub quantity: u32,
    pub cbm: Volume,
    /// Origin key of the tier that actually applied (`"default"` when the
    /// shipment fell through to the sentinel row).
    pub applied_tier_origin: String,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Assemble the landed-cost breakdown for one shipment.
///
/// Fails only on malformed reference data: an unknown product category or
/// a tariff table without its `"default"` sentinel row.
pub fn assemble_landed_cost(
    input: &LandedCostInput,
    tables: &ReferenceTables,
    overrides: Option<&CalculationOverrides>,
) -> CustomsResult<ComputationOutput<ImportCostBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.fob_value < Decimal::ZERO {
        warnings.push(format!("fob_value = {} is negative", input.fob_value));
    }
    if input.cbm < Decimal::ZERO {
        warnings.push(format!("cbm = {} is negative", input.cbm));
    }

    let tier = resolve_tariff(&input.origin, input.cbm, &tables.tariffs)?;
    let category = tables.category(&input.category)?;

    let freight = tier.base_freight_usd;

    // Override > category factor > global default.
    let insurance_rate = overrides
        .and_then(|o| o.insurance_rate)
        .or(category.insurance_factor)
        .unwrap_or(tables.rates.default_insurance_rate);
    let insurance = (input.fob_value + freight) * insurance_rate;

    let cif = input.fob_value + freight + insurance;

    let rates = RateSet {
        duty_rate: category.base_duty_rate,
        igv_rate: tables.rates.igv_rate + tables.rates.ipm_rate,
        perception_rate: overrides
            .and_then(|o| o.perception_rate)
            .unwrap_or(tables.rates.default_perception_rate),
    };
    rate_warnings(&rates, &mut warnings);

    let taxes = cascade(cif, &rates);

    let total_landed_cost_usd = cif
        + taxes.total_amount
        + tier.origin_expenses_usd
        + tier.destination_expenses_usd;

    let exchange_rate = tables.rates.reference_exchange_rate;
    let total_landed_cost_pen = total_landed_cost_usd * exchange_rate;

    let quantity = match input.quantity {
        Some(0) => {
            warnings.push("quantity = 0 clamped to 1".into());
            1
        }
        Some(q) => q,
        None => 1,
    };
    let unit_cost_usd = total_landed_cost_usd / Decimal::from(quantity);

    let breakdown = ImportCostBreakdown {
        fob: input.fob_value,
        freight,
        insurance,
        cif,
        taxes,
        origin_expenses: tier.origin_expenses_usd,
        destination_expenses: tier.destination_expenses_usd,
        total_landed_cost_usd,
        total_landed_cost_pen,
        unit_cost_usd,
        exchange_rate,
        quantity,
        cbm: input.cbm,
        applied_tier_origin: tier.origin.clone(),
    };

    let assumptions = serde_json::json!({
        "input": input,
        "overrides": overrides,
        "insurance_rate": insurance_rate,
        "rates": rates,
        "tier": tier,
        "category": category.id,
    });

    Ok(with_metadata(
        "Tier-based logistics costs plus CIF tax cascade, converted at a referential exchange rate",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        breakdown,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{GlobalRates, ProductCategory, TariffTier};
    use crate::CustomsError;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    // Fixture tables with round numbers so every expectation is exact.
    fn fixture_tables() -> ReferenceTables {
        ReferenceTables {
            tariffs: vec![
                TariffTier {
                    origin: "china".to_string(),
                    cbm_min: dec!(0),
                    cbm_max: dec!(2),
                    base_freight_usd: dec!(200),
                    origin_expenses_usd: dec!(50),
                    destination_expenses_usd: dec!(100),
                    note: None,
                },
                TariffTier {
                    origin: "default".to_string(),
                    cbm_min: dec!(0),
                    cbm_max: dec!(9999),
                    base_freight_usd: dec!(400),
                    origin_expenses_usd: dec!(60),
                    destination_expenses_usd: dec!(120),
                    note: None,
                },
            ],
            categories: vec![
                ProductCategory {
                    id: "textiles".to_string(),
                    name: "Textiles".to_string(),
                    base_duty_rate: dec!(0.10),
                    insurance_factor: Some(dec!(0.05)),
                },
                ProductCategory {
                    id: "general".to_string(),
                    name: "General".to_string(),
                    base_duty_rate: dec!(0),
                    insurance_factor: None,
                },
            ],
            rates: GlobalRates {
                igv_rate: dec!(0.16),
                ipm_rate: dec!(0.02),
                default_perception_rate: dec!(0.035),
                default_insurance_rate: dec!(0.01),
                reference_exchange_rate: dec!(4),
            },
        }
    }

    fn shipment(category: &str, quantity: Option<u32>) -> LandedCostInput {
        LandedCostInput {
            category: category.to_string(),
            fob_value: dec!(1000),
            cbm: dec!(1),
            origin: "china".to_string(),
            destination: Some("callao".to_string()),
            quantity,
        }
    }

    #[test]
    fn full_breakdown_with_category_insurance() {
        let out = assemble_landed_cost(&shipment("textiles", None), &fixture_tables(), None)
            .unwrap();
        let r = out.result;
        assert_eq!(r.freight, dec!(200));
        // (1000 + 200) * 0.05
        assert_eq!(r.insurance, dec!(60.00));
        assert_eq!(r.cif, dec!(1260.00));
        // duty 126, igv_base 1386, igv 249.48, perception (1386+249.48)*0.035
        assert_eq!(r.taxes.duty, dec!(126.0));
        assert_eq!(r.taxes.igv, dec!(249.48));
        assert_eq!(r.taxes.perception, dec!(57.2418));
        // 1260 + 126 + 249.48 + 57.2418 + 50 + 100
        assert_eq!(r.total_landed_cost_usd, dec!(1842.7218));
        assert_eq!(r.total_landed_cost_pen, dec!(7370.8872));
        assert_eq!(r.unit_cost_usd, r.total_landed_cost_usd);
        assert_eq!(r.applied_tier_origin, "china");
    }

    #[test]
    fn insurance_falls_back_to_global_default() {
        let r = assemble_landed_cost(&shipment("general", None), &fixture_tables(), None)
            .unwrap()
            .result;
        // (1000 + 200) * 0.01
        assert_eq!(r.insurance, dec!(12.00));
    }

    #[test]
    fn overrides_take_precedence_over_category_and_global() {
        let overrides = CalculationOverrides {
            perception_rate: Some(dec!(0.10)),
            insurance_rate: Some(dec!(0.02)),
        };
        let r = assemble_landed_cost(
            &shipment("textiles", None),
            &fixture_tables(),
            Some(&overrides),
        )
        .unwrap()
        .result;
        assert_eq!(r.insurance, dec!(24.00));
        assert_eq!(r.taxes.perception, r.taxes.perception_base * dec!(0.10));
    }

    #[test]
    fn rerunning_with_different_overrides_is_independent() {
        let tables = fixture_tables();
        let input = shipment("textiles", None);
        let base = assemble_landed_cost(&input, &tables, None).unwrap().result;
        let overridden = assemble_landed_cost(
            &input,
            &tables,
            Some(&CalculationOverrides {
                perception_rate: Some(dec!(0)),
                insurance_rate: None,
            }),
        )
        .unwrap()
        .result;
        let again = assemble_landed_cost(&input, &tables, None).unwrap().result;
        assert_eq!(base.total_landed_cost_usd, again.total_landed_cost_usd);
        assert!(overridden.total_landed_cost_usd < base.total_landed_cost_usd);
    }

    #[test]
    fn unit_cost_divides_by_quantity() {
        let r = assemble_landed_cost(&shipment("textiles", Some(5)), &fixture_tables(), None)
            .unwrap()
            .result;
        assert_eq!(r.unit_cost_usd * dec!(5), r.total_landed_cost_usd);
    }

    #[test]
    fn zero_quantity_is_clamped_to_one_with_a_warning() {
        let out = assemble_landed_cost(&shipment("textiles", Some(0)), &fixture_tables(), None)
            .unwrap();
        assert_eq!(out.result.quantity, 1);
        assert_eq!(out.result.unit_cost_usd, out.result.total_landed_cost_usd);
        assert!(out.warnings.iter().any(|w| w.contains("quantity")));
    }

    #[test]
    fn oversized_shipment_falls_to_the_sentinel_tier() {
        let mut input = shipment("textiles", None);
        input.cbm = dec!(2); // exactly at the china tier's cbm_max
        let r = assemble_landed_cost(&input, &fixture_tables(), None)
            .unwrap()
            .result;
        assert_eq!(r.applied_tier_origin, "default");
        assert_eq!(r.freight, dec!(400));
    }

    #[test]
    fn unknown_category_is_a_configuration_error() {
        let err = assemble_landed_cost(&shipment("juguetes", None), &fixture_tables(), None)
            .unwrap_err();
        assert!(matches!(err, CustomsError::MissingReferenceData(_)));
    }
}
