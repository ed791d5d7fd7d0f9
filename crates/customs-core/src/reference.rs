//! Read-only reference tables driving the landed-cost estimator.
//!
//! The tables are injected into every computation rather than read from a
//! global, so callers can load their own JSON table file and tests can
//! substitute fixtures. The engines never mutate them.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate, Volume};
use crate::{CustomsError, CustomsResult};

/// One freight/logistics tariff row, keyed by origin and a half-open
/// CBM range `[cbm_min, cbm_max)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffTier {
    /// Origin key, e.g. `"china"`. The sentinel row uses [`DEFAULT_ORIGIN`].
    pub origin: String,
    pub cbm_min: Volume,
    /// Exclusive upper bound. A shipment exactly at `cbm_max` belongs to
    /// the next tier up, never to this one.
    pub cbm_max: Volume,
    pub base_freight_usd: Money,
    pub origin_expenses_usd: Money,
    pub destination_expenses_usd: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Product category with its duty rate and insurance factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: String,
    pub name: String,
    /// Ad valorem rate for the category, as a decimal (0.11 = 11%).
    pub base_duty_rate: Rate,
    /// Category-specific insurance factor applied to FOB + freight.
    /// Absent means the global default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_factor: Option<Rate>,
}

/// Flat map of named global rate constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalRates {
    /// IGV component of the sales tax.
    pub igv_rate: Rate,
    /// IPM (municipal promotion tax) component, combined with IGV into one
    /// effective rate at computation time.
    pub ipm_rate: Rate,
    /// Perception rate applied when the caller does not override it.
    pub default_perception_rate: Rate,
    /// Insurance factor applied when the category carries none.
    pub default_insurance_rate: Rate,
    /// Referential USD → PEN exchange rate.
    pub reference_exchange_rate: Rate,
}

/// The complete injected table set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub tariffs: Vec<TariffTier>,
    pub categories: Vec<ProductCategory>,
    pub rates: GlobalRates,
}

/// Origin key of the sentinel tariff row every table must carry.
pub const DEFAULT_ORIGIN: &str = "default";

impl ReferenceTables {
    /// Look up a product category by id. A missing category is a
    /// configuration error, not a recoverable runtime condition.
    pub fn category(&self, id: &str) -> CustomsResult<&ProductCategory> {
        self.categories.iter().find(|c| c.id == id).ok_or_else(|| {
            CustomsError::MissingReferenceData(format!("product category '{}' not found", id))
        })
    }

    /// Builtin referential table set for China → Peru LCL imports.
    ///
    /// Values are referential estimates, not tariff rulings. Deployments
    /// with their own freight contracts should load their own tables.
    pub fn peru_defaults() -> Self {
        let tier = |origin: &str, lo, hi, freight, orig, dest| TariffTier {
            origin: origin.to_string(),
            cbm_min: lo,
            cbm_max: hi,
            base_freight_usd: freight,
            origin_expenses_usd: orig,
            destination_expenses_usd: dest,
            note: None,
        };
        let category = |id: &str, name: &str, duty, insurance: Option<Rate>| ProductCategory {
            id: id.to_string(),
            name: name.to_string(),
            base_duty_rate: duty,
            insurance_factor: insurance,
        };

        ReferenceTables {
            tariffs: vec![
                tier("china", dec!(0), dec!(1), dec!(210), dec!(80), dec!(120)),
                tier("china", dec!(1), dec!(3), dec!(360), dec!(80), dec!(150)),
                tier("china", dec!(3), dec!(8), dec!(720), dec!(100), dec!(200)),
                tier("china", dec!(8), dec!(15), dec!(1250), dec!(120), dec!(280)),
                tier(DEFAULT_ORIGIN, dec!(0), dec!(9999), dec!(400), dec!(100), dec!(150)),
            ],
            categories: vec![
                category("carga_general", "Carga general", dec!(0.06), None),
                category("textiles", "Textiles y confecciones", dec!(0.11), Some(dec!(0.015))),
                category("calzado", "Calzado", dec!(0.11), Some(dec!(0.015))),
                category("electronica", "Electrónica de consumo", dec!(0), Some(dec!(0.0125))),
                category("maquinaria", "Maquinaria y repuestos", dec!(0), None),
            ],
            rates: GlobalRates {
                igv_rate: dec!(0.16),
                ipm_rate: dec!(0.02),
                default_perception_rate: dec!(0.035),
                default_insurance_rate: dec!(0.01),
                reference_exchange_rate: dec!(3.75),
            },
        }
    }
}
