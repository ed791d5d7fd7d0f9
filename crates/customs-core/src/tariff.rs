//! Tariff tier resolution by origin and shipment volume.

use crate::reference::{TariffTier, DEFAULT_ORIGIN};
use crate::types::Volume;
use crate::{CustomsError, CustomsResult};

/// Resolve the tariff tier for a shipment.
///
/// First row whose origin matches and whose half-open range
/// `[cbm_min, cbm_max)` contains `cbm` wins; a volume exactly at a tier's
/// `cbm_max` falls to the next tier. When nothing matches, the sentinel
/// `"default"` row applies. A table without the sentinel is malformed
/// reference data and resolution fails rather than guessing.
///
/// Overlapping ranges are an external-data defect; resolution does not try
/// to detect them and simply keeps the first match.
pub fn resolve_tariff<'a>(
    origin: &str,
    cbm: Volume,
    tiers: &'a [TariffTier],
) -> CustomsResult<&'a TariffTier> {
    let matched = tiers
        .iter()
        .find(|t| t.origin == origin && t.cbm_min <= cbm && cbm < t.cbm_max);

    match matched {
        Some(tier) => Ok(tier),
        None => tiers
            .iter()
            .find(|t| t.origin == DEFAULT_ORIGIN)
            .ok_or_else(|| {
                CustomsError::MissingReferenceData(format!(
                    "no tariff tier for origin '{}' at {} cbm and no '{}' sentinel row",
                    origin, cbm, DEFAULT_ORIGIN
                ))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn tier(origin: &str, lo: &str, hi: &str, freight: &str) -> TariffTier {
        TariffTier {
            origin: origin.to_string(),
            cbm_min: lo.parse().unwrap(),
            cbm_max: hi.parse().unwrap(),
            base_freight_usd: freight.parse().unwrap(),
            origin_expenses_usd: dec!(50),
            destination_expenses_usd: dec!(100),
            note: None,
        }
    }

    fn fixture() -> Vec<TariffTier> {
        vec![
            tier("china", "0", "1", "200"),
            tier("china", "1", "3", "350"),
            tier("default", "0", "9999", "500"),
        ]
    }

    #[test]
    fn lower_bound_is_inclusive() {
        let tiers = fixture();
        let t = resolve_tariff("china", dec!(1), &tiers).unwrap();
        assert_eq!(t.base_freight_usd, dec!(350));
    }

    #[test]
    fn upper_bound_is_exclusive() {
        let tiers = fixture();
        // Exactly at the table's top: no china tier matches, sentinel applies.
        let t = resolve_tariff("china", dec!(3), &tiers).unwrap();
        assert_eq!(t.origin, "default");
    }

    #[test]
    fn unknown_origin_falls_back_to_sentinel() {
        let tiers = fixture();
        let t = resolve_tariff("vietnam", dec!(0.5), &tiers).unwrap();
        assert_eq!(t.base_freight_usd, dec!(500));
    }

    #[test]
    fn missing_sentinel_is_a_configuration_error() {
        let tiers = vec![tier("china", "0", "1", "200")];
        let err = resolve_tariff("china", dec!(5), &tiers).unwrap_err();
        assert!(matches!(err, CustomsError::MissingReferenceData(_)));
    }

    #[test]
    fn first_match_wins_on_overlapping_rows() {
        let tiers = vec![
            tier("china", "0", "2", "200"),
            tier("china", "1", "3", "350"),
            tier("default", "0", "9999", "500"),
        ];
        let t = resolve_tariff("china", dec!(1.5), &tiers).unwrap();
        assert_eq!(t.base_freight_usd, dec!(200));
    }
}
