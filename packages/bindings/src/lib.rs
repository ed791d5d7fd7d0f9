use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Customs value & tax cascade
// ---------------------------------------------------------------------------

#[napi]
pub fn customs_value(input_json: String) -> NapiResult<String> {
    let input: customs_core::customs_value::CostInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let value = customs_core::customs_value::compute_customs_value(&input);
    serde_json::to_string(&serde_json::json!({ "customs_value": value })).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct TaxesRequest {
    #[serde(flatten)]
    cost: customs_core::customs_value::CostInput,
    #[serde(flatten)]
    rates: customs_core::tax_cascade::RateSet,
}

#[napi]
pub fn customs_taxes(input_json: String) -> NapiResult<String> {
    let request: TaxesRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = customs_core::tax_cascade::compute_customs_taxes(&request.cost, &request.rates)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Landed cost
// ---------------------------------------------------------------------------

#[napi]
pub fn landed_cost(input_json: String, overrides_json: Option<String>) -> NapiResult<String> {
    let input: customs_core::landed_cost::LandedCostInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let overrides: Option<customs_core::landed_cost::CalculationOverrides> = overrides_json
        .map(|json| serde_json::from_str(&json))
        .transpose()
        .map_err(to_napi_error)?;
    let tables = customs_core::reference::ReferenceTables::peru_defaults();
    let output =
        customs_core::landed_cost::assemble_landed_cost(&input, &tables, overrides.as_ref())
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Moratorium interest
// ---------------------------------------------------------------------------

#[napi]
pub fn customs_interest(input_json: String, daily_rate: Option<String>) -> NapiResult<String> {
    let input: customs_core::interest::InterestInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rate = match daily_rate {
        Some(ref s) => Decimal::from_str(s).map_err(to_napi_error)?,
        None => customs_core::interest::DEFAULT_DAILY_TIM,
    };
    let output = customs_core::interest::compute_interest(&input, rate).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
