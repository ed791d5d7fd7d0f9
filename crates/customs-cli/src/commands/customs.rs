use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use customs_core::customs_value::{compute_customs_value, CostInput};
use customs_core::tax_cascade::{self, RateSet};

use crate::input;

/// Arguments for the customs (CIF) value calculation
#[derive(Args)]
pub struct ValueArgs {
    /// Path to JSON input file (CostInput record)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the full tax cascade
#[derive(Args)]
pub struct TaxesArgs {
    /// Path to JSON input file (cost components plus the three rates)
    #[arg(long)]
    pub input: Option<String>,
}

/// One flat record combining the cost components and the rates, so a taxes
/// input file reads like the original calculator form.
#[derive(Deserialize)]
struct TaxesRequest {
    #[serde(flatten)]
    cost: CostInput,
    #[serde(flatten)]
    rates: RateSet,
}

pub fn run_value(args: ValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cost: CostInput = input::read_input(args.input.as_deref(), "customs value")?;
    let customs_value = compute_customs_value(&cost);
    Ok(serde_json::json!({ "customs_value": customs_value }))
}

pub fn run_taxes(args: TaxesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: TaxesRequest = input::read_input(args.input.as_deref(), "tax cascade")?;
    let result = tax_cascade::compute_customs_taxes(&request.cost, &request.rates)?;
    Ok(serde_json::to_value(result)?)
}
