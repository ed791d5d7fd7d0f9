use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use customs_core::landed_cost::{self, CalculationOverrides, LandedCostInput};
use customs_core::reference::ReferenceTables;

use crate::input;

/// Arguments for the landed-cost estimate
#[derive(Args)]
pub struct LandedCostArgs {
    /// Path to JSON input file (shipment record)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON reference-table file; builtin referential tables
    /// are used when omitted
    #[arg(long)]
    pub tables: Option<String>,

    /// Override the perception rate (decimal, e.g. 0.035)
    #[arg(long)]
    pub perception_rate: Option<Decimal>,

    /// Override the insurance rate (decimal, e.g. 0.015)
    #[arg(long)]
    pub insurance_rate: Option<Decimal>,
}

pub fn run_landed_cost(args: LandedCostArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let shipment: LandedCostInput = input::read_input(args.input.as_deref(), "landed cost")?;

    let tables: ReferenceTables = match args.tables {
        Some(ref path) => input::file::read_json(path)?,
        None => ReferenceTables::peru_defaults(),
    };

    let overrides = if args.perception_rate.is_some() || args.insurance_rate.is_some() {
        Some(CalculationOverrides {
            perception_rate: args.perception_rate,
            insurance_rate: args.insurance_rate,
        })
    } else {
        None
    };

    let result = landed_cost::assemble_landed_cost(&shipment, &tables, overrides.as_ref())?;
    Ok(serde_json::to_value(result)?)
}
