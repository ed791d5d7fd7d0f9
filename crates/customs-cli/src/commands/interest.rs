use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use customs_core::interest::{self, InterestInput, DEFAULT_DAILY_TIM};

use crate::input;

/// Arguments for the moratorium-interest calculation
#[derive(Args)]
pub struct InterestArgs {
    /// Path to JSON input file (debt record)
    #[arg(long)]
    pub input: Option<String>,

    /// Daily TIM rate as a decimal; the referential default applies
    /// when omitted
    #[arg(long)]
    pub daily_rate: Option<Decimal>,
}

pub fn run_interest(args: InterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let debt: InterestInput = input::read_input(args.input.as_deref(), "moratorium interest")?;
    let daily_rate = args.daily_rate.unwrap_or(DEFAULT_DAILY_TIM);
    let result = interest::compute_interest(&debt, daily_rate)?;
    Ok(serde_json::to_value(result)?)
}
