//! Moratorium interest (TIM) on an outstanding customs debt.
//!
//! SUNAT charges simple, non-compounding daily interest between the
//! computation date of the debt and the day it is paid. Both timestamps are
//! truncated to their calendar date before differencing, so the time of day
//! never affects the day count. Payment on or before the computation date
//! accrues nothing; there is no negative interest.
//!
//! The daily rate is regulatory policy, not domain logic: it is always a
//! parameter. [`DEFAULT_DAILY_TIM`] is only a referential constant for
//! callers with no better source.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::CustomsResult;

/// Referential daily TIM rate (0.03% per day). The in-force rate varies by
/// SUNAT resolution; deployments should supply the current one.
pub const DEFAULT_DAILY_TIM: Decimal = dec!(0.0003);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Customs declaration (DAM) modality. It determines which date the debt
/// starts accruing from, and therefore which date the caller supplies as
/// `computation_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DamType {
    Anticipated,
    Deferred,
}

/// Input record for an interest accrual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestInput {
    /// Outstanding customs debt, USD.
    pub debt_amount: Money,
    pub dam_type: DamType,
    /// Start of the accrual period.
    pub computation_date: NaiveDateTime,
    /// End of the accrual period (payment date).
    pub payment_date: NaiveDateTime,
    /// Selling exchange rate in force at payment, for the PEN figure.
    /// Omitted means no local-currency conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Rate>,
}

/// Accrual result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestResult {
    /// Whole days of delay, never negative.
    pub days_delay: u64,
    /// days_delay × daily rate.
    pub interest_factor: Decimal,
    /// debt × interest factor.
    pub interest_amount: Money,
    /// debt + interest.
    pub total_debt: Money,
    /// Total debt in PEN, rounded to 2 decimals half away from zero
    /// (SUNAT rounding rule). Present only when an exchange rate was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_debt_pen: Option<Money>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Accrue moratorium interest on a customs debt.
pub fn compute_interest(
    input: &InterestInput,
    daily_rate: Rate,
) -> CustomsResult<ComputationOutput<InterestResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.debt_amount < Decimal::ZERO {
        warnings.push(format!("debt_amount = {} is negative", input.debt_amount));
    }
    if daily_rate < Decimal::ZERO {
        warnings.push(format!("daily_rate = {} is negative", daily_rate));
    }

    // Calendar-date difference; time of day is deliberately dropped.
    let days = (input.payment_date.date() - input.computation_date.date()).num_days();

    let result = if days <= 0 {
        if days < 0 {
            warnings.push("payment date precedes computation date; no interest accrued".into());
        }
        zero_accrual(input)
    } else {
        let interest_factor = Decimal::from(days) * daily_rate;
        let interest_amount = input.debt_amount * interest_factor;
        let total_debt = input.debt_amount + interest_amount;
        InterestResult {
            days_delay: days as u64,
            interest_factor,
            interest_amount,
            total_debt,
            total_debt_pen: input.exchange_rate.map(|fx| to_pen(total_debt, fx)),
        }
    };

    let assumptions = serde_json::json!({
        "input": input,
        "daily_rate": daily_rate,
        "interest_model": "simple, non-compounding",
        "day_count": "calendar days, dates truncated to midnight",
    });

    Ok(with_metadata(
        "Simple daily moratorium interest (TIM) over calendar days of delay",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

fn zero_accrual(input: &InterestInput) -> InterestResult {
    InterestResult {
        days_delay: 0,
        interest_factor: Decimal::ZERO,
        interest_amount: Decimal::ZERO,
        total_debt: input.debt_amount,
        total_debt_pen: input.exchange_rate.map(|fx| to_pen(input.debt_amount, fx)),
    }
}

fn to_pen(amount: Money, exchange_rate: Rate) -> Money {
    (amount * exchange_rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
