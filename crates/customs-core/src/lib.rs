pub mod customs_value;
pub mod error;
pub mod tax_cascade;
pub mod types;

#[cfg(feature = "tariff")]
pub mod reference;

#[cfg(feature = "tariff")]
pub mod tariff;

#[cfg(feature = "interest")]
pub mod interest;

#[cfg(feature = "landed_cost")]
pub mod landed_cost;

pub use error::CustomsError;
pub use types::*;

/// Standard result type for all customs-core operations
pub type CustomsResult<T> = Result<T, CustomsError>;
