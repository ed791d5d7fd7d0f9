pub mod customs;
pub mod interest;
pub mod landed_cost;
