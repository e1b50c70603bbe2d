pub mod calculator;
pub mod models;

pub use calculator::{compute_plan_cost, quote_plan};
pub use models::{PlanCost, PlanQuote};

use thiserror::Error;

/// Lookup failures while quoting a call under a plan
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    #[error("plan not found")]
    PlanNotFound,

    #[error("no price table for origin '{0}'")]
    OriginNotFound(String),

    #[error("no price from origin '{origin}' to destination '{destination}'")]
    DestinationNotFound { origin: String, destination: String },

    /// Quoted cost does not fit in an f64
    #[error("call cost out of range for {minutes} minutes")]
    CostOutOfRange { minutes: f64 },
}
