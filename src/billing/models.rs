use serde::Serialize;

/// Cost of a call with and without a plan
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlanCost {
    pub plan_cost: f64,
    pub no_plan_cost: f64,
}

/// Quote returned by the plan query endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanQuote {
    pub origin: String,
    pub destination: String,
    pub minutes: f64,
    /// Plan name
    pub plan: String,
    pub plan_cost: f64,
    pub no_plan_cost: f64,
}
