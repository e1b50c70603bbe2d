use tracing::debug;

use crate::billing::models::{PlanCost, PlanQuote};
use crate::billing::PlanError;
use crate::models::{Pack, Plan, PriceTable};

/// Price a call of `minutes` to a destination billed at `price` per minute.
///
/// Minutes inside the pack are free (the flat pack price is billed
/// separately); minutes past it cost `price` plus `pack.extra` percent.
/// Without a plan every minute costs `price`.
pub fn compute_plan_cost(pack: &Pack, price: f64, minutes: f64) -> PlanCost {
    let included = f64::from(pack.minutes);

    let plan_cost = if minutes > included {
        let surcharge = price * (f64::from(pack.extra) / 100.0);
        (minutes - included) * (price + surcharge)
    } else {
        0.0
    };

    PlanCost {
        plan_cost,
        no_plan_cost: minutes * price,
    }
}

/// Quote a call from `origin` to `destination` under `plan`
///
/// `plan` and `prices` are whatever the caller's lookups returned; a missing
/// record or a destination absent from the table is reported as the matching
/// [`PlanError`].
pub fn quote_plan(
    plan: Option<&Plan>,
    prices: Option<&PriceTable>,
    origin: &str,
    destination: &str,
    minutes: f64,
) -> Result<PlanQuote, PlanError> {
    let plan = plan.ok_or(PlanError::PlanNotFound)?;
    let prices = prices.ok_or_else(|| PlanError::OriginNotFound(origin.to_string()))?;
    let price = prices
        .price_to(destination)
        .ok_or_else(|| PlanError::DestinationNotFound {
            origin: origin.to_string(),
            destination: destination.to_string(),
        })?;

    let cost = compute_plan_cost(&plan.pack, price, minutes);
    if !cost.plan_cost.is_finite() || !cost.no_plan_cost.is_finite() {
        return Err(PlanError::CostOutOfRange { minutes });
    }

    debug!(
        plan = %plan.name,
        origin,
        destination,
        minutes,
        plan_cost = cost.plan_cost,
        no_plan_cost = cost.no_plan_cost,
        "Plan quote computed"
    );

    Ok(PlanQuote {
        origin: origin.to_string(),
        destination: destination.to_string(),
        minutes,
        plan: plan.name.clone(),
        plan_cost: cost.plan_cost,
        no_plan_cost: cost.no_plan_cost,
    })
}
