use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::billing::{quote_plan, PlanQuote};
use crate::error::{AppError, PLAN_NOT_FOUND};
use crate::handlers::{json_body, query_params, AppState};
use crate::models::{NewPlan, Plan, PlanPatch};
use crate::validation::{self, PlanQuery};

fn plan_not_found() -> AppError {
    AppError::NotFound(PLAN_NOT_FOUND.to_string())
}

/// GET /plans
pub async fn list_plans(State(state): State<AppState>) -> Result<Json<Vec<Plan>>, AppError> {
    Ok(Json(state.store.list_plans().await?))
}

/// GET /plan/:id
pub async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Plan>, AppError> {
    let id = validation::record_id(&id)?;
    let plan = state.store.get_plan(&id).await?.ok_or_else(plan_not_found)?;
    Ok(Json(plan))
}

/// GET /plan/:id/query?origin=011&destination=016&minutes=80
///
/// Compares the cost of a call under the plan with per-minute billing.
pub async fn query(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<PlanQuery>, QueryRejection>,
) -> Result<Json<PlanQuote>, AppError> {
    let id = validation::record_id(&id)?;
    let query = validation::plan_query(query_params(query)?)?;

    let (plan, prices) = tokio::join!(
        state.store.get_plan(&id),
        state.store.find_price_by_origin(&query.origin),
    );
    let (plan, prices) = (plan?, prices?);

    let quote = quote_plan(
        plan.as_ref(),
        prices.as_ref(),
        &query.origin,
        &query.destination,
        query.minutes,
    )?;

    Ok(Json(quote))
}

/// POST /plan
pub async fn create_plan(
    State(state): State<AppState>,
    payload: Result<Json<NewPlan>, JsonRejection>,
) -> Result<(StatusCode, Json<Plan>), AppError> {
    let new_plan = validation::new_plan(json_body(payload)?)?;
    let plan = state.store.create_plan(new_plan).await?;
    info!(id = %plan.id, name = %plan.name, "Plan created");
    Ok((StatusCode::ACCEPTED, Json(plan)))
}

/// PUT /plan/:id
pub async fn update_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PlanPatch>, JsonRejection>,
) -> Result<Json<Plan>, AppError> {
    let id = validation::record_id(&id)?;
    let patch = validation::plan_patch(json_body(payload)?)?;
    let plan = state
        .store
        .update_plan(&id, patch)
        .await?
        .ok_or_else(plan_not_found)?;
    info!(id = %plan.id, "Plan updated");
    Ok(Json(plan))
}

/// DELETE /plan/:id
pub async fn delete_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = validation::record_id(&id)?;
    if !state.store.delete_plan(&id).await? {
        return Err(plan_not_found());
    }
    info!(id = %id, "Plan deleted");
    Ok(StatusCode::OK)
}
