use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::error::AppError;
use crate::handlers::{json_body, AppState};
use crate::models::{NewPriceTable, PriceTable, PriceTablePatch};
use crate::validation;

fn price_not_found() -> AppError {
    AppError::NotFound("Price table not found".to_string())
}

/// GET /prices
pub async fn list_prices(
    State(state): State<AppState>,
) -> Result<Json<Vec<PriceTable>>, AppError> {
    Ok(Json(state.store.list_prices().await?))
}

/// GET /price/:id
pub async fn get_price(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PriceTable>, AppError> {
    let id = validation::record_id(&id)?;
    let price = state.store.get_price(&id).await?.ok_or_else(price_not_found)?;
    Ok(Json(price))
}

/// POST /price
pub async fn create_price(
    State(state): State<AppState>,
    payload: Result<Json<NewPriceTable>, JsonRejection>,
) -> Result<(StatusCode, Json<PriceTable>), AppError> {
    let new_price = validation::new_price_table(json_body(payload)?)?;
    let price = state.store.create_price(new_price).await?;
    info!(
        id = %price.id,
        origin = %price.origin,
        destinations = price.destinations.len(),
        "Price table created"
    );
    Ok((StatusCode::ACCEPTED, Json(price)))
}

/// PUT /price/:id
pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PriceTablePatch>, JsonRejection>,
) -> Result<Json<PriceTable>, AppError> {
    let id = validation::record_id(&id)?;
    let patch = validation::price_table_patch(json_body(payload)?)?;
    let price = state
        .store
        .update_price(&id, patch)
        .await?
        .ok_or_else(price_not_found)?;
    info!(id = %price.id, "Price table updated");
    Ok(Json(price))
}

/// DELETE /price/:id
pub async fn delete_price(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = validation::record_id(&id)?;
    if !state.store.delete_price(&id).await? {
        return Err(price_not_found());
    }
    info!(id = %id, "Price table deleted");
    Ok(StatusCode::OK)
}
