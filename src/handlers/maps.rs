use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::error::AppError;
use crate::handlers::{json_body, query_params, AppState};
use crate::models::{NewRoadMap, RoadMap, RoadMapPatch};
use crate::route::{compute_route, RouteQuote};
use crate::validation::{self, RouteQuery};

fn map_not_found() -> AppError {
    AppError::NotFound("Map not found".to_string())
}

/// GET /maps
pub async fn list_maps(State(state): State<AppState>) -> Result<Json<Vec<RoadMap>>, AppError> {
    Ok(Json(state.store.list_maps().await?))
}

/// GET /map/:id
pub async fn get_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoadMap>, AppError> {
    let id = validation::record_id(&id)?;
    let map = state.store.get_map(&id).await?.ok_or_else(map_not_found)?;
    Ok(Json(map))
}

/// GET /map/:id/route?origin=A&destination=B&autonomy=10&gas=2.5
pub async fn route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Json<RouteQuote>, AppError> {
    let id = validation::record_id(&id)?;
    let query = validation::route_query(query_params(query)?)?;

    let map = state.store.get_map(&id).await?.ok_or_else(map_not_found)?;
    let quote = compute_route(
        &map.roads,
        &query.origin,
        &query.destination,
        query.autonomy,
        query.gas,
    )?;

    Ok(Json(quote))
}

/// POST /map
pub async fn create_map(
    State(state): State<AppState>,
    payload: Result<Json<NewRoadMap>, JsonRejection>,
) -> Result<(StatusCode, Json<RoadMap>), AppError> {
    let new_map = validation::new_road_map(json_body(payload)?)?;
    let map = state.store.create_map(new_map).await?;
    info!(id = %map.id, name = %map.name, roads = map.roads.len(), "Road map created");
    Ok((StatusCode::ACCEPTED, Json(map)))
}

/// PUT /map/:id
pub async fn update_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RoadMapPatch>, JsonRejection>,
) -> Result<Json<RoadMap>, AppError> {
    let id = validation::record_id(&id)?;
    let patch = validation::road_map_patch(json_body(payload)?)?;
    let map = state
        .store
        .update_map(&id, patch)
        .await?
        .ok_or_else(map_not_found)?;
    info!(id = %map.id, "Road map updated");
    Ok(Json(map))
}

/// DELETE /map/:id
pub async fn delete_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = validation::record_id(&id)?;
    if !state.store.delete_map(&id).await? {
        return Err(map_not_found());
    }
    info!(id = %id, "Road map deleted");
    Ok(StatusCode::OK)
}
