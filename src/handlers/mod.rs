pub mod health;
pub mod maps;
pub mod plans;
pub mod prices;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use std::sync::Arc;

use crate::error::AppError;
use crate::store::RecordStore;

/// State shared by the record handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

/// Unwrap a typed JSON body, reporting a missing or malformed one as a validation error
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => {
            Err(AppError::Validation("\"value\" must be an object".to_string()))
        }
        Err(rejection) => Err(AppError::Validation(rejection.body_text())),
    }
}

/// Unwrap a typed query string, reporting a malformed one as a validation error
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}
