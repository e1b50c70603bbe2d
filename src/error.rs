use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::error;

use crate::billing::PlanError;
use crate::route::RouteError;
use crate::store::StoreError;

/// Message returned when no route joins the requested endpoints
pub const INVALID_ENDPOINTS: &str = "Origin or Destination is invalid. Please try again with new data";
pub const PLAN_NOT_FOUND: &str = "Plan not found!";
pub const ORIGIN_NOT_FOUND: &str = "Origin is invalid. Please try again with new data";
pub const DESTINATION_NOT_FOUND: &str =
    "Destination is invalid for this Origin. Please try again with new data";
/// Message returned when a quote overflows
pub const COST_OUT_OF_RANGE: &str = "Cost is out of range. Please try again with new data";

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Request failed schema validation
    Validation(String),
    /// Well-formed request the data cannot satisfy
    BadRequest(String),
    /// Record not found
    NotFound(String),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "Validation error: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::InternalError(msg) => {
                error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::Validation(_) => "validation_error",
        AppError::BadRequest(_) => "bad_request",
        AppError::NotFound(_) => "not_found",
        AppError::InternalError(_) => "internal_error",
    }
}

impl From<RouteError> for AppError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::EndpointNotFound { .. } => Self::BadRequest(INVALID_ENDPOINTS.to_string()),
            RouteError::InvalidGraph(msg) => Self::InternalError(format!("Invalid road map: {}", msg)),
            RouteError::CostOutOfRange { .. } => Self::BadRequest(COST_OUT_OF_RANGE.to_string()),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        let message = match err {
            PlanError::CostOutOfRange { .. } => {
                return Self::BadRequest(COST_OUT_OF_RANGE.to_string())
            }
            PlanError::PlanNotFound => PLAN_NOT_FOUND,
            PlanError::OriginNotFound(_) => ORIGIN_NOT_FOUND,
            PlanError::DestinationNotFound { .. } => DESTINATION_NOT_FOUND,
        };
        Self::NotFound(message.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::InternalError(err.to_string())
    }
}
