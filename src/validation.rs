//! Request validation.
//!
//! Request shapes are typed: serde rejects unknown fields, missing fields and
//! wrong types while the handlers extract them. The functions here run the
//! checks serde cannot express (trimmed non-empty text, length limits,
//! positive numbers) and hand back normalized values. Every failure is an
//! [`AppError::Validation`] naming the offending field.

use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    DestinationPrice, NewPlan, NewPriceTable, NewRoadMap, Pack, PlanPatch, PriceTablePatch, Road,
    RoadMapPatch,
};

/// Longest accepted name, origin or destination
pub const MAX_TEXT_LEN: usize = 30;

/// `/map/:id/route` query string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
    pub autonomy: f64,
    pub gas: f64,
}

/// `/plan/:id/query` query string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanQuery {
    pub origin: String,
    pub destination: String,
    pub minutes: f64,
}

fn invalid(message: String) -> AppError {
    AppError::Validation(message)
}

/// Record id from a path segment
pub fn record_id(raw: &str) -> Result<String, AppError> {
    Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|_| invalid(format!("\"id\" with value \"{}\" is not a valid id", raw)))
}

pub fn new_road_map(map: NewRoadMap) -> Result<NewRoadMap, AppError> {
    Ok(NewRoadMap {
        name: text(&map.name, "name", "")?,
        roads: roads(map.roads)?,
    })
}

pub fn road_map_patch(patch: RoadMapPatch) -> Result<RoadMapPatch, AppError> {
    if patch.name.is_none() && patch.roads.is_none() {
        return Err(empty_patch());
    }
    Ok(RoadMapPatch {
        name: patch.name.map(|name| text(&name, "name", "")).transpose()?,
        roads: patch.roads.map(roads).transpose()?,
    })
}

pub fn new_plan(plan: NewPlan) -> Result<NewPlan, AppError> {
    Ok(NewPlan {
        name: text(&plan.name, "name", "")?,
        pack: pack(plan.pack)?,
    })
}

pub fn plan_patch(patch: PlanPatch) -> Result<PlanPatch, AppError> {
    if patch.name.is_none() && patch.pack.is_none() {
        return Err(empty_patch());
    }
    Ok(PlanPatch {
        name: patch.name.map(|name| text(&name, "name", "")).transpose()?,
        pack: patch.pack.map(pack).transpose()?,
    })
}

pub fn new_price_table(table: NewPriceTable) -> Result<NewPriceTable, AppError> {
    Ok(NewPriceTable {
        origin: text(&table.origin, "origin", "")?,
        destinations: destinations(table.destinations)?,
    })
}

pub fn price_table_patch(patch: PriceTablePatch) -> Result<PriceTablePatch, AppError> {
    if patch.origin.is_none() && patch.destinations.is_none() {
        return Err(empty_patch());
    }
    Ok(PriceTablePatch {
        origin: patch
            .origin
            .map(|origin| text(&origin, "origin", ""))
            .transpose()?,
        destinations: patch.destinations.map(destinations).transpose()?,
    })
}

pub fn route_query(query: RouteQuery) -> Result<RouteQuery, AppError> {
    Ok(RouteQuery {
        origin: text(&query.origin, "origin", "")?,
        destination: text(&query.destination, "destination", "")?,
        autonomy: positive(query.autonomy, "autonomy", "")?,
        gas: positive(query.gas, "gas", "")?,
    })
}

pub fn plan_query(query: PlanQuery) -> Result<PlanQuery, AppError> {
    Ok(PlanQuery {
        origin: text(&query.origin, "origin", "")?,
        destination: text(&query.destination, "destination", "")?,
        minutes: positive(query.minutes, "minutes", "")?,
    })
}

fn empty_patch() -> AppError {
    invalid("\"value\" must have at least 1 children".to_string())
}

/// Trimmed string of 1..=MAX_TEXT_LEN chars
fn text(raw: &str, field: &str, context: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid(format!(
            "{}\"{}\" is not allowed to be empty",
            context, field
        )));
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(invalid(format!(
            "{}\"{}\" length must be less than or equal to {} characters long",
            context, field, MAX_TEXT_LEN
        )));
    }
    Ok(trimmed.to_string())
}

fn positive(number: f64, field: &str, context: &str) -> Result<f64, AppError> {
    if !number.is_finite() {
        return Err(invalid(format!("{}\"{}\" must be a number", context, field)));
    }
    if number <= 0.0 {
        return Err(invalid(format!(
            "{}\"{}\" must be a positive number",
            context, field
        )));
    }
    Ok(number)
}

fn positive_count(count: u32, field: &str, context: &str) -> Result<u32, AppError> {
    if count == 0 {
        return Err(invalid(format!(
            "{}\"{}\" must be a positive number",
            context, field
        )));
    }
    Ok(count)
}

fn non_empty<T>(items: &[T], field: &str) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(invalid(format!("\"{}\" must contain at least 1 items", field)));
    }
    Ok(())
}

fn roads(roads: Vec<Road>) -> Result<Vec<Road>, AppError> {
    non_empty(&roads, "roads")?;
    roads
        .into_iter()
        .enumerate()
        .map(|(position, road)| {
            let context = format!("\"roads\" at position {}: ", position);
            Ok(Road {
                origin: text(&road.origin, "origin", &context)?,
                destination: text(&road.destination, "destination", &context)?,
                cost: positive(road.cost, "cost", &context)?,
            })
        })
        .collect()
}

fn destinations(destinations: Vec<DestinationPrice>) -> Result<Vec<DestinationPrice>, AppError> {
    non_empty(&destinations, "destinations")?;
    destinations
        .into_iter()
        .enumerate()
        .map(|(position, price)| {
            let context = format!("\"destinations\" at position {}: ", position);
            Ok(DestinationPrice {
                destination: text(&price.destination, "destination", &context)?,
                cost: positive(price.cost, "cost", &context)?,
            })
        })
        .collect()
}

fn pack(pack: Pack) -> Result<Pack, AppError> {
    let context = "\"pack\": ";
    Ok(Pack {
        minutes: positive_count(pack.minutes, "minutes", context)?,
        extra: positive_count(pack.extra, "extra", context)?,
        cost: positive_count(pack.cost, "cost", context)?,
    })
}
