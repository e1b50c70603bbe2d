//! Stored record shapes: road maps, calling plans and price tables.

use serde::{Deserialize, Serialize};

/// One directed road of a map
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Road {
    pub origin: String,
    pub destination: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoadMap {
    pub id: String,
    pub name: String,
    pub roads: Vec<Road>,
}

/// Included minutes and overage terms of a plan
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Pack {
    /// Minutes covered by the plan
    pub minutes: u32,
    /// Surcharge in percent on the per-minute price for minutes past `minutes`
    pub extra: u32,
    /// Flat plan price
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub pack: Pack,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationPrice {
    pub destination: String,
    /// Price per minute
    pub cost: f64,
}

/// Per-minute prices from one origin
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriceTable {
    pub id: String,
    pub origin: String,
    pub destinations: Vec<DestinationPrice>,
}

impl PriceTable {
    /// Per-minute price to `destination` (first matching entry)
    pub fn price_to(&self, destination: &str) -> Option<f64> {
        self.destinations
            .iter()
            .find(|d| d.destination == destination)
            .map(|d| d.cost)
    }
}

/// Fields of a new road map
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewRoadMap {
    pub name: String,
    pub roads: Vec<Road>,
}

/// Fields to change on a road map; `None` leaves the stored value
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoadMapPatch {
    pub name: Option<String>,
    pub roads: Option<Vec<Road>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPlan {
    pub name: String,
    pub pack: Pack,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanPatch {
    pub name: Option<String>,
    pub pack: Option<Pack>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPriceTable {
    pub origin: String,
    pub destinations: Vec<DestinationPrice>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceTablePatch {
    pub origin: Option<String>,
    pub destinations: Option<Vec<DestinationPrice>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_to_first_match() {
        let table = PriceTable {
            id: "t".to_string(),
            origin: "011".to_string(),
            destinations: vec![
                DestinationPrice { destination: "016".to_string(), cost: 1.9 },
                DestinationPrice { destination: "017".to_string(), cost: 1.7 },
                DestinationPrice { destination: "016".to_string(), cost: 9.9 },
            ],
        };

        assert_eq!(table.price_to("016"), Some(1.9));
        assert_eq!(table.price_to("017"), Some(1.7));
        assert_eq!(table.price_to("010"), None);
    }

    #[test]
    fn test_plan_wire_shape() {
        let plan: Plan = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "FaleMais 30",
            "pack": { "minutes": 30, "extra": 10, "cost": 30 }
        }))
        .unwrap();

        assert_eq!(plan.pack.minutes, 30);
        assert_eq!(plan.pack.extra, 10);
    }
}
