//! JSON shapes exchanged by `/placeables` and `/calculate`.

use crate::domain::model::{CalculationResult, ItemCalculated, ResourceTotals};
use serde::{Deserialize, Serialize};

/// One requested item. `quantity` stays raw JSON so that non-integer values
/// surface as `InvalidQuantity` instead of a generic body rejection; a
/// missing `quantity` reads as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceableRequest {
    pub name: String,
    #[serde(default)]
    pub quantity: serde_json::Value,
}

impl PlaceableRequest {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity: serde_json::Value::from(quantity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub placeables: Vec<PlaceableRequest>,
    #[serde(default)]
    pub use_deep_desert_cost: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub total_resources: ResourceTotals,
    pub use_deep_desert_cost: bool,
    pub items_calculated: Vec<ItemCalculated>,
}

impl From<CalculationResult> for CalculationResponse {
    fn from(result: CalculationResult) -> Self {
        Self {
            total_resources: result.total_resources,
            use_deep_desert_cost: result.use_deep_desert_cost,
            items_calculated: result.items_calculated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
