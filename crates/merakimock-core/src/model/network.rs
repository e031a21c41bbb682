// ── Network domain types ──

use serde::{Deserialize, Serialize};

use super::device::ProductType;

/// A Dashboard network (one site).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub product_types: Vec<ProductType>,
    pub time_zone: String,
    pub tags: Vec<String>,
    pub enrollment_string: Option<String>,
    pub url: String,
    pub notes: Option<String>,
    pub details: Option<serde_json::Value>,
    pub is_bound_to_config_template: bool,
    pub is_virtual: bool,
}

impl Network {
    pub fn has_product(&self, product: ProductType) -> bool {
        self.product_types.contains(&product)
    }
}
