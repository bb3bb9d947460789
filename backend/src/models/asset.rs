//! Asset record model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Catalogue asset: an identifier plus whatever attributes the document
/// carries for it.
///
/// Assets are read-only through this service, so every attribute beyond
/// `id` flattens into a passthrough map and survives load and save
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Asset {
    /// Stable asset identifier.
    #[schema(example = "a-301")]
    pub id: String,
    /// Remaining attributes, preserved as-is.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub attributes: Map<String, Value>,
}
