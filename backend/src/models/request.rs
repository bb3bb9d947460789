//! Asset request record model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Asset request as stored in the document.
///
/// Creation validates only that each submitted field is truthy, so apart
/// from `id`, `status`, and `quantity` the fields stay untyped and
/// round-trip through the file exactly as submitted. Field order mirrors
/// the saved document's key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetRequest {
    /// Numeric-string identifier issued at creation.
    #[schema(example = "1724489000000")]
    pub id: String,
    /// Requesting user, as submitted.
    #[schema(value_type = Object)]
    pub user: Value,
    /// Identifier of the requested asset, as submitted.
    #[schema(value_type = Object)]
    pub asset_id: Value,
    /// Display name of the requested asset, as submitted.
    #[schema(value_type = Object)]
    pub asset_name: Value,
    /// Workflow status. `None` means the key is absent from the stored
    /// record; an explicit `null` is kept as a value. Updates may move the
    /// field between all three states.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    #[schema(value_type = Option<Object>)]
    pub status: Option<Value>,
    /// Requested quantity. `None` marks input that did not parse as an
    /// integer and always serializes as `null`.
    pub quantity: Option<i64>,
    /// Free-text description, as submitted.
    #[schema(value_type = Object)]
    pub description: Value,
    /// Category label, as submitted.
    #[schema(value_type = Object)]
    pub category: Value,
    /// Request type label, as submitted.
    #[serde(rename = "type")]
    #[schema(value_type = Object)]
    pub kind: Value,
    /// Asset code, as submitted.
    #[schema(value_type = Object)]
    pub code: Value,
    /// Unit of measure, as submitted.
    #[schema(value_type = Object)]
    pub unit_of_measure: Value,
}

/// Keep a present `status` key as `Some`, JSON `null` included, so an
/// explicit null survives load and save instead of collapsing into the
/// absent-key state.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
