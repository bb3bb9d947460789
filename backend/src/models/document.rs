//! Persisted document model.

use serde::{Deserialize, Serialize};

use crate::models::{Asset, AssetRequest, User};

/// The entire persisted state: three record collections in one JSON file.
///
/// All three collections must be present in the file. There are no serde
/// defaults here on purpose: a document missing a collection fails to
/// parse and surfaces as a storage fault instead of silently starting
/// with an empty collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Registered users, seeded out of band.
    pub users: Vec<User>,
    /// Asset catalogue, read-only through this service.
    pub assets: Vec<Asset>,
    /// Asset requests created and updated through the API.
    pub requests: Vec<AssetRequest>,
}
