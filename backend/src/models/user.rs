//! User record model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registered user as stored in the document.
///
/// Users are seeded out of band; no endpoint creates them. Listing and
/// image-update responses return this record verbatim, password included.
/// Only the password-change response projects to [`UserSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Stable user identifier.
    #[schema(example = "42")]
    pub id: String,
    /// Login name.
    #[schema(example = "mariam")]
    pub username: String,
    /// Plaintext password, compared byte-for-byte on password change.
    pub password: String,
    /// Free-form role label.
    #[schema(example = "manager")]
    pub role: String,
    /// Profile image URL; the key is absent until an image is first set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Credential-free projection returned by the password-change endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    /// Stable user identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Free-form role label.
    pub role: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}
