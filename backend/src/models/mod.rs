//! Domain data models.
//!
//! Purpose: define the persisted record shapes and the API error type.
//! The document is rewritten wholesale on every mutation, so these types
//! are the storage schema as well as the wire schema; each type documents
//! its serde contract in its own Rustdoc.
//!
//! Public surface:
//! - Document — the persisted root object holding the three collections.
//! - User / UserSummary — user record and its credential-free projection.
//! - Asset — catalogue record with passthrough attributes.
//! - AssetRequest — asset request record.
//! - Error / ErrorCode / ErrorBody — API error and its wire shape.

pub mod asset;
pub mod document;
pub mod error;
pub mod request;
pub mod user;

pub use self::asset::Asset;
pub use self::document::Document;
pub use self::error::{Error, ErrorBody, ErrorCode};
pub use self::request::AssetRequest;
pub use self::user::{User, UserSummary};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
