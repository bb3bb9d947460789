//! Atomic load and save for a single JSON document file.
//!
//! This crate owns the durable-storage story for services that keep all of
//! their state in one flat JSON file: open the containing directory as a
//! capability, read the whole document on demand, and replace it atomically
//! on save so readers never observe a partial write. It is deliberately
//! independent of any domain types; callers pick the document shape.
//!
//! # Example
//!
//! ```no_run
//! use flatfile::JsonFile;
//! use serde_json::Value;
//!
//! # fn main() -> Result<(), flatfile::StoreError> {
//! let file: JsonFile<Value> = JsonFile::open("db.json")?;
//! let document = file.load()?;
//! file.save(&document)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod json_file;

pub use error::StoreError;
pub use json_file::JsonFile;
