//! REST API modules.

pub mod assets;
pub mod health;
pub mod requests;
pub mod users;
