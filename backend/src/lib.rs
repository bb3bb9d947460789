//! Backend library modules.

pub mod api;
pub mod app;
pub mod config;
pub mod doc;
pub mod ids;
pub mod middleware;
pub mod models;
pub mod store;

pub use app::build_app;
/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
