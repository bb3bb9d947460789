//! Assets API handlers.

use crate::models::{ApiResult, Asset, ErrorBody};
use crate::store::DataStore;
use actix_web::{get, web};

/// List the asset catalogue.
///
/// Assets are seeded out of band; this service never mutates them.
#[utoipa::path(
    get,
    path = "/assets",
    responses(
        (status = 200, description = "All assets", body = [Asset]),
        (status = 500, description = "Data file unavailable", body = ErrorBody)
    ),
    tags = ["assets"],
    operation_id = "listAssets"
)]
#[get("/assets")]
pub async fn list_assets(store: web::Data<DataStore>) -> ApiResult<web::Json<Vec<Asset>>> {
    let document = store.snapshot()?;
    Ok(web::Json(document.assets))
}
