//! Users API handlers.

use crate::models::{ApiResult, Error, ErrorBody, User, UserSummary};
use crate::store::DataStore;
use actix_web::{HttpResponse, get, patch, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body for `PATCH /users/{id}/image`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateImageBody {
    /// Replacement profile image URL.
    pub image: Option<String>,
}

/// Body for `PATCH /users/{id}/password`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordBody {
    /// Password currently on record.
    pub current_password: Option<String>,
    /// Replacement password.
    pub new_password: Option<String>,
}

/// Response for a successful image update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImageUpdatedResponse {
    /// Human-readable confirmation.
    #[schema(example = "Profile image updated")]
    pub message: String,
    /// The updated record, credentials included.
    pub user: User,
}

/// Response for a successful password change.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PasswordChangedResponse {
    /// Human-readable confirmation.
    #[schema(example = "Password changed successfully")]
    pub message: String,
    /// The updated record with credentials stripped.
    pub user: UserSummary,
}

/// Treat an absent or empty string the way the API treats any falsy field.
fn submitted(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// List every user on record, credentials included.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 500, description = "Data file unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(store: web::Data<DataStore>) -> ApiResult<web::Json<Vec<User>>> {
    let document = store.snapshot()?;
    Ok(web::Json(document.users))
}

/// Set a user's profile image URL.
#[utoipa::path(
    patch,
    path = "/users/{id}/image",
    request_body = UpdateImageBody,
    responses(
        (status = 200, description = "Image updated", body = ImageUpdatedResponse),
        (status = 400, description = "Image URL missing or falsy", body = ErrorBody),
        (status = 404, description = "No user with that id", body = ErrorBody),
        (status = 500, description = "Data file unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateUserImage"
)]
#[patch("/users/{id}/image")]
pub async fn update_user_image(
    store: web::Data<DataStore>,
    path: web::Path<String>,
    payload: web::Json<UpdateImageBody>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let image = submitted(payload.into_inner().image)
        .ok_or_else(|| Error::invalid_request("Image URL is required"))?;

    let user = store.update(move |document| {
        let user = document
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| Error::not_found("User not found"))?;
        user.image = Some(image);
        Ok(user.clone())
    })?;

    Ok(HttpResponse::Ok().json(ImageUpdatedResponse {
        message: "Profile image updated".to_owned(),
        user,
    }))
}

/// Change a user's password after checking the current one.
#[utoipa::path(
    patch,
    path = "/users/{id}/password",
    request_body = ChangePasswordBody,
    responses(
        (status = 200, description = "Password changed", body = PasswordChangedResponse),
        (status = 400, description = "Missing passwords or wrong current password", body = ErrorBody),
        (status = 404, description = "No user with that id", body = ErrorBody),
        (status = 500, description = "Data file unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "changeUserPassword"
)]
#[patch("/users/{id}/password")]
pub async fn change_user_password(
    store: web::Data<DataStore>,
    path: web::Path<String>,
    payload: web::Json<ChangePasswordBody>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let body = payload.into_inner();
    let (current, replacement) = match (
        submitted(body.current_password),
        submitted(body.new_password),
    ) {
        (Some(current), Some(replacement)) => (current, replacement),
        _ => {
            return Err(Error::invalid_request(
                "Current and new password are required",
            ));
        }
    };

    let user = store.update(move |document| {
        let user = document
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| Error::not_found("User not found"))?;
        if user.password != current {
            return Err(Error::invalid_request("Current password is incorrect"));
        }
        user.password = replacement;
        Ok(UserSummary::from(&*user))
    })?;

    Ok(HttpResponse::Ok().json(PasswordChangedResponse {
        message: "Password changed successfully".to_owned(),
        user,
    }))
}
