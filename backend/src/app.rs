//! HTTP application assembly.
//!
//! [`build_app`] wires shared state, middleware, and every route into an
//! [`App`]. The binary entry-point and the integration tests both call it,
//! so they serve the identical surface.

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::api::assets::list_assets;
use crate::api::health::{HealthState, live, ready};
use crate::api::requests::{create_request, list_requests, update_request_status};
use crate::api::users::{change_user_password, list_users, update_user_image};
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::ids::RequestIdGenerator;
use crate::middleware::Trace;
use crate::models::Error;
use crate::store::DataStore;

/// Assemble the application: state, middleware, and routes.
pub fn build_app(
    store: web::Data<DataStore>,
    ids: web::Data<RequestIdGenerator>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // Body deserialisation failures still answer in the API's error shape.
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into());

    let mut app = App::new()
        .app_data(store)
        .app_data(ids)
        .app_data(health_state)
        .app_data(json_config)
        .wrap(Cors::permissive())
        .wrap(Trace)
        .service(list_users)
        .service(update_user_image)
        .service(change_user_password)
        .service(list_assets)
        .service(create_request)
        .service(list_requests)
        .service(update_request_status)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    app
}
