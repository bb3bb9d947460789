//! Asset request API handlers.

use crate::ids::RequestIdGenerator;
use crate::models::{ApiResult, AssetRequest, Error, ErrorBody};
use crate::store::DataStore;
use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body for `POST /requests`.
///
/// Every field is required in the truthy sense: absent keys, `null`,
/// `false`, `0`, and `""` all reject the request. Beyond that the values
/// are stored as submitted, so they stay untyped here.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    /// Requesting user.
    #[schema(value_type = Option<Object>)]
    pub user: Option<Value>,
    /// Identifier of the requested asset.
    #[schema(value_type = Option<Object>)]
    pub asset_id: Option<Value>,
    /// Display name of the requested asset.
    #[schema(value_type = Option<Object>)]
    pub asset_name: Option<Value>,
    /// Initial workflow status.
    #[schema(value_type = Option<Object>)]
    pub status: Option<Value>,
    /// Requested quantity, coerced to an integer on storage.
    #[schema(value_type = Option<Object>)]
    pub quantity: Option<Value>,
    /// Free-text description.
    #[schema(value_type = Option<Object>)]
    pub description: Option<Value>,
    /// Category label.
    #[schema(value_type = Option<Object>)]
    pub category: Option<Value>,
    /// Request type label.
    #[serde(rename = "type")]
    #[schema(value_type = Option<Object>)]
    pub kind: Option<Value>,
    /// Asset code.
    #[schema(value_type = Option<Object>)]
    pub code: Option<Value>,
    /// Unit of measure.
    #[schema(value_type = Option<Object>)]
    pub unit_of_measure: Option<Value>,
}

impl CreateRequestBody {
    /// Build the stored record, or `None` when any field is falsy. The id
    /// is minted only once every field has passed, so rejected bodies do
    /// not advance the id sequence.
    fn into_record(self, id: impl FnOnce() -> String) -> Option<AssetRequest> {
        let user = require(self.user)?;
        let asset_id = require(self.asset_id)?;
        let asset_name = require(self.asset_name)?;
        let status = require(self.status)?;
        let quantity = require(self.quantity)?;
        let description = require(self.description)?;
        let category = require(self.category)?;
        let kind = require(self.kind)?;
        let code = require(self.code)?;
        let unit_of_measure = require(self.unit_of_measure)?;

        Some(AssetRequest {
            id: id(),
            user,
            asset_id,
            asset_name,
            status: Some(status),
            quantity: parse_quantity(&quantity),
            description,
            category,
            kind,
            code,
            unit_of_measure,
        })
    }
}

/// Body for `PATCH /requests/{id}`.
///
/// The `status` field distinguishes three inputs: an absent key drops the
/// stored field, an explicit `null` stores `null`, and any other value is
/// stored as-is.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusBody {
    /// Replacement workflow status.
    #[serde(default, deserialize_with = "nested_option")]
    #[schema(value_type = Option<Object>)]
    pub status: Option<Option<Value>>,
}

/// Wrap a present key in `Some` so the outer option tracks key presence.
fn nested_option<'de, D>(deserializer: D) -> Result<Option<Option<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(Some)
}

/// Response for a successful creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequestCreatedResponse {
    /// Human-readable confirmation.
    #[schema(example = "Request created successfully")]
    pub message: String,
    /// The stored record, issued id included.
    pub data: AssetRequest,
}

/// Response for a successful status update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequestStatusResponse {
    /// Human-readable confirmation.
    #[schema(example = "Request status updated")]
    pub message: String,
    /// The updated record.
    pub request: AssetRequest,
}

/// Keep a field only when JavaScript would call it truthy.
fn require(field: Option<Value>) -> Option<Value> {
    field.filter(is_truthy)
}

/// JavaScript truthiness over JSON values: `null`, `false`, `0`, and `""`
/// are falsy; everything else, arrays and objects included, is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce the quantity field the way `parseInt` would: numbers truncate
/// toward zero and strings parse an optionally signed decimal prefix.
/// Anything else yields `None`, stored as JSON `null`.
fn parse_quantity(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|n| n.trunc() as i64)),
        Value::String(text) => parse_integer_prefix(text),
        _ => None,
    }
}

fn parse_integer_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Record a new asset request.
#[utoipa::path(
    post,
    path = "/requests",
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Request recorded", body = RequestCreatedResponse),
        (status = 400, description = "A required field is missing or falsy", body = ErrorBody),
        (status = 500, description = "Data file unavailable", body = ErrorBody)
    ),
    tags = ["requests"],
    operation_id = "createRequest"
)]
#[post("/requests")]
pub async fn create_request(
    store: web::Data<DataStore>,
    ids: web::Data<RequestIdGenerator>,
    payload: web::Json<CreateRequestBody>,
) -> ApiResult<HttpResponse> {
    let record = payload
        .into_inner()
        .into_record(|| ids.next_id())
        .ok_or_else(|| Error::invalid_request("Missing required fields"))?;

    let data = store.update(move |document| {
        document.requests.push(record.clone());
        Ok(record)
    })?;

    Ok(HttpResponse::Created().json(RequestCreatedResponse {
        message: "Request created successfully".to_owned(),
        data,
    }))
}

/// List every asset request on record.
#[utoipa::path(
    get,
    path = "/requests",
    responses(
        (status = 200, description = "All asset requests", body = [AssetRequest]),
        (status = 500, description = "Data file unavailable", body = ErrorBody)
    ),
    tags = ["requests"],
    operation_id = "listRequests"
)]
#[get("/requests")]
pub async fn list_requests(store: web::Data<DataStore>) -> ApiResult<web::Json<Vec<AssetRequest>>> {
    let document = store.snapshot()?;
    Ok(web::Json(document.requests))
}

/// Replace, null out, or drop a request's workflow status.
#[utoipa::path(
    patch,
    path = "/requests/{id}",
    request_body = UpdateStatusBody,
    responses(
        (status = 200, description = "Status updated", body = RequestStatusResponse),
        (status = 404, description = "No request with that id", body = ErrorBody),
        (status = 500, description = "Data file unavailable", body = ErrorBody)
    ),
    tags = ["requests"],
    operation_id = "updateRequestStatus"
)]
#[patch("/requests/{id}")]
pub async fn update_request_status(
    store: web::Data<DataStore>,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusBody>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let status = payload.into_inner().status;

    let request = store.update(move |document| {
        let request = document
            .requests
            .iter_mut()
            .find(|request| request.id == id)
            .ok_or_else(|| Error::not_found("Request not found"))?;
        request.status = status.map(|value| value.unwrap_or(Value::Null));
        Ok(request.clone())
    })?;

    Ok(HttpResponse::Ok().json(RequestStatusResponse {
        message: "Request status updated".to_owned(),
        request,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    fn seed_document() -> Value {
        json!({
            "users": [],
            "assets": [],
            "requests": [
                {
                    "id": "1700000000000",
                    "user": {"id": "1", "username": "mariam"},
                    "assetId": "a-301",
                    "assetName": "Thermal printer",
                    "status": "Pending",
                    "quantity": 2,
                    "description": "Replacement unit",
                    "category": "Electronics",
                    "type": "New request",
                    "code": "TP-09",
                    "unitOfMeasure": "piece"
                }
            ]
        })
    }

    fn seeded_store(dir: &TempDir) -> DataStore {
        let path = dir.path().join("db.json");
        std::fs::write(&path, seed_document().to_string()).expect("seed data file");
        DataStore::open(path).expect("open data store")
    }

    fn saved_document(dir: &TempDir) -> Value {
        serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("db.json")).expect("read data file"),
        )
        .expect("parse data file")
    }

    fn full_body() -> Value {
        json!({
            "user": {"id": "2", "username": "teo"},
            "assetId": "a-44",
            "assetName": "Pallet jack",
            "status": "Pending",
            "quantity": "5",
            "description": "Warehouse floor",
            "category": "Equipment",
            "type": "Repair",
            "code": "PJ-02",
            "unitOfMeasure": "unit"
        })
    }

    fn test_app(
        store: DataStore,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(store))
            .app_data(web::Data::new(RequestIdGenerator::new()))
            .service(create_request)
            .service(list_requests)
            .service(update_request_status)
    }

    #[actix_web::test]
    async fn create_stores_and_returns_the_record() {
        let dir = TempDir::new().expect("temp dir");
        let app = test::init_service(test_app(seeded_store(&dir))).await;

        let request = test::TestRequest::post()
            .uri("/requests")
            .set_json(full_body())
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], json!("Request created successfully"));

        let data = &body["data"];
        assert!(
            data["id"].as_str().expect("id string").parse::<i64>().is_ok(),
            "id should be a numeric string"
        );
        assert_eq!(data["quantity"], json!(5));
        assert_eq!(data["status"], json!("Pending"));
        assert_eq!(data["type"], json!("Repair"));
        assert_eq!(data["user"], json!({"id": "2", "username": "teo"}));

        let saved = saved_document(&dir);
        let stored = &saved["requests"][1];
        assert_eq!(stored["id"], data["id"]);
        assert_eq!(stored["quantity"], json!(5));
        assert_eq!(stored["unitOfMeasure"], json!("unit"));
    }

    #[rstest]
    #[case::missing_user("user", None)]
    #[case::missing_asset_id("assetId", None)]
    #[case::missing_description("description", None)]
    #[case::empty_asset_name("assetName", Some(json!("")))]
    #[case::null_status("status", Some(json!(null)))]
    #[case::zero_quantity("quantity", Some(json!(0)))]
    #[case::null_category("category", Some(json!(null)))]
    #[case::false_type("type", Some(json!(false)))]
    #[case::empty_code("code", Some(json!("")))]
    #[case::empty_unit_of_measure("unitOfMeasure", Some(json!("")))]
    #[actix_web::test]
    async fn create_rejects_falsy_required_fields(
        #[case] field: &str,
        #[case] value: Option<Value>,
    ) {
        let dir = TempDir::new().expect("temp dir");
        let app = test::init_service(test_app(seeded_store(&dir))).await;
        let before = std::fs::read(dir.path().join("db.json")).expect("read data file");

        let mut body = full_body();
        let fields = body.as_object_mut().expect("object body");
        match value {
            Some(value) => {
                fields.insert(field.to_owned(), value);
            }
            None => {
                fields.remove(field);
            }
        }

        let request = test::TestRequest::post()
            .uri("/requests")
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "message": "Missing required fields" }));

        let after = std::fs::read(dir.path().join("db.json")).expect("read data file");
        assert_eq!(before, after, "rejected request must not touch the file");
    }

    #[rstest]
    #[case::string_integer(json!("5"), json!(5))]
    #[case::number(json!(7), json!(7))]
    #[case::float_truncates(json!(5.9), json!(5))]
    #[case::negative_float_truncates(json!(-5.9), json!(-5))]
    #[case::trailing_garbage(json!("12x"), json!(12))]
    #[case::leading_whitespace(json!("  8"), json!(8))]
    #[case::signed_string(json!("-3"), json!(-3))]
    #[case::unparsable_string(json!("x5"), json!(null))]
    #[case::boolean(json!(true), json!(null))]
    #[case::array(json!([4]), json!(null))]
    #[actix_web::test]
    async fn create_coerces_quantity_like_parse_int(
        #[case] quantity: Value,
        #[case] stored: Value,
    ) {
        let dir = TempDir::new().expect("temp dir");
        let app = test::init_service(test_app(seeded_store(&dir))).await;

        let mut body = full_body();
        body["quantity"] = quantity;
        let request = test::TestRequest::post()
            .uri("/requests")
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["data"]["quantity"], stored);

        let saved = saved_document(&dir);
        assert_eq!(saved["requests"][1]["quantity"], stored);
    }

    #[actix_web::test]
    async fn issued_ids_strictly_increase() {
        let dir = TempDir::new().expect("temp dir");
        let app = test::init_service(test_app(seeded_store(&dir))).await;

        let mut ids = Vec::new();
        for _ in 0..3 {
            let request = test::TestRequest::post()
                .uri("/requests")
                .set_json(full_body())
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, request).await;
            ids.push(
                body["data"]["id"]
                    .as_str()
                    .expect("id string")
                    .parse::<i64>()
                    .expect("numeric id"),
            );
        }

        assert!(ids[0] < ids[1] && ids[1] < ids[2], "ids must increase: {ids:?}");
    }

    #[actix_web::test]
    async fn list_requests_returns_stored_records() {
        let dir = TempDir::new().expect("temp dir");
        let app = test::init_service(test_app(seeded_store(&dir))).await;

        let request = test::TestRequest::get().uri("/requests").to_request();
        let requests: Vec<Value> = test::call_and_read_body_json(&app, request).await;

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["id"], json!("1700000000000"));
        assert_eq!(requests[0]["type"], json!("New request"));
    }

    #[actix_web::test]
    async fn update_status_stores_a_new_value() {
        let dir = TempDir::new().expect("temp dir");
        let app = test::init_service(test_app(seeded_store(&dir))).await;

        let request = test::TestRequest::patch()
            .uri("/requests/1700000000000")
            .set_json(json!({ "status": "Approved" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["message"], json!("Request status updated"));
        assert_eq!(body["request"]["status"], json!("Approved"));
        assert_eq!(saved_document(&dir)["requests"][0]["status"], json!("Approved"));
    }

    #[actix_web::test]
    async fn update_status_keeps_an_explicit_null() {
        let dir = TempDir::new().expect("temp dir");
        let app = test::init_service(test_app(seeded_store(&dir))).await;

        let request = test::TestRequest::patch()
            .uri("/requests/1700000000000")
            .set_json(json!({ "status": null }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(
            body["request"].as_object().expect("object").get("status"),
            Some(&Value::Null)
        );
        let stored = &saved_document(&dir)["requests"][0];
        assert_eq!(
            stored.as_object().expect("object").get("status"),
            Some(&Value::Null)
        );

        // The null must survive a reload, not collapse into an absent key.
        let request = test::TestRequest::get().uri("/requests").to_request();
        let listed: Vec<Value> = test::call_and_read_body_json(&app, request).await;
        assert_eq!(
            listed[0].as_object().expect("object").get("status"),
            Some(&Value::Null)
        );
    }

    #[actix_web::test]
    async fn update_status_absent_key_removes_the_field() {
        let dir = TempDir::new().expect("temp dir");
        let app = test::init_service(test_app(seeded_store(&dir))).await;

        let request = test::TestRequest::patch()
            .uri("/requests/1700000000000")
            .set_json(json!({}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert!(
            !body["request"]
                .as_object()
                .expect("object")
                .contains_key("status")
        );
        let stored = &saved_document(&dir)["requests"][0];
        assert!(!stored.as_object().expect("object").contains_key("status"));
    }

    #[actix_web::test]
    async fn update_status_unknown_id_is_not_found() {
        let dir = TempDir::new().expect("temp dir");
        let app = test::init_service(test_app(seeded_store(&dir))).await;
        let before = std::fs::read(dir.path().join("db.json")).expect("read data file");

        let request = test::TestRequest::patch()
            .uri("/requests/42")
            .set_json(json!({ "status": "Approved" }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ "message": "Request not found" }));

        let after = std::fs::read(dir.path().join("db.json")).expect("read data file");
        assert_eq!(before, after);
    }

    /// Record-building rules, tested apart from the endpoint plumbing.
    ///
    /// Kept in a nested module with narrow imports: the parent module pulls
    /// `actix_web::test` into scope, which would otherwise capture the bare
    /// `#[test]` attributes used here.
    mod record_building {
        use rstest::rstest;
        use serde_json::json;

        use super::full_body;
        use super::super::{CreateRequestBody, is_truthy, parse_integer_prefix};

        #[rstest]
        #[case("5", Some(5))]
        #[case("+5", Some(5))]
        #[case(" -12x", Some(-12))]
        #[case("", None)]
        #[case("abc", None)]
        #[case("+-3", None)]
        #[case("9999999999999999999999", None)]
        fn integer_prefix_cases(#[case] text: &str, #[case] parsed: Option<i64>) {
            assert_eq!(parse_integer_prefix(text), parsed);
        }

        #[test]
        fn truthiness_follows_javascript() {
            for falsy in [json!(null), json!(false), json!(0), json!(-0.0), json!("")] {
                assert!(!is_truthy(&falsy), "{falsy} should be falsy");
            }
            for truthy in [json!("0"), json!([]), json!({}), json!(0.5), json!(true)] {
                assert!(is_truthy(&truthy), "{truthy} should be truthy");
            }
        }

        #[test]
        fn rejected_bodies_do_not_mint_an_id() {
            let mut raw = full_body();
            raw.as_object_mut().expect("object body").remove("code");
            let body: CreateRequestBody =
                serde_json::from_value(raw).expect("deserialize body");

            let mut minted = false;
            let record = body.into_record(|| {
                minted = true;
                "1".to_owned()
            });

            assert!(record.is_none());
            assert!(!minted, "no id may be issued for a rejected body");
        }
    }
}
