//! Integration tests for the HTTP surface.
//!
//! These drive the axum router end to end over the in-memory sheet store
//! and assert on status codes and response bodies.

use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use storewatch_server::config::{RegisterConfig, SheetsConfig};
use storewatch_server::routes;
use storewatch_server::sheets::InMemorySheets;
use storewatch_server::state::AppState;

fn seeded_store() -> InMemorySheets {
    InMemorySheets::new()
        .with_table(
            "VIGILANTES",
            vec![
                vec![json!("ID_TIENDA"), json!("NOMBRE VIGILANTE")],
                vec![json!(1), json!("Carlos Rojas")],
            ],
        )
        .with_table(
            "HFB",
            vec![
                vec![json!("SKU"), json!("ITEM"), json!("FAMILIA")],
                vec![json!("123"), json!("BILLY Bookcase"), json!("Storage")],
            ],
        )
        .with_table(
            "USUARIO WH",
            vec![
                vec![json!("NOMBRE"), json!("USUARIO")],
                vec![json!("Jane Doe"), json!("jdoe1")],
            ],
        )
}

fn test_app(store: InMemorySheets) -> Router {
    let config = RegisterConfig {
        host: "127.0.0.1".parse().expect("valid address"),
        port: 0,
        sheets: SheetsConfig {
            api_base: "https://sheets.invalid".to_owned(),
            spreadsheet_id: "unused".to_owned(),
            api_token: SecretString::from("unused"),
        },
        reference_ttl: Duration::from_secs(3600),
    };
    routes::router(AppState::new(config, store))
}

fn recovery_payload() -> Value {
    json!({
        "form": "recovery",
        "store": "IKEA NQS",
        "date": "2026-01-05",
        "time": "14:05:00",
        "guard_name": "Carlos Rojas",
        "floor": "Piso 1",
        "location": "Antenas",
        "sku": "123",
        "quantity": 1,
        "unit_value": "89900",
    })
}

async fn post_json(app: Router, uri: &str, payload: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds");
    let response = app.oneshot(request).await.expect("handler runs");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds");
    let response = app.oneshot(request).await.expect("handler runs");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_submission_returns_written_row() {
    let store = seeded_store();
    let app = test_app(store.clone());

    let (status, body) = post_json(app, "/api/submissions", &recovery_payload()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sheet"], json!("RECUPERACIONES"));
    assert_eq!(
        body["values"].as_array().map(Vec::len),
        body["columns"].as_array().map(Vec::len)
    );
    assert_eq!(store.appended_count("RECUPERACIONES"), 1);
}

#[tokio::test]
async fn test_submission_validation_maps_to_422() {
    let store = seeded_store();
    let app = test_app(store.clone());

    let mut payload = recovery_payload();
    payload["quantity"] = Value::Null;
    let (status, body) = post_json(app, "/api/submissions", &payload).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = body.as_str().unwrap_or_default();
    assert!(message.contains("quantity"), "message was {message:?}");
    assert_eq!(store.appended_count("RECUPERACIONES"), 0);
}

#[tokio::test]
async fn test_submission_unknown_sku_maps_to_422() {
    let app = test_app(seeded_store());

    let mut payload = recovery_payload();
    payload["sku"] = json!("99999999");
    let (status, _) = post_json(app, "/api/submissions", &payload).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_submission_unavailable_reference_maps_to_503() {
    let store = seeded_store();
    store.set_fail_reads(true);
    let app = test_app(store);

    let (status, _) = post_json(app, "/api/submissions", &recovery_payload()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_stores_listing() {
    let app = test_app(seeded_store());
    let (status, body) = get_json(app, "/api/reference/stores").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], json!("IKEA NQS"));
    assert_eq!(body.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_guards_for_unknown_store_is_404() {
    let app = test_app(seeded_store());
    let (status, _) = get_json(app, "/api/reference/guards/9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_lookup_normalizes_sku() {
    let app = test_app(seeded_store());
    let (status, body) = get_json(app, "/api/reference/catalog/123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sku"], json!("00000123"));
    assert_eq!(body["item"], json!("BILLY Bookcase"));
}

#[tokio::test]
async fn test_sku_listing_is_normalized() {
    let app = test_app(seeded_store());
    let (status, body) = get_json(app, "/api/reference/skus").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["00000123"]));
}

#[tokio::test]
async fn test_warehouse_user_labels() {
    let app = test_app(seeded_store());
    let (status, body) = get_json(app, "/api/reference/users").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0], json!("Jane Doe (jdoe1)"));
}

#[tokio::test]
async fn test_health() {
    let app = test_app(seeded_store());
    let (status, _) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}
