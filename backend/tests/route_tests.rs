//! HTTP route tests
//!
//! Requests go through the full router with the real model client and no API
//! key, so model-backed routes fail at the model call and every other route
//! is served from static data.

use agripredict_backend::{create_app, AppState, Config};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_app(AppState::new(Config::default()).unwrap())
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn multipart_body(boundary: &str, parts: &[(&str, Option<(&str, &str)>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        match file {
            Some((file_name, mime)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime).as_bytes());
            }
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}

async fn post_multipart(
    uri: &str,
    parts: &[(&str, Option<(&str, &str)>, &[u8])],
) -> (StatusCode, Value) {
    let boundary = "agripredict-test-boundary";
    send(
        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(multipart_body(boundary, parts)))
            .unwrap(),
    )
    .await
}

// ============================================================================
// Static routes
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["ai"], "missing_api_key");
}

#[tokio::test]
async fn test_weather_localized() {
    let (status, body) = get("/api/v1/weather/mumbai?lang=hi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Mumbai");
    assert_eq!(body["condition"]["kind"], "rain");
    assert_eq!(body["humidityPercent"], 85);
    assert_eq!(body["forecast"].as_array().unwrap().len(), 7);
    assert_ne!(body["city"], "Mumbai");
}

#[tokio::test]
async fn test_weather_unknown_location() {
    let (status, body) = get("/api/v1/weather/pune").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message_key"], "errors.notFound");
}

#[tokio::test]
async fn test_unsupported_language() {
    let (status, _) = get("/api/v1/weather/delhi?lang=fr").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_nearest_location() {
    let (status, body) = get("/api/v1/locations/nearest?latitude=18.5204&longitude=73.8567").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Mumbai");
    assert_eq!(body["title"], "Location Updated");
    assert_eq!(body["description"], "Your location has been set to Mumbai.");
}

#[tokio::test]
async fn test_nearest_location_out_of_range() {
    let (status, _) = get("/api/v1/locations/nearest?latitude=123&longitude=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_market_prices_filtered() {
    let (status, body) = get("/api/v1/market/prices?crop=Wheat&search=punjab").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["mandi"], "Khanna, Punjab");
    assert_eq!(rows[0]["isHighest"], true);
}

#[tokio::test]
async fn test_market_prices_all() {
    let (status, body) = get("/api/v1/market/prices?crop=all").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows.iter().filter(|r| r["isHighest"] == true).count(), 4);
}

#[tokio::test]
async fn test_market_snapshot() {
    let (status, body) = get("/api/v1/market/snapshot").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["crop"], "Rice");
}

#[tokio::test]
async fn test_market_trends() {
    let (status, body) = get("/api/v1/market/trends").await;
    assert_eq!(status, StatusCode::OK);
    let points = body.as_array().unwrap();
    assert_eq!(points.len(), 7);
    assert_eq!(points[0]["label"], "7 days ago");
    assert_eq!(points[6]["label"], "Today");
}

#[tokio::test]
async fn test_catalog() {
    let (status, body) = get("/api/v1/i18n/mr").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "mr");
    assert_eq!(body["fallback"], "en");
    assert!(body["entries"]["nav.dashboard"].is_string());

    let (status, _) = get("/api/v1/i18n/fr").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_notifications() {
    let (status, body) = get("/api/v1/notifications").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unreadCount"], 2);
    let items = body["notifications"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1]["type"], "price");
    assert_eq!(items[1]["title"], "Price Alert: Wheat");
    assert!(items[1]["timeAgo"].as_str().unwrap().ends_with("ago"));
}

// ============================================================================
// Model-backed routes
// ============================================================================

#[tokio::test]
async fn test_profit_estimation_validation() {
    let (status, body) = post_json(
        "/api/v1/ai/profit-estimation",
        json!({
            "cropType": "",
            "productionCostPerUnit": -10,
            "expectedYield": 50,
            "currentMarketData": "short"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let fields = &body["error"]["fields"];
    assert_eq!(fields["cropType"], "Crop type is required.");
    assert_eq!(fields["productionCostPerUnit"], "Cost must be a positive number.");
    assert_eq!(
        fields["currentMarketData"],
        "Please provide some details about the market."
    );
    assert!(fields.get("expectedYield").is_none());
}

#[tokio::test]
async fn test_profit_estimation_model_failure_is_generic() {
    let (status, body) = post_json(
        "/api/v1/ai/profit-estimation?lang=hi",
        json!({
            "cropType": "Wheat",
            "productionCostPerUnit": 1500,
            "expectedYield": 50,
            "currentMarketData": "Prices are steady with good demand"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["message_key"], "errors.estimationFailed");
    assert_eq!(
        body["error"]["message"],
        "An error occurred while estimating profit. Please try again."
    );
}

#[tokio::test]
async fn test_disease_detection_json_invalid_photo() {
    let (status, body) = post_json(
        "/api/v1/ai/disease-detection",
        json!({
            "photoDataUri": "not a data uri",
            "language": "English"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["photoDataUri"].is_string());
}

#[tokio::test]
async fn test_disease_detection_model_failure() {
    let (status, body) = post_json(
        "/api/v1/ai/disease-detection",
        json!({
            "photoDataUri": "data:image/png;base64,aGVsbG8=",
            "language": "Marathi"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["message_key"], "errors.analysisFailed");
}

#[tokio::test]
async fn test_upload_requires_image() {
    let (status, body) = post_multipart(
        "/api/v1/ai/disease-detection/upload",
        &[("description", None, b"spots on leaves")],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["fields"]["images"], "Leaf image is required.");
}

#[tokio::test]
async fn test_upload_with_image_reaches_model() {
    let (status, body) = post_multipart(
        "/api/v1/ai/disease-detection/upload?lang=hi",
        &[
            ("image", Some(("leaf.jpg", "image/jpeg")), b"\xff\xd8\xff\xe0leaf"),
            ("description", None, b"spots on leaves"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["message_key"], "errors.analysisFailed");
}

#[tokio::test]
async fn test_upload_rejects_non_image_file() {
    let (status, body) = post_multipart(
        "/api/v1/ai/disease-detection/upload",
        &[("image", Some(("notes.txt", "text/plain")), b"hello")],
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["fields"]["images"], "Please upload an image file.");
    assert!(body["error"]["fields"].get("photoDataUri").is_none());
}

#[tokio::test]
async fn test_upload_without_content_type_is_not_an_image() {
    let boundary = "agripredict-test-boundary";
    let mut payload = Vec::new();
    payload.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    payload.extend_from_slice(
        b"Content-Disposition: form-data; name=\"image\"; filename=\"leaf\"\r\n\r\n",
    );
    payload.extend_from_slice(b"\xff\xd8\xff\xe0leaf\r\n");
    payload.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    let (status, body) = send(
        Request::post("/api/v1/ai/disease-detection/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(payload))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["fields"]["images"],
        "Please upload an image file."
    );
}

#[tokio::test]
async fn test_upload_requires_multipart_body() {
    let (status, body) = post_json("/api/v1/ai/disease-detection/upload", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message_key"], "errors.readImageFailed");
}

// ============================================================================
// Unreadable requests
// ============================================================================

#[tokio::test]
async fn test_profit_estimation_missing_numbers_are_field_errors() {
    let (status, body) = post_json(
        "/api/v1/ai/profit-estimation",
        json!({
            "cropType": "Wheat",
            "expectedYield": "",
            "currentMarketData": "Prices are steady with good demand"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let fields = &body["error"]["fields"];
    assert_eq!(fields["productionCostPerUnit"], "Cost must be a positive number.");
    assert_eq!(fields["expectedYield"], "Yield must be a positive number.");
    assert!(fields.get("cropType").is_none());
}

#[tokio::test]
async fn test_malformed_json_uses_error_body() {
    let (status, body) = send(
        Request::post("/api/v1/ai/profit-estimation")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"cropType\": "))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["message_key"], "errors.invalidRequest");
}

#[tokio::test]
async fn test_missing_content_type_uses_error_body() {
    let (status, body) = send(
        Request::post("/api/v1/ai/disease-detection")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message_key"], "errors.invalidRequest");
}

#[tokio::test]
async fn test_missing_coordinates_use_error_body() {
    let (status, body) = get("/api/v1/locations/nearest?latitude=18.5").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["message_key"], "errors.invalidRequest");
}
