use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, SubsecRound, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use kyc_dashboard::provider::RandomProvider;
use kyc_dashboard::store::{FileKeyValueStore, LocalRecordStore, MemoryKeyValueStore, RecordStore};
use kyc_dashboard::{create_router, AppState, Config};

async fn test_app_with_store(store: Arc<dyn RecordStore>) -> Router {
    let provider = Arc::new(RandomProvider::with_seed(7, Duration::ZERO));
    let state = AppState::with_parts(store, provider, Config::default()).await;
    create_router(state)
}

async fn test_app() -> Router {
    test_app_with_store(Arc::new(LocalRecordStore::new(MemoryKeyValueStore::new()))).await
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn fill_and_submit(app: &Router, name: &str, aadhar: &str) -> Value {
    let (status, _) = send(
        app,
        "PUT",
        "/api/v1/view/form",
        Some(json!({ "name": name, "aadharNumber": aadhar })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, record) = send(app, "POST", "/api/v1/view/submit", None).await;
    assert_eq!(status, StatusCode::CREATED);
    // Distinct millisecond ids
    tokio::time::sleep(Duration::from_millis(2)).await;
    record
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["records"], 0);
}

#[tokio::test]
async fn test_empty_state_is_no_data_not_error() {
    let app = test_app().await;

    let (status, latest) = send(&app, "GET", "/api/v1/results/latest", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest["result"], Value::Null);

    let (status, history) = send(&app, "GET", "/api/v1/history", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["records"], json!([]));

    let (_, dashboard) = send(&app, "GET", "/api/v1/dashboard", None).await;
    assert_eq!(dashboard["stats"], json!({ "total": 0, "verified": 0, "flagged": 0 }));
    assert_eq!(dashboard["recent"], json!([]));
}

#[tokio::test]
async fn test_submit_end_to_end() {
    let app = test_app().await;

    let (_, view) = send(&app, "GET", "/api/v1/view", None).await;
    assert_eq!(view["page"], "dashboard");
    assert_eq!(view["canSubmit"], false);

    let (_, view) = send(&app, "POST", "/api/v1/view/navigate", Some(json!({ "page": "upload" }))).await;
    assert_eq!(view["page"], "upload");

    let (_, view) = send(
        &app,
        "PUT",
        "/api/v1/view/form",
        Some(json!({
            "name": "Asha Rao",
            "aadharNumber": "123456789012",
            "address": "12 MG Road",
            "documentType": "PAN"
        })),
    )
    .await;
    assert_eq!(view["canSubmit"], true);

    let before = Utc::now().trunc_subsecs(3);
    let (status, record) = send(&app, "POST", "/api/v1/view/submit", None).await;
    let after = Utc::now();
    assert_eq!(status, StatusCode::CREATED);

    let (_, history) = send(&app, "GET", "/api/v1/history", None).await;
    let records = history["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    let stored = &records[0];
    assert_eq!(stored, &record);

    assert_eq!(stored["name"], "Asha Rao");
    assert_eq!(stored["aadharNumber"], "123456789012");
    assert_eq!(stored["address"], "12 MG Road");
    assert_eq!(stored["documentType"], "PAN");
    assert!(stored["id"].as_str().unwrap().starts_with("VER"));

    let timestamp: DateTime<Utc> = stored["timestamp"].as_str().unwrap().parse().unwrap();
    assert!(timestamp >= before && timestamp <= after);

    let fraud = stored["fraudProbability"].as_f64().unwrap();
    assert!((0.0..100.0).contains(&fraud));

    let (_, view) = send(&app, "GET", "/api/v1/view", None).await;
    assert_eq!(view["page"], "result");
    assert_eq!(view["loading"], false);

    let (_, latest) = send(&app, "GET", "/api/v1/results/latest", None).await;
    assert_eq!(latest["result"], record);
}

#[tokio::test]
async fn test_submit_rejected_when_form_incomplete() {
    let app = test_app().await;

    send(&app, "PUT", "/api/v1/view/form", Some(json!({ "name": "Asha Rao" }))).await;
    let (status, body) = send(&app, "POST", "/api/v1/view/submit", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (_, history) = send(&app, "GET", "/api/v1/history", None).await;
    assert_eq!(history["total"], 0);
}

#[tokio::test]
async fn test_history_filters() {
    let app = test_app().await;
    for name in ["John Smith", "Asha Rao", "Johnny Walker", "Meera"] {
        fill_and_submit(&app, name, "123456789012").await;
    }

    let (_, all) = send(&app, "GET", "/api/v1/history", None).await;
    let all = all["records"].as_array().unwrap().clone();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0]["name"], "Meera");

    let (status, johns) = send(&app, "GET", "/api/v1/history?search=john&risk=all", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = johns["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Johnny Walker", "John Smith"]);

    let (_, high) = send(&app, "GET", "/api/v1/history?risk=High", None).await;
    let expected: Vec<_> = all.iter().filter(|r| r["riskLevel"] == "High").cloned().collect();
    assert_eq!(high["records"].as_array().unwrap(), &expected);

    // Session filters apply when the query is silent
    send(&app, "PUT", "/api/v1/view/filters", Some(json!({ "searchTerm": "ASHA" }))).await;
    let (_, session) = send(&app, "GET", "/api/v1/history", None).await;
    assert_eq!(session["records"].as_array().unwrap().len(), 1);
    assert_eq!(session["filter"]["searchTerm"], "ASHA");

    let (status, _) = send(&app, "GET", "/api/v1/history?risk=Extreme", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_counts_and_recent() {
    let app = test_app().await;
    for i in 0..6 {
        fill_and_submit(&app, &format!("Customer {}", i), "1234").await;
    }

    let (_, dashboard) = send(&app, "GET", "/api/v1/dashboard", None).await;
    let stats = &dashboard["stats"];
    assert_eq!(stats["total"], 6);
    assert_eq!(
        stats["verified"].as_u64().unwrap() + stats["flagged"].as_u64().unwrap(),
        6
    );

    let recent = dashboard["recent"].as_array().unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0]["name"], "Customer 5");
}

#[tokio::test]
async fn test_get_by_id() {
    let app = test_app().await;
    let record = fill_and_submit(&app, "Asha Rao", "123456789012").await;
    let id = record["id"].as_str().unwrap();

    let (status, found) = send(&app, "GET", &format!("/api/v1/history/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, record);

    let (status, body) = send(&app, "GET", "/api/v1/history/VER0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Verification not found");
}

#[tokio::test]
async fn test_direct_verification() {
    let app = test_app().await;

    let (status, record) = send(
        &app,
        "POST",
        "/api/v1/verifications",
        Some(json!({
            "name": "Ravi Kumar",
            "aadharNumber": "111122223333",
            "address": "4 Park Street",
            "documentType": "UTILITY"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["documentType"], "UTILITY");

    // Visible in history, dashboard session untouched
    let (_, history) = send(&app, "GET", "/api/v1/history", None).await;
    assert_eq!(history["records"][0], record);
    let (_, view) = send(&app, "GET", "/api/v1/view", None).await;
    assert_eq!(view["page"], "dashboard");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/verifications",
        Some(json!({ "name": "", "aadharNumber": "1234567890123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_stub() {
    let app = test_app().await;

    let (status, ack) = send(&app, "POST", "/api/v1/uploads", Some(json!({ "fileName": "batch.csv" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ack["message"],
        "File batch.csv ready for upload. Connect to backend API for processing."
    );

    let (status, _) = send(&app, "POST", "/api/v1/uploads", Some(json!({ "fileName": "scan.pdf" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, history) = send(&app, "GET", "/api/v1/history", None).await;
    assert_eq!(history["total"], 0);
}

#[tokio::test]
async fn test_about() {
    let app = test_app().await;
    let (status, about) = send(&app, "GET", "/api/v1/about", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(about["navigation"].as_array().unwrap().len(), 5);
    assert_eq!(about["navigation"][1], json!({ "id": "upload", "label": "Verify Identity" }));
}

#[tokio::test]
async fn test_history_survives_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();

    let record = {
        let store = Arc::new(LocalRecordStore::new(FileKeyValueStore::open(dir.path()).unwrap()));
        let app = test_app_with_store(store).await;
        fill_and_submit(&app, "Asha Rao", "123456789012").await
    };

    let store = Arc::new(LocalRecordStore::new(FileKeyValueStore::open(dir.path()).unwrap()));
    let app = test_app_with_store(store).await;

    let (_, latest) = send(&app, "GET", "/api/v1/results/latest", None).await;
    assert_eq!(latest["result"], record);
}
