//! End-to-end tests of the reqwest transport against a local axum server

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use mt_api_client::{
    AddMtRequest, ClientConfig, ClientError, Credentials, ListMtsOptions,
    MachineTranslationClient, PatchRequest, TranslateRequest,
};

const TOKEN: &str = "testToken";

#[derive(Default)]
struct Seen {
    authorization: Vec<Option<String>>,
    queries: Vec<HashMap<String, String>>,
    bodies: Vec<Value>,
}

type Shared = Arc<Mutex<Seen>>;

async fn remember(seen: &Shared, headers: &HeaderMap) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.lock().await.authorization.push(auth);
}

async fn list(
    State(seen): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    remember(&seen, &headers).await;
    seen.lock().await.queries.push(query);
    Json(json!({
        "data": [{ "data": { "id": 2 } }],
        "pagination": { "offset": 0, "limit": 25 }
    }))
}

async fn create(State(seen): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    remember(&seen, &headers).await;
    seen.lock().await.bodies.push(body);
    Json(json!({ "data": { "id": 2 } }))
}

async fn fetch(
    State(seen): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> (StatusCode, Json<Value>) {
    remember(&seen, &headers).await;
    if id == 2 {
        (StatusCode::OK, Json(json!({ "data": { "id": id } })))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "code": 404, "message": "Machine Translation Not Found" } })),
        )
    }
}

async fn remove(State(seen): State<Shared>, headers: HeaderMap, Path(_id): Path<u64>) -> StatusCode {
    remember(&seen, &headers).await;
    StatusCode::OK
}

async fn patch(
    State(seen): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    remember(&seen, &headers).await;
    let name = body[0]["value"].clone();
    seen.lock().await.bodies.push(body);
    Json(json!({ "data": { "id": id, "name": name } }))
}

async fn translations(
    State(seen): State<Shared>,
    headers: HeaderMap,
    Path(_id): Path<u64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    remember(&seen, &headers).await;
    let lang = body["targetLanguageId"].clone();
    Json(json!({ "data": { "targetLanguageId": lang } }))
}

async fn slow(Path(id): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({ "data": { "id": id } }))
}

async fn spawn_server() -> (String, Shared) {
    let seen: Shared = Arc::new(Mutex::new(Seen::default()));

    let app = Router::new()
        .route("/api/v2/mts", get(list).post(create))
        .route("/api/v2/mts/:id", get(fetch).delete(remove).patch(patch))
        .route("/api/v2/mts/:id/translations", post(translations))
        .route("/slow/mts/:id", get(slow))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/v2", addr), seen)
}

fn client(base_url: &str) -> MachineTranslationClient {
    let config = ClientConfig::new(Credentials::new(TOKEN).with_organization("testOrg"))
        .with_base_url(base_url)
        .with_timeout_ms(5_000);
    MachineTranslationClient::new(config).unwrap()
}

#[tokio::test]
async fn test_full_lifecycle_over_http() {
    let (base_url, seen) = spawn_server().await;
    let api = client(&base_url);

    let mts = api
        .list_mts(&ListMtsOptions::new().group_id(3))
        .await
        .unwrap();
    assert_eq!(mts.data[0].data.id, 2);
    assert_eq!(mts.pagination.limit, 25);

    let created = api
        .create_mt(&AddMtRequest::new("test", "type", json!({ "apiKey": "test" })))
        .await
        .unwrap();
    assert_eq!(created.data.id, 2);

    assert_eq!(api.get_mt(2).await.unwrap().data.id, 2);
    api.delete_mt(2).await.unwrap();

    let updated = api
        .update_mt(2, &[PatchRequest::replace("/name", "test")])
        .await
        .unwrap();
    assert_eq!(updated.data.name.as_deref(), Some("test"));

    let translated = api
        .translate(2, &TranslateRequest::new("us"))
        .await
        .unwrap();
    assert_eq!(translated.data.target_language_id, "us");

    let seen = seen.lock().await;
    assert_eq!(seen.authorization.len(), 6);
    assert!(seen
        .authorization
        .iter()
        .all(|auth| auth.as_deref() == Some("Bearer testToken")));
    assert_eq!(seen.queries[0].get("groupId").map(String::as_str), Some("3"));
    assert_eq!(
        seen.bodies[0],
        json!({ "name": "test", "type": "type", "credentials": { "apiKey": "test" } })
    );
    assert_eq!(
        seen.bodies[1],
        json!([{ "op": "replace", "path": "/name", "value": "test" }])
    );
}

#[tokio::test]
async fn test_not_found_over_http() {
    let (base_url, _seen) = spawn_server().await;
    let api = client(&base_url);

    let err = api.get_mt(404).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "API error: 404 - Machine Translation Not Found"
    );
}

#[tokio::test]
async fn test_unknown_route_is_api_error() {
    let (base_url, _seen) = spawn_server().await;
    let api = client(&format!("{}/missing", base_url));

    let err = api.get_mt(2).await.unwrap_err();
    assert!(matches!(err, ClientError::ApiError { status: 404, .. }));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let (base_url, _seen) = spawn_server().await;
    let slow_url = base_url.replace("/api/v2", "/slow");
    let config = ClientConfig::new(Credentials::new(TOKEN))
        .with_base_url(slow_url)
        .with_timeout_ms(200);
    let api = MachineTranslationClient::new(config).unwrap();

    let err = api.get_mt(2).await.unwrap_err();
    assert!(matches!(err, ClientError::TimeoutError));
}

#[tokio::test]
async fn test_connection_failure_keeps_source() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{}/api/v2", addr));
    let err = api.get_mt(2).await.unwrap_err();

    assert!(matches!(err, ClientError::HttpError(_)));
    assert!(std::error::Error::source(&err).is_some());
}
