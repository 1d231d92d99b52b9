//! End-to-end tests for the subscription HTTP API.
//!
//! The full application router runs against the in-memory repository, so
//! these exercise routing, DTO mapping, handler validation and error
//! mapping together.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use online_subs::adapters::http::{app_router, SubscriptionHandlers};
use online_subs::adapters::InMemorySubscriptionRepository;
use online_subs::config::ServerConfig;

// ════════════════════════════════════════════════════════════════════════════
// Test infrastructure
// ════════════════════════════════════════════════════════════════════════════

struct TestApp {
    router: Router,
    repository: Arc<InMemorySubscriptionRepository>,
}

impl TestApp {
    fn new() -> Self {
        let repository = Arc::new(InMemorySubscriptionRepository::new());
        let router = app_router(
            SubscriptionHandlers::new(repository.clone()),
            &ServerConfig::default(),
        );
        Self { router, repository }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn create(&self, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, "/subscriptions", Some(body)).await
    }
}

fn netflix_u1() -> Value {
    json!({
        "service_name": "Netflix",
        "price": 999,
        "user_id": "u1",
        "start_date": "01-2024",
        "end_date": ""
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Create / get
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn created_subscription_round_trips_through_get() {
    let app = TestApp::new();

    let (status, body) = app.create(netflix_u1()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "status": "created" }));

    let (status, body) = app.send(Method::GET, "/subscriptions/u1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "service_name": "Netflix",
            "price": 999,
            "user_id": "u1",
            "start_date": "01-2024"
        })
    );
}

#[tokio::test]
async fn end_date_is_returned_in_input_format() {
    let app = TestApp::new();

    app.create(json!({
        "service_name": "Spotify",
        "price": 199,
        "user_id": "u2",
        "start_date": "03-2024",
        "end_date": "09-2024"
    }))
    .await;

    let (_, body) = app.send(Method::GET, "/subscriptions/u2", None).await;
    assert_eq!(body["start_date"], "03-2024");
    assert_eq!(body["end_date"], "09-2024");
}

#[tokio::test]
async fn inverted_range_is_rejected_without_writing() {
    let app = TestApp::new();

    let (status, body) = app
        .create(json!({
            "service_name": "Netflix",
            "price": 999,
            "user_id": "u1",
            "start_date": "06-2024",
            "end_date": "01-2024"
        }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(app.repository.rows().await.is_empty());
}

#[tokio::test]
async fn malformed_start_date_is_a_client_error() {
    let app = TestApp::new();

    let (status, _) = app
        .create(json!({
            "service_name": "Netflix",
            "price": 999,
            "user_id": "u1",
            "start_date": "2024-01"
        }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_for_unknown_user_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/subscriptions/ghost", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// ════════════════════════════════════════════════════════════════════════════
// Filter
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn filter_applies_every_given_criterion() {
    let app = TestApp::new();
    app.create(netflix_u1()).await;
    app.create(json!({
        "service_name": "Netflix",
        "price": 1299,
        "user_id": "u2",
        "start_date": "02-2024",
        "end_date": "12-2024"
    }))
    .await;
    app.create(json!({
        "service_name": "Spotify",
        "price": 199,
        "user_id": "u2",
        "start_date": "02-2024"
    }))
    .await;

    let (status, body) = app
        .send(
            Method::POST,
            "/subscriptions/filter",
            Some(json!({ "service_name": "Netflix", "price": 1000 })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], "u2");
}

#[tokio::test]
async fn filter_with_zero_price_and_empty_strings_is_unfiltered() {
    let app = TestApp::new();
    app.create(netflix_u1()).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/subscriptions/filter",
            Some(json!({
                "user_id": "",
                "price": 0,
                "service_name": "",
                "start_date": "",
                "end_date": ""
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn filter_without_matches_is_not_found() {
    let app = TestApp::new();
    app.create(netflix_u1()).await;

    let (status, _) = app
        .send(
            Method::POST,
            "/subscriptions/filter",
            Some(json!({ "service_name": "Hulu" })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn filter_with_inverted_period_is_rejected() {
    let app = TestApp::new();
    app.create(netflix_u1()).await;

    let (status, _) = app
        .send(
            Method::POST,
            "/subscriptions/filter",
            Some(json!({ "start_date": "12-2024", "end_date": "01-2024" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ════════════════════════════════════════════════════════════════════════════
// Update / delete
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn update_changes_only_given_fields() {
    let app = TestApp::new();
    app.create(netflix_u1()).await;

    let (status, body) = app
        .send(
            Method::PUT,
            "/subscriptions/u1",
            Some(json!({ "price": 1099, "end_date": "12-2024" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "updated" }));

    let (_, body) = app.send(Method::GET, "/subscriptions/u1", None).await;
    assert_eq!(body["service_name"], "Netflix");
    assert_eq!(body["price"], 1099);
    assert_eq!(body["start_date"], "01-2024");
    assert_eq!(body["end_date"], "12-2024");
}

#[tokio::test]
async fn update_can_set_price_to_zero() {
    let app = TestApp::new();
    app.create(netflix_u1()).await;

    let (status, _) = app
        .send(Method::PUT, "/subscriptions/u1", Some(json!({ "price": 0 })))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.send(Method::GET, "/subscriptions/u1", None).await;
    assert_eq!(body["price"], 0);
}

#[tokio::test]
async fn empty_update_succeeds_without_changes() {
    let app = TestApp::new();
    app.create(netflix_u1()).await;
    let before = app.repository.rows().await;

    let (status, _) = app
        .send(Method::PUT, "/subscriptions/u1", Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.repository.rows().await, before);
}

#[tokio::test]
async fn update_for_unknown_user_is_a_server_error() {
    let app = TestApp::new();
    app.create(netflix_u1()).await;

    let (status, body) = app
        .send(
            Method::PUT,
            "/subscriptions/ghost",
            Some(json!({ "service_name": "Hulu" })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "NO_ROWS_AFFECTED");
    assert_eq!(body["details"]["user_id"], "ghost");

    let (_, body) = app.send(Method::GET, "/subscriptions/u1", None).await;
    assert_eq!(body["service_name"], "Netflix");
}

#[tokio::test]
async fn delete_removes_every_subscription_of_the_user() {
    let app = TestApp::new();
    app.create(netflix_u1()).await;
    app.create(json!({
        "service_name": "Spotify",
        "price": 199,
        "user_id": "u1",
        "start_date": "02-2024"
    }))
    .await;

    let (status, body) = app.send(Method::DELETE, "/subscriptions/u1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "deleted" }));

    let (status, _) = app.send(Method::GET, "/subscriptions/u1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_for_unknown_user_is_a_server_error() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::DELETE, "/subscriptions/ghost", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "NO_ROWS_AFFECTED");
    assert_eq!(body["details"]["user_id"], "ghost");
}

#[tokio::test]
async fn delete_with_blank_user_id_is_a_server_error() {
    let app = TestApp::new();
    app.create(netflix_u1()).await;

    let (status, _) = app.send(Method::DELETE, "/subscriptions/%20", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.repository.rows().await.len(), 1);
}

// ════════════════════════════════════════════════════════════════════════════
// Sum
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn sum_with_empty_dates_covers_all_of_a_users_subscriptions() {
    let app = TestApp::new();
    app.create(netflix_u1()).await;
    app.create(json!({
        "service_name": "Spotify",
        "price": 199,
        "user_id": "u1",
        "start_date": "03-2023",
        "end_date": "06-2023"
    }))
    .await;
    app.create(json!({
        "service_name": "Hulu",
        "price": 500,
        "user_id": "u2",
        "start_date": "01-2024"
    }))
    .await;

    let (status, body) = app
        .send(
            Method::POST,
            "/subscriptions/sum",
            Some(json!({ "user_id": "u1", "start_date": "", "end_date": "" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "total": 999 + 199 }));
}

#[tokio::test]
async fn sum_without_matches_is_zero() {
    let app = TestApp::new();
    app.create(netflix_u1()).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/subscriptions/sum",
            Some(json!({ "user_id": "ghost" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn sum_with_malformed_date_is_a_client_error() {
    let app = TestApp::new();

    let (status, _) = app
        .send(
            Method::POST,
            "/subscriptions/sum",
            Some(json!({ "start_date": "13-2024" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_check_answers_ok() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
