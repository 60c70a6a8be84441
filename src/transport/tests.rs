use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::broker::Broker;
use crate::persistence::fakes::{FailingStore, MemoryStore};

use super::http::{AppState, build_router};

fn memory_router() -> Router {
    let broker = Arc::new(Broker::new(Arc::new(MemoryStore::new())));
    build_router(AppState { broker })
}

async fn get_uri(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn post_form(router: &Router, path: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_wrong_method_returns_405() {
    let router = memory_router();
    let cases = [
        ("GET", "/send"),
        ("POST", "/pull?sub=s&n=1"),
        ("GET", "/ack"),
        ("GET", "/unsub"),
    ];

    for (method, uri) in cases {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "{method} {uri}"
        );
    }
}

#[tokio::test]
async fn test_send_returns_empty_ok() {
    let router = memory_router();

    let (status, body) = post_form(&router, "/send", "message=foo&message=bar").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_send_without_messages_is_ok() {
    let router = memory_router();

    let (status, body) = post_form(&router, "/send", "").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_pull_responds_with_json() {
    let router = memory_router();

    let request = Request::builder()
        .uri("/pull?sub=s&n=0")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_pull_rejects_bad_query() {
    let router = memory_router();
    for uri in [
        "/pull?sub=ok&n=abc",
        "/pull?sub=ok&n=-1",
        "/pull?sub=ok",
        "/pull?n=3",
        "/pull?sub=not%20valid&n=3",
        "/pull?sub=9lives&n=3",
    ] {
        let (status, _) = get_uri(&router, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "for {uri}");
    }
}

#[tokio::test]
async fn test_pull_bad_count_does_not_create_subscription() {
    let router = memory_router();

    let (status, _) = get_uri(&router, "/pull?sub=keen&n=oops").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Had the failed pull registered "keen", this publish would reach it.
    let (status, _) = post_form(&router, "/send", "message=hello").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_uri(&router, "/pull?sub=keen&n=5").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v, json!({"n_messages": 0, "messages": {}}));
}

#[tokio::test]
async fn test_ack_bad_id_does_not_create_subscription() {
    let router = memory_router();

    let (status, _) = post_form(&router, "/ack", "sub=keen&id=12x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_form(&router, "/send", "message=hello").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_uri(&router, "/pull?sub=keen&n=5").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["n_messages"], json!(0));
}

#[tokio::test]
async fn test_ack_invalid_sub_name_is_400() {
    let router = memory_router();

    let (status, _) = post_form(&router, "/ack", "sub=9lives&id=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsub_without_sub_field_is_400() {
    let router = memory_router();

    let (status, _) = post_form(&router, "/unsub", "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_store_failure_returns_500() {
    let broker = Arc::new(Broker::new(Arc::new(FailingStore::fail_at(0))));
    let router = build_router(AppState { broker });

    let (status, body) = post_form(&router, "/send", "message=x").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_full_cycle_json_shape() {
    let router = memory_router();

    // Create the subscription before publishing, without consuming.
    let (status, body) = get_uri(&router, "/pull?sub=worker&n=0").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v, json!({"n_messages": 0, "messages": {}}));

    let (status, body) = post_form(&router, "/send", "message=a&message=b&message=c").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, body) = get_uri(&router, "/pull?sub=worker&n=2").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v, json!({"n_messages": 2, "messages": {"0": "a", "1": "b"}}));

    let (status, body) = post_form(&router, "/ack", "sub=worker&id=0&id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, body) = get_uri(&router, "/pull?sub=worker&n=10").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v, json!({"n_messages": 1, "messages": {"2": "c"}}));

    let (status, body) = post_form(&router, "/unsub", "sub=worker").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, body) = get_uri(&router, "/pull?sub=worker&n=10").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v, json!({"n_messages": 0, "messages": {}}));
}
