mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{assert_status, json_body, offline_app, send};
use tower::ServiceExt;

#[tokio::test]
async fn health_check_answers_ok() {
    let app = offline_app();
    let response = send(&app, Method::GET, "/api/health", None).await;

    assert_status(&response, StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn missing_column_is_a_bad_request() {
    let app = offline_app();
    let response = send(
        &app,
        Method::POST,
        "/api/countries/",
        Some(r#"{"cname": "Kazakhstan"}"#),
    )
    .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("population"));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = offline_app();
    let response = send(&app, Method::POST, "/api/users/", Some(r#"{"email": "#)).await;

    assert_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_column_type_is_a_bad_request() {
    let app = offline_app();
    let response = send(
        &app,
        Method::POST,
        "/api/disease-types/",
        Some(r#"{"id": "seven", "description": "Virology"}"#),
    )
    .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn body_without_json_content_type_is_a_bad_request() {
    let app = offline_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/patients/")
        .body(Body::from(r#"{"email": "a@b.c"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unparsable_key_segment_is_a_bad_request() {
    let app = offline_app();
    let response = send(
        &app,
        Method::PUT,
        "/api/disease-types/abc",
        Some(r#"{"id": 1, "description": "Virology"}"#),
    )
    .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn composite_key_needs_every_segment() {
    let app = offline_app();
    let response = send(&app, Method::DELETE, "/api/specializations/1", None).await;

    assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_collection_is_not_found() {
    let app = offline_app();
    let response = send(&app, Method::GET, "/api/vaccines/", None).await;

    assert_status(&response, StatusCode::NOT_FOUND);
}
