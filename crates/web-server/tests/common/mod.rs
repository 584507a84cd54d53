//! Shared helpers for the HTTP-level tests.
//!
//! Tests marked `#[ignore]` need a running PostgreSQL database.
//! Run with: DATABASE_URL="postgresql:///epirecords" cargo test -p web-server -- --ignored

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use database::DbRepository;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;
use web_server::{AppState, build_router};

const BODY_LIMIT: usize = 1024 * 1024;

/// A router whose pool never connects. Good for requests rejected before any query runs.
pub fn offline_app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/epirecords_unreachable")
        .expect("lazy pool");
    router_for(pool)
}

/// A router backed by a private, freshly created schema.
pub async fn database_app() -> (Router, PgPool) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
    let schema = format!("http_test_{}", Uuid::new_v4().simple());

    let admin = PgPool::connect(&url).await.expect("failed to connect to test database");
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("failed to create test schema");
    admin.close().await;

    let pool = PgPoolOptions::new()
        .max_connections(4)
        .after_connect(move |conn, _meta| {
            let search_path = schema.clone();
            Box::pin(async move {
                let statement = format!("SET search_path TO {search_path}");
                sqlx::query(&statement).execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("failed to connect to test schema");
    database::create_schema(&pool).await.expect("failed to create tables");

    (router_for(pool.clone()), pool)
}

fn router_for(pool: PgPool) -> Router {
    let state = Arc::new(AppState {
        db_repo: DbRepository::new(pool),
    });
    build_router(state, BODY_LIMIT)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn assert_status(response: &Response<Body>, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status for response");
}
