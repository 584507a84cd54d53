use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use database::{DbError, Table};
use serde::Serialize;
use std::sync::Arc;

// Extractor failures (bad JSON, missing keys, unparsable path segments) become `AppError::BadRequest`.
type Body<E> = WithRejection<Json<E>, AppError>;
type Key<E> = WithRejection<Path<<E as Table>::Key>, AppError>;

/// Body of a successful DELETE.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Names the entity in not-found responses, e.g. "Disease type not found".
fn labeled<E: Table>(err: DbError) -> AppError {
    match err {
        DbError::NotFound => AppError::NotFound(format!("{} not found", E::LABEL)),
        other => AppError::Database(other),
    }
}

/// # GET /api/<plural>/
pub async fn list_rows<E: Table>(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<E>>, AppError> {
    let rows = state.db_repo.list::<E>().await?;
    Ok(Json(rows))
}

/// # GET /api/<plural>/<key...>
pub async fn get_row<E: Table>(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(key), _): Key<E>,
) -> Result<Json<E>, AppError> {
    let row = state.db_repo.find::<E>(&key).await.map_err(labeled::<E>)?;
    Ok(Json(row))
}

/// # POST /api/<plural>/
pub async fn create_row<E: Table>(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(body), _): Body<E>,
) -> Result<(StatusCode, Json<E>), AppError> {
    let created = state.db_repo.create(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// # PUT /api/<plural>/<key...>
/// Replaces every column, key columns included, with the values from the body.
pub async fn replace_row<E: Table>(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(key), _): Key<E>,
    WithRejection(Json(body), _): Body<E>,
) -> Result<Json<E>, AppError> {
    let updated = state
        .db_repo
        .replace(&key, &body)
        .await
        .map_err(labeled::<E>)?;
    Ok(Json(updated))
}

/// # DELETE /api/<plural>/<key...>
pub async fn delete_row<E: Table>(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(key), _): Key<E>,
) -> Result<Json<DeleteResponse>, AppError> {
    state
        .db_repo
        .delete::<E>(&key)
        .await
        .map_err(labeled::<E>)?;
    Ok(Json(DeleteResponse {
        message: format!("{} deleted", E::LABEL),
    }))
}
