//! REST handlers for the activities and values resources.
//!
//! Routes:
//! - `GET /health`: health check
//! - `GET /api/values`: seeded placeholder values
//! - `GET /api/values/{id}`: stubbed, always returns `"value"`
//! - `GET /api/activities`: all activities ordered by date
//! - `GET /api/activities/{id}`: one activity
//! - `POST /api/activities`: create
//! - `PUT /api/activities/{id}`: wholesale replace
//! - `DELETE /api/activities/{id}`: remove

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::db::{ActivityRepository, ValueRepository};
use crate::models::{Activity, Value};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn activities(&self) -> ActivityRepository {
        ActivityRepository::new(self.pool.clone())
    }

    fn values(&self) -> ValueRepository {
        ValueRepository::new(self.pool.clone())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

type ApiFailure = (StatusCode, Json<ErrorBody>);

fn not_found(id: Uuid) -> ApiFailure {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "not_found",
            message: format!("No activity with id {}", id),
        }),
    )
}

fn database_error(e: sqlx::Error) -> ApiFailure {
    tracing::error!("Database error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "database_error",
            message: "The request could not be completed".to_string(),
        }),
    )
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_values(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiFailure> {
    let values = state.values().list().await.map_err(database_error)?;
    Ok(Json(values))
}

/// Stubbed single-value endpoint; always answers `"value"`.
async fn get_value(Path(_id): Path<i64>) -> &'static str {
    "value"
}

async fn list_activities(
    State(state): State<AppState>,
) -> Result<Json<Vec<Activity>>, ApiFailure> {
    let activities = state.activities().list().await.map_err(database_error)?;
    Ok(Json(activities))
}

async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Activity>, ApiFailure> {
    let activity = state
        .activities()
        .get_by_id(id)
        .await
        .map_err(database_error)?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(activity))
}

async fn create_activity(
    State(state): State<AppState>,
    Json(activity): Json<Activity>,
) -> Result<(StatusCode, Json<Activity>), ApiFailure> {
    let created = state
        .activities()
        .create(&activity)
        .await
        .map_err(database_error)?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mut activity): Json<Activity>,
) -> Result<Json<Activity>, ApiFailure> {
    // The path id wins over whatever the body carries
    activity.id = id;

    match state.activities().update(&activity).await {
        Ok(updated) => Ok(Json(updated)),
        Err(sqlx::Error::RowNotFound) => Err(not_found(id)),
        Err(e) => Err(database_error(e)),
    }
}

async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    let deleted = state
        .activities()
        .delete(id)
        .await
        .map_err(database_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/values", get(list_values))
        .route("/api/values/{id}", get(get_value))
        .route(
            "/api/activities",
            get(list_activities).post(create_activity),
        )
        .route(
            "/api/activities/{id}",
            get(get_activity)
                .put(update_activity)
                .delete(delete_activity),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
