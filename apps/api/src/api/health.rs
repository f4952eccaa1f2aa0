//! Readiness endpoint backed by a live database check
//!
//! Liveness (`/health`) comes from `axum_helpers::health_router`; this
//! module only adds `/ready`, which pings PostgreSQL.

use axum::{response::IntoResponse, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::postgres::{check_health, DatabaseConnection};

async fn ready(db: DatabaseConnection) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async { check_health(&db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

pub fn router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(move || ready(db)))
}
