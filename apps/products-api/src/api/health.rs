//! Readiness endpoint

use axum::{extract::State, response::Response, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::mongodb::check_health_detailed;
use tracing::debug;

use crate::state::AppState;

/// 200 when MongoDB answers a ping, 503 otherwise
async fn ready(State(state): State<AppState>) -> Response {
    let database: HealthCheckFuture<'_> = Box::pin(async {
        let status = check_health_detailed(&state.mongo_client).await;
        debug!(response_time_ms = status.response_time_ms, "MongoDB ping");
        if status.healthy {
            Ok(())
        } else {
            Err(status.message.unwrap_or_default())
        }
    });

    run_health_checks(vec![("database", database)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
