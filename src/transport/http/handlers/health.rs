use crate::transport::http::types::{AppState, HealthResponse, SystemInfo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/v1/healthcheck",
    responses(
        (status = 200, description = "Service is available (DB reachable)", body = HealthResponse),
        (status = 503, description = "Service is unavailable (DB unreachable)", body = HealthResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    let system_info = SystemInfo {
        environment: state.config.environment.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "available".to_string(),
                system_info,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "healthcheck database ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                    system_info,
                }),
            )
        }
    }
}
