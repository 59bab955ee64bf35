use axum::http::StatusCode;
use axum::Json;
use payvault_primitives::models::dtos::auth_dto::HealthStatus;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthStatus),
    ),
    security(()),
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: StatusCode::OK.to_string(),
        message: "API is healthy".to_string(),
    })
}
