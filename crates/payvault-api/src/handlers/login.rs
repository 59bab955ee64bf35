use axum::extract::{Json, State};
use payvault_core::services::auth_service::LoginService;
use payvault_core::AppState;
use payvault_primitives::error::{ApiError, ApiErrorResponse};
use payvault_primitives::models::dtos::auth_dto::{LoginRequest, LoginResponse};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 401, description = "Invalid email or password", body = ApiErrorResponse),
    ),
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let payload = payload.normalize();

    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let res = LoginService::login(&state, payload).await?;

    Ok(Json(res))
}
