use axum::extract::{Json, State};
use axum::http::StatusCode;
use payvault_core::services::auth_service::RegisterService;
use payvault_core::AppState;
use payvault_primitives::error::{ApiError, ApiErrorResponse};
use payvault_primitives::models::dtos::auth_dto::{RegisterRequest, RegisterResponse};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    summary = "Register a user and provision a reserved bank account",
    description = "Persists a new user, then provisions a reserved (virtual) bank account at the \
                   payment processor keyed by the user's id. If provisioning fails the user record \
                   is kept with no account reference; log in and call `POST /api/accounts` to \
                   retry without re-registering.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered and reserved account provisioned", body = RegisterResponse),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 409, description = "Email already registered", body = ApiErrorResponse),
        (status = 502, description = "Payment processor rejected the request", body = ApiErrorResponse),
        (status = 503, description = "Payment processor unreachable", body = ApiErrorResponse),
    ),
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let payload = payload.normalize();

    payload.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let res = RegisterService::register(&state, payload).await?;

    Ok((StatusCode::CREATED, Json(res)))
}
