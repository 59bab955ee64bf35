use axum::extract::State;
use axum::{Extension, Json};
use payvault_core::services::account_service::AccountService;
use payvault_core::{AppState, Claims};
use payvault_primitives::error::{ApiError, ApiErrorResponse};
use payvault_primitives::models::dtos::account_dto::OpenAccountResponse;
use payvault_primitives::models::dtos::auth_dto::UserResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/accounts",
    tag = "Accounts",
    summary = "Provision a reserved account for the current user",
    description = "Idempotent: returns the existing account reference when one is already \
                   recorded, otherwise creates the reserved account at the processor and persists \
                   the returned reference. This is the retry path for registrations whose \
                   provisioning step failed.",
    responses(
        (status = 200, description = "Reserved account available", body = OpenAccountResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 502, description = "Payment processor rejected the request", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn open_account(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<OpenAccountResponse>, ApiError> {
    let user_id = claims.user_id()?;

    let user = state
        .users
        .find_by_id(user_id)
        .ok_or_else(|| ApiError::NotFound("User no longer exists".into()))?;

    let user = AccountService::open_reserved_account(&state, user).await?;

    let account_reference = user.account_reference.clone().ok_or_else(|| {
        ApiError::Internal("Reserved account reference missing after provisioning".into())
    })?;

    Ok(Json(OpenAccountResponse {
        account_reference,
        user: UserResponse::from(&user),
    }))
}
