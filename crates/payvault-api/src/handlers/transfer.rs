use axum::extract::State;
use axum::{Extension, Json};
use payvault_core::services::transfer_service::TransferService;
use payvault_core::{AppState, Claims};
use payvault_primitives::error::{ApiError, ApiErrorResponse};
use payvault_primitives::models::dtos::transfer_dto::{TransferRequest, TransferResponse};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/transfers",
    tag = "Transfers",
    summary = "Initiate an outbound bank transfer",
    description = "Debits the authenticated user's reserved account. The destination account is \
                   validated with the processor on every attempt and the disbursement is submitted \
                   with the resolved account name. A `202` response means the outcome is unknown: \
                   re-query or retry with the `reference` from the response body, never with a \
                   fresh one.",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Disbursement submitted", body = TransferResponse),
        (status = 202, description = "Outcome unknown; retry with the same reference", body = ApiErrorResponse),
        (status = 400, description = "Invalid input", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 404, description = "No reserved account, or recipient could not be resolved", body = ApiErrorResponse),
        (status = 502, description = "Processor confirmed the disbursement failed", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let user_id = claims.user_id()?;

    let res = TransferService::transfer(&state, user_id, req).await?;

    Ok(Json(res))
}
