use axum::extract::{Path, State};
use axum::Json;
use payvault_core::services::account_service::AccountService;
use payvault_core::AppState;
use payvault_primitives::error::{ApiError, ApiErrorResponse};
use payvault_primitives::models::dtos::account_dto::AccountDetailResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/accounts/{reference}",
    tag = "Accounts",
    summary = "Fetch reserved account details",
    description = "Resolves the local owner of the reference, fetches the processor's current \
                   view of the reserved account and reconciles it into the local record. A \
                   reference with no local owner is rejected without calling the processor.",
    params(
        ("reference" = String, Path, description = "Reserved account reference"),
    ),
    responses(
        (status = 200, description = "Current account detail", body = AccountDetailResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse),
        (status = 404, description = "Unknown reference, locally or upstream", body = ApiErrorResponse),
        (status = 502, description = "Processor returned an unusable payload", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn account_details(
    State(state): State<Arc<AppState>>,
    Path(reference): Path<String>,
) -> Result<Json<AccountDetailResponse>, ApiError> {
    let detail = AccountService::get_account_details(&state, &reference).await?;

    Ok(Json(detail))
}
