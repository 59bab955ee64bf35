use crate::handlers::{
    account_details::__path_account_details, health::__path_health_check, login::__path_login,
    open_account::__path_open_account, register::__path_register, transfer::__path_transfer,
};
use payvault_primitives::error::ApiErrorResponse;
use payvault_primitives::models::dtos::account_dto::{
    AccountDetailResponse, BankAccountDto, OpenAccountResponse,
};
use payvault_primitives::models::dtos::auth_dto::{
    HealthStatus, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserResponse,
};
use payvault_primitives::models::dtos::transfer_dto::{TransferRequest, TransferResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(register, login, open_account, account_details, transfer, health_check),
    components(schemas(
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        UserResponse,
        OpenAccountResponse,
        AccountDetailResponse,
        BankAccountDto,
        TransferRequest,
        TransferResponse,
        HealthStatus,
        ApiErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and session endpoints"),
        (name = "Accounts", description = "Reserved account provisioning and lookup"),
        (name = "Transfers", description = "Outbound disbursements"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
