use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;
use tracing::{error, info};

use crate::app_state::AppState;
use crate::security::SecurityConfig;
use crate::services::audit_service::AuditService;
use payvault_primitives::error::{ApiError, AuthError};
use payvault_primitives::models::dtos::auth_dto::{LoginRequest, LoginResponse, UserResponse};

pub struct LoginService;

impl LoginService {
    pub async fn login(state: &AppState, payload: LoginRequest) -> Result<LoginResponse, ApiError> {
        let user = state
            .users
            .find_by_email(&payload.email)
            .ok_or(ApiError::Auth(AuthError::InvalidCredentials))?;

        let parsed = PasswordHash::new(&user.password_hash).map_err(|_| {
            error!(user_id = %user.id, "Stored credential hash is unreadable");
            ApiError::Internal("Credential verification failed".into())
        })?;

        Argon2::default()
            .verify_password(payload.password.as_bytes(), &parsed)
            .map_err(|_| ApiError::Auth(AuthError::InvalidCredentials))?;

        let token = SecurityConfig::create_token(state, &user.id.to_string())?;

        AuditService::log_event(
            Some(user.id),
            "auth.login",
            Some("user"),
            Some(&user.id.to_string()),
            serde_json::json!({ "email": user.email.clone() }),
        );

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            token,
            user: UserResponse::from(&user),
        })
    }
}
