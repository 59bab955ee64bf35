use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::{Argon2, Params};
use secrecy::{ExposeSecret, SecretString};
use tracing::{error, info};

use crate::app_state::AppState;
use crate::security::SecurityConfig;
use crate::services::account_service::AccountService;
use crate::services::audit_service::AuditService;
use payvault_primitives::error::ApiError;
use payvault_primitives::models::dtos::auth_dto::{RegisterRequest, RegisterResponse, UserResponse};
use payvault_primitives::models::user::NewUser;

pub struct RegisterService;

impl RegisterService {
    /// Registration pipeline: persist the user, provision a reserved account
    /// keyed by the user id, then issue a session token. Stages
    /// short-circuit; a provisioning failure leaves the stored record with
    /// no account reference, and the caller retries provisioning without
    /// re-registering.
    pub async fn register(
        state: &AppState,
        payload: RegisterRequest,
    ) -> Result<RegisterResponse, ApiError> {
        let password = SecretString::new(payload.password.into());
        let password_hash = Self::hash_password(&password)?;

        let user = state.users.create(NewUser {
            name: &payload.name,
            email: &payload.email,
            password_hash: &password_hash,
        })?;

        AuditService::log_event(
            Some(user.id),
            "auth.register",
            Some("user"),
            Some(&user.id.to_string()),
            serde_json::json!({ "email": user.email.clone() }),
        );

        let user = AccountService::open_reserved_account(state, user).await?;

        let token = SecurityConfig::create_token(state, &user.id.to_string()).map_err(|_| {
            error!("auth.register: jwt generation failed");
            ApiError::Internal("Authentication service error".into())
        })?;

        let account_reference = user.account_reference.clone().ok_or_else(|| {
            ApiError::Internal("Reserved account reference missing after provisioning".into())
        })?;

        info!(
            user_id = %user.id,
            email = %user.email,
            account_reference = %account_reference,
            "User registered with reserved account"
        );

        Ok(RegisterResponse {
            token,
            user: UserResponse::from(&user),
            account_reference,
        })
    }

    fn hash_password(password: &SecretString) -> Result<String, ApiError> {
        let argon2 = Self::create_argon2()?;
        let salt = SaltString::generate(&mut OsRng);

        argon2
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| {
                error!("auth.register: password hashing failed");
                ApiError::Internal("Credential processing failed".into())
            })
    }

    pub fn create_argon2() -> Result<Argon2<'static>, ApiError> {
        let params = Params::new(
            65536, // 64 MiB memory
            3,     // iterations
            1,     // parallelism
            None,
        )
        .map_err(|e| {
            error!("Argon2 params error: {}", e);
            ApiError::Internal("Encryption configuration error".to_string())
        })?;

        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }
}
