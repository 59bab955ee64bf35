use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Failure classes for calls into the payment processor. Each client
/// operation maps malformed bodies and unexpected statuses onto its own
/// variant, so a caller can tell a rejected disbursement from one whose
/// outcome is unknown.
#[derive(Debug)]
pub enum MonnifyError {
    /// Authentication failed or the processor rejected the access token.
    Auth(String),
    /// Reserved account creation was rejected or returned no reference.
    Account(String),
    /// An account or recipient could not be found upstream.
    Lookup(String),
    /// The processor confirmed it did not execute the disbursement.
    Transfer(String),
    /// The disbursement may or may not have executed. The reference must be
    /// reused when re-querying or retrying.
    UnknownOutcome { reference: Uuid },
    /// Transport failure on a call that moves no money.
    Unreachable(String),
}

impl fmt::Display for MonnifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonnifyError::Auth(msg) => write!(f, "Processor authentication error: {}", msg),
            MonnifyError::Account(msg) => write!(f, "Reserved account error: {}", msg),
            MonnifyError::Lookup(msg) => write!(f, "Processor lookup error: {}", msg),
            MonnifyError::Transfer(msg) => write!(f, "Disbursement rejected: {}", msg),
            MonnifyError::UnknownOutcome { reference } => {
                write!(f, "Disbursement {} has an unknown outcome", reference)
            }
            MonnifyError::Unreachable(msg) => write!(f, "Processor unreachable: {}", msg),
        }
    }
}

impl std::error::Error for MonnifyError {}

#[derive(Debug)]
pub enum AuthError {
    MissingHeader,
    InvalidFormat,
    InvalidToken(String),
    InvalidCredentials,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingHeader => write!(f, "Missing Authorization header"),
            AuthError::InvalidFormat => write!(f, "Invalid Authorization header format"),
            AuthError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
        }
    }
}

impl std::error::Error for AuthError {}

#[derive(Debug)]
pub enum ApiError {
    Validation(validator::ValidationErrors),
    Auth(AuthError),
    Token(String),
    NotFound(String),
    Conflict(String),
    Monnify(MonnifyError),
    Reconciliation(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::Auth(e) => write!(f, "Authentication error: {}", e),
            ApiError::Token(e) => write!(f, "Token error: {}", e),
            ApiError::NotFound(e) => write!(f, "Not found: {}", e),
            ApiError::Conflict(e) => write!(f, "Conflict: {}", e),
            ApiError::Monnify(e) => write!(f, "Processor error: {}", e),
            ApiError::Reconciliation(e) => write!(f, "Reconciliation error: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Validation(e) => Some(e),
            ApiError::Auth(e) => Some(e),
            ApiError::Monnify(e) => Some(e),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<MonnifyError> for ApiError {
    fn from(err: MonnifyError) -> Self {
        ApiError::Monnify(err)
    }
}

/// JSON body returned on every error response. `code` is machine-readable;
/// `reference` is present only for unknown-outcome disbursements so the
/// caller can retry with the same idempotency reference.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Uuid>,
}

impl ApiErrorResponse {
    fn new(code: &str, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
            reference: None,
        }
    }
}

impl ApiError {
    pub fn into_parts(self) -> (StatusCode, ApiErrorResponse) {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse::new("validation_failed", format!("Validation error: {}", errors)),
            ),
            ApiError::Auth(e) => {
                let code = match &e {
                    AuthError::InvalidCredentials => "invalid_credentials",
                    _ => "unauthorized",
                };
                (StatusCode::UNAUTHORIZED, ApiErrorResponse::new(code, e.to_string()))
            }
            ApiError::Token(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorResponse::new("token_error", msg),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiErrorResponse::new("not_found", msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ApiErrorResponse::new("conflict", msg)),
            ApiError::Reconciliation(msg) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorResponse::new("reconciliation_failed", msg),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorResponse::new("internal_error", msg),
            ),
            ApiError::Monnify(e) => match e {
                MonnifyError::Auth(msg) => (
                    StatusCode::BAD_GATEWAY,
                    ApiErrorResponse::new("upstream_auth_failed", format!("Processor authentication failed: {}", msg)),
                ),
                MonnifyError::Account(msg) => (
                    StatusCode::BAD_GATEWAY,
                    ApiErrorResponse::new("upstream_account_failed", msg),
                ),
                MonnifyError::Lookup(msg) => (
                    StatusCode::NOT_FOUND,
                    ApiErrorResponse::new("upstream_account_not_found", msg),
                ),
                MonnifyError::Transfer(msg) => (
                    StatusCode::BAD_GATEWAY,
                    ApiErrorResponse::new("upstream_transfer_failed", msg),
                ),
                MonnifyError::Unreachable(msg) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ApiErrorResponse::new("upstream_unreachable", msg),
                ),
                MonnifyError::UnknownOutcome { reference } => (
                    // Not a success and not a confirmed failure: the caller
                    // must re-query or retry with the same reference.
                    StatusCode::ACCEPTED,
                    ApiErrorResponse {
                        code: "transfer_outcome_unknown".to_string(),
                        message: "Transfer outcome is unknown; re-query or retry with the same reference"
                            .to_string(),
                        reference: Some(reference),
                    },
                ),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.into_parts();
        (status, Json(body)).into_response()
    }
}
