use payvault_primitives::error::MonnifyError;
use secrecy::SecretString;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Lifetime assumed when the processor omits `expiresIn`.
const DEFAULT_LIFETIME: Duration = Duration::from_secs(300);

/// Tokens stop being used this long before their reported expiry, so a
/// token that is about to lapse is never sent on a slow request.
const EXPIRY_SKEW: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct CachedToken {
    token: SecretString,
    expires_at: Instant,
}

impl CachedToken {
    pub fn new(token: SecretString, expires_in: Option<u64>) -> Self {
        let lifetime = expires_in
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_LIFETIME);

        Self {
            token,
            expires_at: Instant::now() + lifetime.saturating_sub(EXPIRY_SKEW),
        }
    }

    pub fn token(&self) -> SecretString {
        self.token.clone()
    }

    /// An expired token is treated as unusable even before the processor
    /// rejects it.
    pub fn is_usable(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Process-wide cache for the processor access token.
///
/// Two states: unauthenticated (`None`) and authenticated with an expiry.
/// The slot mutex is held across a refresh, so concurrent callers that
/// observe a missing or expired token wait for a single re-authentication
/// instead of each issuing their own.
#[derive(Clone, Default)]
pub struct TokenManager {
    slot: Arc<Mutex<Option<CachedToken>>>,
}

impl TokenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token when it is still usable, otherwise runs
    /// `refresh` and caches its result.
    pub async fn bearer_token<F, Fut>(&self, refresh: F) -> Result<SecretString, MonnifyError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedToken, MonnifyError>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if cached.is_usable() {
                return Ok(cached.token());
            }
        }

        let fresh = refresh().await?;
        let token = fresh.token();
        *slot = Some(fresh);

        Ok(token)
    }

    /// Drops the cached token after an upstream rejection.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}
