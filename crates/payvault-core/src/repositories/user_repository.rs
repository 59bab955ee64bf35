use chrono::Utc;
use dashmap::DashMap;
use payvault_primitives::error::ApiError;
use payvault_primitives::models::user::{NewUser, User};
use std::sync::Arc;
use uuid::Uuid;

/// In-memory document store for user records.
///
/// Persistence is a findOne/save collaborator of the orchestration core;
/// this implementation keeps records in a concurrent map and a durable
/// document store slots in behind the same operations.
#[derive(Clone, Default)]
pub struct UserStore {
    users: Arc<DashMap<Uuid, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, new_user: NewUser<'_>) -> Result<User, ApiError> {
        if self.find_by_email(new_user.email).is_some() {
            return Err(ApiError::Conflict("Email already registered".into()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name.to_string(),
            email: new_user.email.to_string(),
            password_hash: new_user.password_hash.to_string(),
            account_reference: None,
            contract_code: None,
            account_name: None,
            currency_code: None,
            bank_code: None,
            bank_name: None,
            account_number: None,
            created_at: now,
            updated_at: now,
        };

        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).map(|entry| entry.clone())
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.clone())
    }

    pub fn find_by_account_reference(&self, reference: &str) -> Option<User> {
        self.users
            .iter()
            .find(|entry| entry.account_reference.as_deref() == Some(reference))
            .map(|entry| entry.clone())
    }

    /// Persists an updated record. The record must already exist.
    pub fn save(&self, user: User) -> Result<User, ApiError> {
        match self.users.get_mut(&user.id) {
            Some(mut entry) => {
                *entry = user.clone();
                Ok(user)
            }
            None => Err(ApiError::NotFound(format!("User {} does not exist", user.id))),
        }
    }
}
