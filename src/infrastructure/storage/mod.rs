use crate::core::errors::MediSlotError;
use crate::core::models::User;
use async_trait::async_trait;

/// Key the session record is stored under.
pub const USER_INFO_KEY: &str = "userInfo";

/// Durable home of the `userInfo` record between runs.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> Result<Option<User>, MediSlotError>;
    async fn save(&self, user: &User) -> Result<(), MediSlotError>;
    async fn clear(&self) -> Result<(), MediSlotError>;

    async fn token(&self) -> Result<Option<String>, MediSlotError> {
        Ok(self
            .load()
            .await?
            .and_then(|user| user.bearer_token().map(String::from)))
    }
}

pub mod file;
pub mod in_memory;
