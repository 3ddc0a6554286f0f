use crate::core::errors::MediSlotError;
use crate::core::models::User;
use crate::infrastructure::storage::CredentialStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    user_info: Arc<RwLock<Option<User>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        InMemoryCredentialStore {
            user_info: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_user(user: User) -> Self {
        InMemoryCredentialStore {
            user_info: Arc::new(RwLock::new(Some(user))),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<User>, MediSlotError> {
        let user_info = self.user_info.read().await;
        Ok(user_info.clone())
    }

    async fn save(&self, user: &User) -> Result<(), MediSlotError> {
        let mut user_info = self.user_info.write().await;
        *user_info = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), MediSlotError> {
        let mut user_info = self.user_info.write().await;
        *user_info = None;
        Ok(())
    }
}
