use crate::core::errors::MediSlotError;
use crate::core::models::User;
use crate::infrastructure::storage::{CredentialStore, USER_INFO_KEY};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// On-disk layout: `{ "userInfo": { ...user } }`.
#[derive(Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(rename = "userInfo")]
    user_info: User,
}

#[derive(Clone, Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<User>, MediSlotError> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredCredentials = serde_json::from_slice(&raw).map_err(|e| {
            MediSlotError::Storage(format!("Corrupt {} in {}: {}", USER_INFO_KEY, self.path.display(), e))
        })?;
        Ok(Some(stored.user_info))
    }

    async fn save(&self, user: &User) -> Result<(), MediSlotError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(&StoredCredentials {
            user_info: user.clone(),
        })?;
        fs::write(&self.path, body).await?;
        debug!("Saved {} to {}", USER_INFO_KEY, self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), MediSlotError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Removed {} at {}", USER_INFO_KEY, self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
