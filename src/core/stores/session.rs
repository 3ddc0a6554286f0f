use crate::api::Api;
use crate::api::models::{LoginRequest, RegisterRequest};
use crate::core::errors::MediSlotError;
use crate::core::models::User;
use crate::infrastructure::storage::CredentialStore;
use log::{info, warn};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_FAILED: &str = "Register failed";

/// Who is logged in, mirrored from the credential store.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    pub user_info: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionStore {
    /// Picks up the persisted `userInfo`; an unreadable record means no session.
    pub async fn restore<C: CredentialStore>(credentials: &C) -> Self {
        let user_info = match credentials.load().await {
            Ok(user) => user,
            Err(e) => {
                warn!("Ignoring stored session: {}", e);
                None
            }
        };
        SessionStore {
            user_info,
            loading: false,
            error: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user_info.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_info.is_some()
    }

    pub async fn login<A: Api, C: CredentialStore>(
        &mut self,
        api: &A,
        credentials: &C,
        request: &LoginRequest,
    ) -> Result<User, MediSlotError> {
        info!("Logging in {}", request.email);
        self.begin();
        let result = api.login(request).await;
        self.settle(credentials, result, LOGIN_FAILED).await
    }

    /// Registration persists a session only when the backend hands back a token.
    pub async fn register<A: Api, C: CredentialStore>(
        &mut self,
        api: &A,
        credentials: &C,
        request: &RegisterRequest,
    ) -> Result<User, MediSlotError> {
        info!("Registering {} as {}", request.email, request.role);
        self.begin();
        match api.register(request).await {
            Ok(user) if user.bearer_token().is_none() => {
                self.loading = false;
                Ok(user)
            }
            result => self.settle(credentials, result, REGISTER_FAILED).await,
        }
    }

    pub async fn logout<C: CredentialStore>(&mut self, credentials: &C) -> Result<(), MediSlotError> {
        if let Some(user) = &self.user_info {
            info!("Logging out {}", user.email);
        }
        self.user_info = None;
        self.error = None;
        credentials.clear().await
    }

    /// The backend no longer accepts the token.
    pub async fn expire<C: CredentialStore>(&mut self, credentials: &C) -> Result<(), MediSlotError> {
        warn!("Session expired");
        self.user_info = None;
        credentials.clear().await
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    async fn settle<C: CredentialStore>(
        &mut self,
        credentials: &C,
        result: Result<User, MediSlotError>,
        fallback: &str,
    ) -> Result<User, MediSlotError> {
        self.loading = false;
        match result {
            Ok(user) => {
                credentials.save(&user).await?;
                self.user_info = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                self.error = Some(e.user_message(fallback));
                Err(e)
            }
        }
    }
}
