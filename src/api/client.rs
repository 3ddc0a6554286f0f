use crate::api::Api;
use crate::api::models::{
    BookAppointmentRequest, DeleteResponse, ErrorResponse, LoginRequest, RegisterRequest, UpdateStatusRequest,
};
use crate::config::Config;
use crate::core::errors::MediSlotError;
use crate::core::models::{Appointment, AppointmentStatus, Doctor, User};
use crate::infrastructure::storage::CredentialStore;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// `reqwest` implementation of [`Api`].
///
/// Every request picks up the bearer token from the credential store. A 401
/// on an authenticated endpoint wipes that store before the error is returned,
/// so the next screen the caller renders is the entry screen.
pub struct HttpApi<C: CredentialStore> {
    client: Client,
    base_url: Url,
    credentials: C,
}

impl<C: CredentialStore> HttpApi<C> {
    pub fn new(base_url: &str, timeout: Duration, credentials: C) -> Result<Self, MediSlotError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| MediSlotError::Config(format!("Invalid API base URL `{}`: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(MediSlotError::Config(format!("API base URL `{}` cannot be a base", base_url)));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpApi {
            client,
            base_url,
            credentials,
        })
    }

    pub fn from_config(config: &Config, credentials: C) -> Result<Self, MediSlotError> {
        Self::new(&config.api_base_url, config.request_timeout(), credentials)
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, MediSlotError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MediSlotError::Config(format!("API base URL `{}` cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, MediSlotError> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match self.credentials.token().await {
            Ok(Some(token)) => Ok(builder.bearer_auth(token)),
            Ok(None) => Ok(builder),
            Err(e) => {
                warn!("Sending request without a token, stored credentials unreadable: {}", e);
                Ok(builder)
            }
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        expire_on_unauthorized: bool,
    ) -> Result<T, MediSlotError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED && expire_on_unauthorized {
            warn!("Backend rejected the stored token, clearing credentials");
            self.credentials.clear().await?;
            return Err(MediSlotError::Unauthorized);
        }

        let body = response.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .ok()
                .and_then(ErrorResponse::into_message);
            debug!("Request failed with {}: {:?}", status, message);
            return Err(MediSlotError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &body
        };
        Ok(serde_json::from_slice(body)?)
    }
}

#[async_trait]
impl<C: CredentialStore> Api for HttpApi<C> {
    async fn login(&self, request: &LoginRequest) -> Result<User, MediSlotError> {
        let builder = self.request(Method::POST, &["auth", "login"]).await?.json(request);
        self.execute(builder, false).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, MediSlotError> {
        let builder = self.request(Method::POST, &["auth", "register"]).await?.json(request);
        self.execute(builder, false).await
    }

    async fn get_appointments(&self) -> Result<Vec<Appointment>, MediSlotError> {
        let builder = self.request(Method::GET, &["appointments"]).await?;
        self.execute(builder, true).await
    }

    async fn get_doctors(&self) -> Result<Vec<Doctor>, MediSlotError> {
        let builder = self.request(Method::GET, &["users", "doctors"]).await?;
        self.execute(builder, true).await
    }

    async fn book_appointment(&self, request: &BookAppointmentRequest) -> Result<Appointment, MediSlotError> {
        let builder = self.request(Method::POST, &["appointments"]).await?.json(request);
        self.execute(builder, true).await
    }

    async fn update_status(&self, id: &str, status: AppointmentStatus) -> Result<Appointment, MediSlotError> {
        let builder = self
            .request(Method::PUT, &["appointments", id, "status"])
            .await?
            .json(&UpdateStatusRequest { status });
        self.execute(builder, true).await
    }

    async fn delete_appointment(&self, id: &str) -> Result<DeleteResponse, MediSlotError> {
        let builder = self.request(Method::DELETE, &["appointments", id]).await?;
        self.execute(builder, true).await
    }
}
