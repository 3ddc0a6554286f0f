use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum MediSlotError {
    /// Server answered 401; stored credentials have been dropped
    #[error("Session expired, please log in again")]
    Unauthorized,

    /// Non-success response; `message` is set only when the body carried one
    #[error("{}", describe_api(.status, .message))]
    Api { status: u16, message: Option<String> },

    /// Request never produced a response
    #[error("{0}")]
    Transport(String),

    #[error("Invalid input for field `{0}`: {desc}", desc = .1.description)]
    InvalidInput(String, FieldError),

    #[error("Slot {time} on {date} is already booked")]
    SlotUnavailable { date: String, time: String },

    #[error("Appointment {0} not found")]
    AppointmentNotFound(String),

    #[error("Not logged in")]
    NotAuthenticated,

    /// Signed in, but the screen belongs to another role
    #[error("{route} is not available for this account, redirected to {redirect}")]
    Forbidden { route: String, redirect: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MediSlotError {
    pub fn invalid(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        MediSlotError::InvalidInput(field.to_string(), FieldError::new(field, title, description))
    }

    /// Message shown to the user; server text when there is one, otherwise `fallback`.
    /// Transport and decoding failures never leak their technical text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            MediSlotError::Api {
                message: Some(message), ..
            } if !message.trim().is_empty() => message.clone(),
            MediSlotError::Api { .. } | MediSlotError::Transport(_) | MediSlotError::Serialization(_) => {
                fallback.to_string()
            }
            other => other.to_string(),
        }
    }
}

fn describe_api(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Request failed with status {}", status),
    }
}

impl From<reqwest::Error> for MediSlotError {
    fn from(err: reqwest::Error) -> Self {
        MediSlotError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for MediSlotError {
    fn from(err: serde_json::Error) -> Self {
        MediSlotError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for MediSlotError {
    fn from(err: std::io::Error) -> Self {
        MediSlotError::Storage(err.to_string())
    }
}
