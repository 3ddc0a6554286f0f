pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod screens;

pub use api::{Api, HttpApi};
pub use crate::core::errors::MediSlotError;
pub use crate::core::routing::{Navigation, Route};
pub use crate::core::services::MediSlotService;
pub use infrastructure::notifications::{Notifier, in_memory::InMemoryNotifier, terminal::TerminalNotifier};
pub use infrastructure::storage::{CredentialStore, file::FileCredentialStore, in_memory::InMemoryCredentialStore};

#[cfg(test)]
mod tests; // Include integration tests
