pub mod client;
pub mod models;

use crate::core::errors::MediSlotError;
use crate::core::models::{Appointment, AppointmentStatus, Doctor, User};
use async_trait::async_trait;
use models::{BookAppointmentRequest, DeleteResponse, LoginRequest, RegisterRequest};

pub use client::HttpApi;

/// The backend's REST surface.
#[async_trait]
pub trait Api: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> Result<User, MediSlotError>;
    /// `POST /auth/register`
    async fn register(&self, request: &RegisterRequest) -> Result<User, MediSlotError>;
    /// `GET /appointments`
    async fn get_appointments(&self) -> Result<Vec<Appointment>, MediSlotError>;
    /// `GET /users/doctors`
    async fn get_doctors(&self) -> Result<Vec<Doctor>, MediSlotError>;
    /// `POST /appointments`
    async fn book_appointment(&self, request: &BookAppointmentRequest) -> Result<Appointment, MediSlotError>;
    /// `PUT /appointments/:id/status`
    async fn update_status(&self, id: &str, status: AppointmentStatus) -> Result<Appointment, MediSlotError>;
    /// `DELETE /appointments/:id`
    async fn delete_appointment(&self, id: &str) -> Result<DeleteResponse, MediSlotError>;
}
