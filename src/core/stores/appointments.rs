use crate::api::Api;
use crate::api::models::BookAppointmentRequest;
use crate::core::errors::MediSlotError;
use crate::core::models::{Appointment, AppointmentStats, AppointmentStatus, Doctor};
use log::{debug, info};

/// Client-side copy of the appointments and doctors the backend returned.
/// Membership stays unique by appointment id.
#[derive(Clone, Debug, Default)]
pub struct AppointmentStore {
    pub appointments: Vec<Appointment>,
    pub doctors: Vec<Doctor>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|appt| appt.id == id)
    }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|doc| doc.id == id)
    }

    pub fn stats(&self) -> AppointmentStats {
        AppointmentStats::from_appointments(&self.appointments)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub async fn fetch_appointments<A: Api>(&mut self, api: &A) -> Result<(), MediSlotError> {
        self.loading = true;
        let result = api.get_appointments().await;
        self.loading = false;
        let appointments = self.record(result)?;
        debug!("Fetched {} appointments", appointments.len());
        self.appointments = appointments;
        Ok(())
    }

    pub async fn fetch_doctors<A: Api>(&mut self, api: &A) -> Result<(), MediSlotError> {
        self.loading = true;
        let result = api.get_doctors().await;
        self.loading = false;
        self.doctors = self.record(result)?;
        Ok(())
    }

    /// Doctors and appointments in one round, as the booking screen needs both.
    pub async fn fetch_booking_data<A: Api>(&mut self, api: &A) -> Result<(), MediSlotError> {
        self.loading = true;
        let result = futures::try_join!(api.get_doctors(), api.get_appointments());
        self.loading = false;
        let (doctors, appointments) = self.record(result)?;
        self.doctors = doctors;
        self.appointments = appointments;
        Ok(())
    }

    pub async fn book<A: Api>(
        &mut self,
        api: &A,
        request: &BookAppointmentRequest,
    ) -> Result<Appointment, MediSlotError> {
        info!("Booking {} {} with doctor {}", request.date, request.time, request.doctor);
        let result = api.book_appointment(request).await;
        let appointment = self.record(result)?;
        self.apply_booked(appointment.clone());
        Ok(appointment)
    }

    pub async fn update_status<A: Api>(
        &mut self,
        api: &A,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment, MediSlotError> {
        info!("Setting appointment {} to {}", id, status);
        let result = api.update_status(id, status).await;
        let appointment = self.record(result)?;
        self.apply_updated(appointment.clone());
        Ok(appointment)
    }

    pub async fn delete<A: Api>(&mut self, api: &A, id: &str) -> Result<(), MediSlotError> {
        info!("Deleting appointment {}", id);
        let result = api.delete_appointment(id).await;
        let response = self.record(result)?;
        self.apply_deleted(response.id.as_deref().unwrap_or(id));
        Ok(())
    }

    pub fn apply_booked(&mut self, appointment: Appointment) {
        match self.appointments.iter_mut().find(|appt| appt.id == appointment.id) {
            Some(existing) => *existing = appointment,
            None => self.appointments.push(appointment),
        }
    }

    /// Replaces the entry with the same id; an unknown id leaves the list alone.
    pub fn apply_updated(&mut self, appointment: Appointment) {
        if let Some(index) = self.appointments.iter().position(|appt| appt.id == appointment.id) {
            self.appointments[index] = appointment;
        }
    }

    pub fn apply_deleted(&mut self, id: &str) {
        self.appointments.retain(|appt| appt.id != id);
    }

    fn record<T>(&mut self, result: Result<T, MediSlotError>) -> Result<T, MediSlotError> {
        match result {
            Ok(value) => {
                self.error = None;
                Ok(value)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
