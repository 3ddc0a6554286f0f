use crate::api::Api;
use crate::auth::jwt::TokenInspector;
use crate::core::errors::MediSlotError;
use crate::core::forms::{BookingForm, LoginForm, ProfileForm, RegisterForm};
use crate::core::models::{Appointment, AppointmentStatus, User};
use crate::core::routing::{self, Route};
use crate::core::stores::session::LOGIN_FAILED;
use crate::core::stores::{AppointmentStore, SessionStore};
use crate::infrastructure::notifications::{Notification, Notifier};
use crate::infrastructure::storage::CredentialStore;
use log::{debug, info, warn};

pub const BOOKED: &str = "Appointment booked successfully";
pub const BOOKING_FAILED: &str = "Booking failed";
pub const CANCELLED: &str = "Appointment cancelled";
pub const CANCEL_FAILED: &str = "Cancel failed";
pub const DELETED: &str = "Appointment deleted";
pub const ACCOUNT_CREATED: &str = "Account created successfully";
pub const LOGIN_SUCCESSFUL: &str = "Login Successful";
pub const BAD_CREDENTIALS: &str = "Incorrect email or password";
pub const FILL_ALL_FIELDS: &str = "Please fill all fields";
pub const PROFILE_UPDATED: &str = "Profile updated successfully";
pub const LOGGED_OUT: &str = "Logged out";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const LOAD_FAILED: &str = "Failed to load appointments";

/// Front controller: every user action goes through here, one at a time.
/// Screens read the stores; only this type writes them.
pub struct MediSlotService<A: Api, C: CredentialStore, N: Notifier> {
    api: A,
    credentials: C,
    notifier: N,
    session: SessionStore,
    appointments: AppointmentStore,
    route: Route,
}

impl<A: Api, C: CredentialStore, N: Notifier> MediSlotService<A, C, N> {
    pub fn new(api: A, credentials: C, notifier: N) -> Self {
        MediSlotService {
            api,
            credentials,
            notifier,
            session: SessionStore::default(),
            appointments: AppointmentStore::new(),
            route: Route::Entry,
        }
    }

    /// Restores the persisted session and drops it if its token has already expired.
    pub async fn start(api: A, credentials: C, notifier: N) -> Result<Self, MediSlotError> {
        let mut service = Self::new(api, credentials, notifier);
        service.session = SessionStore::restore(&service.credentials).await;

        let expired = service
            .session
            .user()
            .and_then(User::bearer_token)
            .is_some_and(|token| TokenInspector::new().is_expired(token));
        if expired {
            service.session.expire(&service.credentials).await?;
            service.notifier.warning(&MediSlotError::Unauthorized.to_string()).await?;
        }

        service.route = routing::navigate(service.session.user(), Route::Entry);
        info!("Session restored, landing on {}", service.route);
        Ok(service)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn appointments(&self) -> &AppointmentStore {
        &self.appointments
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub async fn notifications(&self) -> Result<Vec<Notification>, MediSlotError> {
        self.notifier.history().await
    }

    // SESSION

    pub async fn login(&mut self, form: &LoginForm) -> Result<Route, MediSlotError> {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => return self.reject(e).await,
        };
        match self.session.login(&self.api, &self.credentials, &request).await {
            Ok(_) => {
                self.notifier.success(LOGIN_SUCCESSFUL).await?;
                self.route = routing::navigate(self.session.user(), Route::Entry);
                Ok(self.route)
            }
            Err(e) => {
                let message = match &e {
                    MediSlotError::Api { status: 400 | 401, .. } => BAD_CREDENTIALS.to_string(),
                    other => other.user_message(LOGIN_FAILED),
                };
                self.notifier.error(&message).await?;
                Err(e)
            }
        }
    }

    /// Without a token in the response the user lands back on the login form.
    pub async fn register(&mut self, form: &RegisterForm) -> Result<Route, MediSlotError> {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => return self.reject(e).await,
        };
        match self.session.register(&self.api, &self.credentials, &request).await {
            Ok(_) => {
                self.notifier.success(ACCOUNT_CREATED).await?;
                self.route = routing::navigate(self.session.user(), Route::Entry);
                Ok(self.route)
            }
            Err(e) => self.fail(e, REGISTRATION_FAILED).await,
        }
    }

    pub async fn logout(&mut self) -> Result<Route, MediSlotError> {
        self.session.logout(&self.credentials).await?;
        self.appointments.clear();
        self.route = Route::Entry;
        self.notifier.success(LOGGED_OUT).await?;
        Ok(self.route)
    }

    // SCREENS

    /// Applies the route guard, then loads whatever the landing screen shows.
    pub async fn visit(&mut self, route: Route) -> Result<Route, MediSlotError> {
        let target = routing::navigate(self.session.user(), route);
        if target != route {
            debug!("{} is not available, showing {}", route, target);
        }
        self.route = target;

        let loaded = match target {
            Route::Dashboard | Route::Appointments | Route::Doctor => {
                self.appointments.fetch_appointments(&self.api).await
            }
            Route::Book => self.appointments.fetch_booking_data(&self.api).await,
            Route::Entry | Route::Profile => Ok(()),
        };
        match loaded {
            Ok(()) => Ok(self.route),
            Err(e) => self.fail(e, LOAD_FAILED).await,
        }
    }

    pub async fn book(&mut self, form: &BookingForm) -> Result<Appointment, MediSlotError> {
        self.ensure(Route::Book)?;
        let request = match form.validate(&self.appointments.appointments) {
            Ok(request) => request,
            Err(e) => return self.reject(e).await,
        };
        let appointment = match self.appointments.book(&self.api, &request).await {
            Ok(appointment) => appointment,
            Err(e) => return self.fail(e, BOOKING_FAILED).await,
        };
        self.notifier.success(BOOKED).await?;
        self.refresh().await?;
        Ok(appointment)
    }

    /// Patients may only cancel appointments that are still pending.
    pub async fn cancel(&mut self, id: &str) -> Result<(), MediSlotError> {
        self.ensure(Route::Appointments)?;
        if let Some(appt) = self.appointments.find(id) {
            if !appt.is_pending() {
                let e = MediSlotError::invalid(
                    "status",
                    "Cannot cancel",
                    format!("appointment is already {}", appt.status),
                );
                return self.reject(e).await;
            }
        }
        if let Err(e) = self.appointments.delete(&self.api, id).await {
            return self.fail(e, CANCEL_FAILED).await;
        }
        self.notifier.success(CANCELLED).await?;
        self.refresh().await?;
        Ok(())
    }

    pub async fn set_status(&mut self, id: &str, status: AppointmentStatus) -> Result<Appointment, MediSlotError> {
        self.ensure(Route::Doctor)?;
        match self.appointments.update_status(&self.api, id, status).await {
            Ok(appointment) => {
                self.notifier.success(&format!("Appointment {}", status)).await?;
                Ok(appointment)
            }
            Err(e) => self.fail(e, "Status update failed").await,
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), MediSlotError> {
        self.ensure(Route::Doctor)?;
        match self.appointments.delete(&self.api, id).await {
            Ok(()) => {
                self.notifier.success(DELETED).await?;
                Ok(())
            }
            Err(e) => self.fail(e, "Delete failed").await,
        }
    }

    pub fn details(&self, id: &str) -> Result<&Appointment, MediSlotError> {
        if !self.session.is_authenticated() {
            return Err(MediSlotError::NotAuthenticated);
        }
        self.appointments
            .find(id)
            .ok_or_else(|| MediSlotError::AppointmentNotFound(id.to_string()))
    }

    /// No profile endpoint exists; a valid form is acknowledged locally.
    pub async fn save_profile(&mut self, form: &ProfileForm) -> Result<(), MediSlotError> {
        self.ensure(Route::Profile)?;
        if let Err(e) = form.validate() {
            return self.reject(e).await;
        }
        self.notifier.success(PROFILE_UPDATED).await?;
        Ok(())
    }

    // HELPERS

    /// Moves to `route` if the guard allows it, otherwise to where it redirects.
    fn ensure(&mut self, route: Route) -> Result<(), MediSlotError> {
        let target = routing::navigate(self.session.user(), route);
        self.route = target;
        if target == route {
            return Ok(());
        }
        if self.session.is_authenticated() {
            Err(MediSlotError::Forbidden {
                route: route.path().to_string(),
                redirect: target.path().to_string(),
            })
        } else {
            Err(MediSlotError::NotAuthenticated)
        }
    }

    /// The action already went through; a failed reload is reported, not returned.
    async fn refresh(&mut self) -> Result<(), MediSlotError> {
        if let Err(e) = self.appointments.fetch_appointments(&self.api).await {
            warn!("Could not refresh appointments: {}", e);
            self.report(&e, LOAD_FAILED).await?;
        }
        Ok(())
    }

    async fn reject<T>(&mut self, e: MediSlotError) -> Result<T, MediSlotError> {
        let message = match &e {
            MediSlotError::InvalidInput(_, field) if field.description.ends_with("cannot be empty") => {
                FILL_ALL_FIELDS.to_string()
            }
            other => other.to_string(),
        };
        self.notifier.warning(&message).await?;
        Err(e)
    }

    async fn fail<T>(&mut self, e: MediSlotError, fallback: &str) -> Result<T, MediSlotError> {
        self.report(&e, fallback).await?;
        Err(e)
    }

    async fn report(&mut self, e: &MediSlotError, fallback: &str) -> Result<(), MediSlotError> {
        if matches!(e, MediSlotError::Unauthorized) {
            self.session.expire(&self.credentials).await?;
            self.appointments.clear();
            self.route = Route::Entry;
        }
        self.notifier.error(&e.user_message(fallback)).await
    }
}
