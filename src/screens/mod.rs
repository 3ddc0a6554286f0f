//! Text renderers for every screen. Each takes store state and returns what
//! the terminal shows; none of them perform I/O.

pub mod appointments;
pub mod auth;
pub mod book;
pub mod dashboard;
pub mod details;
pub mod doctor_dashboard;
pub mod layout;
pub mod profile;

use crate::core::models::{Appointment, AppointmentStats, AppointmentStatus, PartyRef, appointment::parse_day};
use crate::core::routing::Route;
use crate::core::services::MediSlotService;
use crate::{api::Api, infrastructure::notifications::Notifier, infrastructure::storage::CredentialStore};

/// `DD/MM/YYYY`, the way the dashboard lists dates. Unparseable input is shown as is.
pub fn format_date(value: &str) -> String {
    parse_day(value)
        .map(|day| day.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| value.to_string())
}

pub fn status_badge(status: AppointmentStatus) -> String {
    format!("[{}]", status)
}

pub fn party_name(party: &PartyRef) -> &str {
    party.name().unwrap_or_else(|| party.id())
}

pub fn doctor_label(appt: &Appointment) -> String {
    format!("Dr. {}", party_name(&appt.doctor))
}

pub fn patient_label(appt: &Appointment) -> String {
    appt.patient
        .as_ref()
        .map(|p| party_name(p).to_string())
        .unwrap_or_else(|| "Unknown patient".to_string())
}

pub fn render_stats(stats: &AppointmentStats) -> String {
    format!(
        "Total: {}  Pending: {}  Approved: {}  Rejected: {}",
        stats.total, stats.pending, stats.approved, stats.rejected
    )
}

/// Renders whatever screen the service currently sits on, inside the layout.
pub fn render_current<A: Api, C: CredentialStore, N: Notifier>(service: &MediSlotService<A, C, N>) -> String {
    let session = service.session();
    let store = service.appointments();
    let Some(user) = session.user() else {
        return auth::render(session.error.as_deref());
    };
    let body = match service.route() {
        Route::Entry => auth::render(session.error.as_deref()),
        Route::Dashboard => dashboard::render(user, store),
        Route::Appointments => appointments::render(store),
        Route::Book => book::render(store, None, None),
        Route::Doctor => doctor_dashboard::render(store),
        Route::Profile => profile::render(user),
    };
    layout::render(user, service.route(), &body)
}
