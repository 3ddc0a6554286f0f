use crate::core::stores::AppointmentStore;
use crate::screens::{doctor_label, format_date, status_badge};
use std::fmt::Write;

pub fn render(store: &AppointmentStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "My Appointments");

    if store.loading {
        let _ = writeln!(out, "Loading...");
        return out;
    }
    if store.appointments.is_empty() {
        let _ = writeln!(out, "No appointments yet");
        return out;
    }
    for appt in &store.appointments {
        let _ = writeln!(
            out,
            "  {}  {}  {} {}  {}",
            appt.id,
            doctor_label(appt),
            format_date(&appt.date),
            appt.time,
            status_badge(appt.status)
        );
        if appt.is_pending() {
            let _ = writeln!(out, "      cancel: medislot cancel {}", appt.id);
        }
    }
    out
}
