use crate::core::models::User;
use crate::core::stores::AppointmentStore;
use crate::screens::{doctor_label, format_date, render_stats, status_badge};
use std::fmt::Write;

/// Patient home: greeting, stats, recent appointments.
pub fn render(user: &User, store: &AppointmentStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome back, {}", user.name);
    let _ = writeln!(out, "Here's a summary of your appointments.");
    let _ = writeln!(out, "{}", render_stats(&store.stats()));
    let _ = writeln!(out);
    let _ = writeln!(out, "Recent Appointments");

    if store.loading {
        let _ = writeln!(out, "Loading...");
        return out;
    }
    if store.appointments.is_empty() {
        let _ = writeln!(out, "No appointments yet");
        return out;
    }
    for appt in &store.appointments {
        let _ = write!(
            out,
            "  {}  {} at {}  {}",
            doctor_label(appt),
            format_date(&appt.date),
            appt.time,
            status_badge(appt.status)
        );
        if appt.is_pending() {
            let _ = write!(out, "  (cancel: medislot cancel {})", appt.id);
        }
        out.push('\n');
    }
    out
}
