use crate::core::models::AppointmentStatus;
use crate::core::stores::AppointmentStore;
use crate::screens::{format_date, patient_label, render_stats, status_badge};
use std::fmt::Write;

pub fn render(store: &AppointmentStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Doctor Dashboard");
    let _ = writeln!(out, "{}", render_stats(&store.stats()));
    let _ = writeln!(out);

    if store.loading {
        let _ = writeln!(out, "Loading...");
        return out;
    }
    if store.appointments.is_empty() {
        let _ = writeln!(out, "No appointments yet");
        return out;
    }

    let _ = writeln!(out, "{:<24} {:<12} {:<6} {:<10} {}", "Patient", "Date", "Time", "Status", "Id");
    for appt in &store.appointments {
        let _ = writeln!(
            out,
            "{:<24} {:<12} {:<6} {:<10} {}",
            patient_label(appt),
            format_date(&appt.date),
            appt.time,
            status_badge(appt.status),
            appt.id
        );
    }
    let statuses = AppointmentStatus::ALL.map(|s| s.as_str()).join("|");
    let _ = writeln!(out);
    let _ = writeln!(out, "Actions: medislot status <id> <{}>  |  medislot delete <id>", statuses);
    out
}
