use crate::core::models::Appointment;
use crate::screens::{doctor_label, patient_label};
use std::fmt::Write;

pub const DEFAULT_DURATION: &str = "15 mins";
pub const NO_REASON: &str = "No reason provided";

pub fn render(appt: &Appointment) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Appointment Details");
    let _ = writeln!(out, "Doctor: {}", doctor_label(appt));
    if appt.patient.is_some() {
        let _ = writeln!(out, "Patient: {}", patient_label(appt));
    }
    let _ = writeln!(out, "Date: {}", appt.date);
    let _ = writeln!(out, "Time: {}", appt.time);
    let duration = appt
        .duration
        .map(|mins| format!("{} mins", mins))
        .unwrap_or_else(|| DEFAULT_DURATION.to_string());
    let _ = writeln!(out, "Duration: {}", duration);
    let _ = writeln!(out, "Status: {}", appt.status);
    let reason = appt.reason.as_deref().filter(|r| !r.trim().is_empty()).unwrap_or(NO_REASON);
    let _ = writeln!(out, "Reason: {}", reason);
    out
}
