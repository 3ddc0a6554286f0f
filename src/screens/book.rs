use crate::api::models::BookAppointmentRequest;
use crate::core::slots::available_slots;
use crate::core::stores::AppointmentStore;
use std::fmt::Write;

const SLOTS_PER_ROW: usize = 8;

/// Doctor list, and once a doctor and date are chosen, the slot grid.
/// Booked slots are shown as `xx:xx`.
pub fn render(store: &AppointmentStore, doctor: Option<&str>, date: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Book Appointment");
    let _ = writeln!(out);

    if store.doctors.is_empty() {
        let _ = writeln!(out, "No doctors available");
    } else {
        let _ = writeln!(out, "Doctors:");
        for doc in &store.doctors {
            let _ = write!(out, "  {}  Dr. {}", doc.id, doc.name);
            if let Some(specialization) = &doc.specialization {
                let _ = write!(out, " ({})", specialization);
            }
            out.push('\n');
        }
    }

    let (Some(doctor), Some(date)) = (doctor, date) else {
        let _ = writeln!(out);
        let _ = writeln!(out, "Pick a doctor and date: medislot slots <doctor_id> <YYYY-MM-DD>");
        return out;
    };

    let _ = writeln!(out);
    let _ = writeln!(out, "Available Time Slots for {} on {}", doctor_name(store, doctor), date);
    let slots = available_slots(&store.appointments, doctor, date);
    for row in slots.chunks(SLOTS_PER_ROW) {
        let line = row
            .iter()
            .map(|slot| if slot.booked { "xx:xx" } else { slot.time.as_str() })
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "  {}", line);
    }
    let _ = writeln!(
        out,
        "Book: medislot book {} {} <HH:MM> [reason...]",
        doctor, date
    );
    out
}

fn doctor_name(store: &AppointmentStore, doctor: &str) -> String {
    store
        .doctor(doctor)
        .map(|doc| format!("Dr. {}", doc.name))
        .unwrap_or_else(|| doctor.to_string())
}

/// Confirmation summary shown before the booking is sent.
pub fn render_summary(store: &AppointmentStore, request: &BookAppointmentRequest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Confirm Booking");
    let _ = writeln!(out, "Doctor: {}", doctor_name(store, &request.doctor));
    let _ = writeln!(out, "Date: {}", request.date);
    let _ = writeln!(out, "Time: {}", request.time);
    if !request.reason.is_empty() {
        let _ = writeln!(out, "Reason: {}", request.reason);
    }
    out
}
