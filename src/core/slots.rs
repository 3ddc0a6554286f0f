use crate::core::models::{Appointment, appointment::parse_day};
use once_cell::sync::Lazy;

pub const SLOT_MINUTES: u32 = 15;
/// Minutes after midnight.
pub const DAY_START: u32 = 9 * 60;
pub const DAY_END: u32 = 17 * 60;

static TIME_SLOTS: Lazy<Vec<String>> = Lazy::new(|| {
    (DAY_START..DAY_END)
        .step_by(SLOT_MINUTES as usize)
        .map(|minutes| format!("{:02}:{:02}", minutes / 60, minutes % 60))
        .collect()
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub time: String,
    pub booked: bool,
}

pub fn generate_time_slots() -> &'static [String] {
    &TIME_SLOTS
}

pub fn is_valid_slot(time: &str) -> bool {
    TIME_SLOTS.iter().any(|slot| slot == time)
}

fn same_day(a: &str, b: &str) -> bool {
    match (parse_day(a), parse_day(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

pub fn is_slot_booked(appointments: &[Appointment], doctor_id: &str, date: &str, slot: &str) -> bool {
    appointments
        .iter()
        .any(|appt| appt.doctor.id() == doctor_id && same_day(&appt.date, date) && appt.time == slot)
}

pub fn available_slots(appointments: &[Appointment], doctor_id: &str, date: &str) -> Vec<Slot> {
    TIME_SLOTS
        .iter()
        .map(|time| Slot {
            time: time.clone(),
            booked: is_slot_booked(appointments, doctor_id, date, time),
        })
        .collect()
}
