pub mod appointment;
pub mod user;

pub use appointment::{Appointment, AppointmentStats, AppointmentStatus, Doctor, Party, PartyRef};
pub use user::{Role, User};
