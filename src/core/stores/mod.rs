pub mod appointments;
pub mod session;

pub use appointments::AppointmentStore;
pub use session::SessionStore;
