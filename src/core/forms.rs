use crate::api::models::{BookAppointmentRequest, LoginRequest, RegisterRequest};
use crate::core::errors::MediSlotError;
use crate::core::models::{Appointment, Role, appointment::parse_day};
use crate::core::slots;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_REASON_LENGTH: usize = 500;

fn required(field: &str, value: &str) -> Result<(), MediSlotError> {
    if value.trim().is_empty() {
        return Err(MediSlotError::invalid(
            field,
            format!("Invalid {}", field),
            format!("{} cannot be empty", field),
        ));
    }
    Ok(())
}

fn validate_text(field: &str, value: &str, max_length: usize) -> Result<(), MediSlotError> {
    required(field, value)?;
    if value.chars().count() > max_length {
        return Err(MediSlotError::invalid(
            field,
            format!("{} Too Long", field),
            format!("{} cannot exceed {} characters", field, max_length),
        ));
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(MediSlotError::invalid(
            field,
            format!("Invalid {}", field),
            format!("{} contains invalid characters", field),
        ));
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<(), MediSlotError> {
    required("email", value)?;
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty() && !value.contains(char::is_whitespace));
    if !valid {
        return Err(MediSlotError::invalid(
            "email",
            "Invalid email",
            format!("`{}` is not a valid email address", value),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, MediSlotError> {
        required("email", &self.email)?;
        required("password", &self.password)?;
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub role: Role,
}

impl Default for RegisterForm {
    fn default() -> Self {
        RegisterForm {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            phone: String::new(),
            role: Role::Patient,
        }
    }
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, MediSlotError> {
        validate_text("name", &self.name, MAX_NAME_LENGTH)?;
        validate_email(&self.email)?;
        required("password", &self.password)?;
        if !self.role.is_known() {
            return Err(MediSlotError::invalid(
                "role",
                "Invalid role",
                format!("`{}` must be patient or doctor", self.role),
            ));
        }
        let phone = self.phone.trim();
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            role: self.role.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub doctor: String,
    pub date: String,
    pub time: String,
    pub reason: String,
}

impl BookingForm {
    /// Checks the form against the appointments already loaded for the
    /// booking screen; the backend still has the final say on conflicts.
    pub fn validate(&self, booked: &[Appointment]) -> Result<BookAppointmentRequest, MediSlotError> {
        required("doctor", &self.doctor)?;
        required("date", &self.date)?;
        required("time", &self.time)?;

        let date = self.date.trim();
        if date.len() != 10 || parse_day(date).is_none() {
            return Err(MediSlotError::invalid(
                "date",
                "Invalid date",
                format!("`{}` is not a YYYY-MM-DD date", date),
            ));
        }
        let time = self.time.trim();
        if !slots::is_valid_slot(time) {
            return Err(MediSlotError::invalid(
                "time",
                "Invalid time",
                format!("`{}` is not a bookable slot", time),
            ));
        }
        if self.reason.chars().count() > MAX_REASON_LENGTH {
            return Err(MediSlotError::invalid(
                "reason",
                "reason Too Long",
                format!("reason cannot exceed {} characters", MAX_REASON_LENGTH),
            ));
        }
        let doctor = self.doctor.trim();
        if slots::is_slot_booked(booked, doctor, date, time) {
            return Err(MediSlotError::SlotUnavailable {
                date: date.to_string(),
                time: time.to_string(),
            });
        }

        Ok(BookAppointmentRequest {
            doctor: doctor.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            reason: self.reason.trim().to_string(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ProfileForm {
    /// Blank fields are left as they are.
    pub fn validate(&self) -> Result<(), MediSlotError> {
        if !self.name.trim().is_empty() {
            validate_text("name", &self.name, MAX_NAME_LENGTH)?;
        }
        if !self.email.trim().is_empty() {
            validate_email(self.email.trim())?;
        }
        if self.phone.chars().any(|c| !(c.is_ascii_digit() || "+-() ".contains(c))) {
            return Err(MediSlotError::invalid(
                "phone",
                "Invalid phone",
                "phone may only contain digits, spaces and + - ( )",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{AppointmentStatus, PartyRef};

    fn field_of(err: MediSlotError) -> String {
        match err {
            MediSlotError::InvalidInput(field, _) => field,
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: "  ".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(field_of(form.validate().unwrap_err()), "email");

        let form = LoginForm {
            email: " a@b.co ".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(form.validate().unwrap().email, "a@b.co");
    }

    #[test]
    fn register_checks_email_and_role() {
        let mut form = RegisterForm {
            name: "Asha".to_string(),
            email: "asha.example.com".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(form.validate().unwrap_err()), "email");

        form.email = "asha@example.com".to_string();
        form.role = Role::from("admin");
        assert_eq!(field_of(form.validate().unwrap_err()), "role");

        form.role = Role::Doctor;
        let request = form.validate().unwrap();
        assert_eq!(request.role, Role::Doctor);
        assert_eq!(request.phone, None);
    }

    #[test]
    fn booking_rejects_taken_and_off_grid_slots() {
        let booked = vec![Appointment {
            id: "a1".to_string(),
            doctor: PartyRef::Id("d1".to_string()),
            patient: None,
            date: "2025-03-10".to_string(),
            time: "11:00".to_string(),
            status: AppointmentStatus::Approved,
            reason: None,
            duration: None,
        }];
        let mut form = BookingForm {
            doctor: "d1".to_string(),
            date: "2025-03-10".to_string(),
            time: "11:00".to_string(),
            reason: "Checkup".to_string(),
        };
        assert!(matches!(
            form.validate(&booked),
            Err(MediSlotError::SlotUnavailable { .. })
        ));

        form.time = "11:05".to_string();
        assert_eq!(field_of(form.validate(&booked).unwrap_err()), "time");

        form.time = "11:15".to_string();
        form.date = "10/03/2025".to_string();
        assert_eq!(field_of(form.validate(&booked).unwrap_err()), "date");

        form.date = "2025-03-10".to_string();
        let request = form.validate(&booked).unwrap();
        assert_eq!(request.time, "11:15");
        assert_eq!(request.reason, "Checkup");
    }

    #[test]
    fn booking_needs_doctor_date_and_time() {
        let form = BookingForm::default();
        assert_eq!(field_of(form.validate(&[]).unwrap_err()), "doctor");
    }

    #[test]
    fn profile_allows_blank_fields() {
        assert!(ProfileForm::default().validate().is_ok());
        let form = ProfileForm {
            phone: "+91 98765-43210".to_string(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
        let form = ProfileForm {
            email: "nope".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(form.validate().unwrap_err()), "email");
    }
}
