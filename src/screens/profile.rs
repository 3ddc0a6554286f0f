use crate::core::models::User;
use std::fmt::Write;

pub fn render(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Update Profile");
    let _ = writeln!(out, "Name:  {}", user.name);
    let _ = writeln!(out, "Email: {}", user.email);
    let _ = writeln!(out, "Phone: {}", user.phone.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "Role:  {}", user.role);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Save changes: medislot profile [--name <name>] [--email <email>] [--phone <phone>]"
    );
    out
}
