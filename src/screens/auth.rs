use std::fmt::Write;

/// Combined login / register screen.
pub fn render(error: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome to MediSlot");
    let _ = writeln!(out, "Book and manage doctor appointments.");
    let _ = writeln!(out);
    let _ = writeln!(out, "Login:     medislot login <email> <password>");
    let _ = writeln!(
        out,
        "Register:  medislot register <name> <email> <password> [--phone <phone>] [--role patient|doctor]"
    );
    if let Some(error) = error.filter(|e| !e.is_empty()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Last error: {}", error);
    }
    out
}
