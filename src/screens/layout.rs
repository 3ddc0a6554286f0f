use crate::core::models::User;
use crate::core::routing::{Route, nav_links};
use std::fmt::Write;

pub fn render(user: &User, active: Route, body: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "MediSlot | {} ({})", user.name, user.role);

    let links = nav_links(&user.role)
        .iter()
        .map(|route| {
            if *route == active {
                format!("*{}*", route.title())
            } else {
                route.title().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "{} | Logout", links);
    let _ = writeln!(out, "{}", "-".repeat(60));
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out
}
