use crate::core::models::{Role, User};
use log::debug;

/// Screens reachable by path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Entry,
    Profile,
    Dashboard,
    Appointments,
    Book,
    Doctor,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Entry,
        Route::Profile,
        Route::Dashboard,
        Route::Appointments,
        Route::Book,
        Route::Doctor,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Profile => "/profile",
            Route::Dashboard => "/dashboard",
            Route::Appointments => "/appointments",
            Route::Book => "/book",
            Route::Doctor => "/doctor",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Entry => "Login / Register",
            Route::Profile => "Profile",
            Route::Dashboard => "Dashboard",
            Route::Appointments => "My Appointments",
            Route::Book => "Book Appointment",
            Route::Doctor => "Doctor Panel",
        }
    }

    /// Unknown paths land on the entry screen.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim().trim_end_matches('/');
        let normalized = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
        Route::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or(Route::Entry)
    }

    pub fn required_role(&self) -> Access {
        match self {
            Route::Entry => Access::Public,
            Route::Profile => Access::Authenticated,
            Route::Dashboard | Route::Appointments | Route::Book => Access::Role(Role::Patient),
            Route::Doctor => Access::Role(Role::Doctor),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Role(Role),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

pub fn home_for(role: &Role) -> Route {
    match role {
        Role::Doctor => Route::Doctor,
        Role::Patient => Route::Dashboard,
        Role::Unknown(_) => Route::Entry,
    }
}

pub fn guard(user: Option<&User>, route: Route) -> Navigation {
    if route == Route::Entry {
        // An existing session never sees the login form again.
        return match user {
            Some(user) if user.role == Role::Doctor => Navigation::Redirect(Route::Doctor),
            Some(_) => Navigation::Redirect(Route::Dashboard),
            None => Navigation::Render(Route::Entry),
        };
    }

    let Some(user) = user else {
        return Navigation::Redirect(Route::Entry);
    };

    match route.required_role() {
        Access::Role(required) if user.role != required => Navigation::Redirect(home_for(&user.role)),
        _ => Navigation::Render(route),
    }
}

/// Follows redirects until a screen renders.
pub fn navigate(user: Option<&User>, route: Route) -> Route {
    let mut current = route;
    for _ in 0..Route::ALL.len() {
        match guard(user, current) {
            Navigation::Render(target) => return target,
            Navigation::Redirect(target) => {
                debug!("Redirecting {} -> {}", current, target);
                current = target;
            }
        }
    }
    // Unknown role bouncing between the entry redirect and the role check.
    Route::Entry
}

pub fn nav_links(role: &Role) -> &'static [Route] {
    match role {
        Role::Patient => &[Route::Dashboard, Route::Book, Route::Appointments, Route::Profile],
        Role::Doctor => &[Route::Doctor, Route::Profile],
        Role::Unknown(_) => &[Route::Profile],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: "u1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            role,
            phone: None,
            token: Some("tok".to_string()),
        }
    }

    #[test]
    fn parse_normalizes_paths() {
        assert_eq!(Route::parse("/book"), Route::Book);
        assert_eq!(Route::parse("/book/"), Route::Book);
        assert_eq!(Route::parse("doctor"), Route::Doctor);
        assert_eq!(Route::parse("/appointments?page=2"), Route::Appointments);
        assert_eq!(Route::parse("/"), Route::Entry);
        assert_eq!(Route::parse(""), Route::Entry);
        assert_eq!(Route::parse("/login"), Route::Entry);
        assert_eq!(Route::parse("/nowhere/at/all"), Route::Entry);
    }

    #[test]
    fn anonymous_users_only_see_entry() {
        for route in Route::ALL {
            let expected = if route == Route::Entry {
                Navigation::Render(Route::Entry)
            } else {
                Navigation::Redirect(Route::Entry)
            };
            assert_eq!(guard(None, route), expected, "route {}", route);
        }
    }

    #[test]
    fn patient_is_kept_off_doctor_screens() {
        let patient = user(Role::Patient);
        assert_eq!(guard(Some(&patient), Route::Doctor), Navigation::Redirect(Route::Dashboard));
        assert_eq!(guard(Some(&patient), Route::Entry), Navigation::Redirect(Route::Dashboard));
        for route in [Route::Dashboard, Route::Appointments, Route::Book, Route::Profile] {
            assert_eq!(guard(Some(&patient), route), Navigation::Render(route));
        }
    }

    #[test]
    fn doctor_is_kept_off_patient_screens() {
        let doctor = user(Role::Doctor);
        for route in [Route::Dashboard, Route::Appointments, Route::Book, Route::Entry] {
            assert_eq!(guard(Some(&doctor), route), Navigation::Redirect(Route::Doctor));
        }
        assert_eq!(guard(Some(&doctor), Route::Doctor), Navigation::Render(Route::Doctor));
        assert_eq!(guard(Some(&doctor), Route::Profile), Navigation::Render(Route::Profile));
    }

    #[test]
    fn unknown_role_falls_back_to_entry() {
        let admin = user(Role::from("admin"));
        assert_eq!(guard(Some(&admin), Route::Doctor), Navigation::Redirect(Route::Entry));
        assert_eq!(guard(Some(&admin), Route::Book), Navigation::Redirect(Route::Entry));
        assert_eq!(guard(Some(&admin), Route::Profile), Navigation::Render(Route::Profile));
        assert_eq!(navigate(Some(&admin), Route::Book), Route::Entry);
    }

    #[test]
    fn navigate_follows_redirects() {
        let patient = user(Role::Patient);
        let doctor = user(Role::Doctor);
        assert_eq!(navigate(None, Route::Book), Route::Entry);
        assert_eq!(navigate(Some(&patient), Route::Entry), Route::Dashboard);
        assert_eq!(navigate(Some(&doctor), Route::Appointments), Route::Doctor);
    }

    #[test]
    fn nav_links_follow_role() {
        assert_eq!(nav_links(&Role::Doctor), &[Route::Doctor, Route::Profile]);
        assert_eq!(nav_links(&Role::Patient).len(), 4);
        assert!(nav_links(&Role::Patient).iter().all(|r| *r != Route::Doctor));
    }
}
