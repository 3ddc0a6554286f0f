use serde::{Deserialize, Serialize};

/// Who a session belongs to. Anything the server sends besides `patient` or
/// `doctor` is kept verbatim so routing can fall back to the entry screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Option<String>", into = "String")]
pub enum Role {
    Patient,
    Doctor,
    Unknown(String),
}

impl Default for Role {
    fn default() -> Self {
        Role::Unknown(String::new())
    }
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Unknown(role) => role,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Role::Patient | Role::Doctor)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "patient" => Role::Patient,
            "doctor" => Role::Doctor,
            _ => Role::Unknown(value),
        }
    }
}

/// A missing or `null` role decodes as an empty unknown role.
impl From<Option<String>> for Role {
    fn from(value: Option<String>) -> Self {
        value.map(Role::from).unwrap_or_default()
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Unknown(role) if role.is_empty() => write!(f, "unknown"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// The `userInfo` record: what the auth endpoints return and what gets persisted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl User {
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}
