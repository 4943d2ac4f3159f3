use serde::{Deserialize, Serialize};

/// User roles as stored on the user record. The role field gates the
/// tutor-only and admin-only route groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Tutor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Tutor => "tutor",
            Role::Admin => "admin",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("student") {
            Some(Role::Student)
        } else if raw.eq_ignore_ascii_case("tutor") {
            Some(Role::Tutor)
        } else if raw.eq_ignore_ascii_case("admin") {
            Some(Role::Admin)
        } else {
            None
        }
    }
}
