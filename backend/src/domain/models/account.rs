use serde::{Deserialize, Serialize};

/// The three user roles in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    ScoutLeader,
    LogisticsCoordinator,
}

impl Role {
    /// Wire string used in the logins file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::ScoutLeader => "scout leader",
            Role::LogisticsCoordinator => "logistics coordinator",
        }
    }

    /// Parse the wire string from the logins file.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "scout leader" => Some(Role::ScoutLeader),
            "logistics coordinator" => Some(Role::LogisticsCoordinator),
            _ => None,
        }
    }
}

/// A role-tagged credential pair. Passwords are stored and compared in
/// plaintext; a stronger model is explicitly out of scope for this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub role: Role,
    pub username: String,
    pub password: String,
}

impl UserAccount {
    pub fn new(role: Role, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            role,
            username: username.into(),
            password: password.into(),
        }
    }
}
