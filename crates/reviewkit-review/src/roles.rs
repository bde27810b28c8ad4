//! Actors, roles and author attribution.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use reviewkit_core::{Error, UserId};
use serde::{Deserialize, Serialize};

/// Role of the acting user, as supplied by the identity collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Internal decision-maker that may approve past open comments.
    SuperAdmin,
    /// Uploads versions and annotates.
    Creator,
    /// External decision-maker. Never sees internal comments.
    Approver,
    /// Read-only.
    Observer,
}

impl Role {
    pub fn is_decision_maker(self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Approver)
    }

    pub fn has_override(self) -> bool {
        self == Role::SuperAdmin
    }

    pub fn can_annotate(self) -> bool {
        self != Role::Observer
    }

    pub fn can_upload(self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Creator)
    }

    /// Internal comments are hidden from, and cannot be written by, the
    /// external role.
    pub fn sees_internal(self) -> bool {
        self != Role::Approver
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::SuperAdmin => "SuperAdmin",
            Role::Creator => "Creator",
            Role::Approver => "Approver",
            Role::Observer => "Observer",
        };
        f.write_str(name)
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "superadmin" | "admin" => Ok(Role::SuperAdmin),
            "creator" => Ok(Role::Creator),
            "approver" | "client" => Ok(Role::Approver),
            "observer" | "viewer" => Ok(Role::Observer),
            _ => Err(Error::other(format!("Unknown role '{}'", s))),
        }
    }
}

/// The acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<UserId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

/// Display names for author attribution.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    names: HashMap<UserId, String>,
}

impl Roster {
    pub const UNKNOWN_USER: &'static str = "Unknown user";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<UserId>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    pub fn display_name(&self, id: &UserId) -> &str {
        self.names
            .get(id)
            .map(String::as_str)
            .unwrap_or(Self::UNKNOWN_USER)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<U: Into<UserId>, N: Into<String>> FromIterator<(U, N)> for Roster {
    fn from_iter<I: IntoIterator<Item = (U, N)>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for (id, name) in iter {
            roster.insert(id, name);
        }
        roster
    }
}
