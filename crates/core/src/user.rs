//! Directory users and the role set.
//!
//! Roles are a closed enumeration: they gate navigation client-side and
//! mutations server-side, so an unknown role string from the gateway is a
//! decode error, never silently carried along.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::UserId;

/// Operator role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Sales,
    Purchasing,
    Warehouse,
    Route,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Sales,
        Role::Purchasing,
        Role::Warehouse,
        Role::Route,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Sales => "Sales",
            Role::Purchasing => "Purchasing",
            Role::Warehouse => "Warehouse",
            Role::Route => "Route",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "Sales" => Ok(Role::Sales),
            "Purchasing" => Ok(Role::Purchasing),
            "Warehouse" => Ok(Role::Warehouse),
            "Route" => Ok(Role::Route),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// A directory user as the gateway serializes it.
///
/// The gateway never includes credentials in responses; `password` exists
/// only on the outbound [`UserDraft`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial user payload for create/update calls.
///
/// `password` is plaintext in transit only: it is forwarded to the gateway
/// and never kept in any local collection or persisted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
