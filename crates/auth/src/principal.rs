//! The authenticated operator.

use serde::{Deserialize, Serialize};

use waybill_core::{Role, UserId};

/// Identity and attributes of the authenticated operator.
///
/// Exactly one principal is active per session. This is the shape the
/// gateway returns from login and the "who am I" probe; the richer
/// [`waybill_core::UserRecord`] belongs to the user directory, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}
