//! The active session.

use serde::{Deserialize, Serialize};

use waybill_core::Role;

use crate::principal::Principal;

/// An authenticated session: a credential token bound to its principal.
///
/// The token⇔principal invariant is carried by construction: a `Session`
/// always holds both, and "no session" is `None` at the owner. A token that
/// fails to resolve to a principal must tear the whole session down rather
/// than leave either half behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub principal: Principal,
}

impl Session {
    pub fn new(token: impl Into<String>, principal: Principal) -> Self {
        Self {
            token: token.into(),
            principal,
        }
    }

    pub fn role(&self) -> Role {
        self.principal.role
    }
}
