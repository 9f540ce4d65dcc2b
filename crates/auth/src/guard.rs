//! Navigation access control.
//!
//! One pure function decides every navigation attempt from two inputs: the
//! current session (if any) and the target route's declared policy.
//!
//! - No IO
//! - No panics
//! - No side effects (redirecting is the caller's job)

use waybill_core::Role;

use crate::routes::Route;
use crate::session::Session;

/// Declared access policy of a navigable target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePolicy {
    /// Reachable without a session.
    Public,
    /// Any authenticated session may proceed.
    RequiresAuth,
    /// Authenticated session whose role is in the allowed set.
    ///
    /// An empty set behaves like [`RoutePolicy::RequiresAuth`].
    RequiresRole(&'static [Role]),
}

/// Outcome of evaluating a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Let the navigation through.
    Proceed,
    /// Unauthenticated session on a protected target.
    RedirectToLogin,
    /// Authenticated but not allowed here (role miss, or an authenticated
    /// visit to a guest-only page such as login).
    RedirectToDashboard,
}

/// Decide a navigation attempt.
///
/// Precedence: the authentication requirement is checked before any role
/// requirement, so an unauthenticated request to a role-restricted target
/// yields [`Access::RedirectToLogin`], never the dashboard redirect.
pub fn evaluate(session: Option<&Session>, route: &Route) -> Access {
    if route.guest_only && session.is_some() {
        return Access::RedirectToDashboard;
    }

    match route.policy {
        RoutePolicy::Public => Access::Proceed,
        RoutePolicy::RequiresAuth => match session {
            Some(_) => Access::Proceed,
            None => Access::RedirectToLogin,
        },
        RoutePolicy::RequiresRole(allowed) => match session {
            None => Access::RedirectToLogin,
            Some(session) if allowed.is_empty() || allowed.contains(&session.role()) => {
                Access::Proceed
            }
            Some(_) => Access::RedirectToDashboard,
        },
    }
}
