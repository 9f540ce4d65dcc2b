//! `waybill-auth` — principal, session, and navigation access control.
//!
//! Everything here is pure: the guard is a deterministic function of the
//! current session and a route's declared policy. Token acquisition and
//! persistence live in `waybill-client`.

pub mod guard;
pub mod principal;
pub mod routes;
pub mod session;

pub use guard::{Access, RoutePolicy, evaluate};
pub use principal::Principal;
pub use routes::{DEFAULT_AUTHENTICATED_PATH, LOGIN_PATH, Route, find_route, routes};
pub use session::Session;

pub use waybill_core::Role;
