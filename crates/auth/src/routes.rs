//! The navigation surface as data.
//!
//! Each navigable target carries its policy explicitly; the guard in
//! [`crate::guard`] evaluates them without knowing anything about the
//! rendering layer. Segments starting with `:` are dynamic.

use waybill_core::Role;

use crate::guard::RoutePolicy;

/// Where an authenticated session lands by default.
pub const DEFAULT_AUTHENTICATED_PATH: &str = "/dashboard/orders";

/// Where an unauthenticated session is sent for a protected target.
pub const LOGIN_PATH: &str = "/login";

/// A navigable target and its declared access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub policy: RoutePolicy,
    /// Authenticated sessions are bounced away (the login page).
    pub guest_only: bool,
}

const ROUTES: &[Route] = &[
    Route {
        path: "/track",
        name: "track",
        policy: RoutePolicy::Public,
        guest_only: false,
    },
    Route {
        path: "/login",
        name: "login",
        policy: RoutePolicy::Public,
        guest_only: true,
    },
    Route {
        path: "/dashboard",
        name: "dashboard",
        policy: RoutePolicy::RequiresAuth,
        guest_only: false,
    },
    Route {
        path: "/dashboard/orders",
        name: "orders",
        policy: RoutePolicy::RequiresAuth,
        guest_only: false,
    },
    Route {
        path: "/dashboard/orders/create",
        name: "orders-create",
        policy: RoutePolicy::RequiresRole(&[Role::Sales]),
        guest_only: false,
    },
    Route {
        path: "/dashboard/orders/:id",
        name: "orders-detail",
        policy: RoutePolicy::RequiresAuth,
        guest_only: false,
    },
    Route {
        path: "/dashboard/recycle-bin",
        name: "recycle-bin",
        policy: RoutePolicy::RequiresRole(&[Role::Admin, Role::Sales]),
        guest_only: false,
    },
    Route {
        path: "/dashboard/users",
        name: "users",
        policy: RoutePolicy::RequiresRole(&[Role::Admin]),
        guest_only: false,
    },
    Route {
        path: "/dashboard/users/create",
        name: "users-create",
        policy: RoutePolicy::RequiresRole(&[Role::Admin]),
        guest_only: false,
    },
    Route {
        path: "/dashboard/users/:id/edit",
        name: "users-edit",
        policy: RoutePolicy::RequiresRole(&[Role::Admin]),
        guest_only: false,
    },
];

/// The full navigation surface, in match order.
///
/// Literal routes are declared before the dynamic routes that would shadow
/// them (`orders/create` before `orders/:id`), and [`find_route`] returns
/// the first match.
pub fn routes() -> &'static [Route] {
    ROUTES
}

/// Look a concrete path up in the navigation surface.
pub fn find_route(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| matches_path(route.path, path))
}

fn matches_path(pattern: &str, path: &str) -> bool {
    let mut pattern_segs = pattern.split('/').filter(|s| !s.is_empty());
    let mut path_segs = path.split('/').filter(|s| !s.is_empty());

    loop {
        match (pattern_segs.next(), path_segs.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) if p.starts_with(':') || p == s => continue,
            _ => return false,
        }
    }
}
