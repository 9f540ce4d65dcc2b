//! `waybill-client` — client for the order-tracking gateway.
//!
//! The pieces compose the way a UI consumes them: construct one [`Gateway`]
//! from a [`GatewayConfig`], hand it to a [`SessionStore`] (with a
//! [`vault::SessionVault`] for persistence across restarts), an
//! [`OrderStore`], and a [`UserStore`], then drive navigation through
//! `waybill_auth::evaluate` against the session.
//!
//! All stores are `&mut self` state machines driven by a single-threaded
//! async caller; no operation retries, times out, or cancels at this layer.

pub mod config;
pub mod gateway;
pub mod orders;
pub mod session;
pub mod telemetry;
pub mod users;
pub mod vault;

pub use config::GatewayConfig;
pub use gateway::{EvidencePhoto, Gateway, GatewayError, LoginResponse};
pub use orders::OrderStore;
pub use session::SessionStore;
pub use users::UserStore;
pub use vault::{FileVault, MemoryVault, PersistedSession, SessionVault};
