//! `waybill-core` — domain types for the order-tracking client.
//!
//! This crate contains **pure domain** records and enumerations (no IO, no
//! transport concerns): identifiers, the order lifecycle, and directory
//! user records, exactly as the remote gateway serializes them.

pub mod error;
pub mod id;
pub mod order;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use id::{OrderId, UserId};
pub use order::{Order, OrderDraft, OrderFilters, OrderStatus, TrackingReport, UserSummary};
pub use user::{Role, UserDraft, UserRecord};
