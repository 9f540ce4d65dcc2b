//! Delivery orders and their lifecycle.
//!
//! An order moves forward through `Ordered → In Process → In Route →
//! Delivered`. The client does not enforce that progression — the gateway
//! owns transition validation and the client surfaces whatever it rejects —
//! but the lifecycle helpers here let UIs offer only sensible next steps.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::{OrderId, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// Order status
// ─────────────────────────────────────────────────────────────────────────────

/// Order lifecycle status, a closed set with fixed wire spellings.
///
/// Two of the variants carry a space on the wire (`"In Process"`,
/// `"In Route"`); the serde renames are the contract, not cosmetics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Ordered,
    #[serde(rename = "In Process")]
    InProcess,
    #[serde(rename = "In Route")]
    InRoute,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Ordered => "Ordered",
            OrderStatus::InProcess => "In Process",
            OrderStatus::InRoute => "In Route",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// The next step in the forward lifecycle, if any.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Ordered => Some(OrderStatus::InProcess),
            OrderStatus::InProcess => Some(OrderStatus::InRoute),
            OrderStatus::InRoute => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ordered" => Ok(OrderStatus::Ordered),
            "In Process" => Ok(OrderStatus::InProcess),
            "In Route" => Ok(OrderStatus::InRoute),
            "Delivered" => Ok(OrderStatus::Delivered),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Order record
// ─────────────────────────────────────────────────────────────────────────────

/// Abbreviated user embedded in order responses (creator / last modifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
}

/// A delivery order as the gateway serializes it.
///
/// The local collection held by the client is a cache of server truth, never
/// authoritative: after any mutation the client adopts the record the
/// gateway returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_number: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub notes: String,
    /// URL of the attached proof-of-delivery photo; empty until evidence
    /// has been uploaded.
    #[serde(default)]
    pub evidence_photo_url: String,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_by: UserId,
    pub last_modified_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user: Option<UserSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by_user: Option<UserSummary>,
}

impl Order {
    pub fn has_evidence(&self) -> bool {
        !self.evidence_photo_url.is_empty()
    }
}

/// Partial order payload for create/update calls.
///
/// Absent fields are omitted from the JSON body entirely so the gateway
/// keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Listing filters
// ─────────────────────────────────────────────────────────────────────────────

/// Predicates for order listings.
///
/// Text fields are substring matches, `status` is an equality match, and
/// `include_deleted` flips the listing to the recycle-bin view: by default
/// soft-deleted orders are hidden.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilters {
    pub invoice_number: Option<String>,
    pub customer_name: Option<String>,
    pub customer_number: Option<String>,
    pub status: Option<OrderStatus>,
    pub include_deleted: bool,
}

impl OrderFilters {
    /// Filters for the recycle-bin view.
    pub fn deleted_only() -> Self {
        Self {
            include_deleted: true,
            ..Self::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public tracking
// ─────────────────────────────────────────────────────────────────────────────

/// Response of the public tracking endpoint.
///
/// When no order matches, the gateway answers `{"found": false}` with every
/// other field omitted; timestamps arrive pre-formatted for display rather
/// than as RFC 3339 instants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackingReport {
    pub found: bool,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub evidence_photo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_exact_wire_spellings() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProcess).unwrap(),
            "\"In Process\""
        );
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"In Route\"").unwrap(),
            OrderStatus::InRoute
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<OrderStatus>("\"Returned\"").is_err());
        let err = "Returned".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownStatus(_)));
    }

    #[test]
    fn lifecycle_progresses_forward_and_terminates() {
        let mut status = OrderStatus::Ordered;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            status = next;
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![
                OrderStatus::Ordered,
                OrderStatus::InProcess,
                OrderStatus::InRoute,
                OrderStatus::Delivered,
            ]
        );
        assert!(status.is_terminal());
    }

    #[test]
    fn draft_omits_absent_fields() {
        let draft = OrderDraft {
            status: Some(OrderStatus::InRoute),
            notes: Some("left at reception".to_string()),
            ..OrderDraft::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "In Route", "notes": "left at reception"})
        );
    }

    #[test]
    fn order_decodes_without_optional_associations() {
        let json = serde_json::json!({
            "id": 1,
            "invoice_number": "INV-1",
            "customer_name": "Acme",
            "customer_number": "C-100",
            "status": "Ordered",
            "created_by": 2,
            "last_modified_by": 2,
            "created_at": "2026-08-01T10:00:00Z",
            "updated_at": "2026-08-01T10:00:00Z"
        });
        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.id, OrderId::new(1));
        assert!(!order.is_deleted);
        assert!(!order.has_evidence());
        assert!(order.created_by_user.is_none());
    }

    #[test]
    fn tracking_miss_decodes_from_found_false_alone() {
        let report: TrackingReport = serde_json::from_str("{\"found\": false}").unwrap();
        assert!(!report.found);
        assert!(report.status.is_none());
    }
}
