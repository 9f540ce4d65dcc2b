//! Shared fixtures for gateway-backed tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::MockServer;

use waybill_client::{Gateway, GatewayConfig};

pub fn gateway_for(server: &MockServer) -> Gateway {
    Gateway::new(GatewayConfig::new(server.uri()))
}

pub fn order_json(id: i64, invoice_number: &str, status: &str) -> Value {
    json!({
        "id": id,
        "invoice_number": invoice_number,
        "customer_name": "Acme Distribution",
        "customer_number": "C-100",
        "status": status,
        "delivery_address": "12 Dock Road",
        "notes": "",
        "evidence_photo_url": "",
        "is_deleted": false,
        "created_by": 1,
        "last_modified_by": 1,
        "created_at": "2026-08-01T10:00:00Z",
        "updated_at": "2026-08-01T10:00:00Z"
    })
}

pub fn principal_json(id: i64, username: &str, role: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "role": role,
        "department": "Operations",
        "full_name": "Test Operator",
        "email": "op@example.com"
    })
}

pub fn user_json(id: i64, username: &str, role: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "role": role,
        "department": "Operations",
        "full_name": "Test Operator",
        "email": "op@example.com",
        "is_active": true,
        "created_at": "2026-08-01T10:00:00Z",
        "updated_at": "2026-08-01T10:00:00Z"
    })
}
