//! HTTP client for the remote API gateway.
//!
//! One method per contract endpoint. The gateway is the system of record for
//! every entity; callers adopt whatever record a successful call returns.
//! [`Gateway`] is a cheap-clone handle: the stores in this crate each hold
//! one and share the underlying connection pool and bearer token slot.

use std::sync::{Arc, Mutex, PoisonError};

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use waybill_auth::Principal;
use waybill_core::{
    Order, OrderDraft, OrderFilters, OrderId, OrderStatus, TrackingReport, UserDraft, UserId,
    UserRecord,
};

use crate::config::GatewayConfig;

/// Failure of a gateway call.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway answered with a non-success status. `message` is the
    /// human-readable text from its error body, suitable for the UI as-is.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The request never produced a response (DNS, refused connection,
    /// malformed body, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl GatewayError {
    /// Whether this failure means the credential token is no longer good.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            GatewayError::Api { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }
}

/// Shape of the gateway's error bodies.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Successful authentication: a token and the principal it is bound to.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Principal,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    token: Mutex<Option<String>>,
}

/// Handle to the remote API gateway.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<Inner>,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                http: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                token: Mutex::new(None),
            }),
        }
    }

    /// Install the bearer token attached to every subsequent call.
    pub fn set_token(&self, token: &str) {
        *self.lock_token() = Some(token.to_string());
    }

    /// Drop the bearer token; subsequent calls go out unauthenticated.
    pub fn clear_token(&self) {
        *self.lock_token() = None;
    }

    pub fn has_token(&self) -> bool {
        self.lock_token().is_some()
    }

    fn lock_token(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.inner.token.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.lock_token().as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        Ok(Self::check(response).await?.json().await?)
    }

    async fn check(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Err(GatewayError::Api { status, message })
    }

    // ── Authentication ──────────────────────────────────────────────────────

    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, GatewayError> {
        let response = self
            .inner
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn current_principal(&self) -> Result<Principal, GatewayError> {
        let response = self
            .authorized(self.inner.http.get(self.url("/auth/me")))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    // ── Orders ──────────────────────────────────────────────────────────────

    pub async fn list_orders(&self, filters: &OrderFilters) -> Result<Vec<Order>, GatewayError> {
        let response = self
            .authorized(self.inner.http.get(self.url("/orders")))
            .query(&filter_params(filters))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn get_order(&self, id: OrderId) -> Result<Order, GatewayError> {
        let response = self
            .authorized(self.inner.http.get(self.url(&format!("/orders/{id}"))))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn create_order(&self, draft: &OrderDraft) -> Result<Order, GatewayError> {
        let response = self
            .authorized(self.inner.http.post(self.url("/orders")))
            .json(draft)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn update_order(
        &self,
        id: OrderId,
        draft: &OrderDraft,
    ) -> Result<Order, GatewayError> {
        let response = self
            .authorized(self.inner.http.put(self.url(&format!("/orders/{id}"))))
            .json(draft)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    /// Mark an order deleted. The gateway keeps the record (`is_deleted`)
    /// and no response body is required.
    pub async fn delete_order(&self, id: OrderId) -> Result<(), GatewayError> {
        let response = self
            .authorized(self.inner.http.delete(self.url(&format!("/orders/{id}"))))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn restore_order(&self, id: OrderId) -> Result<Order, GatewayError> {
        let response = self
            .authorized(
                self.inner
                    .http
                    .post(self.url(&format!("/orders/{id}/restore"))),
            )
            .send()
            .await?;
        Self::expect_json(response).await
    }

    /// Upload a proof-of-delivery photo, optionally advancing the status in
    /// the same call. The only multipart endpoint in the contract.
    pub async fn upload_evidence(
        &self,
        id: OrderId,
        photo: EvidencePhoto,
        status: Option<OrderStatus>,
    ) -> Result<Order, GatewayError> {
        let part = Part::bytes(photo.bytes)
            .file_name(photo.file_name)
            .mime_str(&photo.content_type)?;
        let mut form = Form::new().part("photo", part);
        if let Some(status) = status {
            form = form.text("status", status.as_str());
        }

        let response = self
            .authorized(
                self.inner
                    .http
                    .post(self.url(&format!("/orders/{id}/evidence"))),
            )
            .multipart(form)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    // ── Public tracking ─────────────────────────────────────────────────────

    /// Public tracking lookup; requires no session and sends no token.
    pub async fn track(
        &self,
        customer_number: &str,
        invoice_number: &str,
    ) -> Result<TrackingReport, GatewayError> {
        let response = self
            .inner
            .http
            .get(self.url("/track"))
            .query(&[
                ("customer_number", customer_number),
                ("invoice_number", invoice_number),
            ])
            .send()
            .await?;
        Self::expect_json(response).await
    }

    // ── User directory ──────────────────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<UserRecord>, GatewayError> {
        let response = self
            .authorized(self.inner.http.get(self.url("/users")))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn get_user(&self, id: UserId) -> Result<UserRecord, GatewayError> {
        let response = self
            .authorized(self.inner.http.get(self.url(&format!("/users/{id}"))))
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn create_user(&self, draft: &UserDraft) -> Result<UserRecord, GatewayError> {
        let response = self
            .authorized(self.inner.http.post(self.url("/users")))
            .json(draft)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn update_user(
        &self,
        id: UserId,
        draft: &UserDraft,
    ) -> Result<UserRecord, GatewayError> {
        let response = self
            .authorized(self.inner.http.put(self.url(&format!("/users/{id}"))))
            .json(draft)
            .send()
            .await?;
        Self::expect_json(response).await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<(), GatewayError> {
        let response = self
            .authorized(self.inner.http.delete(self.url(&format!("/users/{id}"))))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// A proof-of-delivery photo ready for upload.
#[derive(Debug, Clone)]
pub struct EvidencePhoto {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl EvidencePhoto {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn jpeg(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(file_name, "image/jpeg", bytes)
    }
}

fn filter_params(filters: &OrderFilters) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(invoice_number) = &filters.invoice_number {
        params.push(("invoice_number", invoice_number.clone()));
    }
    if let Some(customer_name) = &filters.customer_name {
        params.push(("customer_name", customer_name.clone()));
    }
    if let Some(customer_number) = &filters.customer_number {
        params.push(("customer_number", customer_number.clone()));
    }
    if let Some(status) = filters.status {
        params.push(("status", status.as_str().to_string()));
    }
    if filters.include_deleted {
        params.push(("include_deleted", "true".to_string()));
    }
    params
}
