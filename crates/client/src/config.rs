//! Gateway endpoint configuration.

/// Where the remote API gateway lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:8080/api`.
    pub base_url: String,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read the gateway location from `WAYBILL_API_URL`, falling back to the
    /// local development gateway.
    pub fn from_env() -> Self {
        let base_url = std::env::var("WAYBILL_API_URL").unwrap_or_else(|_| {
            tracing::warn!("WAYBILL_API_URL not set; using local dev gateway");
            "http://localhost:8080/api".to_string()
        });
        Self { base_url }
    }
}
