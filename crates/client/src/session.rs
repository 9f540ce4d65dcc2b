//! Session store: login, restore, logout, and the "who am I" refresh.
//!
//! Owns the process-wide `Option<Session>`. Every successful login or
//! restore and every logout writes through the vault synchronously; those
//! are the only durable effects in the crate.

use std::sync::Arc;

use waybill_auth::{Principal, Session};
use waybill_core::Role;

use crate::gateway::Gateway;
use crate::vault::{PersistedSession, SessionVault};

pub struct SessionStore {
    gateway: Gateway,
    vault: Arc<dyn SessionVault>,
    session: Option<Session>,
    loading: bool,
    error: Option<String>,
}

impl SessionStore {
    pub fn new(gateway: Gateway, vault: Arc<dyn SessionVault>) -> Self {
        Self {
            gateway,
            vault,
            session: None,
            loading: false,
            error: None,
        }
    }

    /// Reinstall a previously persisted session, if any.
    ///
    /// The pair is adopted without revalidating against the gateway; a stale
    /// token surfaces on the first authenticated call (or an explicit
    /// [`SessionStore::refresh_principal`]). An empty vault is not an error.
    pub fn restore(&mut self) {
        let Some(saved) = self.vault.load() else {
            return;
        };
        tracing::debug!(username = %saved.principal.username, "restored persisted session");
        self.gateway.set_token(&saved.token);
        self.session = Some(Session::new(saved.token, saved.principal));
    }

    /// Authenticate against the gateway.
    ///
    /// On failure the previous session (if any) is left untouched and the
    /// gateway's message is recorded for the UI; nothing is thrown.
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        self.loading = true;
        self.error = None;

        let result = self.gateway.login(username, password).await;
        self.loading = false;

        match result {
            Ok(response) => {
                tracing::info!(username = %response.user.username, "login succeeded");
                self.gateway.set_token(&response.token);
                self.vault.save(&PersistedSession {
                    token: response.token.clone(),
                    principal: response.user.clone(),
                });
                self.session = Some(Session::new(response.token, response.user));
                true
            }
            Err(err) => {
                tracing::warn!(username, error = %err, "login failed");
                self.error = Some(err.to_string());
                false
            }
        }
    }

    /// Discard the session locally and durably. Never fails and makes no
    /// network call.
    pub fn logout(&mut self) {
        self.session = None;
        self.error = None;
        self.vault.clear();
        self.gateway.clear_token();
        tracing::debug!("session cleared");
    }

    /// Re-fetch the principal behind the current token, picking up
    /// server-side role changes. Any failure means the token is no longer
    /// trustworthy and tears the session down exactly like [`Self::logout`].
    pub async fn refresh_principal(&mut self) {
        if self.session.is_none() {
            return;
        }

        match self.gateway.current_principal().await {
            Ok(principal) => {
                if let Some(session) = &mut self.session {
                    self.vault.save(&PersistedSession {
                        token: session.token.clone(),
                        principal: principal.clone(),
                    });
                    session.principal = principal;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "principal refresh failed; tearing session down");
                self.logout();
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.session.as_ref().map(|s| &s.principal)
    }

    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(Session::role)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
