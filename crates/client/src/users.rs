//! User directory manager.
//!
//! The same shape as the order store, minus the lifecycle machinery: user
//! records have no status machine and no recycle bin, so deletion is plain
//! removal from the local collection. Credential fields on drafts are
//! forwarded to the gateway and never stored here.

use waybill_core::{UserDraft, UserId, UserRecord};

use crate::gateway::{Gateway, GatewayError};

pub struct UserStore {
    gateway: Gateway,
    users: Vec<UserRecord>,
    current: Option<UserRecord>,
    loading: bool,
    error: Option<String>,
}

impl UserStore {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            users: Vec::new(),
            current: None,
            loading: false,
            error: None,
        }
    }

    /// Replace the local collection with the gateway's result set.
    pub async fn list(&mut self) -> bool {
        self.begin();
        match self.gateway.list_users().await {
            Ok(users) => {
                tracing::debug!(count = users.len(), "user listing refreshed");
                self.users = users;
                self.loading = false;
                true
            }
            Err(err) => self.fail("user listing failed", err),
        }
    }

    pub async fn get(&mut self, id: UserId) -> Option<UserRecord> {
        self.begin();
        match self.gateway.get_user(id).await {
            Ok(user) => {
                self.current = Some(user.clone());
                self.loading = false;
                Some(user)
            }
            Err(err) => {
                self.fail("user fetch failed", err);
                None
            }
        }
    }

    pub async fn create(&mut self, draft: &UserDraft) -> Option<UserRecord> {
        self.begin();
        match self.gateway.create_user(draft).await {
            Ok(user) => {
                tracing::info!(id = %user.id, username = %user.username, "user created");
                self.users.insert(0, user.clone());
                self.loading = false;
                Some(user)
            }
            Err(err) => {
                self.fail("user creation failed", err);
                None
            }
        }
    }

    pub async fn update(&mut self, id: UserId, draft: &UserDraft) -> Option<UserRecord> {
        self.begin();
        match self.gateway.update_user(id, draft).await {
            Ok(user) => {
                if let Some(slot) = self.users.iter_mut().find(|u| u.id == id) {
                    *slot = user.clone();
                }
                self.loading = false;
                Some(user)
            }
            Err(err) => {
                self.fail("user update failed", err);
                None
            }
        }
    }

    /// Delete a user; on success the record is removed from the local
    /// collection immediately.
    pub async fn delete(&mut self, id: UserId) -> bool {
        self.begin();
        match self.gateway.delete_user(id).await {
            Ok(()) => {
                tracing::info!(id = %id, "user deleted");
                self.users.retain(|u| u.id != id);
                self.loading = false;
                true
            }
            Err(err) => self.fail("user deletion failed", err),
        }
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn current(&self) -> Option<&UserRecord> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, what: &str, err: GatewayError) -> bool {
        tracing::warn!(error = %err, "{what}");
        self.error = Some(err.to_string());
        self.loading = false;
        false
    }
}
