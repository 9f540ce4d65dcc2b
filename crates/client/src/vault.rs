//! Durable session storage.
//!
//! The session vault is the only state that survives a process restart: one
//! credential token and its principal, written together and cleared
//! together. The port is deliberately tiny so tests can swap in
//! [`MemoryVault`] and binaries can use [`FileVault`].

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use waybill_auth::Principal;

/// The (token, principal) pair as persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    pub principal: Principal,
}

/// Key-value persistence port for the session.
///
/// Writes are synchronous and idempotent: each `save` fully replaces the
/// prior value. Persistence failures must never fail the caller — a session
/// that does not survive a restart is an inconvenience, not an error.
pub trait SessionVault: Send + Sync {
    fn load(&self) -> Option<PersistedSession>;
    fn save(&self, session: &PersistedSession);
    fn clear(&self);
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory vault
// ─────────────────────────────────────────────────────────────────────────────

/// Volatile vault for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryVault {
    slot: Mutex<Option<PersistedSession>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionVault for MemoryVault {
    fn load(&self) -> Option<PersistedSession> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, session: &PersistedSession) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed vault
// ─────────────────────────────────────────────────────────────────────────────

/// JSON-file vault under the platform data directory.
#[derive(Debug, Clone)]
pub struct FileVault {
    path: PathBuf,
}

impl FileVault {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Vault at the conventional per-user location
    /// (`<data dir>/waybill/session.json`).
    pub fn in_data_dir() -> anyhow::Result<Self> {
        let base = dirs::data_dir().context("no platform data directory available")?;
        Ok(Self::new(base.join("waybill").join("session.json")))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionVault for FileVault {
    fn load(&self) -> Option<PersistedSession> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read session vault");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                // A corrupt vault is treated as empty; the next save rewrites it.
                tracing::warn!(path = %self.path.display(), error = %err, "discarding unreadable session vault");
                None
            }
        }
    }

    fn save(&self, session: &PersistedSession) {
        let write = || -> anyhow::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let raw = serde_json::to_string(session).context("failed to encode session")?;
            fs::write(&self.path, raw)
                .with_context(|| format!("failed to write {}", self.path.display()))?;
            Ok(())
        };

        if let Err(err) = write() {
            tracing::warn!(error = %err, "session not persisted");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to clear session vault");
            }
        }
    }
}
