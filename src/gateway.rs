//! Persistence boundary of the importer.
//!
//! The pipeline never talks to a database directly. It asks a
//! [`PersistenceGateway`] for the importing user once, then hands every
//! [`NormalizedEntry`] over one at a time. Each insert can fail on its own
//! without affecting the others.
//!
//! [`MemoryGateway`] keeps everything in memory. The command-line tool uses
//! it to collect the entries it writes out, and tests use it to inspect what
//! an import produced.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entry::NormalizedEntry;
use crate::error::GatewayError;

/// Identifier assigned to an inserted mood entry.
pub type EntryId = i64;

/// A user row as returned by [`PersistenceGateway::ensure_user`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
}

/// Storage operations the import pipeline depends on.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Returns the user with this email, creating it if needed.
    ///
    /// Calling this twice with the same email must return the same user.
    async fn ensure_user(&self, email: &str) -> Result<UserRecord, GatewayError>;

    /// Inserts a single mood entry.
    async fn insert_mood_entry(&self, entry: &NormalizedEntry) -> Result<EntryId, GatewayError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<UserRecord>,
    entries: Vec<(EntryId, NormalizedEntry)>,
}

/// Thread-safe in-memory [`PersistenceGateway`].
///
/// User and entry ids start at 1 and increase by one per insert.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: Mutex<MemoryState>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, GatewayError> {
        self.state
            .lock()
            .map_err(|_| GatewayError::Unavailable("memory store lock poisoned".to_string()))
    }

    /// Returns a snapshot of the stored entries, in insertion order.
    pub fn entries(&self) -> Vec<NormalizedEntry> {
        self.lock()
            .map(|state| state.entries.iter().map(|(_, e)| e.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns a snapshot of the known users.
    pub fn users(&self) -> Vec<UserRecord> {
        self.lock()
            .map(|state| state.users.clone())
            .unwrap_or_default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().map(|state| state.entries.len()).unwrap_or(0)
    }

    /// Returns `true` if no entry has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn ensure_user(&self, email: &str) -> Result<UserRecord, GatewayError> {
        let mut state = self.lock()?;
        if let Some(user) = state.users.iter().find(|u| u.email == email) {
            return Ok(user.clone());
        }
        let user = UserRecord {
            id: state.users.len() as i64 + 1,
            email: email.to_string(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn insert_mood_entry(&self, entry: &NormalizedEntry) -> Result<EntryId, GatewayError> {
        let mut state = self.lock()?;
        if !state.users.iter().any(|u| u.id == entry.user_id) {
            return Err(GatewayError::NotFound(format!("user {}", entry.user_id)));
        }
        let id = state.entries.len() as EntryId + 1;
        state.entries.push((id, entry.clone()));
        Ok(id)
    }
}
