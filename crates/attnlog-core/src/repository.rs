//! Typed access to the keyed store.
//!
//! `LogbookRepository` owns the JSON encoding of every persisted value. A
//! missing key always decodes to the empty value for that entity.

use crate::error::Result;
use crate::ids::{SessionId, StudentId};
use crate::log::{Action, LogList, LogPair, LogRecord};
use crate::session::SessionRegistry;
use crate::store::{KeyedStore, LogScope, StoreKey};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Repository over a [`KeyedStore`] for identities, registries and log lists.
#[derive(Clone)]
pub struct LogbookRepository {
    store: Arc<dyn KeyedStore>,
    max_entries: usize,
}

impl LogbookRepository {
    /// Creates a repository whose log lists are capped at `max_entries`.
    pub fn new(store: Arc<dyn KeyedStore>, max_entries: usize) -> Self {
        Self { store, max_entries }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    // ============================================================================
    // Raw access
    // ============================================================================

    async fn get_raw(&self, key: &StoreKey) -> Result<Option<String>> {
        let key = key.as_key();
        tracing::debug!(key = %key, "store get");
        self.store.get(&key).await
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>> {
        match self.get_raw(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &StoreKey, value: &str) -> Result<()> {
        let key = key.as_key();
        tracing::debug!(key = %key, bytes = value.len(), "store set");
        self.store.set(&key, value).await
    }

    async fn set_json<T: Serialize + ?Sized>(&self, key: &StoreKey, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json).await
    }

    async fn remove(&self, key: &StoreKey) -> Result<()> {
        let key = key.as_key();
        tracing::debug!(key = %key, "store remove");
        self.store.remove(&key).await
    }

    // ============================================================================
    // Identity
    // ============================================================================

    /// Loads the persisted student id. A blank stored value counts as absent.
    pub async fn load_identity(&self) -> Result<Option<StudentId>> {
        Ok(self
            .get_raw(&StoreKey::Identity)
            .await?
            .and_then(|raw| StudentId::parse(&raw).ok()))
    }

    pub async fn save_identity(&self, student: &StudentId) -> Result<()> {
        self.set_raw(&StoreKey::Identity, student.as_str()).await
    }

    pub async fn remove_identity(&self) -> Result<()> {
        self.remove(&StoreKey::Identity).await
    }

    // ============================================================================
    // Active session
    // ============================================================================

    pub async fn load_active_session(&self) -> Result<Option<SessionId>> {
        Ok(self
            .get_raw(&StoreKey::ActiveSession)
            .await?
            .and_then(|raw| SessionId::parse(&raw).ok()))
    }

    pub async fn save_active_session(&self, session: &SessionId) -> Result<()> {
        self.set_raw(&StoreKey::ActiveSession, session.as_str()).await
    }

    pub async fn remove_active_session(&self) -> Result<()> {
        self.remove(&StoreKey::ActiveSession).await
    }

    // ============================================================================
    // Session registry
    // ============================================================================

    pub async fn load_registry(&self, student: &StudentId) -> Result<SessionRegistry> {
        Ok(self
            .get_json(&StoreKey::Registry(student.clone()))
            .await?
            .unwrap_or_default())
    }

    pub async fn save_registry(&self, student: &StudentId, registry: &SessionRegistry) -> Result<()> {
        self.set_json(&StoreKey::Registry(student.clone()), registry).await
    }

    pub async fn remove_registry(&self, student: &StudentId) -> Result<()> {
        self.remove(&StoreKey::Registry(student.clone())).await
    }

    // ============================================================================
    // Log lists
    // ============================================================================

    pub async fn load_log(&self, scope: &LogScope, action: Action) -> Result<LogList> {
        let records: Vec<LogRecord> = self
            .get_json(&StoreKey::log(scope, action))
            .await?
            .unwrap_or_default();
        Ok(LogList::from_records(records, self.max_entries))
    }

    pub async fn save_log(&self, scope: &LogScope, action: Action, list: &LogList) -> Result<()> {
        self.set_json(&StoreKey::log(scope, action), list.records()).await
    }

    pub async fn remove_log(&self, scope: &LogScope, action: Action) -> Result<()> {
        self.remove(&StoreKey::log(scope, action)).await
    }

    /// Loads both lists of a scope straight from the store.
    pub async fn load_pair(&self, scope: &LogScope) -> Result<LogPair> {
        Ok(LogPair {
            attentive: self.load_log(scope, Action::Attentive).await?,
            bored: self.load_log(scope, Action::Bored).await?,
        })
    }

    /// Removes both list keys of a scope, attentive first.
    pub async fn remove_pair(&self, scope: &LogScope) -> Result<()> {
        for action in Action::ALL {
            self.remove_log(scope, action).await?;
        }
        Ok(())
    }
}
