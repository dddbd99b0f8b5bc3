//! Session registry: every session known to one student, in insertion order.

use super::model::Session;
use crate::ids::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of [`SessionRegistry::create_or_select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A new session was appended.
    Created,
    /// An existing session had its `last_accessed` refreshed.
    Refreshed,
}

/// Ordered collection of sessions, persisted as a JSON array.
///
/// Session ids are unique within a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRegistry {
    sessions: Vec<Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new session, or refreshes `last_accessed` of an existing one
    /// without moving it.
    pub fn create_or_select(&mut self, id: &SessionId, now: DateTime<Utc>) -> Selection {
        match self.sessions.iter_mut().find(|s| &s.id == id) {
            Some(existing) => {
                existing.last_accessed = now;
                Selection::Refreshed
            }
            None => {
                self.sessions.push(Session::new(id.clone(), now));
                Selection::Created
            }
        }
    }

    /// Removes the session with `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: &SessionId) -> Option<Session> {
        let index = self.sessions.iter().position(|s| &s.id == id)?;
        Some(self.sessions.remove(index))
    }

    pub fn find(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| &s.id == id)
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.find(id).is_some()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn ids(&self) -> impl Iterator<Item = &SessionId> {
        self.sessions.iter().map(|s| &s.id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 24, 10, minute, 0).unwrap()
    }

    fn sid(raw: &str) -> SessionId {
        SessionId::parse(raw).unwrap()
    }

    #[test]
    fn test_create_then_select_keeps_created_at() {
        let mut registry = SessionRegistry::new();

        assert_eq!(registry.create_or_select(&sid("Lesson1"), t(0)), Selection::Created);
        assert_eq!(registry.create_or_select(&sid("Lesson1"), t(5)), Selection::Refreshed);

        assert_eq!(registry.len(), 1);
        let session = registry.find(&sid("Lesson1")).unwrap();
        assert_eq!(session.created_at, t(0));
        assert_eq!(session.last_accessed, t(5));
    }

    #[test]
    fn test_refresh_keeps_order_and_other_sessions() {
        let mut registry = SessionRegistry::new();
        registry.create_or_select(&sid("A"), t(0));
        registry.create_or_select(&sid("B"), t(1));
        registry.create_or_select(&sid("C"), t(2));

        registry.create_or_select(&sid("A"), t(9));

        let ids: Vec<_> = registry.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(registry.find(&sid("B")).unwrap().last_accessed, t(1));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut registry = SessionRegistry::new();
        for (i, id) in ["A", "B", "C"].iter().enumerate() {
            registry.create_or_select(&sid(id), t(i as u32));
        }

        let removed = registry.remove(&sid("B")).unwrap();

        assert_eq!(removed.id.as_str(), "B");
        let ids: Vec<_> = registry.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert!(registry.remove(&sid("missing")).is_none());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut registry = SessionRegistry::new();
        registry.create_or_select(&sid("Lesson1"), t(0));
        let json = serde_json::to_value(&registry).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "Lesson1");
    }
}
