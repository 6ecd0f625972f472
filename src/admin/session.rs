use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Keyed cache of live observer sessions with a fixed TTL, injected into
/// `AppState` rather than held as process-global state. Expired entries
/// are dropped lazily on issue and on lookup.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, DateTime<Utc>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn issue(&self) -> (Uuid, DateTime<Utc>) {
        self.purge_expired();

        let token = Uuid::new_v4();
        let expires_at = Utc::now() + self.ttl;
        self.sessions.insert(token, expires_at);
        (token, expires_at)
    }

    pub fn verify(&self, token: &Uuid) -> bool {
        let expired = match self.sessions.get(token) {
            Some(entry) => *entry <= Utc::now(),
            None => return false,
        };

        if expired {
            self.sessions.remove(token);
            return false;
        }
        true
    }

    pub fn revoke(&self, token: &Uuid) -> bool {
        self.sessions.remove(token).is_some()
    }

    fn purge_expired(&self) {
        let now = Utc::now();
        self.sessions.retain(|_, expires_at| *expires_at > now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_verifies() {
        let store = SessionStore::new(Duration::minutes(60));
        let (token, expires_at) = store.issue();
        assert!(expires_at > Utc::now());
        assert!(store.verify(&token));
    }

    #[test]
    fn test_unknown_token_rejected() {
        let store = SessionStore::new(Duration::minutes(60));
        assert!(!store.verify(&Uuid::new_v4()));
    }

    #[test]
    fn test_expired_token_rejected_and_removed() {
        let store = SessionStore::new(Duration::minutes(-1));
        let (token, _) = store.issue();
        assert!(!store.verify(&token));
        // the second lookup hits the already-removed path
        assert!(!store.verify(&token));
    }

    #[test]
    fn test_revoked_token_rejected() {
        let store = SessionStore::new(Duration::minutes(60));
        let (token, _) = store.issue();
        assert!(store.revoke(&token));
        assert!(!store.verify(&token));
        assert!(!store.revoke(&token));
    }
}
