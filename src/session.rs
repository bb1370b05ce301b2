use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

/// Maps session tokens to the username that logged in with them.
///
/// A registry is created when the server starts and lives until it shuts down; it is never
/// persisted. Clones share the same underlying map. Tokens never expire and there is no way to
/// revoke one, so a user may hold any number of valid tokens at once.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<String, String>>,
}

impl SessionRegistry {
    /// creates an empty registry
    pub fn new() -> Self {
        SessionRegistry::default()
    }

    /// Binds a fresh, unpredictable token to `username` and returns it.
    pub fn issue(&self, username: &str) -> String {
        loop {
            let token = Uuid::new_v4().to_string();
            // a token must never be reissued, even on a v4 collision
            if let Entry::Vacant(entry) = self.sessions.entry(token.clone()) {
                entry.insert(username.to_string());
                debug!(%username, "issued session token");
                return token;
            }
        }
    }

    /// returns the username bound to `token`, or `None` if the token was never issued
    pub fn resolve(&self, token: &str) -> Option<String> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }

    /// the number of sessions issued so far
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// returns `true` if no session was issued yet
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_resolve_to_their_user() {
        let registry = SessionRegistry::new();
        let first = registry.issue("alice");
        let second = registry.issue("alice");

        assert_ne!(first, second);
        assert_eq!(registry.resolve(&first).as_deref(), Some("alice"));
        assert_eq!(registry.resolve(&second).as_deref(), Some("alice"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unknown_token_does_not_resolve() {
        let registry = SessionRegistry::new();
        registry.issue("bob");
        assert_eq!(registry.resolve("not-a-token"), None);
    }

    #[test]
    fn clones_share_sessions() {
        let registry = SessionRegistry::new();
        let token = registry.clone().issue("bob");
        assert_eq!(registry.resolve(&token).as_deref(), Some("bob"));
    }
}
