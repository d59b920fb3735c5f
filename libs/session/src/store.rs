//! Session store holding the authentication token and user id
//!
//! A store starts unbound, gets bound to a persistent namespace once at
//! startup, and is then cloned into whatever needs credentials. Reads on
//! an unbound store answer absent/0 and writes are dropped with a warning;
//! that misbehavior is deliberate and observable rather than masked.

use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use crate::backend::KeyValueBackend;
use crate::error::SessionResult;

const KEY_TOKEN: &str = "auth_token";
const KEY_USER_ID: &str = "user_id";

/// Snapshot of who is currently logged in
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// Opaque bearer token, absent when logged out
    pub token: Option<String>,
    /// Numeric user id, 0 when logged out
    pub user_id: i64,
}

/// Durable store for the current session, cheap to clone and share.
///
/// The token write path is synchronous: when `save_token` returns, the
/// very next outgoing request is guaranteed to read the new token. The
/// user id write is fire-and-forget since it is only read later and never
/// participates in the login transaction.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<OnceLock<Arc<dyn KeyValueBackend>>>,
}

impl SessionStore {
    /// Create a store bound to `backend`
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        let store = Self::unbound();
        store.bind(backend);
        store
    }

    /// Create a store with no persistent namespace attached yet
    pub fn unbound() -> Self {
        SessionStore {
            backend: Arc::new(OnceLock::new()),
        }
    }

    /// Attach the persistent namespace.
    ///
    /// The first bind wins; a later call is ignored so repeated
    /// initialization stays harmless.
    pub fn bind(&self, backend: impl KeyValueBackend + 'static) {
        let backend: Arc<dyn KeyValueBackend> = Arc::new(backend);
        if self.backend.set(backend).is_err() {
            info!("session store already bound, ignoring rebind");
        }
    }

    /// Whether a persistent namespace is attached
    pub fn is_bound(&self) -> bool {
        self.backend.get().is_some()
    }

    fn backend(&self) -> Option<&Arc<dyn KeyValueBackend>> {
        self.backend.get()
    }

    /// Persist the auth token, durable before return
    pub fn save_token(&self, token: &str) -> SessionResult<()> {
        match self.backend() {
            Some(backend) => {
                backend.set(KEY_TOKEN, token)?;
                info!("session token saved");
                Ok(())
            }
            None => {
                warn!("session store not bound, token not saved");
                Ok(())
            }
        }
    }

    /// Last saved token, absent when none was saved or the store is unbound
    pub fn token(&self) -> Option<String> {
        self.backend()?
            .get(KEY_TOKEN)
            .filter(|token| !token.is_empty())
    }

    /// Persist the user id.
    ///
    /// Fire-and-forget: a failed write is logged and swallowed.
    pub fn save_user_id(&self, id: i64) {
        match self.backend() {
            Some(backend) => {
                if let Err(e) = backend.set(KEY_USER_ID, &id.to_string()) {
                    warn!("failed to persist user id: {}", e);
                }
            }
            None => warn!("session store not bound, user id not saved"),
        }
    }

    /// Saved user id, 0 when absent or unbound
    pub fn user_id(&self) -> i64 {
        self.backend()
            .and_then(|backend| backend.get(KEY_USER_ID))
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    }

    /// Current token and user id in one snapshot
    pub fn session(&self) -> Session {
        Session {
            token: self.token(),
            user_id: self.user_id(),
        }
    }

    /// Synchronously erase everything stored for the current session
    pub fn clear(&self) -> SessionResult<()> {
        match self.backend() {
            Some(backend) => {
                backend.clear()?;
                info!("session cleared");
                Ok(())
            }
            None => {
                warn!("session store not bound, nothing to clear");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FileBackend, MemoryBackend};

    #[test]
    fn save_then_read_token() -> SessionResult<()> {
        let store = SessionStore::new(MemoryBackend::new());

        store.save_token("abc")?;
        assert_eq!(store.token(), Some("abc".to_string()));

        store.save_token("def")?;
        assert_eq!(store.token(), Some("def".to_string()));

        Ok(())
    }

    #[test]
    fn clear_resets_token_and_user_id() -> SessionResult<()> {
        let store = SessionStore::new(MemoryBackend::new());

        store.save_token("abc")?;
        store.save_user_id(7);
        store.clear()?;

        assert_eq!(store.token(), None);
        assert_eq!(store.user_id(), 0);

        Ok(())
    }

    #[test]
    fn unbound_store_reads_absent_and_drops_writes() -> SessionResult<()> {
        let store = SessionStore::unbound();

        assert_eq!(store.token(), None);
        assert_eq!(store.user_id(), 0);

        // writes are no-ops, not errors
        store.save_token("abc")?;
        store.save_user_id(7);
        store.clear()?;

        assert_eq!(store.token(), None);
        assert_eq!(store.user_id(), 0);

        Ok(())
    }

    #[test]
    fn first_bind_wins() -> SessionResult<()> {
        let store = SessionStore::unbound();
        store.bind(MemoryBackend::new());
        store.save_token("abc")?;

        // a second bind is ignored, the original namespace stays
        store.bind(MemoryBackend::new());
        assert_eq!(store.token(), Some("abc".to_string()));

        Ok(())
    }

    #[test]
    fn empty_token_reads_as_absent() -> SessionResult<()> {
        let store = SessionStore::new(MemoryBackend::new());
        store.save_token("")?;
        assert_eq!(store.token(), None);
        Ok(())
    }

    #[test]
    fn session_survives_store_reopen() -> SessionResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        let store = SessionStore::new(FileBackend::new(&path));
        store.save_token("abc")?;
        store.save_user_id(7);
        drop(store);

        let reopened = SessionStore::new(FileBackend::new(&path));
        assert_eq!(reopened.token(), Some("abc".to_string()));
        assert_eq!(reopened.user_id(), 7);
        assert_eq!(
            reopened.session(),
            Session {
                token: Some("abc".to_string()),
                user_id: 7
            }
        );

        Ok(())
    }
}
