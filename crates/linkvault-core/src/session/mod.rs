//! Session store: the single auth token held by the client.
//!
//! The token is the only client state persisted across runs. `SessionStore`
//! is the one place it is read from or written to; consumers that need to
//! react to sign-in or sign-out subscribe to changes instead of re-reading the
//! persistence backend.

mod file;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tokio::sync::watch;

pub use file::FileTokenStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session token must not be empty")]
    EmptyToken,
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Backend that keeps the token across restarts.
pub trait TokenPersistence: Send + Sync + 'static {
    fn load_token(&self) -> SessionResult<Option<String>>;
    fn save_token(&self, token: &str) -> SessionResult<()>;
    fn clear_token(&self) -> SessionResult<()>;
}

/// Volatile persistence, used by tests and by one-shot shared-page views.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenPersistence for MemoryTokenStore {
    fn load_token(&self) -> SessionResult<Option<String>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save_token(&self, token: &str) -> SessionResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> SessionResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

struct SessionInner {
    persistence: Box<dyn TokenPersistence>,
    current: watch::Sender<Option<String>>,
}

/// Cloneable handle to the process-wide session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    /// Open the store, loading any token left by a previous run.
    pub fn open(persistence: impl TokenPersistence) -> SessionResult<Self> {
        let token = persistence
            .load_token()?
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        let (current, _) = watch::channel(token);
        Ok(Self {
            inner: Arc::new(SessionInner {
                persistence: Box::new(persistence),
                current,
            }),
        })
    }

    /// A store with no persisted token and nothing written to disk.
    pub fn in_memory() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(SessionInner {
                persistence: Box::new(MemoryTokenStore::default()),
                current,
            }),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.inner.current.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.current.borrow().is_some()
    }

    /// Replace the held token. The previous token, if any, is dropped.
    pub fn set(&self, token: &str) -> SessionResult<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        self.inner.persistence.save_token(token)?;
        self.inner.current.send_replace(Some(token.to_string()));
        tracing::info!("Session token stored");
        Ok(())
    }

    pub fn clear(&self) -> SessionResult<()> {
        self.inner.persistence.clear_token()?;
        if self.inner.current.send_replace(None).is_some() {
            tracing::info!("Session token cleared");
        }
        Ok(())
    }

    /// Receiver that observes every token change after this call.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.inner.current.subscribe()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.is_signed_in() {
            "[REDACTED]"
        } else {
            "None"
        };
        formatter
            .debug_struct("SessionStore")
            .field("token", &token)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_loads_persisted_token() {
        let store = SessionStore::open(MemoryTokenStore::with_token("persisted")).unwrap();
        assert!(store.is_signed_in());
        assert_eq!(store.token().as_deref(), Some("persisted"));
    }

    #[test]
    fn blank_persisted_token_counts_as_signed_out() {
        let store = SessionStore::open(MemoryTokenStore::with_token("  ")).unwrap();
        assert!(!store.is_signed_in());
    }

    #[test]
    fn set_replaces_previous_token() {
        let store = SessionStore::in_memory();
        store.set("first").unwrap();
        store.set("second").unwrap();
        assert_eq!(store.token().as_deref(), Some("second"));
    }

    #[test]
    fn set_rejects_empty_token() {
        let store = SessionStore::in_memory();
        assert!(matches!(store.set(" "), Err(SessionError::EmptyToken)));
        assert!(!store.is_signed_in());
    }

    #[test]
    fn clones_share_one_session() {
        let store = SessionStore::in_memory();
        let other = store.clone();
        store.set("shared").unwrap();
        assert_eq!(other.token().as_deref(), Some("shared"));
        other.clear().unwrap();
        assert!(!store.is_signed_in());
    }

    #[tokio::test]
    async fn subscribers_observe_sign_in_and_sign_out() {
        let store = SessionStore::in_memory();
        let mut changes = store.subscribe();

        store.set("token").unwrap();
        changes.changed().await.unwrap();
        assert_eq!(changes.borrow_and_update().as_deref(), Some("token"));

        store.clear().unwrap();
        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow_and_update(), None);
    }

    #[test]
    fn debug_redacts_token() {
        let store = SessionStore::in_memory();
        store.set("secret-token").unwrap();
        let rendered = format!("{store:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
