// ── Session persistence ──
//
// The auth store's `{user, is_authenticated}` pair (plus the session
// cookie, so the next process can reuse it) survives restarts under the
// storage key `auth-storage`.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::model::SessionUser;

/// Storage key for the persisted session.
pub const SESSION_STORAGE_KEY: &str = "auth-storage";

const FORMAT_VERSION: u32 = 1;

/// The persisted subset of auth state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub user: Option<SessionUser>,
    pub is_authenticated: bool,
    /// `Cookie` header value captured after login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    state: PersistedSession,
    version: u32,
}

/// Durable storage for the persisted session.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<PersistedSession>, CoreError>;
    fn save(&self, session: &PersistedSession) -> Result<(), CoreError>;
    fn clear(&self) -> Result<(), CoreError>;
}

// ── File-backed store ───────────────────────────────────────────────

/// JSON file at `<dir>/auth-storage.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store inside `dir`, using the standard file name.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn persistence_error(action: &str, path: &Path, err: impl std::fmt::Display) -> CoreError {
    CoreError::Persistence {
        message: format!("failed to {action} {}: {err}", path.display()),
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<PersistedSession>, CoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(persistence_error("read", &self.path, e)),
        };
        let envelope: Envelope = serde_json::from_str(&raw)
            .map_err(|e| persistence_error("parse", &self.path, e))?;
        if envelope.version != FORMAT_VERSION {
            debug!(version = envelope.version, "ignoring session from another format version");
            return Ok(None);
        }
        Ok(Some(envelope.state))
    }

    fn save(&self, session: &PersistedSession) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| persistence_error("create", parent, e))?;
        }
        let envelope = Envelope {
            state: session.clone(),
            version: FORMAT_VERSION,
        };
        let json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| persistence_error("serialize", &self.path, e))?;
        std::fs::write(&self.path, json).map_err(|e| persistence_error("write", &self.path, e))?;

        // The file carries a live session cookie.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| persistence_error("chmod", &self.path, e))?;
        }

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(persistence_error("remove", &self.path, e)),
        }
    }
}

// ── In-memory store ─────────────────────────────────────────────────

/// Process-local store for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<PersistedSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with a session, as if a previous run had saved it.
    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<PersistedSession>, CoreError> {
        Ok(self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<(), CoreError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
