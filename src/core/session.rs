//! # Session Persistence
//!
//! Remembers who signed in, in `~/.zyna/session.json`.
//!
//! The navigation layer reads it exactly once, to choose the initial step
//! (`Main` when a session exists, `Auth` otherwise). The auth screen writes it
//! on sign-in.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub display_name: String,
    /// Unix timestamp, seconds.
    pub signed_in_at: i64,
}

impl Session {
    /// A fresh session signed in now.
    pub fn new(display_name: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            display_name: display_name.to_string(),
            signed_in_at: Utc::now().timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum SessionError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "session I/O error: {e}"),
            SessionError::Parse(e) => write!(f, "session parse error: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

/// File-backed store for the current session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nobody is signed in.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path).map_err(SessionError::Io)?;
        let session = serde_json::from_str(&json).map_err(SessionError::Parse)?;
        debug!("Loaded session from {}", self.path.display());
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(SessionError::Io)?;
        }
        atomic_write_json(&self.path, session)
    }

    /// Forget the session. Clearing an absent session is fine.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(e)),
        }
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), SessionError> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data).map_err(SessionError::Parse)?;
    fs::write(&tmp_path, json).map_err(SessionError::Io)?;
    fs::rename(&tmp_path, path).map_err(SessionError::Io)?;
    Ok(())
}
