//! Session identity store.
//!
//! Holds the authenticated user's display name as one process-wide
//! observable value with explicit `get`/`set`/`clear`/`subscribe`
//! operations. Presence of an identity is equivalent to "authenticated";
//! the shell gates every screen on it.
//!
//! Persistence scope is durable-until-cleared: the identity is written
//! to a JSON file under the config dir and survives restarts, and only
//! `clear()` (the logout path) removes it. The store performs no
//! validation and no network work; the auth flow's success path is the
//! only writer.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::watch;

use crate::settings::Settings;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    username: Option<String>,
}

pub struct SessionStore {
    value: watch::Sender<Option<String>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Load the session from the default location.
    pub fn load() -> Self {
        Self::load_from(Settings::config_dir().map(|dir| dir.join("session.json")))
    }

    /// Load from an explicit path, or create an unpersisted store.
    ///
    /// A missing or malformed file is treated as signed out.
    pub fn load_from(path: Option<PathBuf>) -> Self {
        let initial = path.as_deref().and_then(read_session_file);
        let (value, _) = watch::channel(initial);
        Self { value, path }
    }

    /// Current identity, if any.
    pub fn get(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    /// Replace the identity. Persists and notifies subscribers.
    pub fn set(&self, identity: impl Into<String>) -> Result<()> {
        self.replace(Some(identity.into()))
    }

    /// Remove the identity. Persists and notifies subscribers.
    pub fn clear(&self) -> Result<()> {
        self.replace(None)
    }

    /// Observe identity changes (the shell re-evaluates gating on each).
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.value.subscribe()
    }

    fn replace(&self, identity: Option<String>) -> Result<()> {
        if let Some(path) = &self.path {
            write_session_file(path, &identity)?;
        }
        self.value.send_replace(identity);
        Ok(())
    }
}

fn read_session_file(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<SessionFile>(&contents) {
        Ok(session) => session.username,
        Err(e) => {
            crate::verbose!("Ignoring malformed session file: {e}");
            None
        }
    }
}

fn write_session_file(path: &Path, username: &Option<String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    let contents = serde_json::to_string_pretty(&SessionFile {
        username: username.clone(),
    })
    .context("Failed to serialize session")?;
    std::fs::write(path, contents).context("Failed to write session file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let store = SessionStore::load_from(None);
        assert_eq!(store.get(), None);

        store.set("Ann").unwrap();
        assert_eq!(store.get().as_deref(), Some("Ann"));

        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_set_replaces_previous_identity() {
        let store = SessionStore::load_from(None);
        store.set("Ann").unwrap();
        store.set("Bob").unwrap();
        assert_eq!(store.get().as_deref(), Some("Bob"));
    }

    #[test]
    fn test_subscribers_see_changes() {
        let store = SessionStore::load_from(None);
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.set("Ann").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_deref(), Some("Ann"));

        store.clear().unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), None);
    }

    #[test]
    fn test_identity_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::load_from(Some(path.clone()));
        store.set("Ann").unwrap();
        drop(store);

        let reloaded = SessionStore::load_from(Some(path.clone()));
        assert_eq!(reloaded.get().as_deref(), Some("Ann"));

        reloaded.clear().unwrap();
        let reloaded_again = SessionStore::load_from(Some(path));
        assert_eq!(reloaded_again.get(), None);
    }

    #[test]
    fn test_malformed_file_treated_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = SessionStore::load_from(Some(path));
        assert_eq!(store.get(), None);
    }
}
