//! Storage adapters - file-backed and in-memory `StorageProvider`s.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;

use crate::ports::outbound::StorageProvider;

/// Preference storage as one small file per key under the platform
/// config directory.
///
/// Writes are best-effort: a failed write is logged and the remaining
/// keys are unaffected, matching browser local-storage semantics.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at the platform config directory. `None` when the
    /// platform provides no home directory at all.
    pub fn new() -> Option<Self> {
        let dirs = ProjectDirs::from("", "", "taleforge")?;
        Some(Self::at(dirs.config_dir().join("prefs")))
    }

    /// Storage rooted at an explicit directory (used by tests).
    pub fn at(dir: PathBuf) -> Self {
        if let Err(error) = std::fs::create_dir_all(&dir) {
            tracing::warn!(%error, dir = %dir.display(), "could not create preference directory");
        }
        Self { dir }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.pref"))
    }
}

impl StorageProvider for FileStorage {
    fn save(&self, key: &str, value: &str) {
        if let Err(error) = std::fs::write(self.path(key), value) {
            tracing::warn!(%error, key, "failed to persist preference");
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path(key)).ok()
    }

    fn remove(&self, key: &str) {
        if let Err(error) = std::fs::remove_file(self.path(key)) {
            if error.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(%error, key, "failed to remove preference");
            }
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.map.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl StorageProvider for MemoryStorage {
    fn save(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn load(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}
