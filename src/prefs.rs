//! Durable preferences: a string key-value store with one well-known key.
//!
//! The engine persists a single boolean (whether background music is
//! enabled) as the literal strings `"true"`/`"false"`. Store failures
//! degrade to "no stored preference"; the engine's public contract never
//! surfaces them.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Key under which the music-enabled boolean is stored.
pub const MUSIC_ENABLED_KEY: &str = "music_enabled";

pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);
}

/// Volatile store for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// File-backed store: one `key=value` line per entry, rewritten on every set.
///
/// Reads and writes swallow IO errors: an unreadable file behaves like an
/// empty store, and a failed write leaves the in-memory values intact so the
/// session still behaves consistently.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut values = HashMap::new();
        if let Ok(contents) = fs::read_to_string(&path) {
            for line in contents.lines() {
                if let Some((key, value)) = line.split_once('=') {
                    values.insert(key.to_string(), value.to_string());
                }
            }
        }
        Self { path, values }
    }

    fn persist(&self) {
        let mut entries: Vec<_> = self.values.iter().collect();
        entries.sort();
        let contents: String = entries
            .into_iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect();
        let _ = fs::write(&self.path, contents);
    }
}

impl PrefStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chime-prefs-{}-{name}", std::process::id()))
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(MUSIC_ENABLED_KEY), None);
        store.set(MUSIC_ENABLED_KEY, "true");
        assert_eq!(store.get(MUSIC_ENABLED_KEY), Some("true".to_string()));
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = temp_path("reopen");
        {
            let mut store = FileStore::open(&path);
            store.set(MUSIC_ENABLED_KEY, "true");
        }
        let store = FileStore::open(&path);
        assert_eq!(store.get(MUSIC_ENABLED_KEY), Some("true".to_string()));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let store = FileStore::open(Path::new("/nonexistent/chime-prefs"));
        assert_eq!(store.get(MUSIC_ENABLED_KEY), None);
    }

    #[test]
    fn malformed_lines_are_ignored() {
        let path = temp_path("malformed");
        fs::write(&path, "not a pair\nmusic_enabled=false\n").unwrap();
        let store = FileStore::open(&path);
        assert_eq!(store.get(MUSIC_ENABLED_KEY), Some("false".to_string()));
        assert_eq!(store.get("not a pair"), None);
        let _ = fs::remove_file(&path);
    }
}
