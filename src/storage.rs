use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Key-value persistence gateway. Values are opaque strings; callers own
/// JSON encoding and decoding.
pub trait Storage {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
    fn clear(&mut self);
}

/// File-backed store keeping one `<key>.json` file per key under a
/// directory. Save failures are reported to stderr and otherwise ignored;
/// reads treat any IO error as a missing key.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&mut self, key: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.dir) {
            eprintln!("Failed to create data directory: {}", err);
            return;
        }
        if let Err(err) = fs::write(self.path_for(key), value) {
            eprintln!("Failed to save {}: {}", key, err);
        }
    }

    fn clear(&mut self) {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return;
        };
        for entry in entries.flatten() {
            if entry.path().extension().is_some_and(|ext| ext == "json") {
                let _ = fs::remove_file(entry.path());
            }
        }
    }
}

/// In-memory store, used as the persistence double in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
