use log::{debug, error};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const THEME_KEY: &str = "darbiter-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Key-value store for persisted operator preferences. Injected rather
/// than reached for as a global; all access happens on the control thread.
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);

    /// Stored theme, falling back to light when unset or unrecognizable.
    fn theme(&self) -> Theme {
        self.get(THEME_KEY)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or(Theme::Light)
    }

    fn set_theme(&mut self, theme: Theme) {
        self.set(THEME_KEY, theme.as_str());
    }
}

/// JSON-file-backed preference store: read once at construction, written
/// through on every set.
pub struct FilePrefStore {
    file_path: PathBuf,
    values: HashMap<String, String>,
}

impl FilePrefStore {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&file_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                error!("ignoring unreadable preference file {}: {}", file_path.display(), e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self { file_path, values }
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.values) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.file_path, json) {
                    error!("failed to persist preferences to {}: {}", self.file_path.display(), e);
                }
            }
            Err(e) => error!("failed to serialize preferences: {}", e),
        }
    }
}

impl PrefStore for FilePrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        debug!("preference {} = {}", key, value);
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }
}

/// In-memory store for tests and callers that opt out of persistence.
#[derive(Default)]
pub struct MemoryPrefStore {
    values: HashMap<String, String>,
}

impl PrefStore for MemoryPrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}
