//! Theme selection persisted through an injected key-value store.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::warn;

use crate::error::KvError;

/// Key under which the selected theme id is stored.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Dark,
    Light,
    Ocean,
    Forest,
}

impl ThemeId {
    /// Human-facing theme name.
    pub fn display_name(self) -> &'static str {
        match self {
            ThemeId::Dark => "Midnight",
            ThemeId::Light => "Clean",
            ThemeId::Ocean => "Ocean",
            ThemeId::Forest => "Forest",
        }
    }

    pub fn all() -> impl Iterator<Item = ThemeId> {
        ThemeId::iter()
    }
}

/// Persistence boundary for small client settings.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError>;
}

#[derive(Debug, Default)]
pub struct MemoryKv {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A flat JSON object on disk. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileKv {
    path: PathBuf,
}

impl FileKv {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/contacts/settings.json`, when the platform has one.
    pub fn default_location() -> Option<Self> {
        dirs_next::config_dir().map(|dir| Self::new(dir.join("contacts").join("settings.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, KvError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        let mut values = self.read_all()?;
        values.insert(key.to_owned(), value.to_owned());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&values)?)?;
        Ok(())
    }
}

/// The active theme, loaded from and saved to `S`.
#[derive(Debug)]
pub struct ThemeSettings<S> {
    store: S,
    current: ThemeId,
}

impl<S: KeyValueStore> ThemeSettings<S> {
    /// Load the saved theme; anything unreadable or unknown falls back to
    /// [`ThemeId::Dark`].
    pub fn load(store: S) -> Self {
        let current = match store.get(THEME_KEY) {
            Ok(Some(saved)) => ThemeId::from_str(&saved).unwrap_or_else(|_| {
                warn!(%saved, "unknown saved theme; using default");
                ThemeId::default()
            }),
            Ok(None) => ThemeId::default(),
            Err(e) => {
                warn!(error = %e, "failed to read saved theme; using default");
                ThemeId::default()
            }
        };
        Self { store, current }
    }

    pub fn current(&self) -> ThemeId {
        self.current
    }

    pub fn change(&mut self, theme: ThemeId) -> Result<(), KvError> {
        self.store.set(THEME_KEY, &theme.to_string())?;
        self.current = theme;
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
