//! Persisted light/dark/system preference.

use crate::models::{Appearance, ThemeMode};
use crate::storage::{KeyValueStore, StorageError, StorageKey};

#[derive(Debug)]
pub struct ThemeStore<S: KeyValueStore> {
    storage: S,
    mode: ThemeMode,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            mode: ThemeMode::System,
        }
    }

    pub fn open(storage: S) -> Result<Self, StorageError> {
        let mut store = Self::new(storage);
        store.load()?;
        Ok(store)
    }

    /// Reads the stored mode. Missing or unknown values fall back to `system`.
    ///
    /// Accepts both a bare word (`dark`) and a JSON string (`"dark"`).
    pub fn load(&mut self) -> Result<ThemeMode, StorageError> {
        let stored = self.storage.get(StorageKey::Theme)?;

        self.mode = match stored.as_deref().map(str::trim) {
            Some(raw) => {
                let word = raw.trim_matches('"');
                match word.parse::<ThemeMode>() {
                    Ok(mode) if word == mode.to_string() => mode,
                    _ => {
                        tracing::warn!("Ignoring unknown theme '{}', using system", raw);
                        ThemeMode::System
                    }
                }
            }
            None => ThemeMode::System,
        };

        Ok(self.mode)
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn set(&mut self, mode: ThemeMode) -> Result<(), StorageError> {
        self.storage.set(StorageKey::Theme, &mode.to_string())?;
        self.mode = mode;
        tracing::debug!("Theme set to {}", mode);
        Ok(())
    }

    /// Resolves the current mode. `system` follows `system_prefers_dark` on
    /// every call.
    pub fn resolve(&self, system_prefers_dark: bool) -> Appearance {
        self.mode.resolve(system_prefers_dark)
    }
}
