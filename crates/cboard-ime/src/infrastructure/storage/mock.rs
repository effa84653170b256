//! In-memory settings repository for unit testing.
//!
//! Behaves like [`super::SettingsStore`] (defaults on a missing or broken
//! document, import validation, exact-text export) without touching the file
//! system, and records how often it was written.

use std::sync::{Mutex, MutexGuard, PoisonError};

use cboard_core::KeyboardSettings;

use crate::application::manage_settings::SettingsRepository;

/// A mock implementation of [`SettingsRepository`] backed by a string.
#[derive(Debug, Default)]
pub struct MockSettingsRepository {
    document: Mutex<Option<String>>,
    save_count: Mutex<u32>,
    fail_writes: bool,
}

impl MockSettingsRepository {
    /// Creates an empty repository, as on first run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository whose stored document is `text`, verbatim.
    pub fn with_document(text: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(text.into())),
            ..Self::default()
        }
    }

    /// Creates a repository whose every write is silently dropped, as if
    /// the disk were full.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Returns the stored document text, if any.
    pub fn document(&self) -> Option<String> {
        lock(&self.document).clone()
    }

    /// Returns the number of successful writes.
    pub fn save_count(&self) -> u32 {
        *lock(&self.save_count)
    }

    fn write(&self, settings: &KeyboardSettings) -> bool {
        if self.fail_writes {
            return false;
        }
        match settings.to_document() {
            Ok(text) => {
                *lock(&self.document) = Some(text);
                *lock(&self.save_count) += 1;
                true
            }
            Err(_) => false,
        }
    }
}

impl SettingsRepository for MockSettingsRepository {
    fn load(&self) -> KeyboardSettings {
        lock(&self.document)
            .as_deref()
            .filter(|text| !text.is_empty())
            .and_then(|text| KeyboardSettings::from_document(text).ok())
            .unwrap_or_default()
    }

    fn save(&self, settings: &KeyboardSettings) {
        let _ = self.write(settings);
    }

    fn export_document(&self) -> String {
        let stored = lock(&self.document)
            .clone()
            .filter(|text| KeyboardSettings::from_document(text).is_ok());
        stored.unwrap_or_else(|| {
            KeyboardSettings::default()
                .to_document()
                .unwrap_or_else(|_| "{}".to_string())
        })
    }

    fn import_document(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        match KeyboardSettings::from_document(text) {
            Ok(settings) => self.write(&settings),
            Err(_) => false,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
