//! JSON persistence for the keyboard settings.
//!
//! Reads and writes one [`KeyboardSettings`] document in the app-private
//! directory the host hands us, e.g. `<files-dir>/cboard_settings.json`.
//!
//! # Failure policy
//!
//! A settings problem must never take the keyboard down.  The four public
//! operations are the single place where errors are caught:
//!
//! | Operation           | On failure                                         |
//! |---------------------|----------------------------------------------------|
//! | [`SettingsStore::load`]            | logs, returns `KeyboardSettings::default()` |
//! | [`SettingsStore::save`]            | logs, previous document stays authoritative |
//! | [`SettingsStore::export_document`] | logs, returns the default document text     |
//! | [`SettingsStore::import_document`] | logs, returns `false`, document untouched   |
//!
//! `import_document` is the only operation whose failure the caller sees,
//! because the settings screen has to tell the user their file was invalid.
//! Callers that want the underlying error use [`SettingsStore::try_load`] and
//! [`SettingsStore::try_save`].
//!
//! Every write goes through [`write_atomic`], so a reader observes either
//! the previous complete document or the new one, never a partial file.
//! There is no locking: with two concurrent writers the last one wins.

use std::path::{Path, PathBuf};

use cboard_core::KeyboardSettings;
use tracing::{debug, error, info, warn};

use super::atomic::{temp_path_for, write_atomic};
use super::error::StoreError;
use crate::application::manage_settings::SettingsRepository;

/// File name of the settings document.
pub const DEFAULT_FILE_NAME: &str = "cboard_settings.json";

/// Suffix of the side file a save is staged through.
pub const DEFAULT_TEMP_SUFFIX: &str = ".tmp";

/// Where the settings document lives.
///
/// The host supplies `dir` (on Android the application's private files
/// directory); the file names rarely need changing outside tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the document and its temp side file.
    pub dir: PathBuf,
    /// Document file name.
    pub file_name: String,
    /// Appended to `file_name` to form the temp side file name.
    pub temp_suffix: String,
}

impl Default for StoreConfig {
    /// | Field       | Default                |
    /// |-------------|------------------------|
    /// | dir         | `.`                    |
    /// | file_name   | `cboard_settings.json` |
    /// | temp_suffix | `.tmp`                 |
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
            temp_suffix: DEFAULT_TEMP_SUFFIX.to_string(),
        }
    }
}

impl StoreConfig {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }
}

/// Durable single-document store for [`KeyboardSettings`].
///
/// Holds no open handles and no cached state; every call goes to disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    temp_path: PathBuf,
}

impl SettingsStore {
    /// Creates a store for the document described by `config`.
    ///
    /// Nothing is touched on disk until the first operation.
    pub fn new(config: StoreConfig) -> Self {
        let path = config.dir.join(&config.file_name);
        let temp_path = temp_path_for(&path, &config.temp_suffix);
        Self { path, temp_path }
    }

    /// Creates a store for `cboard_settings.json` inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(StoreConfig::in_dir(dir))
    }

    /// Path of the canonical settings document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the side file saves are staged through.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Loads the settings, falling back to defaults on any failure.
    ///
    /// Read-only; never fails.
    pub fn load(&self) -> KeyboardSettings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("failed to load keyboard settings, using defaults: {e}");
                KeyboardSettings::default()
            }
        }
    }

    /// Loads the settings, returning `KeyboardSettings::default()` if the
    /// document does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for file-system errors other than "not
    /// found", [`StoreError::EmptyDocument`] for a zero-length document, and
    /// [`StoreError::Parse`] if the content is not a settings document.
    pub fn try_load(&self) -> Result<KeyboardSettings, StoreError> {
        match self.read_document() {
            Ok(text) => KeyboardSettings::from_document(&text).map_err(StoreError::Parse),
            Err(e) if e.is_not_found() => {
                debug!(
                    "no settings document at {}, using defaults",
                    self.path.display()
                );
                Ok(KeyboardSettings::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Persists `settings`, replacing the previous document atomically.
    ///
    /// On failure the attempt is abandoned and logged; the previous document
    /// (if any) remains authoritative.  Never fails.
    pub fn save(&self, settings: &KeyboardSettings) {
        if let Err(e) = self.try_save(settings) {
            error!("failed to save keyboard settings: {e}");
        }
    }

    /// Persists `settings`, replacing the previous document atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] or [`StoreError::Io`].  On error the
    /// previous document is unchanged.
    pub fn try_save(&self, settings: &KeyboardSettings) -> Result<(), StoreError> {
        let text = settings.to_document().map_err(StoreError::Serialize)?;
        write_atomic(&self.path, &self.temp_path, text.as_bytes())?;
        debug!("saved keyboard settings to {}", self.path.display());
        Ok(())
    }

    /// Returns the document text for export.
    ///
    /// This is the exact text on disk when the document exists and parses;
    /// otherwise the serialisation of the default settings.  Never fails.
    pub fn export_document(&self) -> String {
        match self.read_document() {
            Ok(text) => match KeyboardSettings::from_document(&text) {
                Ok(_) => text,
                Err(e) => {
                    warn!("stored settings are not exportable, exporting defaults: {e}");
                    default_document()
                }
            },
            Err(e) if e.is_not_found() => default_document(),
            Err(e) => {
                warn!("failed to read settings for export, exporting defaults: {e}");
                default_document()
            }
        }
    }

    /// Replaces the stored settings with the document `text`.
    ///
    /// Returns `false` and leaves the stored document untouched if `text` is
    /// empty, is not a settings document, or could not be written.  Values
    /// outside the slider ranges are stored as given.
    pub fn import_document(&self, text: &str) -> bool {
        if text.is_empty() {
            warn!("rejected settings import: document is empty");
            return false;
        }
        let settings = match KeyboardSettings::from_document(text) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("rejected settings import: {e}");
                return false;
            }
        };
        match self.try_save(&settings) {
            Ok(()) => {
                info!("imported keyboard settings into {}", self.path.display());
                true
            }
            Err(e) => {
                error!("failed to persist imported settings: {e}");
                false
            }
        }
    }

    /// Reads the raw document, treating a zero-length file as an error.
    fn read_document(&self) -> Result<String, StoreError> {
        let text =
            std::fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        if text.is_empty() {
            return Err(StoreError::EmptyDocument(self.path.clone()));
        }
        Ok(text)
    }
}

impl SettingsRepository for SettingsStore {
    fn load(&self) -> KeyboardSettings {
        SettingsStore::load(self)
    }

    fn save(&self, settings: &KeyboardSettings) {
        SettingsStore::save(self, settings);
    }

    fn export_document(&self) -> String {
        SettingsStore::export_document(self)
    }

    fn import_document(&self, text: &str) -> bool {
        SettingsStore::import_document(self, text)
    }
}

/// Serialisation of the default settings.
///
/// `"{}"` is only reachable if serialising the defaults fails; it also parses
/// to the defaults.
fn default_document() -> String {
    KeyboardSettings::default()
        .to_document()
        .unwrap_or_else(|_| "{}".to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use uuid::Uuid;

    /// A store in a fresh directory that no other test touches.
    fn scratch_store() -> (SettingsStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("cboard_store_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        (SettingsStore::in_dir(&dir), dir)
    }

    fn customised() -> KeyboardSettings {
        KeyboardSettings::default()
            .with_keyboard_height(320)
            .with_button_size(44)
            .with_custom_rows(vec![vec!["=>".to_string(), "::".to_string()]])
    }

    // ── Config ────────────────────────────────────────────────────────────────

    #[test]
    fn test_store_config_default_names() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.file_name, "cboard_settings.json");
        assert_eq!(cfg.temp_suffix, ".tmp");
    }

    #[test]
    fn test_store_paths_live_in_configured_dir() {
        let store = SettingsStore::in_dir("/data/app/files");
        assert_eq!(
            store.path(),
            Path::new("/data/app/files/cboard_settings.json")
        );
        assert_eq!(
            store.temp_path(),
            Path::new("/data/app/files/cboard_settings.json.tmp")
        );
    }

    #[test]
    fn test_custom_file_names_are_respected() {
        let store = SettingsStore::new(StoreConfig {
            dir: PathBuf::from("/cfg"),
            file_name: "kb.json".to_string(),
            temp_suffix: ".part".to_string(),
        });
        assert_eq!(store.path(), Path::new("/cfg/kb.json"));
        assert_eq!(store.temp_path(), Path::new("/cfg/kb.json.part"));
    }

    // ── load ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_returns_defaults_when_document_absent() {
        let (store, dir) = scratch_store();

        assert_eq!(store.load(), KeyboardSettings::default());
        assert_eq!(store.try_load().unwrap(), KeyboardSettings::default());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_does_not_create_the_document() {
        let (store, dir) = scratch_store();
        let _ = store.load();
        assert!(!store.path().exists());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_returns_defaults_for_empty_document() {
        // Arrange
        let (store, dir) = scratch_store();
        fs::write(store.path(), "").unwrap();

        // Act / Assert
        assert_eq!(store.load(), KeyboardSettings::default());
        match store.try_load() {
            Err(StoreError::EmptyDocument(path)) => assert_eq!(path, store.path()),
            other => panic!("expected EmptyDocument, got {other:?}"),
        }

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_returns_defaults_for_malformed_document() {
        let (store, dir) = scratch_store();
        fs::write(store.path(), [0xff, 0x00, b'{', b'x']).unwrap();

        assert_eq!(store.load(), KeyboardSettings::default());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_try_load_reports_parse_error() {
        let (store, dir) = scratch_store();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.try_load(), Err(StoreError::Parse(_))));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_fills_missing_fields_with_defaults() {
        let (store, dir) = scratch_store();
        fs::write(store.path(), r#"{"keyboardHeight": 180}"#).unwrap();

        let settings = store.load();

        assert_eq!(settings.keyboard_height, 180);
        assert_eq!(settings.button_size, 50);
        assert_eq!(settings.custom_layout.len(), 4);
        fs::remove_dir_all(&dir).ok();
    }

    // ── save ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_save_then_load_round_trips() {
        // Arrange
        let (store, dir) = scratch_store();
        let settings = customised();

        // Act
        store.save(&settings);

        // Assert
        assert_eq!(store.load(), settings);
        assert!(!store.temp_path().exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_replaces_previous_document_wholesale() {
        let (store, dir) = scratch_store();
        store.save(&customised());

        store.save(&KeyboardSettings::default().with_button_size(31));

        assert_eq!(
            store.load(),
            KeyboardSettings::default().with_button_size(31)
        );
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_failed_save_keeps_previous_document() {
        // Arrange: block the temp path with a directory so the write fails
        let (store, dir) = scratch_store();
        store.save(&customised());
        fs::create_dir_all(store.temp_path()).unwrap();

        // Act
        store.save(&KeyboardSettings::default());
        let result = store.try_save(&KeyboardSettings::default());

        // Assert
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(store.load(), customised());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let (_, dir) = scratch_store();
        let store = SettingsStore::in_dir(dir.join("files"));

        store.save(&customised());

        assert_eq!(store.load(), customised());
        fs::remove_dir_all(&dir).ok();
    }

    // ── export ────────────────────────────────────────────────────────────────

    #[test]
    fn test_export_without_document_returns_default_serialization() {
        let (store, dir) = scratch_store();

        let text = store.export_document();

        assert_eq!(
            KeyboardSettings::from_document(&text).unwrap(),
            KeyboardSettings::default()
        );
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_returns_exact_document_text() {
        // Arrange: hand-written compact text, not what save would produce
        let (store, dir) = scratch_store();
        let text = r#"{"keyboardHeight":222,"buttonSize":33}"#;
        fs::write(store.path(), text).unwrap();

        // Act / Assert
        assert_eq!(store.export_document(), text);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_of_corrupt_document_returns_defaults() {
        let (store, dir) = scratch_store();
        fs::write(store.path(), "garbage").unwrap();

        let text = store.export_document();

        assert_eq!(
            KeyboardSettings::from_document(&text).unwrap(),
            KeyboardSettings::default()
        );
        fs::remove_dir_all(&dir).ok();
    }

    // ── import ────────────────────────────────────────────────────────────────

    #[test]
    fn test_import_rejects_empty_and_malformed_text() {
        // Arrange
        let (store, dir) = scratch_store();
        store.save(&customised());
        let before = fs::read_to_string(store.path()).unwrap();

        // Act / Assert
        assert!(!store.import_document(""));
        assert!(!store.import_document("not json"));
        assert!(!store.import_document("null"));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
        assert_eq!(store.load(), customised());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_import_valid_document_replaces_settings() {
        let (store, dir) = scratch_store();
        let text = customised().to_document().unwrap();

        assert!(store.import_document(&text));
        assert_eq!(store.load(), customised());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_import_keeps_out_of_range_values() {
        let (store, dir) = scratch_store();

        assert!(store.import_document(r#"{"keyboardHeight": 9000, "buttonSize": 1}"#));

        let loaded = store.load();
        assert_eq!(loaded.keyboard_height, 9000);
        assert_eq!(loaded.button_size, 1);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_import_reports_failure_when_write_fails() {
        let (store, dir) = scratch_store();
        fs::create_dir_all(store.temp_path()).unwrap();

        assert!(!store.import_document(&customised().to_document().unwrap()));
        assert_eq!(store.load(), KeyboardSettings::default());

        fs::remove_dir_all(&dir).ok();
    }
}
