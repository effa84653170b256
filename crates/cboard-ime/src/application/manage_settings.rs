//! ManageSettingsUseCase: the settings and custom layout screens.
//!
//! [`SettingsManager`] keeps the settings the screen is showing and writes the
//! whole record back through the [`SettingsRepository`] after every change,
//! the way the sliders and the layout editor expect.
//!
//! # Slider ranges
//!
//! The height and button size setters clamp to the slider ranges in
//! `cboard_core::domain::settings`.  Imported documents are not clamped: a
//! value outside the range that arrives through import is kept as-is.

use std::sync::Arc;

use cboard_core::domain::layout_editor::{self, LayoutEditError};
use cboard_core::domain::settings::{BUTTON_SIZE_RANGE, KEYBOARD_HEIGHT_RANGE};
use cboard_core::{KeyboardSettings, RowIndex};
use tracing::{debug, info, warn};

/// Persistence operations the use cases depend on.
///
/// None of these fail outward: read problems yield defaults and write
/// problems are logged by the implementation.  The only failure a caller can
/// observe is `import_document` returning `false`.
///
/// The production implementation is the JSON file store; tests use
/// `MockSettingsRepository`.
pub trait SettingsRepository: Send + Sync {
    /// Loads the stored settings, or the defaults.
    fn load(&self) -> KeyboardSettings;
    /// Replaces the stored settings.
    fn save(&self, settings: &KeyboardSettings);
    /// Returns the stored document text for export.
    fn export_document(&self) -> String;
    /// Validates and stores a document; `false` if it was rejected.
    fn import_document(&self, text: &str) -> bool;
}

/// Result of an import, shown to the user as a short notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported,
    Rejected,
}

impl ImportOutcome {
    /// Text of the notice the settings screen shows.
    pub fn notice(self) -> &'static str {
        match self {
            Self::Imported => "Settings imported successfully",
            Self::Rejected => "Import failed",
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Imported
    }
}

/// Settings screen state plus the repository it writes to.
pub struct SettingsManager {
    repository: Arc<dyn SettingsRepository>,
    settings: KeyboardSettings,
}

impl SettingsManager {
    /// Opens the settings screen, loading the current settings.
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        let settings = repository.load();
        Self {
            repository,
            settings,
        }
    }

    /// The settings the screen is showing.
    pub fn settings(&self) -> &KeyboardSettings {
        &self.settings
    }

    /// Sets the keyboard height from the slider and saves.
    ///
    /// Returns the value actually applied after clamping.
    pub fn set_keyboard_height(&mut self, height: i32) -> i32 {
        let height = height.clamp(*KEYBOARD_HEIGHT_RANGE.start(), *KEYBOARD_HEIGHT_RANGE.end());
        self.apply(self.settings.clone().with_keyboard_height(height));
        height
    }

    /// Sets the button size from the slider and saves.
    ///
    /// Returns the value actually applied after clamping.
    pub fn set_button_size(&mut self, size: i32) -> i32 {
        let size = size.clamp(*BUTTON_SIZE_RANGE.start(), *BUTTON_SIZE_RANGE.end());
        self.apply(self.settings.clone().with_button_size(size));
        size
    }

    /// Replaces the programming symbol rows and saves.
    pub fn set_symbol_rows(&mut self, rows: Vec<Vec<String>>) {
        self.apply(self.settings.clone().with_custom_rows(rows));
    }

    /// Adds a layout row after the last one and saves.  Returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutEditError::RowIndexOverflow`]; nothing is saved.
    pub fn append_row(&mut self, keys: Vec<String>) -> Result<RowIndex, LayoutEditError> {
        let (edited, index) = layout_editor::append_row(&self.settings, keys)?;
        self.apply(edited);
        Ok(index)
    }

    /// Deletes a layout row, renumbering the rest, and saves.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutEditError::RowNotFound`]; nothing is saved.
    pub fn remove_row(&mut self, index: RowIndex) -> Result<(), LayoutEditError> {
        self.edit(|s| layout_editor::remove_row(s, index))
    }

    /// Replaces every key of a layout row and saves.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutEditError::RowNotFound`]; nothing is saved.
    pub fn replace_row(
        &mut self,
        index: RowIndex,
        keys: Vec<String>,
    ) -> Result<(), LayoutEditError> {
        self.edit(|s| layout_editor::replace_row(s, index, keys))
    }

    /// Appends a key to a layout row and saves.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutEditError::RowNotFound`]; nothing is saved.
    pub fn push_key(&mut self, index: RowIndex, key: &str) -> Result<(), LayoutEditError> {
        self.edit(|s| layout_editor::push_key(s, index, key))
    }

    /// Renames one key of a layout row and saves.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutEditError`]; nothing is saved.
    pub fn replace_key(
        &mut self,
        index: RowIndex,
        position: usize,
        key: &str,
    ) -> Result<(), LayoutEditError> {
        self.edit(|s| layout_editor::replace_key(s, index, position, key))
    }

    /// Deletes one key of a layout row and saves.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutEditError`]; nothing is saved.
    pub fn remove_key(&mut self, index: RowIndex, position: usize) -> Result<(), LayoutEditError> {
        self.edit(|s| layout_editor::remove_key(s, index, position))
    }

    /// Restores the default settings and saves.
    pub fn reset_to_defaults(&mut self) {
        info!("resetting keyboard settings to defaults");
        self.apply(KeyboardSettings::default());
    }

    /// Document text for the export file.
    pub fn export_document(&self) -> String {
        self.repository.export_document()
    }

    /// Imports a document chosen by the user.
    ///
    /// On success the screen reloads from storage so it shows what was
    /// actually persisted.  On rejection nothing changes.
    pub fn import_document(&mut self, text: &str) -> ImportOutcome {
        if self.repository.import_document(text) {
            self.settings = self.repository.load();
            ImportOutcome::Imported
        } else {
            warn!("settings import rejected");
            ImportOutcome::Rejected
        }
    }

    fn edit<F>(&mut self, edit: F) -> Result<(), LayoutEditError>
    where
        F: FnOnce(&KeyboardSettings) -> Result<KeyboardSettings, LayoutEditError>,
    {
        let edited = edit(&self.settings)?;
        self.apply(edited);
        Ok(())
    }

    fn apply(&mut self, settings: KeyboardSettings) {
        self.repository.save(&settings);
        debug!("applied settings change");
        self.settings = settings;
    }
}
