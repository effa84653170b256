//! Host command bridge: exposes application-layer operations to the host UI.
//!
//! The host (the input-method service and the settings activity) calls the
//! plain functions in this module with the shared [`AppState`].  Every
//! function returns a [`CommandResult`] whose JSON form is
//! `{ success: bool, data: T | null, error: string | null }`, so the host can
//! always inspect `success` without catching anything.
//!
//! # Data Transfer Objects
//!
//! DTOs carry only JSON-friendly fields and use camelCase names to match the
//! settings document.  They are converted from the core types with `From`
//! impls and never flow back into the domain except through [`KeyDto`].
//!
//! # Keyboard session vs settings screen
//!
//! The two halves of [`AppState`] are independent, as they are on a device:
//! changing a setting does not redraw a keyboard that is already showing.
//! The host calls [`reload_keyboard`] when it wants the keyboard to pick up
//! the new settings.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cboard_core::{Key, KeyOutput, KeyRow, KeyboardSettings, RowIndex, RowKind};
use serde::{Deserialize, Serialize};

use crate::application::{
    keyboard_session::KeyboardSession,
    manage_settings::{ImportOutcome, SettingsManager, SettingsRepository},
};
use crate::infrastructure::storage::{SettingsStore, StoreConfig};

// ── Shared application state ──────────────────────────────────────────────────

/// State shared by all commands.
///
/// Fields are `std::sync::Mutex` because every command is synchronous and
/// short.  A poisoned lock is recovered: the guarded values are always left
/// consistent between statements.
pub struct AppState {
    /// The running keyboard, if the host has shown it.
    pub session: Mutex<KeyboardSession>,
    /// The settings screen.
    pub settings: Mutex<SettingsManager>,
}

impl AppState {
    /// Opens the settings document in the app's private files directory.
    pub fn new(files_dir: impl Into<PathBuf>) -> Arc<Self> {
        Self::with_config(StoreConfig::in_dir(files_dir))
    }

    /// Opens the settings document described by `config`.
    pub fn with_config(config: StoreConfig) -> Arc<Self> {
        Self::with_repository(Arc::new(SettingsStore::new(config)))
    }

    /// Builds the state over any repository.  Tests pass the in-memory mock.
    pub fn with_repository(repository: Arc<dyn SettingsRepository>) -> Arc<Self> {
        Arc::new(Self {
            session: Mutex::new(KeyboardSession::initialize(repository.clone())),
            settings: Mutex::new(SettingsManager::new(repository)),
        })
    }

    fn session(&self) -> MutexGuard<'_, KeyboardSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settings(&self) -> MutexGuard<'_, SettingsManager> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// The whole settings record, as the settings screen shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    pub keyboard_height: i32,
    pub button_size: i32,
    pub custom_rows: Vec<Vec<String>>,
    pub custom_layout: BTreeMap<RowIndex, Vec<String>>,
}

impl From<&KeyboardSettings> for SettingsDto {
    fn from(s: &KeyboardSettings) -> Self {
        Self {
            keyboard_height: s.keyboard_height,
            button_size: s.button_size,
            custom_rows: s.custom_rows.clone(),
            custom_layout: s.custom_layout.clone(),
        }
    }
}

/// One drawable row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRowDto {
    /// `"layout"` or `"symbol"`.
    pub kind: String,
    pub keys: Vec<String>,
    pub height: u32,
}

impl From<&KeyRow> for KeyRowDto {
    fn from(row: &KeyRow) -> Self {
        let kind = match row.kind {
            RowKind::Layout => "layout",
            RowKind::Symbol => "symbol",
        };
        Self {
            kind: kind.to_string(),
            keys: row.keys.clone(),
            height: row.height,
        }
    }
}

/// Everything needed to draw the keyboard once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardViewDto {
    pub keyboard_height: u32,
    pub rows: Vec<KeyRowDto>,
    pub shift_label: String,
    pub mode_label: String,
}

/// A tap, as the host reports it.
///
/// JSON: `{"type": "char", "label": "q"}` for a layout key,
/// `{"type": "symbol", "label": "{"}` for a symbol-row key, `{"type": "space"}`, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "label", rename_all = "camelCase")]
pub enum KeyDto {
    Char(String),
    Symbol(String),
    Space,
    Backspace,
    Enter,
    Shift,
    ModeSwitch,
}

impl From<KeyDto> for Key {
    fn from(key: KeyDto) -> Self {
        match key {
            KeyDto::Char(label) => Key::Char(label),
            KeyDto::Symbol(label) => Key::Symbol(label),
            KeyDto::Space => Key::Space,
            KeyDto::Backspace => Key::Backspace,
            KeyDto::Enter => Key::Enter,
            KeyDto::Shift => Key::Shift,
            KeyDto::ModeSwitch => Key::ModeSwitch,
        }
    }
}

/// What the host must do to the focused text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyOutputDto {
    /// `"commit"`, `"deleteBackward"`, or `"none"`.
    pub action: String,
    /// Text to insert; present only for `"commit"`.
    pub text: Option<String>,
}

impl From<KeyOutput> for KeyOutputDto {
    fn from(output: KeyOutput) -> Self {
        let (action, text) = match output {
            KeyOutput::Commit(text) => ("commit", Some(text)),
            KeyOutput::DeleteBackward => ("deleteBackward", None),
            KeyOutput::None => ("none", None),
        };
        Self {
            action: action.to_string(),
            text,
        }
    }
}

/// Unified response wrapper used by every command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Keyboard commands ─────────────────────────────────────────────────────────

/// The input view was shown.
pub fn start_input_view(state: &AppState) -> CommandResult<()> {
    state.session().start_input_view();
    CommandResult::ok(())
}

/// The input view was hidden.
pub fn finish_input_view(state: &AppState) -> CommandResult<()> {
    state.session().finish_input_view();
    CommandResult::ok(())
}

/// The input-method service is being destroyed.
pub fn dispose_keyboard(state: &AppState) -> CommandResult<()> {
    state.session().dispose();
    CommandResult::ok(())
}

/// Applies one tap and returns the text-field action.
pub fn press_key(state: &AppState, key: KeyDto) -> CommandResult<KeyOutputDto> {
    let output = state.session().press(&key.into());
    CommandResult::ok(output.into())
}

/// Returns the rows and control labels to draw.
pub fn get_keyboard_view(state: &AppState) -> CommandResult<KeyboardViewDto> {
    let session = state.session();
    let labels = session.control_labels();
    CommandResult::ok(KeyboardViewDto {
        keyboard_height: session.keyboard_height(),
        rows: session.rows().iter().map(KeyRowDto::from).collect(),
        shift_label: labels.shift.to_string(),
        mode_label: labels.mode.to_string(),
    })
}

/// Makes the running keyboard re-read the stored settings.
pub fn reload_keyboard(state: &AppState) -> CommandResult<()> {
    state.session().reload_settings();
    CommandResult::ok(())
}

// ── Settings commands ─────────────────────────────────────────────────────────

/// Returns the settings the settings screen is showing.
pub fn get_settings(state: &AppState) -> CommandResult<SettingsDto> {
    CommandResult::ok(SettingsDto::from(state.settings().settings()))
}

/// Slider change.  Returns the height actually applied.
pub fn update_keyboard_height(state: &AppState, height: i32) -> CommandResult<i32> {
    CommandResult::ok(state.settings().set_keyboard_height(height))
}

/// Slider change.  Returns the size actually applied.
pub fn update_button_size(state: &AppState, size: i32) -> CommandResult<i32> {
    CommandResult::ok(state.settings().set_button_size(size))
}

/// Replaces the programming symbol rows.
pub fn update_symbol_rows(state: &AppState, rows: Vec<Vec<String>>) -> CommandResult<()> {
    state.settings().set_symbol_rows(rows);
    CommandResult::ok(())
}

/// Adds a layout row.  Returns its index.
pub fn add_layout_row(state: &AppState, keys: Vec<String>) -> CommandResult<RowIndex> {
    match state.settings().append_row(keys) {
        Ok(index) => CommandResult::ok(index),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Deletes a layout row; the remaining rows are renumbered.
pub fn remove_layout_row(state: &AppState, index: RowIndex) -> CommandResult<()> {
    match state.settings().remove_row(index) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Replaces every key of a layout row.
pub fn update_layout_row(
    state: &AppState,
    index: RowIndex,
    keys: Vec<String>,
) -> CommandResult<()> {
    match state.settings().replace_row(index, keys) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Appends a key to a layout row.
pub fn add_layout_key(state: &AppState, index: RowIndex, key: String) -> CommandResult<()> {
    match state.settings().push_key(index, &key) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Renames one key of a layout row.
pub fn update_layout_key(
    state: &AppState,
    index: RowIndex,
    position: usize,
    key: String,
) -> CommandResult<()> {
    match state.settings().replace_key(index, position, &key) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Deletes one key of a layout row.
pub fn remove_layout_key(state: &AppState, index: RowIndex, position: usize) -> CommandResult<()> {
    match state.settings().remove_key(index, position) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Restores defaults and returns them.
pub fn reset_settings(state: &AppState) -> CommandResult<SettingsDto> {
    let mut settings = state.settings();
    settings.reset_to_defaults();
    CommandResult::ok(SettingsDto::from(settings.settings()))
}

/// Returns the document text to write into the user's export file.
pub fn export_settings(state: &AppState) -> CommandResult<String> {
    CommandResult::ok(state.settings().export_document())
}

/// Imports the text of a file the user picked.
///
/// On success returns the settings now in effect; on failure `error` holds
/// the notice to show.
pub fn import_settings(state: &AppState, text: &str) -> CommandResult<SettingsDto> {
    let mut settings = state.settings();
    match settings.import_document(text) {
        ImportOutcome::Imported => CommandResult::ok(SettingsDto::from(settings.settings())),
        outcome @ ImportOutcome::Rejected => CommandResult::err(outcome.notice()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
