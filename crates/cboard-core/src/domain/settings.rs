//! The keyboard settings record persisted by the settings store.
//!
//! A single [`KeyboardSettings`] value describes everything the user can
//! customise: the overall keyboard height, the height of one key, the
//! programming symbol rows, and the main key layout.
//!
//! # Document format
//!
//! The record serialises to a JSON object whose keys are the camel-case field
//! names:
//!
//! ```json
//! {
//!   "keyboardHeight": 250,
//!   "buttonSize": 50,
//!   "customRows": [["{", "}"], ["<", ">"]],
//!   "customLayout": { "0": ["1", "2"], "1": ["q", "w"] }
//! }
//! ```
//!
//! Every field is annotated with `#[serde(default = "...")]`, so a document
//! written by an older release that lacks a field still loads, with the
//! missing field taking its default.  Unknown fields are ignored.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Position of a row within the main layout.  Row 0 is drawn first.
pub type RowIndex = i32;

/// Keyboard height used when none is stored, in density-independent units.
pub const DEFAULT_KEYBOARD_HEIGHT: i32 = 250;

/// Key height used when none is stored, in density-independent units.
pub const DEFAULT_BUTTON_SIZE: i32 = 50;

/// Range offered by the keyboard height slider.
///
/// The model itself accepts any integer; only the settings UI clamps.
pub const KEYBOARD_HEIGHT_RANGE: RangeInclusive<i32> = 150..=400;

/// Range offered by the button size slider.
pub const BUTTON_SIZE_RANGE: RangeInclusive<i32> = 30..=80;

const DEFAULT_SYMBOL_ROWS: [&[&str]; 2] = [
    &[
        "{", "}", "[", "]", "(", ")", ";", ":", ",", ".", "?", "!", "@", "#", "$", "%", "^", "&",
        "*", "|", "\\",
    ],
    &[
        "<", ">", "=", "+", "-", "*", "/", "\\", "|", "~", "`", "'", "\"", "_",
    ],
];

const DEFAULT_LAYOUT_ROWS: [&[&str]; 4] = [
    &["1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "="],
    &["q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "[", "]"],
    &["a", "s", "d", "f", "g", "h", "j", "k", "l", ";", "'", "\\"],
    &["z", "x", "c", "v", "b", "n", "m", ",", ".", "/"],
];

/// The user's keyboard configuration.
///
/// Equality is structural: two values with the same fields are
/// interchangeable.  The store replaces the whole record on every save; it is
/// never patched field by field on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardSettings {
    /// Total keyboard height.  Not range-checked here.
    #[serde(default = "default_keyboard_height")]
    pub keyboard_height: i32,
    /// Height of one row of keys.  Not range-checked here.
    #[serde(default = "default_button_size")]
    pub button_size: i32,
    /// Programming symbol rows, drawn below the main layout.
    #[serde(default = "default_custom_rows")]
    pub custom_rows: Vec<Vec<String>>,
    /// Main layout rows keyed by row index.
    ///
    /// A `BTreeMap` iterates in ascending numeric order, which is the order
    /// the rows are drawn in.  JSON object keys are parsed back into integers,
    /// so `"10"` sorts after `"2"`.
    #[serde(default = "default_custom_layout")]
    pub custom_layout: BTreeMap<RowIndex, Vec<String>>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_keyboard_height() -> i32 {
    DEFAULT_KEYBOARD_HEIGHT
}
fn default_button_size() -> i32 {
    DEFAULT_BUTTON_SIZE
}
fn default_custom_rows() -> Vec<Vec<String>> {
    DEFAULT_SYMBOL_ROWS.iter().map(|row| to_owned_row(row)).collect()
}
fn default_custom_layout() -> BTreeMap<RowIndex, Vec<String>> {
    DEFAULT_LAYOUT_ROWS
        .iter()
        .zip(0..)
        .map(|(row, index)| (index, to_owned_row(row)))
        .collect()
}

fn to_owned_row(row: &[&str]) -> Vec<String> {
    row.iter().map(|key| (*key).to_string()).collect()
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        Self {
            keyboard_height: default_keyboard_height(),
            button_size: default_button_size(),
            custom_rows: default_custom_rows(),
            custom_layout: default_custom_layout(),
        }
    }
}

impl KeyboardSettings {
    /// Returns a copy with `keyboard_height` replaced.
    pub fn with_keyboard_height(mut self, keyboard_height: i32) -> Self {
        self.keyboard_height = keyboard_height;
        self
    }

    /// Returns a copy with `button_size` replaced.
    pub fn with_button_size(mut self, button_size: i32) -> Self {
        self.button_size = button_size;
        self
    }

    /// Returns a copy with the symbol rows replaced.
    pub fn with_custom_rows(mut self, custom_rows: Vec<Vec<String>>) -> Self {
        self.custom_rows = custom_rows;
        self
    }

    /// Returns a copy with the main layout replaced.
    pub fn with_custom_layout(mut self, custom_layout: BTreeMap<RowIndex, Vec<String>>) -> Self {
        self.custom_layout = custom_layout;
        self
    }

    /// Iterates the main layout rows in ascending row-index order.
    pub fn layout_rows(&self) -> impl Iterator<Item = (RowIndex, &[String])> + '_ {
        self.custom_layout
            .iter()
            .map(|(index, keys)| (*index, keys.as_slice()))
    }

    /// Keyboard height to render with.  Non-positive stored values fall back
    /// to [`DEFAULT_KEYBOARD_HEIGHT`].
    pub fn effective_keyboard_height(&self) -> u32 {
        positive_or(self.keyboard_height, DEFAULT_KEYBOARD_HEIGHT)
    }

    /// Key row height to render with.  Non-positive stored values fall back
    /// to [`DEFAULT_BUTTON_SIZE`].
    pub fn effective_button_size(&self) -> u32 {
        positive_or(self.button_size, DEFAULT_BUTTON_SIZE)
    }

    /// Serialises the record to its canonical document text.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error; with the field types used
    /// here this does not happen in practice.
    pub fn to_document(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses document text.  Absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON, a non-object
    /// document, or a field of the wrong type.
    pub fn from_document(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

fn positive_or(value: i32, fallback: i32) -> u32 {
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .unwrap_or(fallback.unsigned_abs())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
