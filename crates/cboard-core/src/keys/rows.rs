//! The rows a rendering host draws, in order.
//!
//! [`keyboard_rows`] combines the persisted [`KeyboardSettings`] with the
//! transient [`KeyboardState`]:
//!
//! - in number mode only the symbol rows are shown;
//! - otherwise the main layout rows come first, in ascending row index, with
//!   their letters case-shifted, followed by the symbol rows as configured.
//!
//! Symbol rows are drawn at 80% of the key height.

use crate::domain::settings::KeyboardSettings;

use super::case::shift_label;
use super::state::{Key, KeyboardState};

/// Which part of the keyboard a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Layout,
    Symbol,
}

/// One row of keys, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRow {
    pub kind: RowKind,
    /// Display labels, left to right.
    pub keys: Vec<String>,
    /// Row height in density-independent units.
    pub height: u32,
}

impl KeyRow {
    /// The tap the host reports for the key at `position`, or `None` past the
    /// end of the row.
    pub fn key(&self, position: usize) -> Option<Key> {
        let label = self.keys.get(position)?.clone();
        Some(match self.kind {
            RowKind::Layout => Key::Char(label),
            RowKind::Symbol => Key::Symbol(label),
        })
    }
}

/// Labels of the two stateful control-row keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlLabels {
    pub shift: &'static str,
    pub mode: &'static str,
}

/// Builds the rows to draw for `settings` in `state`.
pub fn keyboard_rows(settings: &KeyboardSettings, state: &KeyboardState) -> Vec<KeyRow> {
    let key_height = settings.effective_button_size();
    let symbol_height = u32::try_from(u64::from(key_height) * 4 / 5).unwrap_or(key_height);

    let symbol_rows = settings.custom_rows.iter().map(|keys| KeyRow {
        kind: RowKind::Symbol,
        keys: keys.clone(),
        height: symbol_height,
    });

    if state.number_mode {
        return symbol_rows.collect();
    }

    let upper = state.is_upper();
    settings
        .layout_rows()
        .map(|(_, keys)| KeyRow {
            kind: RowKind::Layout,
            keys: keys.iter().map(|key| shift_label(key, upper)).collect(),
            height: key_height,
        })
        .chain(symbol_rows)
        .collect()
}

/// Labels for the shift and mode keys in `state`.
pub fn control_labels(state: &KeyboardState) -> ControlLabels {
    ControlLabels {
        shift: if state.caps_lock { "CAPS" } else { "a/A" },
        mode: if state.number_mode { "ABC" } else { "123" },
    }
}
