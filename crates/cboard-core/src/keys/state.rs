//! Shift / caps-lock / number-mode state machine.
//!
//! [`apply_key`] is a pure function: given the current [`KeyboardState`] and
//! the tapped [`Key`], it returns the next state and the [`KeyOutput`] the
//! host should perform against the text field.
//!
//! # Tap behaviour
//!
//! | Key         | Output              | State change                                         |
//! |-------------|---------------------|------------------------------------------------------|
//! | layout key  | label, case-shifted | clears shift after a letter unless caps-locked       |
//! | symbol key  | label as drawn      | clears shift after a letter unless caps-locked       |
//! | space       | `" "`               | clears shift unless caps-locked                      |
//! | backspace   | delete one char     | none                                                 |
//! | enter       | `"\n"`              | clears shift and number mode unless caps-locked      |
//! | shift       | none                | see [`apply_key`]                                    |
//! | mode switch | none                | toggles number mode, clears shift unless caps-locked |

use super::case::{is_shiftable, shift_label};

/// Transient toggles of the keyboard.  Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardState {
    /// Caps lock: every letter is upper-cased until turned off.
    pub caps_lock: bool,
    /// One-shot shift: the next letter is upper-cased.
    pub shifted: bool,
    /// Number mode: only the symbol rows are shown.
    pub number_mode: bool,
}

impl KeyboardState {
    /// Returns `true` when letters should be shown and committed upper-case.
    pub fn is_upper(&self) -> bool {
        self.caps_lock || self.shifted
    }
}

/// A tap on the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A key from a main layout row, carrying its configured label.
    Char(String),
    /// A key from a programming symbol row.  Committed exactly as drawn.
    Symbol(String),
    Space,
    Backspace,
    Enter,
    /// The `a/A` key.
    Shift,
    /// The `123` / `ABC` key.
    ModeSwitch,
}

impl Key {
    /// Convenience constructor for [`Key::Char`].
    pub fn char(label: impl Into<String>) -> Self {
        Self::Char(label.into())
    }

    /// Convenience constructor for [`Key::Symbol`].
    pub fn symbol(label: impl Into<String>) -> Self {
        Self::Symbol(label.into())
    }
}

/// What the host should do to the text field after a tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutput {
    /// Insert this text at the cursor.
    Commit(String),
    /// Delete the one character before the cursor.
    DeleteBackward,
    /// The tap only changed keyboard state.
    None,
}

/// Applies one tap and returns the next state and the text-field action.
///
/// The shift key cycles as follows:
///
/// - in number mode it returns to the letter layout;
/// - a second tap while shifted (and not caps-locked) turns caps lock on;
/// - otherwise it toggles shift, and also releases caps lock if it was on.
pub fn apply_key(state: KeyboardState, key: &Key) -> (KeyboardState, KeyOutput) {
    let mut next = state;
    let output = match key {
        Key::Char(label) => {
            let text = shift_label(label, state.is_upper());
            if !state.caps_lock && is_shiftable(label) {
                next.shifted = false;
            }
            KeyOutput::Commit(text)
        }
        Key::Symbol(label) => {
            if !state.caps_lock && is_shiftable(label) {
                next.shifted = false;
            }
            KeyOutput::Commit(label.clone())
        }
        Key::Space => {
            if !state.caps_lock {
                next.shifted = false;
            }
            KeyOutput::Commit(" ".to_string())
        }
        Key::Backspace => KeyOutput::DeleteBackward,
        Key::Enter => {
            if !state.caps_lock {
                next.shifted = false;
                next.number_mode = false;
            }
            KeyOutput::Commit("\n".to_string())
        }
        Key::Shift => {
            if state.number_mode {
                next.number_mode = false;
            } else if state.shifted && !state.caps_lock {
                next.caps_lock = true;
                next.shifted = false;
            } else {
                next.shifted = !state.shifted;
                next.caps_lock = false;
            }
            KeyOutput::None
        }
        Key::ModeSwitch => {
            next.number_mode = !state.number_mode;
            if !state.caps_lock {
                next.shifted = false;
            }
            KeyOutput::None
        }
    };
    (next, output)
}
