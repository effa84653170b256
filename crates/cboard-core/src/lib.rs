//! # cboard-core
//!
//! Host-independent core of the cboard programmer keyboard: the settings
//! model, the shift / caps / number-mode key state machine, the ordered row
//! view a rendering host draws, and the custom layout editing operations.
//!
//! This crate performs no file I/O and has no dependency on any UI toolkit or
//! input-method framework.  Persistence lives in `cboard-ime`.
//!
//! # Architecture overview
//!
//! - **`domain`** – The persisted [`KeyboardSettings`] record, the pure
//!   layout editing functions that produce modified copies of it, and the
//!   host lifecycle state machine.
//!
//! - **`keys`** – Everything that happens when a key is tapped: the
//!   case-shift rule for labels, the [`apply_key`] transition function, and
//!   [`keyboard_rows`], which turns settings plus state into the rows the
//!   host renders.

pub mod domain;
pub mod keys;

pub use domain::layout_editor::LayoutEditError;
pub use domain::lifecycle::LifecycleState;
pub use domain::settings::{KeyboardSettings, RowIndex};
pub use keys::case::shift_label;
pub use keys::rows::{control_labels, keyboard_rows, ControlLabels, KeyRow, RowKind};
pub use keys::state::{apply_key, Key, KeyOutput, KeyboardState};
