//! Domain entities for cboard.
//!
//! Nothing in here touches the file system, a clock, or a UI toolkit.  The
//! persistence layer in `cboard-ime` and the rendering host both depend on
//! these types; these types depend on neither.

/// The persisted keyboard configuration.
///
/// See [`settings::KeyboardSettings`] for the main type.
pub mod settings;

/// Copy-with-changes editing of the custom key layout.
pub mod layout_editor;

/// Host-driven lifecycle of an input view.
pub mod lifecycle;
