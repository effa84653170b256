//! Application layer use cases.
//!
//! Use cases orchestrate `cboard_core` domain values to fulfil what a screen
//! needs, and reach storage only through the [`manage_settings::SettingsRepository`]
//! trait so tests can run without a file system.
//!
//! # Sub-modules
//!
//! - **`keyboard_session`** – What the input-method view drives: loads the
//!   settings once at creation, turns taps into text-field actions, and
//!   exposes the rows to draw.
//!
//! - **`manage_settings`** – What the settings screens drive: slider
//!   changes, custom layout edits, and export / import.  Every change is
//!   saved immediately.

pub mod keyboard_session;
pub mod manage_settings;
