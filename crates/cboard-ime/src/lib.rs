//! cboard-ime library entry point.
//!
//! Owns everything that touches the file system or is driven by the host:
//! the settings store, the keyboard session an input-method view drives, the
//! settings-screen use case, and the command bridge a host UI calls into.
//!
//! Re-exports all public modules so that integration tests in `tests/` share
//! the same module tree.

pub mod application;
pub mod infrastructure;
