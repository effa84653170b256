//! Storage infrastructure: settings document persistence.
//!
//! - `settings_store` – load / save / export / import of the single JSON
//!   settings document, with fallback to defaults on every read failure.
//! - `atomic` – the write-temp-then-rename helper every save goes through.
//! - `error` – the error type shared by both.
//! - `mock` – an in-memory repository for tests that should not touch disk.

pub mod atomic;
pub mod error;
pub mod mock;
pub mod settings_store;

pub use error::StoreError;
pub use settings_store::{SettingsStore, StoreConfig};
