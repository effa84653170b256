//! Infrastructure layer for the keyboard.
//!
//! Contains the adapters that face the outside world: the JSON settings
//! store on disk and the command bridge the host UI calls.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `cboard_core`, but MUST NOT be imported by the `application` layer.

pub mod storage;
pub mod ui_bridge;
