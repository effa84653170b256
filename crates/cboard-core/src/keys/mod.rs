//! Key handling: what a tap on the keyboard produces.
//!
//! The rendering host owns the widgets and the text field.  This module owns
//! the decisions: which label a key shows, what text a tap commits, and how
//! the shift / caps-lock / number-mode toggles move.
//!
//! The toggles are carried in an explicit [`state::KeyboardState`] value that
//! is passed into and returned from [`state::apply_key`], so the logic can be
//! tested without any UI binding.

pub mod case;
pub mod rows;
pub mod state;
