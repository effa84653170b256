//! KeyboardSessionUseCase: one lifetime of the input-method view.
//!
//! The host creates a session when the input-method service is created,
//! forwards every tap to [`KeyboardSession::press`], draws
//! [`KeyboardSession::rows`], and disposes the session at teardown.
//!
//! Settings are read once, at [`KeyboardSession::initialize`].  Changes made
//! in the settings screen while the keyboard is alive are picked up only when
//! the host calls [`KeyboardSession::reload_settings`].

use std::sync::Arc;

use cboard_core::{
    apply_key, control_labels, keyboard_rows, ControlLabels, Key, KeyOutput, KeyRow,
    KeyboardSettings, KeyboardState, LifecycleState,
};
use tracing::{debug, info};

use super::manage_settings::SettingsRepository;

pub struct KeyboardSession {
    repository: Arc<dyn SettingsRepository>,
    settings: KeyboardSettings,
    state: KeyboardState,
    lifecycle: LifecycleState,
}

impl KeyboardSession {
    /// Creates the session and loads the persisted settings.
    pub fn initialize(repository: Arc<dyn SettingsRepository>) -> Self {
        let settings = repository.load();
        info!(
            "keyboard session created: height={} button_size={} layout_rows={} symbol_rows={}",
            settings.keyboard_height,
            settings.button_size,
            settings.custom_layout.len(),
            settings.custom_rows.len()
        );
        Self {
            repository,
            settings,
            state: KeyboardState::default(),
            lifecycle: LifecycleState::default().create(),
        }
    }

    /// The input view has been shown.
    pub fn start_input_view(&mut self) {
        self.lifecycle = self.lifecycle.start_input_view();
    }

    /// The input view has been hidden.  Shift, caps lock, and number mode are
    /// cleared so the next time it is shown it starts on the letter layout.
    pub fn finish_input_view(&mut self) {
        self.lifecycle = self.lifecycle.finish_input_view();
        self.state = KeyboardState::default();
    }

    /// Tears the session down.  Later taps are ignored.
    pub fn dispose(&mut self) {
        self.lifecycle = self.lifecycle.destroy();
        info!("keyboard session disposed");
    }

    /// Applies one tap and returns what the host should do to the text field.
    ///
    /// Returns [`KeyOutput::None`] once the session is disposed.
    pub fn press(&mut self, key: &Key) -> KeyOutput {
        if !self.lifecycle.is_alive() {
            debug!("ignoring {key:?} after dispose");
            return KeyOutput::None;
        }
        let (next, output) = apply_key(self.state, key);
        self.state = next;
        output
    }

    /// Rows to draw for the current settings and key state.
    pub fn rows(&self) -> Vec<KeyRow> {
        keyboard_rows(&self.settings, &self.state)
    }

    /// Labels for the shift and mode keys.
    pub fn control_labels(&self) -> ControlLabels {
        control_labels(&self.state)
    }

    /// Overall keyboard height to request from the host.
    pub fn keyboard_height(&self) -> u32 {
        self.settings.effective_keyboard_height()
    }

    /// Re-reads the settings from storage.  Key state is kept.
    pub fn reload_settings(&mut self) {
        self.settings = self.repository.load();
        debug!("keyboard settings reloaded");
    }

    pub fn settings(&self) -> &KeyboardSettings {
        &self.settings
    }

    pub fn state(&self) -> KeyboardState {
        self.state
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }
}
