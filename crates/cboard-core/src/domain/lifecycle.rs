//! Host-driven lifecycle of the keyboard's input view.
//!
//! The input-method framework owns creation and teardown.  It tells us about
//! them through callbacks; this type records where in that sequence we are so
//! that late callbacks (a tap arriving after teardown, a finish without a
//! start) are recognised and ignored.
//!
//! ```text
//! Initialized ──create──► Created ──start_input_view──► Started
//!                            ▲                             │
//!                            └─────finish_input_view───────┘
//!  any state ──destroy──► Destroyed
//! ```

use tracing::debug;

/// Where the input view is in its host-driven lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Constructed, not yet created by the host.
    #[default]
    Initialized,
    /// Created; the input view is not currently shown.
    Created,
    /// The input view is shown and receiving taps.
    Started,
    /// Torn down.  Terminal.
    Destroyed,
}

impl LifecycleState {
    /// Moves to `Created`.  Ignored once destroyed.
    pub fn create(self) -> Self {
        self.transition("create", |state| match state {
            Self::Destroyed => None,
            _ => Some(Self::Created),
        })
    }

    /// `Created` → `Started`.  Any other state is left unchanged.
    pub fn start_input_view(self) -> Self {
        self.transition("start_input_view", |state| match state {
            Self::Created => Some(Self::Started),
            _ => None,
        })
    }

    /// `Started` → `Created`.  Any other state is left unchanged.
    pub fn finish_input_view(self) -> Self {
        self.transition("finish_input_view", |state| match state {
            Self::Started => Some(Self::Created),
            _ => None,
        })
    }

    /// Moves to `Destroyed` from any state.
    pub fn destroy(self) -> Self {
        Self::Destroyed
    }

    /// Returns `true` until the host destroys the view.
    pub fn is_alive(self) -> bool {
        self != Self::Destroyed
    }

    fn transition(self, event: &str, next: impl FnOnce(Self) -> Option<Self>) -> Self {
        match next(self) {
            Some(state) => state,
            None => {
                debug!("lifecycle event {event} ignored in state {self:?}");
                self
            }
        }
    }
}
