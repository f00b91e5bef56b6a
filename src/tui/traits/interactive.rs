//! Interactive trait for components that handle keyboard input

use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the event loop whether the component consumed the key or if it
/// should bubble up for global handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that handle keyboard input
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// Active component (search prompt, logs panel)
///    │
///    │ Handled::No
///    ▼
/// Global keys (q, ?, t, /, l)
///    │
///    ▼
/// Explorer keys (n/N, Tab, 1/2)
/// ```
pub trait Interactive {
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Key hints shown in the status bar while this component owns input
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
