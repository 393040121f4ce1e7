//! Terminal handles and lifecycle event types.

use std::sync::Arc;

use crate::display::Display;
use crate::input::InputDevice;
use crate::reactor::Reactor;
use crate::Result;

/// Lifecycle notification emitted by a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TerminalEvent {
    /// The terminal lost its backing object and must be reopened to stay
    /// usable
    Hangup,
    /// The terminal was shut down by its ultimate owner; reserved for
    /// consumers outside the session layer
    Closed,
}

/// Observer of terminal lifecycle notifications.
pub trait TerminalObserver: Send + Sync {
    /// Called for every lifecycle notification the terminal emits.
    fn on_terminal_event(&self, event: &TerminalEvent);
}

/// The terminal object a session composes its displays into.
///
/// Rendering, display composition and input consumption live behind this
/// trait; the session layer only sequences calls into it.
pub trait Terminal: Send + Sync {
    /// Open the terminal, installing `observer` for lifecycle notifications.
    ///
    /// May be called again after a hangup to reopen with the same observer.
    fn open(&self, observer: Arc<dyn TerminalObserver>) -> Result<()>;

    /// Add a display to the composition.
    fn add_display(&self, display: &Arc<dyn Display>);

    /// Remove a display from the composition.
    fn remove_display(&self, display: &Arc<dyn Display>);

    /// Redraw the current composition.
    fn redraw(&self);

    /// Resume rendering after sleep.
    fn wake_up(&self);

    /// Stop rendering until the next wake.
    fn sleep(&self);
}

/// Factory creating the terminal a session owns.
///
/// The session calls this exactly once during creation, binding the terminal
/// to the session's reactor and input device.
pub trait TerminalFactory: Send + Sync {
    /// Create a terminal bound to the given reactor and input device.
    fn create(
        &self,
        reactor: &Arc<dyn Reactor>,
        input: &Arc<dyn InputDevice>,
    ) -> Result<Arc<dyn Terminal>>;
}
