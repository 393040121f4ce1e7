//! Input device handles and event types.

use std::sync::Arc;

use crate::subscription::SubscriptionId;
use crate::Result;

/// A raw input event as delivered by the input backend.
///
/// The payload is opaque to the session layer, which gates events on the
/// awake state but never decodes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Backend keycode
    pub keycode: u32,
    /// Backend event value (press, release, repeat, axis delta, ...)
    pub value: i32,
}

/// Observer of raw input events.
pub trait InputObserver: Send + Sync {
    /// Called for every event the input backend delivers.
    fn on_input(&self, event: &InputEvent);
}

/// The input device bound to a session.
pub trait InputDevice: Send + Sync {
    /// Register an observer for raw input events.
    ///
    /// Returns the handle to surrender at unregistration.
    fn register(&self, observer: Arc<dyn InputObserver>) -> Result<SubscriptionId>;

    /// Remove a previously registered observer.
    fn unregister(&self, subscription: SubscriptionId);
}
