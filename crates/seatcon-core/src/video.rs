//! Video device handles and hotplug event types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::display::Display;
use crate::subscription::SubscriptionId;
use crate::Result;

/// Identity of a video device, assigned by the video backend.
///
/// No two bindings in one session may reference the same identity
/// concurrently.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DeviceId(u64);

impl DeviceId {
    /// Create a device identity from a backend-assigned value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw backend value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of hotplug notification delivered by a video device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HotplugAction {
    /// A display appeared on the device
    New,
    /// A display vanished from the device
    Gone,
    /// The device transitioned from asleep to awake
    WakeUp,
    /// The device is transitioning to sleep
    Sleep,
    /// The device asks for its displays to be redrawn
    Refresh,
}

/// A hotplug notification: what happened, and to which display.
#[derive(Clone)]
pub struct HotplugEvent {
    /// What happened
    pub action: HotplugAction,
    /// The display the action applies to
    pub display: Arc<dyn Display>,
}

impl std::fmt::Debug for HotplugEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotplugEvent")
            .field("action", &self.action)
            .field("display", &self.display.id())
            .finish()
    }
}

/// Observer of hotplug notifications from one video device.
pub trait HotplugObserver: Send + Sync {
    /// Called by the backend for every hotplug notification on the device.
    fn on_hotplug(&self, event: &HotplugEvent);
}

/// A hot-pluggable video output device.
pub trait VideoDevice: Send + Sync {
    /// Backend-assigned identity of this device.
    fn id(&self) -> DeviceId;

    /// Whether the device is currently awake.
    ///
    /// Displays on a sleeping device must not be touched.
    fn is_awake(&self) -> bool;

    /// Enumerate the displays currently attached to the device.
    ///
    /// The sequence is finite and re-enumerated on every call, so the result
    /// reflects mutations since the previous call. Order is device-defined
    /// and stable between mutations.
    fn displays(&self) -> Vec<Arc<dyn Display>>;

    /// Register an observer for hotplug notifications.
    ///
    /// Returns the handle to surrender at unregistration.
    fn register_hotplug(&self, observer: Arc<dyn HotplugObserver>) -> Result<SubscriptionId>;

    /// Remove a previously registered observer.
    fn unregister_hotplug(&self, subscription: SubscriptionId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_id_ordering() {
        assert!(DeviceId::new(1) < DeviceId::new(2));
        assert_eq!(DeviceId::new(9).raw(), 9);
        assert_eq!(DeviceId::new(9).to_string(), "9");
    }

    #[test]
    fn test_device_id_serde_round_trip() {
        let id = DeviceId::new(17);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "17");
        let back: DeviceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
