//! Video device registry and hotplug dispatch.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use tracing::debug;

use seatcon_core::{
    DeviceId, HotplugAction, HotplugEvent, HotplugObserver, Result, SubscriptionId, Terminal,
    VideoDevice,
};

use crate::activator::activate_display;

/// One registered video device: the device handle plus its hotplug
/// subscription.
///
/// A binding exists in the registry iff its subscription is installed on the
/// device.
struct DeviceBinding {
    device: Arc<dyn VideoDevice>,
    subscription: SubscriptionId,
}

/// Ordered collection of device bindings, keyed by device identity.
pub(crate) struct DeviceRegistry {
    bindings: BTreeMap<DeviceId, DeviceBinding>,
    terminal: Arc<dyn Terminal>,
}

impl DeviceRegistry {
    pub(crate) fn new(terminal: Arc<dyn Terminal>) -> Self {
        Self {
            bindings: BTreeMap::new(),
            terminal,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }

    pub(crate) fn device_ids(&self) -> Vec<DeviceId> {
        self.bindings.keys().copied().collect()
    }

    /// Register `device` and subscribe to its hotplug notifications.
    ///
    /// Idempotent on device identity. On subscription failure nothing is
    /// linked and the error propagates to the caller.
    pub(crate) fn add(&mut self, device: Arc<dyn VideoDevice>) -> Result<()> {
        let id = device.id();
        if self.bindings.contains_key(&id) {
            return Ok(());
        }

        debug!("adding video device {}", id);

        let handler = Arc::new(HotplugHandler {
            device: Arc::downgrade(&device),
            terminal: Arc::clone(&self.terminal),
        });
        let subscription = device.register_hotplug(handler)?;

        self.bindings.insert(
            id,
            DeviceBinding {
                device,
                subscription,
            },
        );
        Ok(())
    }

    /// Drop the binding for `id`, removing its displays from the terminal.
    ///
    /// Unknown identities are a no-op.
    pub(crate) fn remove(&mut self, id: DeviceId) {
        let Some(binding) = self.bindings.remove(&id) else {
            return;
        };

        debug!("removing video device {}", id);

        for display in binding.device.displays() {
            self.terminal.remove_display(&display);
            self.terminal.redraw();
        }

        binding.device.unregister_hotplug(binding.subscription);
        // The binding drops here, releasing the device handle only after the
        // subscription is gone.
    }

    /// Drop every binding. Teardown path: no per-display redraws, and every
    /// subscription is surrendered before any device handle is released.
    pub(crate) fn remove_all(&mut self) {
        let bindings = std::mem::take(&mut self.bindings);
        for (id, binding) in &bindings {
            debug!("removing video device {}", id);
            for display in binding.device.displays() {
                self.terminal.remove_display(&display);
            }
            binding.device.unregister_hotplug(binding.subscription);
        }
        // The device handles drop together, after the loop.
        drop(bindings);
    }
}

/// Per-binding hotplug observer.
///
/// Holds the device weakly; the binding in the registry owns the strong
/// handle, so an event arriving after removal resolves to a dead reference
/// and is dropped.
struct HotplugHandler {
    device: Weak<dyn VideoDevice>,
    terminal: Arc<dyn Terminal>,
}

impl HotplugObserver for HotplugHandler {
    fn on_hotplug(&self, event: &HotplugEvent) {
        let Some(device) = self.device.upgrade() else {
            return;
        };

        match event.action {
            HotplugAction::New => {
                activate_display(device.as_ref(), &event.display);
                self.terminal.add_display(&event.display);
            }
            HotplugAction::Gone => {
                self.terminal.remove_display(&event.display);
            }
            HotplugAction::WakeUp => {
                // Redraw after every addition so earlier displays stay
                // visible even if a later one in the enumeration fails.
                for display in device.displays() {
                    activate_display(device.as_ref(), &display);
                    self.terminal.add_display(&display);
                    self.terminal.redraw();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallJournal, MockDisplay, MockTerminal, MockVideoDevice};

    fn registry(journal: &CallJournal) -> (DeviceRegistry, Arc<MockTerminal>) {
        let terminal = MockTerminal::new(journal.clone());
        (
            DeviceRegistry::new(terminal.clone() as Arc<dyn Terminal>),
            terminal,
        )
    }

    #[test]
    fn test_add_is_idempotent_on_identity() {
        let journal = CallJournal::new();
        let (mut registry, _terminal) = registry(&journal);
        let device = MockVideoDevice::new(1, journal.clone());

        registry.add(device.clone() as Arc<dyn VideoDevice>).unwrap();
        registry.add(device.clone() as Arc<dyn VideoDevice>).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(journal.count("video[1].register_hotplug"), 1);
    }

    #[test]
    fn test_subscription_failure_leaves_no_binding() {
        let journal = CallJournal::new();
        let (mut registry, _terminal) = registry(&journal);
        let device = MockVideoDevice::new(1, journal.clone());
        device.fail_register();

        let result = registry.add(device.clone() as Arc<dyn VideoDevice>);

        assert!(result.is_err());
        assert_eq!(registry.len(), 0);
        assert!(!device.has_observer());
    }

    #[test]
    fn test_remove_unknown_device_is_noop() {
        let journal = CallJournal::new();
        let (mut registry, _terminal) = registry(&journal);

        registry.remove(DeviceId::new(42));

        assert!(journal.calls().is_empty());
    }

    #[test]
    fn test_remove_drops_displays_then_unregisters() {
        let journal = CallJournal::new();
        let (mut registry, _terminal) = registry(&journal);
        let device = MockVideoDevice::new(1, journal.clone());
        device.attach_display(MockDisplay::new(1, journal.clone()));
        device.attach_display(MockDisplay::new(2, journal.clone()));
        registry.add(device.clone() as Arc<dyn VideoDevice>).unwrap();

        registry.remove(device.id());

        let calls = journal.calls();
        let unregister = journal.position("video[1].unregister_hotplug").unwrap();
        for call in ["terminal.remove_display(1)", "terminal.remove_display(2)"] {
            assert!(journal.position(call).unwrap() < unregister, "{calls:?}");
        }
        assert_eq!(journal.count("terminal.redraw"), 2);
        assert!(!device.has_observer());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_remove_all_skips_redraw() {
        let journal = CallJournal::new();
        let (mut registry, _terminal) = registry(&journal);
        let device = MockVideoDevice::new(1, journal.clone());
        device.attach_display(MockDisplay::new(1, journal.clone()));
        registry.add(device.clone() as Arc<dyn VideoDevice>).unwrap();

        registry.remove_all();

        assert_eq!(journal.count("terminal.remove_display(1)"), 1);
        assert_eq!(journal.count("terminal.redraw"), 0);
        assert!(!device.has_observer());
    }

    #[test]
    fn test_stale_hotplug_event_after_removal_is_dropped() {
        let journal = CallJournal::new();
        let (mut registry, _terminal) = registry(&journal);
        let device = MockVideoDevice::new(1, journal.clone());
        registry.add(device.clone() as Arc<dyn VideoDevice>).unwrap();

        // Keep the observer alive past removal, as a slow backend might.
        let observer = device.take_observer().unwrap();
        registry.remove(device.id());
        let display = MockDisplay::new(1, journal.clone());
        drop(device); // last strong device handle

        observer.on_hotplug(&HotplugEvent {
            action: HotplugAction::New,
            display: display as Arc<dyn seatcon_core::Display>,
        });

        assert_eq!(journal.count("terminal.add_display(1)"), 0);
    }
}
