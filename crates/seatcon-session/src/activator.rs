//! Display activation policy.

use std::sync::Arc;

use tracing::warn;

use seatcon_core::{Display, DisplayState, DpmsState, VideoDevice};

/// Activate `display` and power it on, if device policy allows.
///
/// Displays on a sleeping device are never touched, and an already active
/// display is left alone. Activation and DPMS failures are absorbed here:
/// the display keeps its previous state and a DPMS failure does not roll
/// back an activation that already succeeded.
pub(crate) fn activate_display(device: &dyn VideoDevice, display: &Arc<dyn Display>) {
    if !device.is_awake() {
        return;
    }

    if display.state() != DisplayState::Inactive {
        return;
    }

    let display_id = display.id();

    if let Err(err) = display.activate() {
        warn!("cannot activate display {}: {}", display_id, err);
        return;
    }

    if let Err(err) = display.set_dpms(DpmsState::On) {
        warn!("cannot set DPMS state to on for display {}: {}", display_id, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallJournal, MockDisplay, MockVideoDevice};

    #[test]
    fn test_sleeping_device_is_never_touched() {
        let journal = CallJournal::new();
        let device = MockVideoDevice::new(1, journal.clone());
        device.set_awake(false);
        let display = MockDisplay::new(1, journal.clone());

        activate_display(device.as_ref(), &(display.clone() as Arc<dyn Display>));

        assert_eq!(display.state(), DisplayState::Inactive);
        assert!(journal.calls().is_empty());
    }

    #[test]
    fn test_inactive_display_is_activated_and_powered_on() {
        let journal = CallJournal::new();
        let device = MockVideoDevice::new(1, journal.clone());
        let display = MockDisplay::new(1, journal.clone());

        activate_display(device.as_ref(), &(display.clone() as Arc<dyn Display>));

        assert_eq!(display.state(), DisplayState::Active);
        assert_eq!(display.dpms(), DpmsState::On);
    }

    #[test]
    fn test_active_display_is_left_alone() {
        let journal = CallJournal::new();
        let device = MockVideoDevice::new(1, journal.clone());
        let display = MockDisplay::new(1, journal.clone());
        display.set_state(DisplayState::Active);

        activate_display(device.as_ref(), &(display.clone() as Arc<dyn Display>));

        assert!(journal.calls().is_empty());
    }

    #[test]
    fn test_activation_failure_leaves_display_inactive() {
        let journal = CallJournal::new();
        let device = MockVideoDevice::new(1, journal.clone());
        let display = MockDisplay::new(1, journal.clone());
        display.fail_activate();

        activate_display(device.as_ref(), &(display.clone() as Arc<dyn Display>));

        assert_eq!(display.state(), DisplayState::Inactive);
        // DPMS must not be attempted after a failed activation
        assert_eq!(journal.count("display[1].set_dpms(On)"), 0);
    }

    #[test]
    fn test_dpms_failure_does_not_roll_back_activation() {
        let journal = CallJournal::new();
        let device = MockVideoDevice::new(1, journal.clone());
        let display = MockDisplay::new(1, journal.clone());
        display.fail_dpms();

        activate_display(device.as_ref(), &(display.clone() as Arc<dyn Display>));

        assert_eq!(display.state(), DisplayState::Active);
        assert_eq!(display.dpms(), DpmsState::Off);
    }
}
