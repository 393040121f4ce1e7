//! Display handles and activation/power state types.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Identity of a display within its video device's enumeration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DisplayId(u64);

impl DisplayId {
    /// Create a display identity from a backend-assigned value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw backend value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DisplayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mode-set state of a display, distinct from its DPMS power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// No mode is set; the display shows nothing
    Inactive,
    /// A mode is set and the display can be composed onto
    Active,
    /// The connector vanished; the handle is stale
    Gone,
}

/// DPMS power signaling state of a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpmsState {
    /// Display powered on
    On,
    /// Display powered off
    Off,
}

/// A single display output enumerated from a video device.
///
/// Implementations are provided by the video backend; the coordinator only
/// sequences calls into them.
pub trait Display: Send + Sync {
    /// Stable identity of this display within its device.
    fn id(&self) -> DisplayId;

    /// Current mode-set state.
    fn state(&self) -> DisplayState;

    /// Set a mode on the display.
    fn activate(&self) -> Result<()>;

    /// Change the DPMS power state.
    fn set_dpms(&self, state: DpmsState) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_id_ordering() {
        assert!(DisplayId::new(1) < DisplayId::new(2));
        assert_eq!(DisplayId::new(3).to_string(), "3");
    }

    #[test]
    fn test_display_state_distinct_from_power() {
        // Activation and DPMS are separate axes
        assert_ne!(DisplayState::Active, DisplayState::Inactive);
        assert_ne!(DpmsState::On, DpmsState::Off);
    }
}
