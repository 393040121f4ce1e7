//! Subscription handles for observer registration.

/// Handle returned by a collaborator when an observer is registered.
///
/// The coordinator keeps the handle for every registration it performs and
/// surrenders it at unregistration, always before the observed object is
/// released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Create a handle from a raw value minted by a collaborator.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw value of the handle.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
