//! Coordinator session lifecycle and wake/sleep control.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, trace};

use seatcon_core::{
    DeviceId, Error, InputDevice, InputEvent, InputObserver, Reactor, Result, SessionConfig,
    SessionId, SessionInfo, SubscriptionId, TerminalFactory, VideoDevice,
};

use crate::registry::DeviceRegistry;
use crate::supervisor::TerminalSupervisor;

/// Discards input events while the session sleeps.
///
/// While awake the gate lets events fall through to the terminal's own input
/// binding; it consumes nothing itself.
struct InputGate {
    awake: Arc<AtomicBool>,
}

impl InputObserver for InputGate {
    fn on_input(&self, event: &InputEvent) {
        if !self.awake.load(Ordering::SeqCst) {
            trace!("discarding {:?} while asleep", event);
        }
    }
}

/// A coordinator session: one terminal, one input device, any number of
/// hot-pluggable video devices.
///
/// The session keeps the terminal's display composition consistent with
/// device arrival and removal, propagates wake/sleep transitions, and gates
/// input while asleep. Dropping the session unwinds creation: observers are
/// unregistered before the objects they reference are released.
pub struct Session {
    id: SessionId,
    config: SessionConfig,
    awake: Arc<AtomicBool>,
    input_subscription: Option<SubscriptionId>,
    registry: DeviceRegistry,
    // Drop order below follows declaration order: the supervisor (and with
    // it the terminal) is released before the input device, the reactor
    // last.
    supervisor: Arc<TerminalSupervisor>,
    input: Arc<dyn InputDevice>,
    #[allow(dead_code)]
    reactor: Arc<dyn Reactor>,
}

impl Session {
    /// Start building a session.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Configured session name, if any.
    pub fn name(&self) -> Option<&str> {
        self.config.name.as_deref()
    }

    /// Register a video device and subscribe to its hotplug notifications.
    ///
    /// Idempotent on device identity: adding the same device twice leaves
    /// exactly one binding. On subscription failure nothing is registered
    /// and the error propagates.
    pub fn add_device(&mut self, device: Arc<dyn VideoDevice>) -> Result<()> {
        self.registry.add(device)
    }

    /// Unregister a video device, dropping its displays from the terminal.
    ///
    /// Unknown identities are a no-op.
    pub fn remove_device(&mut self, id: DeviceId) {
        self.registry.remove(id);
    }

    /// Identities of the registered devices, in registry order.
    pub fn devices(&self) -> Vec<DeviceId> {
        self.registry.device_ids()
    }

    /// Number of registered devices.
    pub fn device_count(&self) -> usize {
        self.registry.len()
    }

    /// Wake the session, forwarding once to the terminal. Idempotent.
    pub fn wake_up(&self) {
        if !self.awake.swap(true, Ordering::SeqCst) {
            debug!("session {} waking up", self.id);
            self.supervisor.terminal().wake_up();
        }
    }

    /// Put the session to sleep, forwarding once to the terminal. Idempotent.
    pub fn sleep(&self) {
        if self.awake.swap(false, Ordering::SeqCst) {
            debug!("session {} going to sleep", self.id);
            self.supervisor.terminal().sleep();
        }
    }

    /// Whether the session is currently awake. A fresh session is asleep.
    pub fn is_awake(&self) -> bool {
        self.awake.load(Ordering::SeqCst)
    }

    /// Snapshot of the externally observable session state.
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            name: self.config.name.clone(),
            awake: self.is_awake(),
            device_count: self.registry.len(),
        }
    }
}

/// Teardown unwinds creation: the input subscription goes first, then every
/// device binding (displays dropped, hotplug unregistered, device handle
/// released), then the terminal, input device and reactor handles in that
/// order.
impl Drop for Session {
    fn drop(&mut self) {
        debug!("destroying session {}", self.id);
        if let Some(subscription) = self.input_subscription.take() {
            self.input.unregister(subscription);
        }
        self.registry.remove_all();
    }
}

/// Builder wiring a [`Session`] to its collaborators.
///
/// The reactor, input device and terminal factory are all required;
/// [`build`](Self::build) reports the first missing one as
/// [`Error::InvalidArgument`] without allocating or mutating anything.
#[derive(Default)]
pub struct SessionBuilder {
    reactor: Option<Arc<dyn Reactor>>,
    input: Option<Arc<dyn InputDevice>>,
    factory: Option<Arc<dyn TerminalFactory>>,
    config: SessionConfig,
}

impl SessionBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Event loop that dispatches every callback of this session.
    pub fn reactor(mut self, reactor: Arc<dyn Reactor>) -> Self {
        self.reactor = Some(reactor);
        self
    }

    /// Input device gated by the session's awake state.
    pub fn input_device(mut self, input: Arc<dyn InputDevice>) -> Self {
        self.input = Some(input);
        self
    }

    /// Factory for the terminal the session will own.
    pub fn terminal_factory(mut self, factory: Arc<dyn TerminalFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Session configuration. Defaults to [`SessionConfig::default`].
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Create the session.
    ///
    /// Acquisition order: terminal creation, input subscription, terminal
    /// open. A failure releases everything acquired so far in reverse order
    /// before the error is returned, so no resource stays referenced past a
    /// failed construction.
    pub fn build(self) -> Result<Session> {
        let reactor = self.reactor.ok_or(Error::InvalidArgument("reactor"))?;
        let input = self.input.ok_or(Error::InvalidArgument("input device"))?;
        let factory = self
            .factory
            .ok_or(Error::InvalidArgument("terminal factory"))?;
        self.config.validate()?;

        let id = SessionId::new();
        info!("creating session {} (name={:?})", id, self.config.name);

        let terminal = factory.create(&reactor, &input)?;
        let supervisor = TerminalSupervisor::new(Arc::clone(&terminal));

        let awake = Arc::new(AtomicBool::new(false));
        let gate = Arc::new(InputGate {
            awake: Arc::clone(&awake),
        });
        // The terminal handle is released by the early return if this fails.
        let input_subscription = input.register(gate)?;

        if let Err(err) = supervisor.open() {
            input.unregister(input_subscription);
            return Err(err);
        }

        let session = Session {
            id,
            config: self.config,
            awake,
            input_subscription: Some(input_subscription),
            registry: DeviceRegistry::new(terminal),
            supervisor,
            input,
            reactor,
        };

        if session.config.wake_on_create {
            session.wake_up();
        }

        Ok(session)
    }
}
