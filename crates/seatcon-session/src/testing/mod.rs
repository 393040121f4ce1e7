//! Call-recording doubles for the collaborator traits.
//!
//! The doubles journal every call they receive so tests can assert on
//! cross-collaborator ordering, and expose failure toggles for the error
//! paths. They stand in for real video, input and terminal backends both in
//! this crate's tests and in downstream consumers wiring up the coordinator
//! without hardware.

mod journal;

pub use journal::CallJournal;

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use seatcon_core::{
    DeviceId, Display, DisplayId, DisplayState, DpmsState, Error, HotplugAction, HotplugEvent,
    HotplugObserver, InputDevice, InputEvent, InputObserver, Reactor, Result, SessionConfig,
    SubscriptionId, Terminal, TerminalEvent, TerminalFactory, TerminalObserver, VideoDevice,
};

use crate::session::Session;

/// Scripted display double.
///
/// Starts inactive and powered off; `activate` and `set_dpms` can be made to
/// fail for exercising the absorbed-error paths.
pub struct MockDisplay {
    id: DisplayId,
    state: Mutex<DisplayState>,
    dpms: Mutex<DpmsState>,
    fail_activate: AtomicBool,
    fail_dpms: AtomicBool,
    journal: CallJournal,
}

impl MockDisplay {
    /// Create a display double recording into `journal`.
    pub fn new(id: u64, journal: CallJournal) -> Arc<Self> {
        Arc::new(Self {
            id: DisplayId::new(id),
            state: Mutex::new(DisplayState::Inactive),
            dpms: Mutex::new(DpmsState::Off),
            fail_activate: AtomicBool::new(false),
            fail_dpms: AtomicBool::new(false),
            journal,
        })
    }

    /// Make subsequent `activate` calls fail.
    pub fn fail_activate(&self) {
        self.fail_activate.store(true, Ordering::SeqCst);
    }

    /// Make subsequent `set_dpms` calls fail.
    pub fn fail_dpms(&self) {
        self.fail_dpms.store(true, Ordering::SeqCst);
    }

    /// Force the mode-set state.
    pub fn set_state(&self, state: DisplayState) {
        *self.state.lock().unwrap() = state;
    }

    /// Current DPMS state.
    pub fn dpms(&self) -> DpmsState {
        *self.dpms.lock().unwrap()
    }
}

impl Display for MockDisplay {
    fn id(&self) -> DisplayId {
        self.id
    }

    fn state(&self) -> DisplayState {
        *self.state.lock().unwrap()
    }

    fn activate(&self) -> Result<()> {
        self.journal.record(format!("display[{}].activate", self.id));
        if self.fail_activate.load(Ordering::SeqCst) {
            return Err(Error::Device(format!(
                "mode-set failed on display {}",
                self.id
            )));
        }
        *self.state.lock().unwrap() = DisplayState::Active;
        Ok(())
    }

    fn set_dpms(&self, state: DpmsState) -> Result<()> {
        self.journal
            .record(format!("display[{}].set_dpms({:?})", self.id, state));
        if self.fail_dpms.load(Ordering::SeqCst) {
            return Err(Error::Device(format!(
                "DPMS change failed on display {}",
                self.id
            )));
        }
        *self.dpms.lock().unwrap() = state;
        Ok(())
    }
}

/// Scripted video device double with an emitting hotplug slot.
///
/// Awake by default. Holds at most one observer, like a backend exposing a
/// single notification slot per consumer.
pub struct MockVideoDevice {
    id: DeviceId,
    awake: AtomicBool,
    displays: Mutex<Vec<Arc<MockDisplay>>>,
    observer: Mutex<Option<(SubscriptionId, Arc<dyn HotplugObserver>)>>,
    next_subscription: AtomicU64,
    fail_register: AtomicBool,
    journal: CallJournal,
}

impl MockVideoDevice {
    /// Create a device double recording into `journal`.
    pub fn new(id: u64, journal: CallJournal) -> Arc<Self> {
        Arc::new(Self {
            id: DeviceId::new(id),
            awake: AtomicBool::new(true),
            displays: Mutex::new(Vec::new()),
            observer: Mutex::new(None),
            next_subscription: AtomicU64::new(1),
            fail_register: AtomicBool::new(false),
            journal,
        })
    }

    /// Set the device's awake state.
    pub fn set_awake(&self, awake: bool) {
        self.awake.store(awake, Ordering::SeqCst);
    }

    /// Make subsequent `register_hotplug` calls fail.
    pub fn fail_register(&self) {
        self.fail_register.store(true, Ordering::SeqCst);
    }

    /// Attach a display to the enumeration without emitting an event.
    pub fn attach_display(&self, display: Arc<MockDisplay>) {
        self.displays.lock().unwrap().push(display);
    }

    /// Whether an observer is currently registered.
    pub fn has_observer(&self) -> bool {
        self.observer.lock().unwrap().is_some()
    }

    /// Remove and return the registered observer, keeping it alive.
    pub fn take_observer(&self) -> Option<Arc<dyn HotplugObserver>> {
        self.observer.lock().unwrap().take().map(|(_, o)| o)
    }

    /// Deliver a hotplug event to the registered observer, if any.
    pub fn emit(&self, action: HotplugAction, display: Arc<MockDisplay>) {
        // Clone the observer out of the lock first: dispatch re-enters the
        // device from the same thread of control.
        let observer = self
            .observer
            .lock()
            .unwrap()
            .as_ref()
            .map(|(_, o)| Arc::clone(o));
        if let Some(observer) = observer {
            observer.on_hotplug(&HotplugEvent {
                action,
                display: display as Arc<dyn Display>,
            });
        }
    }
}

impl VideoDevice for MockVideoDevice {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn is_awake(&self) -> bool {
        self.awake.load(Ordering::SeqCst)
    }

    fn displays(&self) -> Vec<Arc<dyn Display>> {
        self.displays
            .lock()
            .unwrap()
            .iter()
            .map(|d| Arc::clone(d) as Arc<dyn Display>)
            .collect()
    }

    fn register_hotplug(&self, observer: Arc<dyn HotplugObserver>) -> Result<SubscriptionId> {
        self.journal
            .record(format!("video[{}].register_hotplug", self.id));
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(Error::Subscription(format!(
                "video device {} rejected the observer",
                self.id
            )));
        }
        let subscription =
            SubscriptionId::new(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        *self.observer.lock().unwrap() = Some((subscription, observer));
        Ok(subscription)
    }

    fn unregister_hotplug(&self, subscription: SubscriptionId) {
        self.journal
            .record(format!("video[{}].unregister_hotplug", self.id));
        let mut slot = self.observer.lock().unwrap();
        if matches!(&*slot, Some((s, _)) if *s == subscription) {
            *slot = None;
        }
    }
}

/// Scripted input device double.
pub struct MockInputDevice {
    observer: Mutex<Option<(SubscriptionId, Arc<dyn InputObserver>)>>,
    next_subscription: AtomicU64,
    fail_register: AtomicBool,
    journal: CallJournal,
}

impl MockInputDevice {
    /// Create an input device double recording into `journal`.
    pub fn new(journal: CallJournal) -> Arc<Self> {
        Arc::new(Self {
            observer: Mutex::new(None),
            next_subscription: AtomicU64::new(1),
            fail_register: AtomicBool::new(false),
            journal,
        })
    }

    /// Make subsequent `register` calls fail.
    pub fn fail_register(&self) {
        self.fail_register.store(true, Ordering::SeqCst);
    }

    /// Whether an observer is currently registered.
    pub fn has_observer(&self) -> bool {
        self.observer.lock().unwrap().is_some()
    }

    /// Deliver an input event to the registered observer, if any.
    pub fn emit(&self, event: &InputEvent) {
        let observer = self
            .observer
            .lock()
            .unwrap()
            .as_ref()
            .map(|(_, o)| Arc::clone(o));
        if let Some(observer) = observer {
            observer.on_input(event);
        }
    }
}

impl InputDevice for MockInputDevice {
    fn register(&self, observer: Arc<dyn InputObserver>) -> Result<SubscriptionId> {
        self.journal.record("input.register");
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(Error::Subscription(
                "input backend rejected the observer".to_string(),
            ));
        }
        let subscription =
            SubscriptionId::new(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        *self.observer.lock().unwrap() = Some((subscription, observer));
        Ok(subscription)
    }

    fn unregister(&self, subscription: SubscriptionId) {
        self.journal.record("input.unregister");
        let mut slot = self.observer.lock().unwrap();
        if matches!(&*slot, Some((s, _)) if *s == subscription) {
            *slot = None;
        }
    }
}

/// Scripted terminal double tracking its composition and lifecycle observer.
pub struct MockTerminal {
    displays: Mutex<Vec<DisplayId>>,
    observer: Mutex<Option<Arc<dyn TerminalObserver>>>,
    open_count: AtomicUsize,
    fail_open: AtomicBool,
    journal: CallJournal,
}

impl MockTerminal {
    /// Create a terminal double recording into `journal`.
    pub fn new(journal: CallJournal) -> Arc<Self> {
        Arc::new(Self {
            displays: Mutex::new(Vec::new()),
            observer: Mutex::new(None),
            open_count: AtomicUsize::new(0),
            fail_open: AtomicBool::new(false),
            journal,
        })
    }

    /// Make subsequent `open` calls fail.
    pub fn fail_open(&self) {
        self.fail_open.store(true, Ordering::SeqCst);
    }

    /// Number of successful opens so far.
    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }

    /// The installed lifecycle observer, for identity assertions.
    pub fn observer(&self) -> Option<Arc<dyn TerminalObserver>> {
        self.observer.lock().unwrap().clone()
    }

    /// Identities currently in the composition, in addition order.
    pub fn displays(&self) -> Vec<DisplayId> {
        self.displays.lock().unwrap().clone()
    }

    /// Deliver a lifecycle event to the installed observer, if any.
    pub fn emit(&self, event: TerminalEvent) {
        // Clone out of the lock: a hangup observer reopens the terminal,
        // which takes the observer lock again.
        let observer = self.observer.lock().unwrap().clone();
        if let Some(observer) = observer {
            observer.on_terminal_event(&event);
        }
    }
}

impl Terminal for MockTerminal {
    fn open(&self, observer: Arc<dyn TerminalObserver>) -> Result<()> {
        self.journal.record("terminal.open");
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(Error::Terminal("terminal backend unavailable".to_string()));
        }
        *self.observer.lock().unwrap() = Some(observer);
        self.open_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn add_display(&self, display: &Arc<dyn Display>) {
        self.journal
            .record(format!("terminal.add_display({})", display.id()));
        self.displays.lock().unwrap().push(display.id());
    }

    fn remove_display(&self, display: &Arc<dyn Display>) {
        self.journal
            .record(format!("terminal.remove_display({})", display.id()));
        self.displays.lock().unwrap().retain(|id| *id != display.id());
    }

    fn redraw(&self) {
        self.journal.record("terminal.redraw");
    }

    fn wake_up(&self) {
        self.journal.record("terminal.wake_up");
    }

    fn sleep(&self) {
        self.journal.record("terminal.sleep");
    }
}

/// Reactor double; the coordinator only holds the handle.
pub struct MockReactor;

impl MockReactor {
    /// Create a reactor double.
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

impl Reactor for MockReactor {}

/// Factory handing out one prepared mock terminal.
pub struct MockTerminalFactory {
    terminal: Arc<MockTerminal>,
    fail: AtomicBool,
}

impl MockTerminalFactory {
    /// Create a factory that returns `terminal` from every `create` call.
    pub fn new(terminal: Arc<MockTerminal>) -> Arc<Self> {
        Arc::new(Self {
            terminal,
            fail: AtomicBool::new(false),
        })
    }

    /// Make subsequent `create` calls fail.
    pub fn fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

impl TerminalFactory for MockTerminalFactory {
    fn create(
        &self,
        _reactor: &Arc<dyn Reactor>,
        _input: &Arc<dyn InputDevice>,
    ) -> Result<Arc<dyn Terminal>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Terminal("terminal backend unavailable".to_string()));
        }
        Ok(Arc::clone(&self.terminal) as Arc<dyn Terminal>)
    }
}

/// Everything a coordinator test needs, wired to one journal.
pub struct TestBench {
    /// Shared call journal all doubles record into
    pub journal: CallJournal,
    /// Reactor double
    pub reactor: Arc<MockReactor>,
    /// Input device double
    pub input: Arc<MockInputDevice>,
    /// Terminal double handed out by the factory
    pub terminal: Arc<MockTerminal>,
    /// Terminal factory double
    pub factory: Arc<MockTerminalFactory>,
}

impl TestBench {
    /// Create a bench with a fresh journal.
    pub fn new() -> Self {
        let journal = CallJournal::new();
        let terminal = MockTerminal::new(journal.clone());
        Self {
            reactor: MockReactor::new(),
            input: MockInputDevice::new(journal.clone()),
            factory: MockTerminalFactory::new(terminal.clone()),
            terminal,
            journal,
        }
    }

    /// Build a session from the bench collaborators with `config`.
    pub fn session(&self, config: SessionConfig) -> Result<Session> {
        Session::builder()
            .reactor(self.reactor.clone() as Arc<dyn Reactor>)
            .input_device(self.input.clone() as Arc<dyn InputDevice>)
            .terminal_factory(self.factory.clone() as Arc<dyn TerminalFactory>)
            .config(config)
            .build()
    }
}

impl Default for TestBench {
    fn default() -> Self {
        Self::new()
    }
}
