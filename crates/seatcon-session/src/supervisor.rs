//! Terminal lifecycle supervision.

use std::sync::{Arc, Weak};

use tracing::{debug, warn};

use seatcon_core::{Result, Terminal, TerminalEvent, TerminalObserver};

/// Owns the session's terminal and reopens it transparently on hangup.
///
/// The supervisor installs itself as the lifecycle observer when the
/// terminal is opened, so a reopen passes the very same observer handle the
/// terminal saw the first time. Hangup is the only lifecycle event acted on;
/// everything else is reserved for consumers outside the session layer.
pub(crate) struct TerminalSupervisor {
    terminal: Arc<dyn Terminal>,
    this: Weak<TerminalSupervisor>,
}

impl TerminalSupervisor {
    pub(crate) fn new(terminal: Arc<dyn Terminal>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            terminal,
            this: this.clone(),
        })
    }

    pub(crate) fn terminal(&self) -> &Arc<dyn Terminal> {
        &self.terminal
    }

    /// Open the terminal with this supervisor as its lifecycle observer.
    pub(crate) fn open(&self) -> Result<()> {
        let observer = self
            .this
            .upgrade()
            .expect("open is only reachable through the owning Arc");
        self.terminal.open(observer)
    }
}

impl TerminalObserver for TerminalSupervisor {
    fn on_terminal_event(&self, event: &TerminalEvent) {
        match event {
            TerminalEvent::Hangup => {
                debug!("terminal hung up, reopening");
                if let Err(err) = self.open() {
                    warn!("cannot reopen terminal after hangup: {}", err);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallJournal, MockTerminal};

    #[test]
    fn test_hangup_reopens_with_same_observer() {
        let journal = CallJournal::new();
        let terminal = MockTerminal::new(journal.clone());
        let supervisor = TerminalSupervisor::new(terminal.clone() as Arc<dyn Terminal>);
        supervisor.open().unwrap();
        let installed = terminal.observer().unwrap();

        terminal.emit(TerminalEvent::Hangup);

        assert_eq!(terminal.open_count(), 2);
        let reinstalled = terminal.observer().unwrap();
        assert!(Arc::ptr_eq(&installed, &reinstalled));
    }

    #[test]
    fn test_other_lifecycle_events_are_ignored() {
        let journal = CallJournal::new();
        let terminal = MockTerminal::new(journal.clone());
        let supervisor = TerminalSupervisor::new(terminal.clone() as Arc<dyn Terminal>);
        supervisor.open().unwrap();

        terminal.emit(TerminalEvent::Closed);

        assert_eq!(terminal.open_count(), 1);
    }

    #[test]
    fn test_reopen_failure_is_absorbed() {
        let journal = CallJournal::new();
        let terminal = MockTerminal::new(journal.clone());
        let supervisor = TerminalSupervisor::new(terminal.clone() as Arc<dyn Terminal>);
        supervisor.open().unwrap();
        terminal.fail_open();

        // Must not panic or propagate
        terminal.emit(TerminalEvent::Hangup);

        assert_eq!(terminal.open_count(), 1);
    }
}
