//! # seatcon-core
//!
//! Core types for the seatcon session coordinator.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other seatcon crates. It provides:
//!
//! - Identifier newtypes (SessionId, DeviceId, DisplayId, SubscriptionId)
//! - Collaborator traits for the device/event substrate (Reactor, VideoDevice,
//!   Display, InputDevice, Terminal)
//! - Hotplug, input and terminal lifecycle event types
//! - Session configuration
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other seatcon crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all modules
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod reactor;
pub mod session;
pub mod subscription;
pub mod terminal;
pub mod video;

// Re-export commonly used types
pub use config::SessionConfig;
pub use display::{Display, DisplayId, DisplayState, DpmsState};
pub use error::{Error, Result};
pub use input::{InputDevice, InputEvent, InputObserver};
pub use reactor::Reactor;
pub use session::{SessionId, SessionInfo};
pub use subscription::SubscriptionId;
pub use terminal::{Terminal, TerminalEvent, TerminalFactory, TerminalObserver};
pub use video::{DeviceId, HotplugAction, HotplugEvent, HotplugObserver, VideoDevice};
