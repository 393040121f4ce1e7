//! Reactor handle.

/// Handle to the event loop that dispatches every callback of a session.
///
/// The coordinator never drives dispatch itself and calls no reactor API; it
/// only holds a shared handle so the loop outlives everything registered
/// through it. Acquiring a reference is an `Arc` clone, releasing it is a
/// drop, and the loop's ultimate owner tears it down only after all holders
/// have released theirs.
pub trait Reactor: Send + Sync {}
