//! Capability seam between the session and its host runtime.
//!
//! The real transport (message delivery, state mirroring, timers) lives
//! outside this crate; the session only depends on this trait, so the whole
//! state machine runs against an in-memory fake in tests.

use std::time::Duration;

use crate::domain::state::ClientId;
use crate::session::protocol::ServerMsg;

/// Timed callbacks the session asks the host to deliver later.
///
/// The host must hand the task back through `SudokuRoom::on_scheduled` on
/// the session's own message timeline, never concurrently with another
/// handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledTask {
    /// Tear the session down: disconnect remaining clients, then the host
    /// disposes the room.
    Dispose,
    /// The reconnection grace window for a departed player elapsed.
    ReconnectionExpired { client: ClientId },
}

/// What the session requires from its host.
pub trait Transport {
    /// Unicast to one connected client.
    fn send_to(&self, client: &str, msg: &ServerMsg);

    /// Room-wide broadcast to every connected client.
    fn broadcast(&self, msg: &ServerMsg);

    /// Deliver `task` back to the session after `delay`.
    fn schedule_once(&self, delay: Duration, task: ScheduledTask);

    /// Forcibly drop a client's connection.
    fn disconnect(&self, client: &str);
}
