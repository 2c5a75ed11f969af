use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::session::protocol::ServerMsg;
use crate::session::transport::{ScheduledTask, Transport};

#[derive(Default)]
struct Inner {
    unicasts: Vec<(String, ServerMsg)>,
    broadcasts: Vec<ServerMsg>,
    scheduled: Vec<(Duration, ScheduledTask)>,
    disconnected: Vec<String>,
}

/// In-memory transport that records every interaction.
///
/// Scheduled tasks are never delivered automatically: tests drain them and
/// feed them back through `SudokuRoom::on_scheduled`, which is exactly the
/// single-actor timeline contract a real host provides. Clones share the
/// same record, so keep one clone outside the room for assertions.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// All room-wide broadcasts, in emission order.
    pub fn broadcasts(&self) -> Vec<ServerMsg> {
        self.inner.lock().broadcasts.clone()
    }

    /// Unicasts delivered to one client, in emission order.
    pub fn unicasts_to(&self, client: &str) -> Vec<ServerMsg> {
        self.inner
            .lock()
            .unicasts
            .iter()
            .filter(|(id, _)| id == client)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn scheduled(&self) -> Vec<(Duration, ScheduledTask)> {
        self.inner.lock().scheduled.clone()
    }

    /// Removes and returns every pending scheduled task, so a test can
    /// deliver them and then assert nothing new was scheduled afterwards.
    pub fn take_scheduled(&self) -> Vec<(Duration, ScheduledTask)> {
        std::mem::take(&mut self.inner.lock().scheduled)
    }

    pub fn disconnected(&self) -> Vec<String> {
        self.inner.lock().disconnected.clone()
    }
}

impl Transport for RecordingTransport {
    fn send_to(&self, client: &str, msg: &ServerMsg) {
        self.inner
            .lock()
            .unicasts
            .push((client.to_string(), msg.clone()));
    }

    fn broadcast(&self, msg: &ServerMsg) {
        self.inner.lock().broadcasts.push(msg.clone());
    }

    fn schedule_once(&self, delay: Duration, task: ScheduledTask) {
        self.inner.lock().scheduled.push((delay, task));
    }

    fn disconnect(&self, client: &str) {
        self.inner.lock().disconnected.push(client.to_string());
    }
}
