//! Event channel and shared diagnostics between the hold task and its
//! observers.

use std::collections::VecDeque;
use std::sync::Arc;

use crossbeam::channel::{bounded, Receiver, Sender};
use parking_lot::RwLock;

/// Conditions the hold task reports by name instead of absorbing.
#[derive(Clone, Debug, PartialEq)]
pub enum HoldEvent {
    /// The wrap guard rewrote the sensor. A genuinely low reading triggers
    /// this too; the threshold has no corroborating signal.
    DiscontinuityCorrected { raw: f64, corrected: f64 },
    /// Error entered tolerance. `holding` is true when the loop keeps
    /// running and holding rather than finishing.
    Converged { error: f64, holding: bool },
    /// The task was cancelled; both motors were zeroed on the way out.
    Cancelled { last_output: f64 },
}

/// Bounded feedback channel out of the hold task. The task side sends
/// non-blocking, so an undrained channel never stalls the loop.
#[derive(Clone)]
pub struct HoldEvents {
    pub tx: Sender<HoldEvent>,
    pub rx: Arc<Receiver<HoldEvent>>,
}

impl HoldEvents {
    pub fn new(buffer_size: usize) -> Self {
        let (tx, rx) = bounded(buffer_size);
        Self {
            tx,
            rx: Arc::new(rx),
        }
    }
}

/// Shared in-memory diagnostic log, bounded to the most recent entries.
#[derive(Clone)]
pub struct DiagnosticLog {
    entries: Arc<RwLock<VecDeque<String>>>,
    max_size: usize,
}

impl DiagnosticLog {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(max_size))),
            max_size,
        }
    }

    pub fn write(&self, message: String) {
        let mut log = self.entries.write();
        log.push_back(message);
        if log.len() > self.max_size {
            log.pop_front();
        }
    }

    pub fn read_all(&self) -> Vec<String> {
        self.entries.read().iter().cloned().collect()
    }
}
