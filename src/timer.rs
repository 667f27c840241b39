use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::runtime::TypingEvent;

/// Countdown resolution.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identifies one installed tick source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickId(pub u64);

/// Handle to a recurring tick. Cancelling is idempotent and shared by clones.
#[derive(Clone, Debug)]
pub struct TickHandle {
    id: TickId,
    cancelled: Arc<AtomicBool>,
}

impl TickHandle {
    pub fn new(id: TickId) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> TickId {
        self.id
    }

    /// Returns true only for the call that actually stopped the tick.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Something that can install a recurring tick.
pub trait TickSource {
    fn schedule(&mut self, period: Duration) -> TickHandle;
}

/// Production ticker: one thread per installed tick, feeding the event channel.
pub struct ThreadTicker {
    tx: Sender<TypingEvent>,
    next_id: u64,
}

impl ThreadTicker {
    pub fn new(tx: Sender<TypingEvent>) -> Self {
        Self { tx, next_id: 0 }
    }
}

impl TickSource for ThreadTicker {
    fn schedule(&mut self, period: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle::new(TickId(self.next_id));
        let id = handle.id();
        let watch = handle.clone();
        let tx = self.tx.clone();

        thread::spawn(move || loop {
            thread::sleep(period);
            if watch.is_cancelled() || tx.send(TypingEvent::Tick(id)).is_err() {
                break;
            }
        });

        handle
    }
}

/// Ticker for tests: never fires on its own, remembers every handle it gave out.
#[derive(Debug, Default)]
pub struct ManualTicker {
    handles: Vec<TickHandle>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled_count(&self) -> usize {
        self.handles.len()
    }

    /// Handles that have not been cancelled yet.
    pub fn active_count(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_cancelled()).count()
    }

    pub fn last_id(&self) -> Option<TickId> {
        self.handles.last().map(TickHandle::id)
    }
}

impl TickSource for ManualTicker {
    fn schedule(&mut self, _period: Duration) -> TickHandle {
        let handle = TickHandle::new(TickId(self.handles.len() as u64 + 1));
        self.handles.push(handle.clone());
        handle
    }
}
