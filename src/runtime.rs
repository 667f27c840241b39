use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::timer::TickId;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TypingEvent {
    Key(KeyEvent),
    Resize,
    Tick(TickId),
}

/// Source of terminal and timer events
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError>;
}

/// Production event source using crossterm.
///
/// Timer threads share the same channel through [`CrosstermEventSource::sender`].
pub struct CrosstermEventSource {
    tx: Sender<TypingEvent>,
    rx: Receiver<TypingEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let key_tx = tx.clone();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if key_tx.send(TypingEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if key_tx.send(TypingEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(%err, "terminal event reader stopped");
                    break;
                }
            }
        });

        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<TypingEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TypingEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TypingEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: EventSource> {
    event_source: E,
    poll_interval: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, poll_interval: Duration) -> Self {
        Self {
            event_source,
            poll_interval,
        }
    }

    /// Blocks up to the poll interval and returns the next event, or None on timeout
    pub fn step(&self) -> Option<TypingEvent> {
        self.event_source.recv_timeout(self.poll_interval).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn step_returns_none_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let runner = Runner::new(es, Duration::from_millis(1));

        assert!(runner.step().is_none());
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(TypingEvent::Resize).unwrap();
        tx.send(TypingEvent::Tick(TickId(4))).unwrap();
        let es = TestEventSource::new(rx);
        let runner = Runner::new(es, Duration::from_millis(10));

        match runner.step() {
            Some(TypingEvent::Resize) => {}
            other => panic!("expected Resize event, got {:?}", other),
        }
        match runner.step() {
            Some(TypingEvent::Tick(id)) => assert_eq!(id, TickId(4)),
            other => panic!("expected Tick event, got {:?}", other),
        }
    }

    #[test]
    fn step_returns_none_when_disconnected() {
        let (tx, rx) = mpsc::channel::<TypingEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(10));
        assert!(runner.step().is_none());
    }
}
