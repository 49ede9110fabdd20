//! Event queue shared by the decoder thread and the application loop.
//!
//! One mutex guards the pending events and one condition variable signals
//! their arrival. The application loop checks for events and starts waiting
//! inside the same critical section, so a notification can never slip in
//! between "is anything pending" and "wait".

use super::event::InputEvent;
use crate::error::{Error, Result};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::collections::VecDeque;
use std::time::Duration;

/// Why a wait on the queue ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// Someone signalled the condition. Events may or may not be pending.
    Notified,
    /// The timeout elapsed.
    TimedOut,
}

#[derive(Debug, Default)]
struct QueueState {
    events: VecDeque<InputEvent>,
    /// First fatal error reported by the decoder thread.
    failure: Option<String>,
}

/// FIFO of decoded events guarded by a lock and a condition variable.
#[derive(Debug, Default)]
pub struct EventQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event and wake any waiter.
    pub fn push(&self, event: InputEvent) {
        let mut state = self.state.lock();
        state.events.push_back(event);
        self.available.notify_all();
    }

    /// Append several events, in order, under a single lock, then wake any waiter.
    pub fn push_all(&self, events: impl IntoIterator<Item = InputEvent>) {
        let mut state = self.state.lock();
        let before = state.events.len();
        state.events.extend(events);
        if state.events.len() != before {
            self.available.notify_all();
        }
    }

    /// Record a fatal decoder failure and wake any waiter.
    ///
    /// Only the first failure is kept.
    pub fn fail(&self, message: impl Into<String>) {
        let mut state = self.state.lock();
        if state.failure.is_none() {
            state.failure = Some(message.into());
        }
        self.available.notify_all();
    }

    /// Wake any waiter without queuing anything.
    ///
    /// The waiter sees an empty queue and takes the idle path, exactly as
    /// it would after a spurious wakeup.
    pub fn wake(&self) {
        let _state = self.state.lock();
        self.available.notify_all();
    }

    /// Whether events are pending.
    pub fn has_events(&self) -> bool {
        !self.state.lock().events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.state.lock().events.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.state.lock().events.is_empty()
    }

    /// Take every pending event, oldest first.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.state.lock().events.drain(..).collect()
    }

    /// Lock the queue for a check-then-wait sequence.
    pub fn lock(&self) -> Pending<'_> {
        Pending {
            state: self.state.lock(),
            available: &self.available,
        }
    }
}

/// Exclusive access to the queue contents.
///
/// Holding a `Pending` blocks the decoder thread from enqueuing, except
/// while [`wait_for`](Self::wait_for) has the lock released.
pub struct Pending<'a> {
    state: MutexGuard<'a, QueueState>,
    available: &'a Condvar,
}

impl Pending<'_> {
    /// Whether events are pending.
    pub fn has_events(&self) -> bool {
        !self.state.events.is_empty()
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        self.state.events.drain(..).collect()
    }

    /// Fail if the decoder thread has reported a fatal error.
    pub fn check_failure(&self) -> Result<()> {
        match &self.state.failure {
            Some(message) => Err(Error::Decoder(message.clone())),
            None => Ok(()),
        }
    }

    /// Release the lock and wait for a notification, for at most `timeout`.
    ///
    /// The lock is held again when this returns.
    pub fn wait_for(&mut self, timeout: Duration) -> Wake {
        if self.available.wait_for(&mut self.state, timeout).timed_out() {
            Wake::TimedOut
        } else {
            Wake::Notified
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::event::{KeyCode, KeyEvent};
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    fn key(c: char) -> InputEvent {
        KeyEvent::new(KeyCode::Char(c)).into()
    }

    #[test]
    fn test_drain_preserves_order() {
        let queue = EventQueue::new();
        queue.push(key('a'));
        queue.push_all([key('b'), key('c')]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.drain(), vec![key('a'), key('b'), key('c')]);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_wait_times_out() {
        let queue = EventQueue::new();
        let mut pending = queue.lock();
        let start = Instant::now();
        assert_eq!(pending.wait_for(Duration::from_millis(20)), Wake::TimedOut);
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert!(!pending.has_events());
    }

    #[test]
    fn test_push_wakes_waiter() {
        let queue = Arc::new(EventQueue::new());
        let producer = Arc::clone(&queue);

        let mut pending = queue.lock();
        let handle = thread::spawn(move || producer.push(key('x')));

        // The producer cannot push until the wait releases the lock.
        let mut woke = false;
        for _ in 0..50 {
            pending.wait_for(Duration::from_millis(100));
            if pending.has_events() {
                woke = true;
                break;
            }
        }
        assert!(woke);
        assert_eq!(pending.drain(), vec![key('x')]);
        drop(pending);
        handle.join().unwrap();
    }

    #[test]
    fn test_first_failure_is_kept() {
        let queue = EventQueue::new();
        queue.fail("first");
        queue.fail("second");
        let err = queue.lock().check_failure().unwrap_err();
        assert_eq!(err.to_string(), "input decoder failed: first");
    }
}
