//! Backend: event-delivery coordinator between the decoder thread and the
//! application loop.
//!
//! The backend owns no decoding logic. It decides when to hand the loop
//! real events, when to wait, and when to fall back to idle events so that
//! conditions with no explicit notification still surface within one
//! timeout.

use super::decoder::{Decoder, DecoderConfig, TerminalDecoder};
use super::event::InputEvent;
use crate::error::Result;
use crate::screen::{Renderer, Screen};
use log::{debug, trace};
use std::io;
use std::time::Duration;

/// Facade the application loop talks to.
pub struct Backend<D: Decoder, R: Renderer> {
    decoder: D,
    renderer: R,
    shut_down: bool,
}

impl Backend<TerminalDecoder, Screen<io::Stdout>> {
    /// Take over the controlling terminal.
    ///
    /// # Errors
    ///
    /// Fails if the terminal size cannot be read, raw mode cannot be
    /// entered, or the decoder thread cannot be spawned.
    pub fn terminal(config: &DecoderConfig) -> Result<Self> {
        let screen = Screen::stdout()?;
        let decoder = TerminalDecoder::spawn(config)?;
        Ok(Self::new(decoder, screen))
    }
}

impl<D: Decoder, R: Renderer> Backend<D, R> {
    /// Combine a decoder and a renderer.
    pub const fn new(decoder: D, renderer: R) -> Self {
        Self {
            decoder,
            renderer,
            shut_down: false,
        }
    }

    /// The decoder.
    pub const fn decoder(&self) -> &D {
        &self.decoder
    }

    /// The renderer.
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the renderer, to draw the next frame.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Whether [`shutdown`](Self::shutdown) has run.
    pub const fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Collect input events, waiting at most `timeout`.
    ///
    /// - A zero timeout polls: whatever is queued, possibly nothing, right away.
    /// - Otherwise queued events are returned immediately without waiting.
    ///   With nothing queued the call waits on the queue. If events arrive
    ///   they are returned; if the wait times out or wakes spuriously the
    ///   decoder's idle events are returned instead.
    ///
    /// Events come back in the order the decoder produced them, and each is
    /// returned by exactly one call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decoder`](crate::Error::Decoder) once the decoder
    /// thread has failed and everything it queued before failing has been
    /// delivered.
    pub fn get_events(&mut self, timeout: Duration) -> Result<Vec<InputEvent>> {
        if timeout.is_zero() {
            return self.poll();
        }

        if !self.decoder.has_pending_events() {
            let mut pending = self.decoder.queue().lock();
            if !pending.has_events() {
                pending.check_failure()?;
                let wake = pending.wait_for(timeout);
                if !pending.has_events() {
                    pending.check_failure()?;
                    drop(pending);
                    let idle = self.decoder.drain_idle_events();
                    trace!("{wake:?} with nothing queued, {} idle event(s)", idle.len());
                    return Ok(idle);
                }
            }
        }

        // The application thread is the only consumer, so whatever was seen
        // under the guard is still queued here.
        let events = self.decoder.drain_events();
        trace!("delivering {} event(s)", events.len());
        Ok(events)
    }

    fn poll(&mut self) -> Result<Vec<InputEvent>> {
        if !self.decoder.has_pending_events() {
            self.decoder.queue().lock().check_failure()?;
        }
        Ok(self.decoder.drain_events())
    }

    /// Sync the logical screen to the physical device.
    ///
    /// The backend never flushes on its own; call this after each batch of
    /// state changes.
    ///
    /// # Errors
    ///
    /// Fails if writing to the device fails.
    pub fn flush_screen(&mut self) -> Result<()> {
        self.renderer.flush_physical()?;
        Ok(())
    }

    /// Stop the decoder and restore the device.
    ///
    /// Calls after the first are no-ops.
    ///
    /// # Errors
    ///
    /// Fails if the decoder cannot stop cleanly or the terminal cannot be restored.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.shut_down {
            debug!("backend already shut down");
            return Ok(());
        }
        self.shut_down = true;
        self.decoder.shutdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::event::{KeyCode, KeyEvent, ResizeEvent};
    use crate::backend::queue::EventQueue;
    use crate::error::Error;
    use crate::screen::CellBuffer;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    /// Scheduler slack allowed on top of a timeout.
    const SLACK: Duration = Duration::from_millis(150);

    /// Decoder whose queue is filled directly by the test.
    #[derive(Default)]
    struct FakeDecoder {
        queue: Arc<EventQueue>,
        idle_calls: Arc<AtomicUsize>,
        idle_events: Vec<InputEvent>,
        shutdowns: usize,
        drain_calls: usize,
        pending_checks: AtomicUsize,
    }

    impl Decoder for FakeDecoder {
        fn queue(&self) -> &EventQueue {
            &self.queue
        }

        fn has_pending_events(&self) -> bool {
            self.pending_checks.fetch_add(1, Ordering::SeqCst);
            self.queue.has_events()
        }

        fn drain_events(&mut self) -> Vec<InputEvent> {
            self.drain_calls += 1;
            self.queue.drain()
        }

        fn drain_idle_events(&mut self) -> Vec<InputEvent> {
            self.idle_calls.fetch_add(1, Ordering::SeqCst);
            let mut events = self.queue.drain();
            events.append(&mut self.idle_events);
            events
        }

        fn shutdown(&mut self) -> Result<()> {
            self.shutdowns += 1;
            Ok(())
        }
    }

    struct FakeRenderer {
        buffer: CellBuffer,
        flushes: usize,
    }

    impl Renderer for FakeRenderer {
        fn buffer_mut(&mut self) -> &mut CellBuffer {
            &mut self.buffer
        }

        fn resize(&mut self, width: u16, height: u16) {
            self.buffer.resize(width, height);
        }

        fn flush_physical(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn backend() -> Backend<FakeDecoder, FakeRenderer> {
        Backend::new(
            FakeDecoder::default(),
            FakeRenderer {
                buffer: CellBuffer::new(10, 5),
                flushes: 0,
            },
        )
    }

    fn key(c: char) -> InputEvent {
        KeyEvent::new(KeyCode::Char(c)).into()
    }

    #[test]
    fn test_poll_never_blocks() {
        let mut backend = backend();
        let start = Instant::now();
        assert!(backend.get_events(Duration::ZERO).unwrap().is_empty());
        assert!(start.elapsed() < SLACK);
        assert_eq!(backend.decoder().idle_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_poll_drains_queued_events() {
        let mut backend = backend();
        backend.decoder().queue.push_all([key('a'), key('b')]);
        assert_eq!(backend.get_events(Duration::ZERO).unwrap(), vec![key('a'), key('b')]);
        assert!(backend.get_events(Duration::ZERO).unwrap().is_empty());
    }

    #[test]
    fn test_queued_events_return_without_waiting() {
        let mut backend = backend();
        backend.decoder().queue.push(key('q'));

        let start = Instant::now();
        let events = backend.get_events(Duration::from_secs(5)).unwrap();
        assert!(start.elapsed() < SLACK);
        assert_eq!(events, vec![key('q')]);
        assert_eq!(backend.decoder().idle_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_timeout_drains_idle_exactly_once() {
        let mut backend = backend();
        backend.decoder.idle_events = vec![InputEvent::Resize(ResizeEvent::screen(100, 40))];

        let timeout = Duration::from_millis(30);
        let start = Instant::now();
        let events = backend.get_events(timeout).unwrap();
        let elapsed = start.elapsed();

        assert!(elapsed >= timeout);
        assert!(elapsed < timeout + SLACK);
        assert_eq!(events, vec![InputEvent::Resize(ResizeEvent::screen(100, 40))]);
        assert_eq!(backend.decoder().idle_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_spurious_wake_takes_idle_path() {
        let mut backend = backend();
        let queue = Arc::clone(&backend.decoder().queue);
        let idle_calls = Arc::clone(&backend.decoder().idle_calls);

        let done = Arc::new(AtomicBool::new(false));
        let waker_done = Arc::clone(&done);
        let waker = thread::spawn(move || {
            while !waker_done.load(Ordering::SeqCst) {
                thread::sleep(Duration::from_millis(10));
                queue.wake();
            }
        });

        let start = Instant::now();
        let events = backend.get_events(Duration::from_secs(5)).unwrap();
        done.store(true, Ordering::SeqCst);
        waker.join().unwrap();

        assert!(events.is_empty());
        assert!(start.elapsed() < Duration::from_secs(5));
        assert_eq!(idle_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_during_wait_is_delivered() {
        let mut backend = backend();
        let queue = Arc::clone(&backend.decoder().queue);

        let producer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            queue.push(key('w'));
        });

        let mut received = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(2);
        while received.is_empty() && Instant::now() < deadline {
            received = backend.get_events(Duration::from_millis(500)).unwrap();
        }
        producer.join().unwrap();

        assert_eq!(received, vec![key('w')]);
    }

    #[test]
    fn test_no_event_lost_or_duplicated() {
        let mut backend = backend();
        let queue = Arc::clone(&backend.decoder().queue);
        let sent: Vec<InputEvent> = (0..500u32)
            .map(|i| key(char::from_u32(0x4e00 + i).unwrap()))
            .collect();
        let to_send = sent.clone();

        let producer = thread::spawn(move || {
            for (i, event) in to_send.into_iter().enumerate() {
                queue.push(event);
                if i % 50 == 0 {
                    thread::sleep(Duration::from_millis(1));
                }
            }
        });

        let mut received = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(10);
        while received.len() < sent.len() && Instant::now() < deadline {
            let timeout = if received.len() % 2 == 0 {
                Duration::from_millis(5)
            } else {
                Duration::ZERO
            };
            received.extend(backend.get_events(timeout).unwrap());
        }
        producer.join().unwrap();
        received.extend(backend.get_events(Duration::ZERO).unwrap());

        assert_eq!(received, sent);
    }

    #[test]
    fn test_decoder_failure_surfaces_after_queued_events() {
        let mut backend = backend();
        backend.decoder().queue.push(key('a'));
        backend.decoder().queue.fail("device unplugged");

        assert_eq!(backend.get_events(Duration::from_millis(10)).unwrap(), vec![key('a')]);
        let err = backend.get_events(Duration::from_millis(10)).unwrap_err();
        assert!(matches!(err, Error::Decoder(ref msg) if msg == "device unplugged"));
        assert!(backend.get_events(Duration::ZERO).is_err());
    }

    #[test]
    fn test_timed_path_goes_through_decoder_drain() {
        let mut backend = backend();
        backend.decoder().queue.push(key('t'));
        assert_eq!(backend.get_events(Duration::from_millis(50)).unwrap(), vec![key('t')]);
        assert_eq!(backend.decoder().drain_calls, 1);
        assert!(backend.decoder().pending_checks.load(Ordering::SeqCst) >= 1);

        let queue = Arc::clone(&backend.decoder().queue);
        let producer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            queue.push(key('u'));
        });
        let mut received = Vec::new();
        let mut calls = 0;
        let deadline = Instant::now() + Duration::from_secs(2);
        while received.is_empty() && Instant::now() < deadline {
            received = backend.get_events(Duration::from_millis(500)).unwrap();
            calls += 1;
        }
        producer.join().unwrap();

        assert_eq!(received, vec![key('u')]);
        // Every call ends in exactly one of the decoder's drains.
        let drains = backend.decoder().drain_calls;
        let idle = backend.decoder().idle_calls.load(Ordering::SeqCst);
        assert_eq!(drains + idle, 1 + calls);
    }

    #[test]
    fn test_poll_goes_through_decoder_drain() {
        let mut backend = backend();
        backend.decoder().queue.push(key('p'));
        assert_eq!(backend.get_events(Duration::ZERO).unwrap(), vec![key('p')]);
        assert_eq!(backend.decoder().drain_calls, 1);
        assert_eq!(backend.decoder().pending_checks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_flush_delegates_to_renderer() {
        let mut backend = backend();
        backend.flush_screen().unwrap();
        backend.flush_screen().unwrap();
        assert_eq!(backend.renderer().flushes, 2);
    }

    #[test]
    fn test_shutdown_runs_once() {
        let mut backend = backend();
        backend.shutdown().unwrap();
        backend.shutdown().unwrap();
        assert!(backend.is_shut_down());
        assert_eq!(backend.decoder().shutdowns, 1);
    }
}
