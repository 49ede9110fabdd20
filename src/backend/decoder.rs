//! Decoder: the background thread that turns terminal input into events.
//!
//! The decoder thread loops on an [`EventSource`] with a bounded poll
//! interval, pushes every decoded event into the shared [`EventQueue`], and
//! checks a stop flag between polls. Conditions that produce no event of
//! their own (a terminal resize the device never reported) are found by
//! polling from [`Decoder::drain_idle_events`] on the application thread.

use super::event::{InputEvent, ResizeEvent};
use super::input::{CrosstermSize, CrosstermSource, TerminalMode};
use super::queue::EventQueue;
use crate::error::{Error, Result};
use log::{debug, warn};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// The input side of a backend.
///
/// Implementors own an [`EventQueue`] that their producer thread fills. The
/// backend waits on that queue directly; the other methods are how it
/// collects what arrived.
pub trait Decoder {
    /// The queue this decoder's thread enqueues into.
    fn queue(&self) -> &EventQueue;

    /// Whether decoded events are waiting.
    fn has_pending_events(&self) -> bool {
        self.queue().has_events()
    }

    /// Take every decoded event, oldest first.
    fn drain_events(&mut self) -> Vec<InputEvent> {
        self.queue().drain()
    }

    /// Events detectable only by polling, plus anything that arrived since
    /// the last drain.
    fn drain_idle_events(&mut self) -> Vec<InputEvent>;

    /// Stop the decoder thread and restore the device.
    fn shutdown(&mut self) -> Result<()>;
}

/// Something the decoder thread can read events from.
pub trait EventSource: Send + 'static {
    /// Wait up to `timeout` for the next event.
    ///
    /// `Ok(None)` means nothing deliverable arrived in time. An error is
    /// fatal to the decoder thread.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;
}

/// Reports the current device size, for resize detection by polling.
pub trait SizeProbe {
    /// Current `(width, height)` in cells.
    fn size(&self) -> io::Result<(u16, u16)>;
}

impl<F> SizeProbe for F
where
    F: Fn() -> io::Result<(u16, u16)>,
{
    fn size(&self) -> io::Result<(u16, u16)> {
        self()
    }
}

/// Configuration for the terminal decoder.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// How long the decoder thread waits on the device before re-checking
    /// its stop flag. Bounds how long shutdown takes.
    pub poll_interval: Duration,
    /// Whether to enable mouse capture.
    pub enable_mouse: bool,
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(20),
            enable_mouse: true,
            alternate_screen: true,
        }
    }
}

const fn pack_size(width: u16, height: u16) -> u32 {
    ((width as u32) << 16) | height as u32
}

/// Decoder running a background thread over an [`EventSource`].
pub struct TerminalDecoder<P: SizeProbe = CrosstermSize> {
    queue: Arc<EventQueue>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    /// Last size delivered, by either thread.
    known_size: Arc<AtomicU32>,
    probe: P,
    mode: Option<TerminalMode>,
}

impl TerminalDecoder<CrosstermSize> {
    /// Take over the controlling terminal and start decoding its input.
    ///
    /// # Errors
    ///
    /// Fails if raw mode cannot be entered or the thread cannot be spawned.
    pub fn spawn(config: &DecoderConfig) -> Result<Self> {
        let mode = TerminalMode::enter(config.enable_mouse, config.alternate_screen)?;
        let mut decoder = Self::with_source(CrosstermSource, CrosstermSize, config.poll_interval)?;
        decoder.mode = Some(mode);
        Ok(decoder)
    }
}

impl<P: SizeProbe> TerminalDecoder<P> {
    /// Start decoding from an arbitrary source without touching terminal mode.
    ///
    /// # Errors
    ///
    /// Fails if the thread cannot be spawned.
    pub fn with_source<S: EventSource>(source: S, probe: P, poll_interval: Duration) -> Result<Self> {
        let queue = Arc::new(EventQueue::new());
        let stop = Arc::new(AtomicBool::new(false));
        let (width, height) = probe.size().unwrap_or((0, 0));
        let known_size = Arc::new(AtomicU32::new(pack_size(width, height)));

        let handle = {
            let queue = Arc::clone(&queue);
            let stop = Arc::clone(&stop);
            let known_size = Arc::clone(&known_size);
            thread::Builder::new()
                .name("treadle-decoder".to_string())
                .spawn(move || run_loop(source, &queue, &stop, &known_size, poll_interval))
                .map_err(Error::Spawn)?
        };
        debug!("decoder thread started ({width}x{height})");

        Ok(Self {
            queue,
            stop,
            handle: Some(handle),
            known_size,
            probe,
            mode: None,
        })
    }

    /// Whether the decoder thread is still running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

/// Decoder thread body: read, enqueue, repeat until stopped or the source fails.
fn run_loop<S: EventSource>(
    mut source: S,
    queue: &EventQueue,
    stop: &AtomicBool,
    known_size: &AtomicU32,
    poll_interval: Duration,
) {
    while !stop.load(Ordering::Acquire) {
        match source.next_event(poll_interval) {
            Ok(Some(event)) => {
                if let InputEvent::Resize(resize) = &event {
                    let packed = pack_size(resize.width, resize.height);
                    if known_size.swap(packed, Ordering::AcqRel) == packed {
                        debug!("resize to {}x{} already delivered", resize.width, resize.height);
                        continue;
                    }
                }
                queue.push(event);
            }
            Ok(None) => {}
            Err(e) => {
                warn!("decoder read failed, stopping: {e}");
                queue.fail(e.to_string());
                return;
            }
        }
    }
    debug!("decoder thread stopping");
}

impl<P: SizeProbe> Decoder for TerminalDecoder<P> {
    fn queue(&self) -> &EventQueue {
        &self.queue
    }

    fn drain_idle_events(&mut self) -> Vec<InputEvent> {
        let mut events = self.queue.drain();

        match self.probe.size() {
            Ok((width, height)) => {
                let packed = pack_size(width, height);
                if self.known_size.swap(packed, Ordering::AcqRel) != packed {
                    debug!("terminal resized to {width}x{height} without notification");
                    events.push(InputEvent::Resize(ResizeEvent::screen(width, height)));
                }
            }
            Err(e) => debug!("size probe failed: {e}"),
        }

        events
    }

    fn shutdown(&mut self) -> Result<()> {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| Error::Decoder("decoder thread panicked".to_string()))?;
        }
        if let Some(mut mode) = self.mode.take() {
            mode.restore()?;
        }
        Ok(())
    }
}

impl<P: SizeProbe> Drop for TerminalDecoder<P> {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}
