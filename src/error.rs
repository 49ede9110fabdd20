//! Error types shared by the backend, decoder and renderer.

use std::io;

/// Errors surfaced to the application loop.
///
/// A transient wait interruption is never an error: the backend treats it as
/// a timeout. Everything here is fatal to the session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Writing to or configuring the terminal failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// The decoder thread failed while reading input and has stopped.
    #[error("input decoder failed: {0}")]
    Decoder(String),

    /// The decoder thread could not be started.
    #[error("failed to spawn decoder thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
