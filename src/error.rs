//! Link error types.
//!
//! [`LinkError`] is the central error type for the crate. Send failures
//! are returned as values so callers can decide whether to retry, queue,
//! or surface them; the link itself never queues a dropped frame and
//! never panics.

use crate::ws::state::ConnectionState;

/// Client-side error enum for all link operations.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// The current socket is not open; the frame was dropped.
    #[error("socket is not open (state: {state}); frame dropped")]
    NotOpen {
        /// Socket state observed at the time of the call.
        state: ConnectionState,
    },

    /// The outbound payload could not be JSON-encoded.
    #[error("failed to encode outbound frame: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The outbound queue of the current socket is full; the frame was
    /// dropped.
    #[error("outbound queue is full; frame dropped")]
    QueueFull,

    /// The writer task of the current socket has shut down; the frame was
    /// dropped.
    #[error("socket writer has shut down; frame dropped")]
    Disconnected,

    /// The configured endpoint is not a `ws://` or `wss://` URL.
    #[error("invalid endpoint url: {0}")]
    InvalidEndpoint(String),
}

impl LinkError {
    /// Returns `true` when a fresh connection could make the operation
    /// succeed, i.e. the caller may recover by invoking `reconnect`.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::NotOpen { .. } | Self::QueueFull | Self::Disconnected => true,
            Self::Serialize(_) | Self::InvalidEndpoint(_) => false,
        }
    }
}
