//! Lifecycle events emitted by socket resources.
//!
//! Every socket resource reports its transitions as [`LinkEvent`]s through
//! the [`super::EventBus`]. Collaborators subscribe to observe closes —
//! and may layer their own retry or backoff policy on top, since the link
//! itself never reconnects automatically — or to tap raw inbound frames.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ConnectionId;

/// Event emitted by a socket resource.
///
/// Each variant carries the id of the resource that produced it, so
/// subscribers can tell events from a replaced socket apart from events
/// of the current one.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum LinkEvent {
    /// The handshake completed; the socket can transmit.
    Opened {
        /// Resource that opened.
        connection_id: ConnectionId,
        /// Handshake completion timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A raw inbound text frame arrived. The payload is not decoded.
    Frame {
        /// Resource that received the frame.
        connection_id: ConnectionId,
        /// Raw frame text as received.
        text: String,
        /// Receive timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The socket closed, or the connect attempt failed. No distinction
    /// is made between a graceful and an abnormal close.
    Closed {
        /// Resource that closed.
        connection_id: ConnectionId,
        /// WebSocket close code (1000 = normal, 1005 = no code supplied),
        /// absent when the connection failed below the protocol level.
        code: Option<u16>,
        /// Close reason, empty when none was supplied.
        reason: String,
        /// Close timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl LinkEvent {
    /// Returns the id of the resource that produced this event.
    #[must_use]
    pub fn connection_id(&self) -> ConnectionId {
        match self {
            Self::Opened { connection_id, .. }
            | Self::Frame { connection_id, .. }
            | Self::Closed { connection_id, .. } => *connection_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::Opened { .. } => "opened",
            Self::Frame { .. } => "frame",
            Self::Closed { .. } => "closed",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn event_type_strings() {
        let opened = LinkEvent::Opened {
            connection_id: ConnectionId::new(),
            timestamp: Utc::now(),
        };
        assert_eq!(opened.event_type_str(), "opened");

        let closed = LinkEvent::Closed {
            connection_id: ConnectionId::new(),
            code: Some(1000),
            reason: String::new(),
            timestamp: Utc::now(),
        };
        assert_eq!(closed.event_type_str(), "closed");
    }

    #[test]
    fn connection_id_accessor() {
        let id = ConnectionId::new();
        let event = LinkEvent::Frame {
            connection_id: id,
            text: "{}".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(event.connection_id(), id);
    }

    #[test]
    fn closed_serializes_with_tag() {
        let event = LinkEvent::Closed {
            connection_id: ConnectionId::new(),
            code: Some(1006),
            reason: "connection reset".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event);
        let Ok(json) = json else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"event_type\":\"closed\""));
        assert!(json.contains("1006"));
    }
}
