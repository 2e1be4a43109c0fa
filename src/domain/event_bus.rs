//! Broadcast channel for link events.
//!
//! [`EventBus`] carries [`LinkEvent`]s from socket resource tasks to any
//! number of collaborators. Subscribers receive an [`EventStream`] rather
//! than a bare channel: the stream absorbs ring-buffer lag (dropped
//! events match the link's fire-and-forget posture) and knows which
//! events matter to whom — reconnect-policy collaborators wait on
//! [`EventStream::next_closed`] and ignore the rest.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use super::LinkEvent;

/// Broadcast bus for [`LinkEvent`]s.
///
/// Backed by a `tokio::broadcast` channel with a configurable capacity.
/// When the ring buffer is full, the oldest events are dropped for
/// lagging receivers; [`EventStream`] papers over the gap.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<LinkEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event.
    /// If there are no active receivers, the event is silently dropped.
    pub fn publish(&self, event: LinkEvent) -> usize {
        tracing::trace!(
            event_type = event.event_type_str(),
            connection_id = %event.connection_id(),
            "publishing link event"
        );
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a stream that will receive all future events.
    #[must_use]
    pub fn subscribe(&self) -> EventStream {
        EventStream {
            inner: self.sender.subscribe(),
        }
    }

    /// Returns the current number of active subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Subscriber end of the [`EventBus`].
///
/// A lagged subscriber loses the oldest events, not the stream: the gap
/// is logged and reception continues with whatever the ring buffer still
/// holds.
pub struct EventStream {
    inner: broadcast::Receiver<LinkEvent>,
}

impl EventStream {
    /// Receives the next event, or `None` once the link (and with it the
    /// bus) is gone.
    pub async fn recv(&mut self) -> Option<LinkEvent> {
        loop {
            match self.inner.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(n)) => {
                    tracing::warn!(lagged = n, "event subscriber lagged, events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Receives the next `Closed` event, skipping everything else.
    ///
    /// The natural wait point for a collaborator layering a retry policy
    /// over the link's manual `reconnect`.
    pub async fn next_closed(&mut self) -> Option<LinkEvent> {
        loop {
            let event = self.recv().await?;
            if matches!(event, LinkEvent::Closed { .. }) {
                return Some(event);
            }
        }
    }
}

impl std::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream").finish_non_exhaustive()
    }
}
