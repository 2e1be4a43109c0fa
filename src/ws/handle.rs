//! The connection handle: one shared link to the queue control server.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::config::LinkConfig;
use crate::domain::{ConnectionId, EventBus, EventStream};
use crate::error::LinkError;
use crate::ws::connection::{self, Connection, ConnectionContext};
use crate::ws::dispatch::{FrameHandler, LogFrames};
use crate::ws::messages::{CMD_ADD, CMD_REMOVE, CommandEnvelope};

/// Client-side handle owning at most one live socket resource at a time.
///
/// Cheap to clone: clones share the same socket, event bus, and frame
/// handler, so an application can construct one link at startup and hand
/// copies to every component that sends commands.
///
/// Construction initiates the first connection attempt; the handshake
/// completes in the background and is observable through
/// [`Connection::wait_connected`] or the event bus. Callers must not
/// assume the socket is open just because the constructor (or
/// [`Self::reconnect`]) returned.
#[derive(Clone)]
pub struct QueueLink {
    config: LinkConfig,
    bus: EventBus,
    handler: Arc<RwLock<Arc<dyn FrameHandler>>>,
    active: Arc<RwLock<ConnectionId>>,
    current: Arc<RwLock<Connection>>,
}

impl QueueLink {
    /// Creates a link and initiates the first connection attempt.
    ///
    /// Inbound frames go to the default [`LogFrames`] handler until
    /// [`Self::set_frame_handler`] replaces it. Must be called from
    /// within a Tokio runtime.
    #[must_use]
    pub fn connect(config: LinkConfig) -> Self {
        Self::connect_with_handler(config, Arc::new(LogFrames))
    }

    /// Creates a link with the given inbound frame handler and initiates
    /// the first connection attempt.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn connect_with_handler(config: LinkConfig, handler: Arc<dyn FrameHandler>) -> Self {
        let bus = EventBus::new(config.event_bus_capacity);
        let handler = Arc::new(RwLock::new(handler));
        let active = Arc::new(RwLock::new(ConnectionId::new()));

        let ctx = ConnectionContext {
            endpoint: config.server_url.clone(),
            bus: bus.clone(),
            handler: Arc::clone(&handler),
            active: Arc::clone(&active),
        };
        let current = connection::spawn_connection(ctx, config.outbound_queue_capacity);

        Self {
            config,
            bus,
            handler,
            active,
            current: Arc::new(RwLock::new(current)),
        }
    }

    /// Replaces the current socket resource with a brand-new one dialing
    /// the same endpoint.
    ///
    /// Unconditional: no check is performed on the prior resource's
    /// state. The replaced socket is closed in the background; events it
    /// still emits keep its own identity tag and its inbound frames are
    /// no longer dispatched. Safe to call concurrently — replacement is
    /// serialized, the last caller's resource wins.
    ///
    /// Returns the new resource's control surface.
    pub fn reconnect(&self) -> Connection {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let conn = connection::spawn_connection(self.context(), self.config.outbound_queue_capacity);
        tracing::info!(connection_id = %conn.id(), endpoint = %self.config.server_url, "reconnecting to queue server");
        *current = conn.clone();
        conn
    }

    /// Serializes `message` and transmits it on the current socket.
    ///
    /// Fire and forget: nothing is queued for retry and nothing blocks.
    /// When the socket is not open the frame is dropped, a diagnostic is
    /// logged, and the error is returned so callers can decide to react
    /// (e.g. by invoking [`Self::reconnect`]).
    ///
    /// # Errors
    ///
    /// [`LinkError::NotOpen`] when the current socket is not open,
    /// [`LinkError::Serialize`] when JSON encoding fails, and
    /// [`LinkError::QueueFull`] / [`LinkError::Disconnected`] when the
    /// writer cannot accept the frame.
    pub fn send<T: Serialize>(&self, message: &T) -> Result<(), LinkError> {
        let conn = self.connection();
        let state = conn.state();
        if !state.is_open() {
            tracing::warn!(connection_id = %conn.id(), %state, "cannot send frame, socket is not open");
            return Err(LinkError::NotOpen { state });
        }

        let text = serde_json::to_string(message)?;
        if let Err(e) = conn.try_send(text) {
            tracing::warn!(connection_id = %conn.id(), error = %e, "frame dropped");
            return Err(e);
        }
        Ok(())
    }

    /// Sends the `/add` command with the given song payload.
    ///
    /// # Errors
    ///
    /// Same as [`Self::send`].
    pub fn send_song<T: Serialize>(&self, song: &T) -> Result<(), LinkError> {
        self.send(&CommandEnvelope {
            command: CMD_ADD,
            song,
        })
    }

    /// Sends the `/remove` command with the given song payload.
    ///
    /// # Errors
    ///
    /// Same as [`Self::send`].
    pub fn remove_song<T: Serialize>(&self, song: &T) -> Result<(), LinkError> {
        self.send(&CommandEnvelope {
            command: CMD_REMOVE,
            song,
        })
    }

    /// Control surface of the current socket resource.
    ///
    /// Returns a clone: the link keeps its own reference, so holding or
    /// dropping the returned value never affects the connection.
    /// Collaborators that want inbound traffic should [`Self::subscribe`]
    /// or register a [`FrameHandler`] rather than poll this.
    #[must_use]
    pub fn connection(&self) -> Connection {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Subscribes to lifecycle events (open, raw frame, close).
    ///
    /// Collaborators driving their own recovery policy typically wait on
    /// [`EventStream::next_closed`] and invoke [`Self::reconnect`].
    #[must_use]
    pub fn subscribe(&self) -> EventStream {
        self.bus.subscribe()
    }

    /// Returns a reference to the link's event bus.
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    /// Replaces the registered inbound frame handler.
    ///
    /// Applies to the current socket resource and every later one.
    pub fn set_frame_handler(&self, handler: Arc<dyn FrameHandler>) {
        let mut guard = self
            .handler
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = handler;
    }

    /// Builds the context shared with a freshly spawned socket task.
    fn context(&self) -> ConnectionContext {
        ConnectionContext {
            endpoint: self.config.server_url.clone(),
            bus: self.bus.clone(),
            handler: Arc::clone(&self.handler),
            active: Arc::clone(&self.active),
        }
    }
}

impl fmt::Debug for QueueLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueLink")
            .field("endpoint", &self.config.server_url)
            .field("connection_id", &self.connection().id())
            .finish_non_exhaustive()
    }
}
