//! Socket resource task: owns one WebSocket connection end to end.
//!
//! Each connect or reconnect spawns one socket task. The task dials the
//! endpoint, then multiplexes outbound frames queued by the
//! handle with inbound frames from the server in a single `select!` loop.
//! Every transition is published as a [`LinkEvent`] tagged with this
//! resource's [`ConnectionId`]; a resource that has been replaced stops
//! dispatching inbound frames, but its close is still reported under its
//! own tag.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;

use crate::domain::{ConnectionId, EventBus, LinkEvent};
use crate::error::LinkError;
use crate::ws::dispatch::FrameHandler;
use crate::ws::state::ConnectionState;

/// Control surface of one socket resource.
///
/// Cloneable: all clones point at the same underlying socket. Holding or
/// dropping a `Connection` never affects the socket itself — the handle
/// keeps its own reference for as long as the resource is current.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    outbound: mpsc::Sender<String>,
    state: watch::Receiver<ConnectionState>,
}

impl Connection {
    /// Identity tag of this socket resource.
    #[must_use]
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Watch channel delivering state transitions as they happen.
    #[must_use]
    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Waits until the resource leaves `Connecting` and returns the state
    /// it settled in (`Open`, or `Closed` when the dial failed).
    pub async fn wait_connected(&self) -> ConnectionState {
        let mut rx = self.state.clone();
        loop {
            let state = *rx.borrow_and_update();
            if state != ConnectionState::Connecting {
                return state;
            }
            if rx.changed().await.is_err() {
                return *rx.borrow();
            }
        }
    }

    /// Queues one already-encoded text frame for transmission.
    ///
    /// The handle gates this on [`ConnectionState::Open`]; the queue only
    /// rejects a frame when it is full or the writer task is gone.
    pub(crate) fn try_send(&self, text: String) -> Result<(), LinkError> {
        self.outbound.try_send(text).map_err(|e| match e {
            TrySendError::Full(_) => LinkError::QueueFull,
            TrySendError::Closed(_) => LinkError::Disconnected,
        })
    }
}

/// Everything a socket resource task needs besides the socket itself.
pub(crate) struct ConnectionContext {
    /// Endpoint URL to dial.
    pub endpoint: String,
    /// Bus receiving this resource's lifecycle events.
    pub bus: EventBus,
    /// Registered inbound frame handler, shared with the handle.
    pub handler: Arc<RwLock<Arc<dyn FrameHandler>>>,
    /// Id of the resource the handle currently holds.
    pub active: Arc<RwLock<ConnectionId>>,
}

impl ConnectionContext {
    /// Returns `true` while `id` is still the handle's current resource.
    fn is_active(&self, id: ConnectionId) -> bool {
        *self.active.read().unwrap_or_else(PoisonError::into_inner) == id
    }

    /// Hands one inbound frame to the registered handler.
    fn handle_frame(&self, text: &str) {
        let guard = self.handler.read().unwrap_or_else(PoisonError::into_inner);
        guard.on_frame(text);
    }
}

/// Spawns a new socket resource task and returns its control surface.
///
/// Marks the new resource as the active one *before* the task starts, so
/// no inbound frame of the new socket can ever be mistaken for a stale
/// delivery. Must be called from within a Tokio runtime.
pub(crate) fn spawn_connection(ctx: ConnectionContext, outbound_capacity: usize) -> Connection {
    let id = ConnectionId::new();
    {
        let mut active = ctx.active.write().unwrap_or_else(PoisonError::into_inner);
        *active = id;
    }

    let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
    let (outbound_tx, outbound_rx) = mpsc::channel(outbound_capacity);

    tokio::spawn(run_connection(id, ctx, state_tx, outbound_rx));

    Connection {
        id,
        outbound: outbound_tx,
        state: state_rx,
    }
}

/// Runs one socket resource from dial to close.
///
/// A failed dial follows the same path as a close: one `Closed` event,
/// no separate error channel.
async fn run_connection(
    id: ConnectionId,
    ctx: ConnectionContext,
    state_tx: watch::Sender<ConnectionState>,
    mut outbound_rx: mpsc::Receiver<String>,
) {
    let stream = match tokio_tungstenite::connect_async(ctx.endpoint.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            tracing::warn!(connection_id = %id, endpoint = %ctx.endpoint, error = %e, "connect failed");
            state_tx.send_replace(ConnectionState::Closed);
            ctx.bus.publish(LinkEvent::Closed {
                connection_id: id,
                code: None,
                reason: format!("connect failed: {e}"),
                timestamp: Utc::now(),
            });
            return;
        }
    };

    state_tx.send_replace(ConnectionState::Open);
    tracing::info!(connection_id = %id, endpoint = %ctx.endpoint, "connected to queue server");
    ctx.bus.publish(LinkEvent::Opened {
        connection_id: id,
        timestamp: Utc::now(),
    });

    let (mut sink, mut stream) = stream.split();
    let mut close_code: Option<u16> = None;
    let mut close_reason = String::new();

    loop {
        tokio::select! {
            // Outbound frame queued by the handle
            frame = outbound_rx.recv() => {
                match frame {
                    Some(text) => {
                        if let Err(e) = sink.send(Message::Text(text.into())).await {
                            tracing::warn!(connection_id = %id, error = %e, "send failed");
                            close_reason = format!("send failed: {e}");
                            break;
                        }
                    }
                    // Handle dropped this resource; close the socket politely.
                    None => {
                        let _ = sink.send(Message::Close(None)).await;
                        close_reason = "replaced by a new connection".to_string();
                        break;
                    }
                }
            }
            // Inbound frame from the server
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if ctx.is_active(id) {
                            ctx.handle_frame(text.as_str());
                            ctx.bus.publish(LinkEvent::Frame {
                                connection_id: id,
                                text: text.to_string(),
                                timestamp: Utc::now(),
                            });
                        } else {
                            tracing::debug!(connection_id = %id, "dropping frame from replaced socket");
                        }
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        if sink.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        state_tx.send_replace(ConnectionState::Closing);
                        let (code, reason) = frame
                            .map(|f| (u16::from(f.code), f.reason.to_string()))
                            .unwrap_or((1005, String::new()));
                        close_code = Some(code);
                        close_reason = reason;
                        break;
                    }
                    Some(Ok(_)) => {
                        // Binary and raw frames are outside the protocol; ignore.
                    }
                    Some(Err(e)) => {
                        tracing::warn!(connection_id = %id, error = %e, "read error");
                        close_reason = e.to_string();
                        break;
                    }
                    None => {
                        close_reason = "stream ended".to_string();
                        break;
                    }
                }
            }
        }
    }

    state_tx.send_replace(ConnectionState::Closed);
    tracing::info!(connection_id = %id, code = ?close_code, "disconnected from queue server");
    ctx.bus.publish(LinkEvent::Closed {
        connection_id: id,
        code: close_code,
        reason: close_reason,
        timestamp: Utc::now(),
    });
}
