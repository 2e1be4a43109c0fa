//! # queue-link
//!
//! Client-side WebSocket command link for the jukebox queue server.
//!
//! The crate maintains a single outbound socket to the local queue control
//! server and forwards application commands (add a song, remove a song) as
//! JSON text frames. It is a connection lifecycle manager, not a message
//! broker: delivery is fire and forget, inbound frames are surfaced raw to
//! a pluggable handler, and recovery from a dropped connection is explicit
//! via [`ws::handle::QueueLink::reconnect`].
//!
//! ## Architecture
//!
//! ```text
//! Application (UI, CLI, automation)
//!     │
//!     ├── QueueLink (ws/)
//!     │       ├── CommandEnvelope (ws/messages)
//!     │       ├── FrameHandler (ws/dispatch)
//!     │       └── socket resource task (ws/connection)
//!     │
//!     ├── EventBus (domain/) — Opened / Frame / Closed
//!     │
//!     └── queue control server (ws://127.0.0.1:6969)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod shared;
pub mod ws;
