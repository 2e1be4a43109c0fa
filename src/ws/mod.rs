//! WebSocket layer: the link handle, socket resource tasks, outbound
//! message types, and inbound frame dispatch.
//!
//! [`handle::QueueLink`] is the one public entry point for sending
//! commands; everything else in this module supports it.

pub mod connection;
pub mod dispatch;
pub mod handle;
pub mod messages;
pub mod state;
