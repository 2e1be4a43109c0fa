//! Canonical song record exchanged with the queue server.
//!
//! The link itself never inspects these fields — the send path is generic
//! over any serializable payload. The record is shipped here so that all
//! callers of one application share a single shape.

use serde::{Deserialize, Serialize};

/// One track in the jukebox library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Library identifier of the track.
    pub id: String,
    /// Track title.
    pub title: String,
    /// Primary artist name.
    pub artist: String,
    /// Album name.
    pub album: String,
    /// Track duration in library ticks, as the backend reports it.
    pub duration: String,
}
