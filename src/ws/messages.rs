//! Outbound message types: command identifiers and the command envelope.

use serde::Serialize;

/// Command identifier for adding a song to the queue.
pub const CMD_ADD: &str = "/add";

/// Command identifier for removing a song from the upcoming queue.
pub const CMD_REMOVE: &str = "/remove";

/// Outbound command envelope.
///
/// Serialized field order is the wire order: `command` first, then
/// `song`. The payload is forwarded to the server unmodified; the link
/// has no dependency on its shape beyond "serializable".
#[derive(Debug, Clone, Serialize)]
pub struct CommandEnvelope<'a, T> {
    /// Command identifier (e.g. [`CMD_ADD`]).
    pub command: &'a str,
    /// Opaque payload.
    pub song: &'a T,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Song;

    #[derive(Serialize)]
    struct MiniSong {
        id: &'static str,
        title: &'static str,
    }

    #[test]
    fn add_envelope_wire_shape() {
        let song = MiniSong {
            id: "s1",
            title: "T",
        };
        let envelope = CommandEnvelope {
            command: CMD_ADD,
            song: &song,
        };
        let json = serde_json::to_string(&envelope).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json, r#"{"command":"/add","song":{"id":"s1","title":"T"}}"#);
    }

    #[test]
    fn remove_envelope_carries_full_song() {
        let song = Song {
            id: "a1".to_string(),
            title: "Creep".to_string(),
            artist: "Radiohead".to_string(),
            album: "Pablo Honey".to_string(),
            duration: "2350000000".to_string(),
        };
        let envelope = CommandEnvelope {
            command: CMD_REMOVE,
            song: &song,
        };
        let json = serde_json::to_string(&envelope).unwrap_or_default();
        assert!(json.starts_with(r#"{"command":"/remove","song":{"id":"a1""#));
    }
}
