//! Pluggable inbound frame dispatch.
//!
//! The link does not define an inbound schema. Each raw text frame is
//! handed to the registered [`FrameHandler`]; collaborators own parsing
//! and routing. The default handler logs the payload without decoding it.

/// Receiver for raw inbound text frames.
///
/// Implementations must be cheap: `on_frame` is called from the socket
/// read loop, and blocking here stalls the connection.
pub trait FrameHandler: Send + Sync {
    /// Handles one raw inbound frame.
    fn on_frame(&self, frame: &str);
}

/// Default handler: logs each raw frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFrames;

impl FrameHandler for LogFrames {
    fn on_frame(&self, frame: &str) {
        tracing::info!(payload = %frame, "frame received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CollectFrames {
        seen: Mutex<Vec<String>>,
    }

    impl FrameHandler for CollectFrames {
        fn on_frame(&self, frame: &str) {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(frame.to_string());
            }
        }
    }

    #[test]
    fn handler_receives_raw_text() {
        let handler = CollectFrames {
            seen: Mutex::new(Vec::new()),
        };
        handler.on_frame("{\"status\":\"ok\"}");
        handler.on_frame("not even json");

        let seen = handler.seen.lock().unwrap_or_else(|e| e.into_inner());
        assert_eq!(
            *seen,
            vec!["{\"status\":\"ok\"}".to_string(), "not even json".to_string()]
        );
    }

    #[test]
    fn log_frames_accepts_any_payload() {
        LogFrames.on_frame("opaque");
    }
}
