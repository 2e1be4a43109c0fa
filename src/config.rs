//! Link configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with defaults matching the stock
//! local deployment of the queue server.

use crate::error::LinkError;

/// Default endpoint of the local queue control server.
const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:6969";

/// Top-level link configuration.
///
/// Loaded once at startup via [`LinkConfig::from_env`], or assembled
/// directly (e.g. in tests) with [`LinkConfig::default`].
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// WebSocket endpoint of the queue control server
    /// (e.g. `ws://127.0.0.1:6969`).
    pub server_url: String,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// Capacity of the per-socket outbound frame queue.
    pub outbound_queue_capacity: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            event_bus_capacity: 256,
            outbound_queue_capacity: 64,
        }
    }
}

impl LinkConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to the defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidEndpoint`] if `QUEUE_SERVER_URL` is set
    /// but is not a `ws://` or `wss://` URL.
    pub fn from_env() -> Result<Self, LinkError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let server_url =
            std::env::var("QUEUE_SERVER_URL").unwrap_or_else(|_| defaults.server_url);
        if !(server_url.starts_with("ws://") || server_url.starts_with("wss://")) {
            return Err(LinkError::InvalidEndpoint(server_url));
        }

        // tokio channels reject zero capacities
        let event_bus_capacity =
            parse_env("EVENT_BUS_CAPACITY", defaults.event_bus_capacity).max(1);
        let outbound_queue_capacity =
            parse_env("OUTBOUND_QUEUE_CAPACITY", defaults.outbound_queue_capacity).max(1);

        Ok(Self {
            server_url,
            event_bus_capacity,
            outbound_queue_capacity,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_server() {
        let config = LinkConfig::default();
        assert_eq!(config.server_url, "ws://127.0.0.1:6969");
        assert!(config.event_bus_capacity > 0);
        assert!(config.outbound_queue_capacity > 0);
    }

    #[test]
    fn parse_env_falls_back_on_missing() {
        let value: usize = parse_env("QUEUE_LINK_TEST_UNSET_KEY", 42);
        assert_eq!(value, 42);
    }
}
