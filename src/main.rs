//! queue-link command forwarder entry point.
//!
//! Connects the link and forwards JSON command lines from stdin to the
//! queue server. `/reconnect` replaces the socket after an observed drop,
//! `/quit` exits. Inbound frames are logged by the default handler.

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

use queue_link::config::LinkConfig;
use queue_link::ws::handle::QueueLink;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = LinkConfig::from_env()?;
    tracing::info!(endpoint = %config.server_url, "starting queue-link forwarder");

    let link = QueueLink::connect(config);
    let state = link.connection().wait_connected().await;
    tracing::info!(%state, "initial connection settled");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => {}
            "/quit" => break,
            "/reconnect" => {
                link.reconnect();
            }
            input => match serde_json::from_str::<serde_json::Value>(input) {
                Ok(message) => {
                    if let Err(e) = link.send(&message) {
                        if e.is_recoverable() {
                            tracing::warn!(error = %e, "command not sent; try /reconnect");
                        } else {
                            tracing::warn!(error = %e, "command not sent");
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "input is not valid JSON"),
            },
        }
    }

    Ok(())
}
