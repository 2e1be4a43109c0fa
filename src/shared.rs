//! Process-wide shared link.
//!
//! Most applications should construct one [`QueueLink`] at startup and
//! pass clones to the components that need it — that keeps the dependency
//! explicit and lets tests substitute their own link. The accessor here
//! exists for callers that want the original single-implicit-link
//! behavior: one connection for the whole process, created on first use.

use tokio::sync::OnceCell;

use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::ws::handle::QueueLink;

static SHARED_LINK: OnceCell<QueueLink> = OnceCell::const_new();

/// Returns the process-wide [`QueueLink`], constructing it on first call.
///
/// The first caller loads [`LinkConfig::from_env`] and initiates the
/// connection attempt; every later call returns a clone of the same
/// link. Construction is guarded: concurrent first calls still construct
/// exactly one link. The link lives for the remainder of the process —
/// there is no teardown.
///
/// # Errors
///
/// Returns [`LinkError::InvalidEndpoint`] when the configured endpoint
/// is not a WebSocket URL. A failed construction is not cached; the next
/// call retries.
pub async fn shared() -> Result<QueueLink, LinkError> {
    let link = SHARED_LINK
        .get_or_try_init(|| async {
            let config = LinkConfig::from_env()?;
            tracing::debug!(endpoint = %config.server_url, "constructing shared link");
            Ok::<_, LinkError>(QueueLink::connect(config))
        })
        .await?;
    Ok(link.clone())
}
