//! Process-wide accessor behavior.
//!
//! Runs in its own test binary (own process), so the shared link state is
//! not contaminated by other integration tests. No server listens on the
//! default endpoint here; identity and construction-side-effect behavior
//! do not depend on the dial outcome.

#![allow(clippy::panic)]

use std::time::Duration;

use tokio::time::timeout;

use queue_link::shared::shared;
use queue_link::ws::state::ConnectionState;

#[tokio::test]
async fn shared_returns_the_same_link_even_under_concurrent_first_access() {
    let (a, b) = tokio::join!(shared(), shared());
    let (Ok(a), Ok(b)) = (a, b) else {
        panic!("shared link construction failed");
    };
    assert_eq!(a.connection().id(), b.connection().id());

    let Ok(c) = shared().await else {
        panic!("shared link construction failed");
    };
    assert_eq!(a.connection().id(), c.connection().id());
}

#[tokio::test]
async fn shared_construction_initiates_a_connection_attempt() {
    let Ok(link) = shared().await else {
        panic!("shared link construction failed");
    };

    // The resource exists from the moment of construction and its dial
    // settles on its own (open, or closed when nothing is listening).
    let settled = timeout(Duration::from_secs(10), link.connection().wait_connected()).await;
    let Ok(state) = settled else {
        panic!("connection attempt never settled");
    };
    assert_ne!(state, ConnectionState::Connecting);
}
