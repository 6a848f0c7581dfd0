//! HTTP client construction for the webhook notifiers.
//!
//! Each webhook client owns its own `reqwest` client so that closing one
//! notifier never affects another. Timeouts are left at reqwest's defaults.

use std::time::Duration;

/// User-Agent sent with every webhook request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Build the client used by the async webhook notifiers.
///
/// # Panics
///
/// If the client cannot be built, which in practice means the TLS backend
/// failed to initialise. `unwrap_or_default` retries with
/// `reqwest::Client::default()`, and that panics in the same case.
pub fn async_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(1)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .build()
        .unwrap_or_default()
}

/// Build the client used by the blocking webhook notifiers.
///
/// Must not be called from inside an async runtime worker thread; use
/// `spawn_blocking` there.
///
/// # Panics
///
/// Under the same condition as [`async_client`].
pub fn blocking_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(1)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .build()
        .unwrap_or_default()
}
