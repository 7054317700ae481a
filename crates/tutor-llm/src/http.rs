//! Shared HTTP client construction for consistent timeout configuration.

use std::time::Duration;

/// Create the shared provider HTTP client.
///
/// Config: 10s connect timeout, 15s request timeout, `tutor/{version}`
/// user-agent.
#[must_use]
pub fn default_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(15))
        .user_agent(concat!("tutor/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("default HTTP client construction must not fail")
}
