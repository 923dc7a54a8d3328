use std::time::Duration;

use crate::config::ServerConfig;

/// Shared HTTP client for the plan and recommendation endpoints
pub fn build_client(server: &ServerConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(server.timeout_sec))
        .user_agent(concat!("studyplan/", env!("CARGO_PKG_VERSION")))
        .build()
}
