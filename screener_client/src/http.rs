//! Blocking HTTP helpers shared by the Yahoo client and the roster download.
use log::debug;
use reqwest::blocking::Client;
use screener_common::{Result, ScreenerError};
use std::time::Duration;

/// Yahoo and Wikipedia both reject requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Build the one client used for the whole run.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| ScreenerError::network(format!("Failed to create HTTP client: {}", e)))
}

/// GET `url` with `query` and return the body, failing on non-2xx statuses.
pub fn get_text(client: &Client, url: &str, query: &[(&str, String)]) -> Result<String> {
    debug!("GET {} {:?}", url, query);
    let response = client
        .get(url)
        .query(query)
        .send()
        .map_err(|e| ScreenerError::network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScreenerError::network(format!("{} returned HTTP {}", url, status)));
    }

    response
        .text()
        .map_err(|e| ScreenerError::network(format!("Failed to read body from {}: {}", url, e)))
}
