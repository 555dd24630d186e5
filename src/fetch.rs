use anyhow::{Context, Result};

use crate::config::expand_path;

/// Fetch the raw ICS text for a feed source.
///
/// `webcal://` URLs are rewritten to `https://` before the request; anything
/// that is not an HTTP URL is treated as a local file path.
pub async fn fetch_document(source: &str) -> Result<String> {
    if let Some(rest) = source.strip_prefix("webcal://") {
        return fetch_url(&format!("https://{rest}")).await;
    }
    if source.starts_with("http://") || source.starts_with("https://") {
        return fetch_url(source).await;
    }

    let path = expand_path(source);
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read calendar file at {}", path.display()))
}

async fn fetch_url(url: &str) -> Result<String> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("Server rejected request for {url}"))?;

    response
        .text()
        .await
        .with_context(|| format!("Failed to read response body from {url}"))
}
