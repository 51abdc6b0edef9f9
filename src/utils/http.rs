// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use scraper::Html;

use crate::error::Result;
use crate::models::WatcherConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &WatcherConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page and reduce it to an ordered sequence of non-empty trimmed
/// text lines.
///
/// Any non-success response status is fatal for the run.
pub async fn fetch_page_lines(client: &reqwest::Client, url: &str) -> Result<Vec<String>> {
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(text_lines(&html))
}

/// Render HTML to trimmed, non-empty text lines in document order.
pub fn text_lines(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .root_element()
        .text()
        .flat_map(|chunk| chunk.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
