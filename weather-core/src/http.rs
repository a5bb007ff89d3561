use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::WeatherError;

/// Build the shared HTTP client. `None` keeps reqwest's default of no timeout.
pub fn build_client(timeout: Option<Duration>) -> Result<Client, WeatherError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| WeatherError::transport("HTTP client", e.to_string()))
}

/// GET `url` with `query` and return the body of a successful response.
pub(crate) async fn get_body(
    http: &Client,
    endpoint: &'static str,
    url: &str,
    query: &[(&str, String)],
) -> Result<String, WeatherError> {
    debug!(endpoint, url, "Sending request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| WeatherError::transport(endpoint, e.to_string()))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| WeatherError::transport(endpoint, format!("failed to read body: {e}")))?;

    if !status.is_success() {
        return Err(WeatherError::transport(
            endpoint,
            format!("status {}: {}", status, truncate_body(&body)),
        ));
    }

    Ok(body)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
