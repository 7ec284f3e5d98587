//! Shared HTTP plumbing for provider clients
//!
//! Every provider call is the same shape: build request, send, check status,
//! decode JSON. Errors are surfaced as-is, no retries.

use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Query parameters whose values never reach the logs
const SECRET_PARAMS: &[&str] = &["key", "access_key"];

/// Build a reqwest client with the given User-Agent and timeout
pub(crate) fn build_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()?)
}

/// Send `request` and decode a JSON body of type `T`
///
/// - transport failure -> `Error::Http`
/// - non-2xx status -> `Error::Status`
/// - undecodable body -> `Error::Decode`
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T> {
    let body = fetch_text(provider, request).await?;
    serde_json::from_str(&body).map_err(|source| {
        warn!(provider, error = %source, "undecodable response body");
        Error::Decode { provider, source }
    })
}

/// Send `request` and return the body as text after the status check
pub(crate) async fn fetch_text(provider: &'static str, request: RequestBuilder) -> Result<String> {
    let response = request.send().await.map_err(|e| {
        warn!(provider, error = %e, "request failed");
        Error::Http(e)
    })?;

    debug!(
        provider,
        url = %redact(response.url().as_str()),
        status = %response.status(),
        "response received"
    );

    let status = response.status();
    if !status.is_success() {
        warn!(provider, %status, "non-success status");
        return Err(Error::Status { provider, status });
    }

    Ok(response.text().await?)
}

/// Replace the values of credential query parameters with `***`
pub(crate) fn redact(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, _)) if SECRET_PARAMS.contains(&name) => format!("{}=***", name),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", base, query)
}

/// Fail with `Error::Missing` when `value` is empty
pub(crate) fn require<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(Error::Missing(what.to_string()))
    } else {
        Ok(value)
    }
}
