use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use shared::{
    error::TransportFailure,
    protocol::{AdminCommand, ResponseEnvelope},
};
use url::Url;

/// Client-side bound on every admin request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Request layer seam: submit one command, get back either a decoded
/// envelope or a classified failure. Callers dispatch the two outcomes into
/// the dispatcher's two entry points.
#[async_trait]
pub trait CommandTransport: Send + Sync {
    async fn submit(
        &self,
        command: &AdminCommand,
    ) -> std::result::Result<ResponseEnvelope, TransportFailure>;
}

pub struct HttpCommandTransport {
    http: Client,
    server_url: Url,
}

impl HttpCommandTransport {
    pub fn new(server_url: &str) -> Result<Self> {
        Self::with_timeout(server_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(server_url: &str, timeout: Duration) -> Result<Self> {
        let server_url = Url::parse(server_url)
            .with_context(|| format!("invalid server url '{server_url}'"))?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { http, server_url })
    }

    fn endpoint_url(
        &self,
        command: &AdminCommand,
    ) -> std::result::Result<Url, TransportFailure> {
        self.server_url
            .join(command.endpoint())
            .map_err(|err| TransportFailure::Network(err.to_string()))
    }
}

#[async_trait]
impl CommandTransport for HttpCommandTransport {
    async fn submit(
        &self,
        command: &AdminCommand,
    ) -> std::result::Result<ResponseEnvelope, TransportFailure> {
        let url = self.endpoint_url(command)?;
        let response = self
            .http
            .put(url)
            .header(ACCEPT, "application/json")
            .form(&command.form_pairs())
            .send()
            .await
            .map_err(classify)?
            .error_for_status()
            .map_err(classify)?;
        let body = response.bytes().await.map_err(classify)?;
        let raw: serde_json::Value =
            serde_json::from_slice(&body).map_err(|_| TransportFailure::Unparsable)?;
        Ok(ResponseEnvelope::from_value(raw))
    }
}

/// Maps reqwest's error surface onto the user-facing failure taxonomy.
/// `Aborted` never originates here; only the cancellation race produces it.
fn classify(err: reqwest::Error) -> TransportFailure {
    if err.is_timeout() {
        TransportFailure::Timeout
    } else if err.is_decode() {
        TransportFailure::Unparsable
    } else if err.is_status() || err.is_connect() || err.is_request() || err.is_redirect() {
        TransportFailure::Network(err.to_string())
    } else {
        TransportFailure::Unknown
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
