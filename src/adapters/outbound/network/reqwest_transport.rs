use crate::ports::outbound::{HttpTransport, SourceResponse};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;

/// ReqwestTransport adapter performing the outbound POST with reqwest
///
/// One round trip per call. No retry, and no timeout unless one is configured.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport; `timeout` of `None` waits on the remote indefinitely
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("v-track/{}", version);
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<SourceResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach vulnerability source at {}", url))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;

        Ok(SourceResponse::new(status.as_u16(), decode_body(status.is_success(), &text)?))
    }
}

/// Parses a response body as JSON
///
/// Failure responses are not always JSON (proxies answer with HTML); their
/// text is wrapped as `{"error": text}` so the failure can still be cached.
fn decode_body(success: bool, text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(_) if !success => Ok(serde_json::json!({ "error": text })),
        Err(e) => Err(e).context("Vulnerability source returned a non-JSON body"),
    }
}
