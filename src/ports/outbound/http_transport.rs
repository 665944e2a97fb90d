use crate::ports::outbound::SourceResponse;
use crate::shared::Result;
use async_trait::async_trait;

/// HttpTransport port for the outbound POST to the vulnerability source
///
/// Separating the wire call from the client lets the caching client be
/// exercised against a stand-in that counts calls.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POSTs an already-serialized JSON body and returns status plus parsed body
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent or the body is not JSON
    async fn post_json(&self, url: &str, body: String) -> Result<SourceResponse>;
}
