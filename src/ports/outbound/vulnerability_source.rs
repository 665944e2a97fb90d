use crate::shared::Result;
use crate::vulnerability_tracking::domain::{BatchQuery, PackageQuery};
use async_trait::async_trait;
use serde_json::Value;

/// Raw answer from the vulnerability source: HTTP status plus JSON body
///
/// Non-success statuses are still responses; callers decide how to degrade.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceResponse {
    pub status: u16,
    pub body: Value,
}

impl SourceResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// VulnerabilitySource port for querying an external vulnerability database
///
/// This port abstracts the external data source (e.g., OSV API)
/// used to look up known vulnerabilities for package versions.
///
/// # Async Support
/// Implementations must be `Send + Sync` so one client can serve
/// every request handler concurrently.
#[async_trait]
pub trait VulnerabilitySource: Send + Sync {
    /// Looks up every query of a batch in one round trip
    ///
    /// # Returns
    /// The raw response; its `results` list follows the order of `query.queries`
    ///
    /// # Errors
    /// Returns an error if no response could be obtained at all
    /// (connection failure, undecodable body)
    async fn query_batch(&self, query: &BatchQuery) -> Result<SourceResponse>;

    /// Looks up a single package version
    ///
    /// # Errors
    /// Returns an error if no response could be obtained at all
    async fn query_single(&self, query: &PackageQuery) -> Result<SourceResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_response_success_range() {
        assert!(SourceResponse::new(200, json!({})).is_success());
        assert!(SourceResponse::new(204, json!({})).is_success());
        assert!(!SourceResponse::new(400, json!({})).is_success());
        assert!(!SourceResponse::new(500, json!({"error": "boom"})).is_success());
    }
}
