use crate::application::dto::PackageLookupRequest;
use crate::ports::outbound::VulnerabilitySource;
use crate::shared::Result;
use crate::vulnerability_tracking::domain::FindingMap;
use crate::vulnerability_tracking::services::ResponseReconciler;
use std::sync::Arc;

/// Result of a single-package vulnerability lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(FindingMap),
    /// The source knows no vulnerability for this package version
    NoFindings,
    UpstreamFailure { status: u16 },
}

/// LookupPackageUseCase - Ad-hoc lookup of one package version, bypassing the store
pub struct LookupPackageUseCase<S> {
    source: Arc<S>,
}

impl<S: VulnerabilitySource> LookupPackageUseCase<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Queries the single-package endpoint and collects findings keyed by id
    ///
    /// # Errors
    /// Returns `VtrackError::MissingParameter` for a blank parameter, and
    /// propagates source errors
    pub async fn execute(&self, request: &PackageLookupRequest) -> Result<LookupOutcome> {
        let query = request.to_query()?;
        tracing::info!(
            package = %query.package.name,
            version = %query.version,
            ecosystem = %query.package.ecosystem,
            "looking up package vulnerabilities"
        );

        let response = self.source.query_single(&query).await?;
        if !response.is_success() {
            tracing::warn!(
                package = %query.package.name,
                status = response.status,
                "vulnerability source failed for package lookup"
            );
            return Ok(LookupOutcome::UpstreamFailure {
                status: response.status,
            });
        }

        let findings = ResponseReconciler::findings(&response.body)?;
        if findings.is_empty() {
            return Ok(LookupOutcome::NoFindings);
        }
        Ok(LookupOutcome::Found(findings))
    }
}
