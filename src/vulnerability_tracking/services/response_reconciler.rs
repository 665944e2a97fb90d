use crate::shared::error::VtrackError;
use crate::shared::Result;
use crate::vulnerability_tracking::domain::{
    DependencyMap, DependencyStatus, FindingMap, VulnerabilityFinding,
};
use serde::Deserialize;
use serde_json::Value;

// OSV response structures

#[derive(Debug, Deserialize)]
struct OsvBatchResponse {
    results: Vec<OsvResult>,
}

#[derive(Debug, Deserialize)]
struct OsvResult {
    #[serde(default)]
    vulns: Vec<OsvVulnerability>,
}

#[derive(Debug, Deserialize)]
struct OsvVulnerability {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// ResponseReconciler service for correlating source responses with dependencies
///
/// The batch endpoint returns one result per submitted query, in order,
/// without naming the package. Reconciliation is therefore a strict
/// positional zip against the dependency names produced by the builder.
pub struct ResponseReconciler;

impl ResponseReconciler {
    /// Zips a batch response onto dependency names
    ///
    /// On a length mismatch the unmatched tail on either side is dropped.
    ///
    /// # Errors
    /// Returns `VtrackError::UnexpectedResponse` if the body has no `results` list
    pub fn reconcile(body: &Value, dependency_names: &[String]) -> Result<DependencyMap> {
        let response =
            OsvBatchResponse::deserialize(body).map_err(|e| VtrackError::UnexpectedResponse {
                reason: format!("invalid batch response: {}", e),
            })?;

        if response.results.len() != dependency_names.len() {
            tracing::warn!(
                results = response.results.len(),
                dependencies = dependency_names.len(),
                "batch result count does not match dependency count, unmatched entries dropped"
            );
        }

        let mut dependencies = DependencyMap::new();
        for (name, result) in dependency_names.iter().zip(response.results.iter()) {
            dependencies.insert(name.clone(), DependencyStatus::new(result.vulns.len()));
        }

        Ok(dependencies)
    }

    /// Extracts findings from a single-query response, keyed by vulnerability id
    ///
    /// A body without `vulns` (the source answers `{}` for clean packages)
    /// yields an empty map.
    ///
    /// # Errors
    /// Returns `VtrackError::UnexpectedResponse` if `vulns` entries lack an `id`
    pub fn findings(body: &Value) -> Result<FindingMap> {
        let result =
            OsvResult::deserialize(body).map_err(|e| VtrackError::UnexpectedResponse {
                reason: format!("invalid query response: {}", e),
            })?;

        let mut findings = FindingMap::new();
        for vuln in result.vulns {
            findings.insert(VulnerabilityFinding::new(vuln.id, vuln.summary, vuln.details));
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reconcile_classifies_each_dependency() {
        let body = json!({"results": [{"vulns": []}, {"vulns": [{"id": "X"}]}]});
        let map = ResponseReconciler::reconcile(&body, &names(&["Django", "requests"])).unwrap();

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(
            json,
            json!({
                "Django": "vulnerabilities NOT found!",
                "requests": "1 vulnerabilities found"
            })
        );
    }

    #[test]
    fn test_reconcile_missing_vulns_is_clean() {
        let body = json!({"results": [{}, {"vulns": [{"id": "A"}, {"id": "B"}]}]});
        let map = ResponseReconciler::reconcile(&body, &names(&["attrs", "urllib3"])).unwrap();

        assert_eq!(map.get("attrs"), Some(DependencyStatus::clean()));
        assert_eq!(map.get("urllib3"), Some(DependencyStatus::new(2)));
    }

    #[test]
    fn test_reconcile_preserves_dependency_order() {
        let body = json!({"results": [{"vulns": []}, {"vulns": []}, {"vulns": [{"id": "A"}]}]});
        let map =
            ResponseReconciler::reconcile(&body, &names(&["zlib", "attrs", "Flask"])).unwrap();

        let order: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["zlib", "attrs", "Flask"]);
    }

    #[test]
    fn test_reconcile_drops_unmatched_results() {
        let body = json!({"results": [{"vulns": []}, {"vulns": [{"id": "A"}]}]});
        let map = ResponseReconciler::reconcile(&body, &names(&["Django"])).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Django"), Some(DependencyStatus::clean()));
    }

    #[test]
    fn test_reconcile_drops_unmatched_names() {
        let body = json!({"results": [{"vulns": [{"id": "A"}]}]});
        let map =
            ResponseReconciler::reconcile(&body, &names(&["requests", "Django"])).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.get("Django").is_none());
    }

    #[test]
    fn test_reconcile_without_results_is_error() {
        let body = json!({"error": "server failure"});
        let err = ResponseReconciler::reconcile(&body, &names(&["Django"])).unwrap_err();
        let err = err.downcast::<VtrackError>().unwrap();
        assert!(matches!(err, VtrackError::UnexpectedResponse { .. }));
    }

    #[test]
    fn test_findings_defaults_missing_text() {
        let body = json!({
            "vulns": [
                {"id": "GHSA-1", "summary": "Header injection", "details": "Long text"},
                {"id": "PYSEC-2"}
            ]
        });
        let findings = ResponseReconciler::findings(&body).unwrap();

        assert_eq!(findings.len(), 2);
        assert_eq!(findings.get("GHSA-1").unwrap().summary, "Header injection");
        assert_eq!(findings.get("PYSEC-2").unwrap().summary, "N/A");
        assert_eq!(findings.get("PYSEC-2").unwrap().details, "N/A");
    }

    #[test]
    fn test_findings_empty_body() {
        let findings = ResponseReconciler::findings(&json!({})).unwrap();
        assert!(findings.is_empty());
    }
}
