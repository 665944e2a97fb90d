use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Placeholder for a finding field the source did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// One vulnerability entry returned for a package/version lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VulnerabilityFinding {
    pub id: String,
    pub summary: String,
    pub details: String,
}

impl VulnerabilityFinding {
    /// Creates a finding, substituting "N/A" for missing text fields
    pub fn new(id: String, summary: Option<String>, details: Option<String>) -> Self {
        Self {
            id,
            summary: summary.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            details: details.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// Findings keyed by vulnerability id, in the order the source listed them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FindingMap {
    findings: IndexMap<String, VulnerabilityFinding>,
}

impl FindingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a finding; a repeated id replaces the earlier finding in place
    pub fn insert(&mut self, finding: VulnerabilityFinding) {
        self.findings.insert(finding.id.clone(), finding);
    }

    pub fn get(&self, id: &str) -> Option<&VulnerabilityFinding> {
        self.findings.get(id)
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl Serialize for FindingMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.findings.len()))?;
        for (id, finding) in &self.findings {
            map.serialize_entry(id, finding)?;
        }
        map.end()
    }
}
