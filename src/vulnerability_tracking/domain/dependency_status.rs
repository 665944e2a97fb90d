use serde::{Serialize, Serializer};
use std::fmt;

/// Vulnerability status of one dependency within a project
///
/// The count is authoritative. The human-readable form
/// ("N vulnerabilities found" / "vulnerabilities NOT found!") is derived
/// from it and is what gets serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DependencyStatus {
    vulnerability_count: usize,
}

impl DependencyStatus {
    pub fn new(vulnerability_count: usize) -> Self {
        Self {
            vulnerability_count,
        }
    }

    pub fn clean() -> Self {
        Self::new(0)
    }

    pub fn vulnerability_count(&self) -> usize {
        self.vulnerability_count
    }

    pub fn is_vulnerable(&self) -> bool {
        self.vulnerability_count > 0
    }
}

impl fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_vulnerable() {
            write!(f, "{} vulnerabilities found", self.vulnerability_count)
        } else {
            write!(f, "vulnerabilities NOT found!")
        }
    }
}

impl Serialize for DependencyStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
