use serde::Serialize;

/// Package coordinates as the vulnerability source expects them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRef {
    pub name: String,
    pub ecosystem: String,
}

/// A single package/version lookup
///
/// Serializes as `{"version": "...", "package": {"name": "...", "ecosystem": "..."}}`,
/// which is both one element of a batch and the body of a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageQuery {
    pub version: String,
    pub package: PackageRef,
}

impl PackageQuery {
    pub fn new(name: &str, version: &str, ecosystem: &str) -> Self {
        Self {
            version: version.to_string(),
            package: PackageRef {
                name: name.to_string(),
                ecosystem: ecosystem.to_string(),
            },
        }
    }
}

/// Ordered batch of lookups
///
/// The source answers with results in submission order and no identifier,
/// so the position of each query is its correlation key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct BatchQuery {
    pub queries: Vec<PackageQuery>,
}

impl BatchQuery {
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
