use crate::shared::error::VtrackError;
use crate::shared::Result;
use crate::vulnerability_tracking::domain::PackageQuery;

/// PackageLookupRequest - Internal request DTO for the single-package lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLookupRequest {
    pub package_name: String,
    pub package_version: String,
    pub ecosystem: String,
}

impl PackageLookupRequest {
    pub fn new(package_name: String, package_version: String, ecosystem: String) -> Self {
        Self {
            package_name,
            package_version,
            ecosystem,
        }
    }

    /// Builds the wire query, rejecting the first missing or blank parameter
    pub fn to_query(&self) -> Result<PackageQuery> {
        let fields = [
            ("package_name", &self.package_name),
            ("package_version", &self.package_version),
            ("ecosystem", &self.ecosystem),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(VtrackError::MissingParameter {
                name: name.to_string(),
            }
            .into());
        }

        Ok(PackageQuery::new(
            self.package_name.trim(),
            self.package_version.trim(),
            self.ecosystem.trim(),
        ))
    }
}
