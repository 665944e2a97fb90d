use super::DependencyMap;
use serde::Serialize;

/// Project - a named snapshot of a manifest's reconciled vulnerability status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    name: String,
    description: String,
    dependencies: DependencyMap,
}

impl Project {
    pub fn new(name: String, description: String, dependencies: DependencyMap) -> Self {
        Self {
            name,
            description,
            dependencies,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    /// True when any dependency has at least one vulnerability
    pub fn is_vulnerable(&self) -> bool {
        self.dependencies.has_vulnerabilities()
    }
}
