use crate::shared::Result;

/// DependencyRecord value object - one parsed manifest line
///
/// All three fields are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    name: String,
    version: String,
    ecosystem: String,
}

impl DependencyRecord {
    pub fn new(name: String, version: String, ecosystem: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Dependency name cannot be empty");
        }
        if version.is_empty() {
            anyhow::bail!("Dependency version cannot be empty");
        }
        if ecosystem.is_empty() {
            anyhow::bail!("Dependency ecosystem cannot be empty");
        }

        Ok(Self {
            name,
            version,
            ecosystem,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn ecosystem(&self) -> &str {
        &self.ecosystem
    }
}
