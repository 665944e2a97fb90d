use super::DependencyStatus;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Ordered mapping from dependency name to its status
///
/// Names keep the position of their first insertion; inserting a name
/// again replaces its status in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyMap {
    entries: IndexMap<String, DependencyStatus>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: String, status: DependencyStatus) {
        self.entries.insert(name, status);
    }

    pub fn get(&self, name: &str) -> Option<DependencyStatus> {
        self.entries.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, DependencyStatus)> {
        self.entries
            .iter()
            .map(|(name, status)| (name.as_str(), *status))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when at least one dependency has a vulnerability
    pub fn has_vulnerabilities(&self) -> bool {
        self.entries.values().any(DependencyStatus::is_vulnerable)
    }
}

impl<'a> FromIterator<(&'a str, DependencyStatus)> for DependencyMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, DependencyStatus)>>(iter: I) -> Self {
        let mut map = DependencyMap::new();
        for (name, status) in iter {
            map.insert(name.to_string(), status);
        }
        map
    }
}

impl Serialize for DependencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, status) in &self.entries {
            map.serialize_entry(name, status)?;
        }
        map.end()
    }
}
