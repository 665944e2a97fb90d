use crate::ports::outbound::ProjectRepository;
use crate::vulnerability_tracking::domain::Project;
use crate::vulnerability_tracking::services::{ProjectsOverview, VulnerabilityAggregator};
use std::collections::BTreeMap;
use std::sync::Arc;

/// QueryProjectsUseCase - Read path over the project store
///
/// Every view is recomputed from a fresh snapshot of the store.
pub struct QueryProjectsUseCase<R> {
    repository: Arc<R>,
}

impl<R: ProjectRepository> QueryProjectsUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Every project's vulnerable flag, or `None` when nothing is stored yet
    pub fn overview(&self) -> Option<ProjectsOverview> {
        VulnerabilityAggregator::overview(&self.repository.all())
    }

    pub fn project(&self, name: &str) -> Option<Project> {
        self.repository.get(name.trim())
    }

    /// Vulnerable dependencies merged across projects, keyed by lower-cased name
    pub fn vulnerable_dependencies(&self) -> BTreeMap<String, String> {
        VulnerabilityAggregator::vulnerable_dependencies(&self.repository.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory::InMemoryProjectRepository;
    use crate::vulnerability_tracking::domain::{DependencyMap, DependencyStatus};
    use pretty_assertions::assert_eq;

    fn seeded() -> QueryProjectsUseCase<InMemoryProjectRepository> {
        let repository = Arc::new(InMemoryProjectRepository::new());
        let web: DependencyMap = vec![
            ("Django", DependencyStatus::clean()),
            ("Requests", DependencyStatus::new(2)),
        ]
        .into_iter()
        .collect();
        let cli: DependencyMap = vec![("requests", DependencyStatus::new(1))]
            .into_iter()
            .collect();
        repository.save(Project::new("web".to_string(), "Web app".to_string(), web));
        repository.save(Project::new("cli".to_string(), "Tooling".to_string(), cli));
        QueryProjectsUseCase::new(repository)
    }

    #[test]
    fn test_overview_on_empty_store() {
        let use_case = QueryProjectsUseCase::new(Arc::new(InMemoryProjectRepository::new()));
        assert!(use_case.overview().is_none());
        assert!(use_case.vulnerable_dependencies().is_empty());
    }

    #[test]
    fn test_overview() {
        let overview = seeded().overview().unwrap();
        assert_eq!(overview.vulnerable_projects, 2);
        assert_eq!(overview.projects["web"].description, "Web app");
    }

    #[test]
    fn test_project_lookup() {
        let use_case = seeded();
        assert_eq!(use_case.project("cli").unwrap().description(), "Tooling");
        assert!(use_case.project("missing").is_none());
    }

    #[test]
    fn test_project_lookup_trims_name() {
        let use_case = seeded();
        assert_eq!(use_case.project(" cli ").unwrap().name(), "cli");
    }

    #[test]
    fn test_vulnerable_dependencies_lowercases_and_merges() {
        let merged = seeded().vulnerable_dependencies();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged["requests"], "cli: 1, web: 2");
    }
}
