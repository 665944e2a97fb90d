use crate::ports::outbound::ProjectRepository;
use crate::vulnerability_tracking::domain::Project;
use dashmap::DashMap;

/// InMemoryProjectRepository adapter storing projects for the process lifetime
///
/// Backed by a sharded concurrent map, so every individual read or write is
/// atomic. Nothing is persisted and no entry is ever removed.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: DashMap<String, Project>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn get(&self, name: &str) -> Option<Project> {
        self.projects.get(name).map(|entry| entry.value().clone())
    }

    fn save(&self, project: Project) {
        self.projects.insert(project.name().to_string(), project);
    }

    fn all(&self) -> Vec<Project> {
        let mut projects: Vec<Project> = self
            .projects
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        projects.sort_by(|a, b| a.name().cmp(b.name()));
        projects
    }

    fn contains(&self, name: &str) -> bool {
        self.projects.contains_key(name)
    }
}
