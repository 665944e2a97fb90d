use crate::vulnerability_tracking::domain::Project;

/// ProjectRepository port for the project store
///
/// Every single operation is atomic; sequences of operations are not.
/// Two concurrent saves of the same name resolve as last writer wins.
pub trait ProjectRepository: Send + Sync {
    /// Returns a snapshot of the named project, if stored
    fn get(&self, name: &str) -> Option<Project>;

    /// Installs or overwrites the project under its name
    fn save(&self, project: Project);

    /// Returns a snapshot of every stored project, sorted by name
    fn all(&self) -> Vec<Project>;

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
