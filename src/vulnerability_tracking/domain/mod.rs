pub mod batch_query;
pub mod dependency_map;
pub mod dependency_record;
pub mod dependency_status;
pub mod finding;
pub mod project;

pub use batch_query::{BatchQuery, PackageQuery, PackageRef};
pub use dependency_map::DependencyMap;
pub use dependency_record::DependencyRecord;
pub use dependency_status::DependencyStatus;
pub use finding::{FindingMap, VulnerabilityFinding};
pub use project::Project;
