/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (vulnerability source, project store).
pub mod http_transport;
pub mod project_repository;
pub mod vulnerability_source;

pub use http_transport::HttpTransport;
pub use project_repository::ProjectRepository;
pub use vulnerability_source::{SourceResponse, VulnerabilitySource};
