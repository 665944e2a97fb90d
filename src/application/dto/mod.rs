/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod api_response;
mod create_project_request;
mod package_lookup_request;

pub use api_response::{ApiResponse, ResponseStatus};
pub use create_project_request::CreateProjectRequest;
pub use package_lookup_request::PackageLookupRequest;
