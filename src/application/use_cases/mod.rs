/// Use cases module containing application business logic orchestration
mod create_project;
mod lookup_package;
mod query_projects;

pub use create_project::{CreateProjectOutcome, CreateProjectUseCase};
pub use lookup_package::{LookupOutcome, LookupPackageUseCase};
pub use query_projects::QueryProjectsUseCase;
