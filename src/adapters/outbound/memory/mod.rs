/// In-memory adapters for process-lifetime state
mod in_memory_project_repository;

pub use in_memory_project_repository::InMemoryProjectRepository;
