/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven ports exist: the HTTP adapter calls the use cases directly,
/// and the use cases reach infrastructure through the outbound traits.
pub mod outbound;
