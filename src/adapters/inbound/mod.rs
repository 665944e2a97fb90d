/// Inbound adapters - drive the application from the outside world
pub mod http;
