/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod memory;
pub mod network;
