/// Shared utilities - error taxonomy, result alias and security helpers
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
