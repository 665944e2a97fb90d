/// Domain layer - value objects and pure services for vulnerability tracking
pub mod domain;
pub mod services;
