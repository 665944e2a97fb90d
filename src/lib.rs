//! v-track - dependency vulnerability tracking service
//!
//! This library registers projects (lists of dependencies with version and
//! ecosystem), resolves each dependency against the OSV vulnerability
//! database and keeps per-project summaries in memory, following hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`vulnerability_tracking`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): HTTP server, OSV client and in-memory store
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use v_track::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn serve() -> Result<()> {
//! // Create adapters
//! let source = Arc::new(OsvClient::with_defaults(ReqwestTransport::new(None)?));
//! let repository = Arc::new(InMemoryProjectRepository::new());
//!
//! // Wire the router and serve
//! let router = Arc::new(Router::new(
//!     source,
//!     repository,
//!     RouterSettings {
//!         api_token: "change-me".to_string(),
//!         rate_limit: "60/minute".parse()?,
//!         allow_overwrite: false,
//!     },
//! ));
//! HttpServer::bind("127.0.0.1:8000", router)?.run().await
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod shared;
pub mod vulnerability_tracking;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::http::{
        HttpRequest, HttpResponse, HttpServer, RateLimit, Router, RouterSettings,
    };
    pub use crate::adapters::outbound::memory::InMemoryProjectRepository;
    pub use crate::adapters::outbound::network::{OsvClient, ReqwestTransport};
    pub use crate::application::dto::{
        ApiResponse, CreateProjectRequest, PackageLookupRequest, ResponseStatus,
    };
    pub use crate::application::use_cases::{
        CreateProjectOutcome, CreateProjectUseCase, LookupOutcome, LookupPackageUseCase,
        QueryProjectsUseCase,
    };
    pub use crate::ports::outbound::{
        HttpTransport, ProjectRepository, SourceResponse, VulnerabilitySource,
    };
    pub use crate::shared::error::VtrackError;
    pub use crate::shared::Result;
    pub use crate::vulnerability_tracking::domain::{
        BatchQuery, DependencyMap, DependencyRecord, DependencyStatus, FindingMap, PackageQuery,
        Project, VulnerabilityFinding,
    };
    pub use crate::vulnerability_tracking::services::{
        BatchQueryBuilder, ManifestParser, ResponseReconciler, VulnerabilityAggregator,
    };
}
