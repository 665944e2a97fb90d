pub mod batch_query_builder;
pub mod manifest_parser;
pub mod response_reconciler;
pub mod vulnerability_aggregator;

pub use batch_query_builder::BatchQueryBuilder;
pub use manifest_parser::ManifestParser;
pub use response_reconciler::ResponseReconciler;
pub use vulnerability_aggregator::{ProjectSummary, ProjectsOverview, VulnerabilityAggregator};
