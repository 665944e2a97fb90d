use crate::application::dto::CreateProjectRequest;
use crate::ports::outbound::{ProjectRepository, VulnerabilitySource};
use crate::shared::error::VtrackError;
use crate::shared::security::{validate_upload_size, MAX_UPLOAD_SIZE};
use crate::shared::Result;
use crate::vulnerability_tracking::domain::Project;
use crate::vulnerability_tracking::services::{
    BatchQueryBuilder, ManifestParser, ResponseReconciler,
};
use std::sync::Arc;

/// Result of a project creation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateProjectOutcome {
    /// The manifest was resolved and the project stored
    Created(Project),
    /// A project of that name was already stored and overwriting is disabled
    AlreadyExists(Project),
    /// The vulnerability source answered with a non-success status
    UpstreamFailure { project: String, status: u16 },
}

/// CreateProjectUseCase - Write path of the vulnerability tracking pipeline
///
/// Parses the manifest, queries the vulnerability source once for the whole
/// batch, reconciles the answer by position and stores the project.
///
/// # Type Parameters
/// * `S` - VulnerabilitySource implementation
/// * `R` - ProjectRepository implementation
pub struct CreateProjectUseCase<S, R> {
    source: Arc<S>,
    repository: Arc<R>,
    allow_overwrite: bool,
}

impl<S, R> CreateProjectUseCase<S, R>
where
    S: VulnerabilitySource,
    R: ProjectRepository,
{
    /// Creates a new CreateProjectUseCase with injected dependencies
    ///
    /// # Arguments
    /// * `allow_overwrite` - Whether re-creating a stored name replaces it
    pub fn new(source: Arc<S>, repository: Arc<R>, allow_overwrite: bool) -> Self {
        Self {
            source,
            repository,
            allow_overwrite,
        }
    }

    /// Executes the project creation workflow
    ///
    /// An existing project is returned untouched before the manifest is even
    /// parsed when overwriting is disabled. On an upstream failure status the
    /// store is left as it was.
    ///
    /// # Errors
    /// Returns an input error (`VtrackError`) for a blank name, an oversized
    /// upload or an invalid manifest, and propagates source errors
    pub async fn execute(&self, request: CreateProjectRequest) -> Result<CreateProjectOutcome> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(VtrackError::MissingParameter {
                name: "name".to_string(),
            }
            .into());
        }

        if !self.allow_overwrite {
            if let Some(existing) = self.repository.get(&name) {
                tracing::info!(project = %name, "project already exists, skipping resolution");
                return Ok(CreateProjectOutcome::AlreadyExists(existing));
            }
        }

        validate_upload_size(request.manifest.len(), MAX_UPLOAD_SIZE)?;
        let records = ManifestParser::parse(&request.file_name, &request.manifest)?;
        let (query, dependency_names) = BatchQueryBuilder::build(&records);
        tracing::info!(
            project = %name,
            dependencies = query.len(),
            "resolving project dependencies"
        );

        let response = self.source.query_batch(&query).await?;
        if !response.is_success() {
            tracing::warn!(
                project = %name,
                status = response.status,
                "vulnerability source failed, project not stored"
            );
            return Ok(CreateProjectOutcome::UpstreamFailure {
                project: name,
                status: response.status,
            });
        }

        let dependencies = ResponseReconciler::reconcile(&response.body, &dependency_names)?;
        let project = Project::new(name, request.description, dependencies);
        self.repository.save(project.clone());
        tracing::info!(
            project = %project.name(),
            vulnerable = project.is_vulnerable(),
            "project stored"
        );

        Ok(CreateProjectOutcome::Created(project))
    }
}
