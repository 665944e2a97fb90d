use super::auth::{TokenAuthenticator, AUTH_FAILURE_MESSAGE, TOKEN_HEADER};
use super::multipart::MultipartForm;
use super::rate_limiter::{RateLimit, RateLimiter};
use super::request::{HttpRequest, HttpResponse};
use crate::application::dto::{
    ApiResponse, CreateProjectRequest, PackageLookupRequest, ResponseStatus,
};
use crate::application::use_cases::{
    CreateProjectOutcome, CreateProjectUseCase, LookupOutcome, LookupPackageUseCase,
    QueryProjectsUseCase,
};
use crate::ports::outbound::{ProjectRepository, VulnerabilitySource};
use crate::shared::error::VtrackError;
use crate::shared::security::{validate_upload_size, MAX_UPLOAD_SIZE};
use crate::shared::Result;
use serde_json::{Map, Value};
use std::sync::Arc;

/// File name reported for a manifest sent as the raw request body
const DEFAULT_UPLOAD_NAME: &str = "upload";

/// Router construction parameters taken from the server configuration
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub api_token: String,
    pub rate_limit: RateLimit,
    pub allow_overwrite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    Health,
    VulnersHealth,
    CreateProject,
    Projects,
    Project(String),
    AllDependencies,
    Dependency,
}

impl Route {
    fn resolve(path: &str) -> Option<Self> {
        match path {
            "/" | "/health" => Some(Route::Health),
            "/vulners/health" => Some(Route::VulnersHealth),
            "/project" => Some(Route::CreateProject),
            "/projects" => Some(Route::Projects),
            "/all_dependencies" => Some(Route::AllDependencies),
            "/dependency" => Some(Route::Dependency),
            _ => path
                .strip_prefix("/projects/")
                .map(|raw| Route::Project(decode_path_segment(raw))),
        }
    }

    fn method(&self) -> &'static str {
        match self {
            Route::CreateProject => "POST",
            _ => "GET",
        }
    }
}

/// Router - maps HTTP requests onto the use cases
///
/// Every request passes the rate limiter first, then the token check, and
/// only then reaches a route. Each outcome is turned into an `ApiResponse`
/// envelope plus a status code.
pub struct Router<S, R> {
    create_project: CreateProjectUseCase<S, R>,
    query_projects: QueryProjectsUseCase<R>,
    lookup_package: LookupPackageUseCase<S>,
    authenticator: TokenAuthenticator,
    rate_limiter: RateLimiter,
}

impl<S, R> Router<S, R>
where
    S: VulnerabilitySource,
    R: ProjectRepository,
{
    pub fn new(source: Arc<S>, repository: Arc<R>, settings: RouterSettings) -> Self {
        Self {
            create_project: CreateProjectUseCase::new(
                source.clone(),
                repository.clone(),
                settings.allow_overwrite,
            ),
            query_projects: QueryProjectsUseCase::new(repository),
            lookup_package: LookupPackageUseCase::new(source),
            authenticator: TokenAuthenticator::new(settings.api_token),
            rate_limiter: RateLimiter::new(settings.rate_limit),
        }
    }

    pub async fn handle(&self, request: HttpRequest) -> HttpResponse {
        let response = self.dispatch(&request).await;
        tracing::info!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            "request handled"
        );
        tracing::debug!(envelope = %response.body_text(), "response envelope");
        response
    }

    async fn dispatch(&self, request: &HttpRequest) -> HttpResponse {
        let client = request.client_key();
        if !self.rate_limiter.check(&client) {
            tracing::warn!(%client, "rate limit exceeded");
            return HttpResponse::new(
                429,
                ApiResponse::message_only(
                    ResponseStatus::Error,
                    format!("Rate limit exceeded: {}", self.rate_limiter.limit()),
                ),
            );
        }

        let path = normalize_path(&request.path);
        if !TokenAuthenticator::is_exempt(path)
            && !self.authenticator.authenticate(request.header(TOKEN_HEADER))
        {
            tracing::warn!(%client, %path, "rejected request without a valid token");
            return HttpResponse::new(
                401,
                ApiResponse::message_only(ResponseStatus::Error, AUTH_FAILURE_MESSAGE),
            );
        }

        let Some(route) = Route::resolve(path) else {
            return HttpResponse::new(
                404,
                ApiResponse::message_only(
                    ResponseStatus::Error,
                    format!("Route '{}' not found", path),
                ),
            );
        };
        if request.method != route.method() {
            return HttpResponse::new(
                405,
                ApiResponse::message_only(
                    ResponseStatus::Error,
                    format!("Method {} not allowed on '{}'", request.method, path),
                ),
            );
        }

        match route {
            Route::Health => health("OK. Server is up and running."),
            Route::VulnersHealth => health("OK. Vulners endpoint is up and running."),
            Route::CreateProject => self.create_project(request).await,
            Route::Projects => self.projects().unwrap_or_else(|e| failure(&e, "projects", "")),
            Route::Project(name) => self
                .project(&name)
                .unwrap_or_else(|e| failure(&e, "project", &name)),
            Route::AllDependencies => self
                .all_dependencies()
                .unwrap_or_else(|e| failure(&e, "dependencies", "")),
            Route::Dependency => self.dependency(request).await,
        }
    }

    async fn create_project(&self, request: &HttpRequest) -> HttpResponse {
        let input = match project_request(request) {
            Ok(input) => input,
            Err(e) => return failure(&e, "project", request.query_param("name").unwrap_or("")),
        };
        let name = input.name.clone();

        let outcome = match self.create_project.execute(input).await {
            Ok(outcome) => outcome,
            Err(e) => return failure(&e, "project", &name),
        };

        let result = match outcome {
            CreateProjectOutcome::Created(project) => serde_json::to_value(&project).map(|data| {
                HttpResponse::ok(ApiResponse::success(
                    format!("Project '{}' created successfully.", project.name()),
                    data,
                ))
            }),
            CreateProjectOutcome::AlreadyExists(project) => {
                serde_json::to_value(&project).map(|data| {
                    HttpResponse::ok(ApiResponse::success(
                        format!("Project '{}' already exists.", project.name()),
                        data,
                    ))
                })
            }
            CreateProjectOutcome::UpstreamFailure { project, status } => {
                Ok(upstream_failure("project", &project, status))
            }
        };
        result.unwrap_or_else(|e| failure(&e.into(), "project", &name))
    }

    fn projects(&self) -> Result<HttpResponse> {
        let Some(overview) = self.query_projects.overview() else {
            return Ok(HttpResponse::ok(ApiResponse::message_only(
                ResponseStatus::Success,
                "No projects found.",
            )));
        };

        Ok(HttpResponse::ok(ApiResponse::success(
            "Projects fetched successfully.",
            serde_json::to_value(&overview)?,
        )))
    }

    fn project(&self, name: &str) -> Result<HttpResponse> {
        let Some(project) = self.query_projects.project(name) else {
            return Ok(HttpResponse::ok(ApiResponse::message_only(
                ResponseStatus::Success,
                format!("Project '{}' not found.", name),
            )));
        };

        Ok(HttpResponse::ok(ApiResponse::success(
            format!("Project '{}' fetched successfully.", name),
            serde_json::to_value(&project)?,
        )))
    }

    fn all_dependencies(&self) -> Result<HttpResponse> {
        let merged = self.query_projects.vulnerable_dependencies();
        if merged.is_empty() {
            return Ok(HttpResponse::ok(ApiResponse::message_only(
                ResponseStatus::Success,
                "No vulnerable dependencies found.",
            )));
        }

        Ok(HttpResponse::ok(ApiResponse::success(
            "Vulnerable dependencies fetched successfully.",
            serde_json::to_value(&merged)?,
        )))
    }

    async fn dependency(&self, request: &HttpRequest) -> HttpResponse {
        let param = |name: &str| request.query_param(name).unwrap_or("").to_string();
        let lookup = PackageLookupRequest::new(
            param("package_name"),
            param("package_version"),
            param("ecosystem"),
        );
        let subject = format!(
            "{} {} ({})",
            lookup.package_name, lookup.package_version, lookup.ecosystem
        );

        let outcome = match self.lookup_package.execute(&lookup).await {
            Ok(outcome) => outcome,
            Err(e) => return failure(&e, "package", &lookup.package_name),
        };

        match outcome {
            LookupOutcome::Found(findings) => match serde_json::to_value(&findings) {
                Ok(data) => HttpResponse::ok(ApiResponse::success(
                    format!("Vulnerabilities found for {}.", subject),
                    data,
                )),
                Err(e) => failure(&e.into(), "package", &lookup.package_name),
            },
            LookupOutcome::NoFindings => HttpResponse::ok(ApiResponse::message_only(
                ResponseStatus::Error,
                format!("No vulnerabilities found for {}.", subject),
            )),
            LookupOutcome::UpstreamFailure { status } => {
                upstream_failure("package", &lookup.package_name, status)
            }
        }
    }
}

/// Collects the creation inputs from query parameters or multipart fields
fn project_request(request: &HttpRequest) -> Result<CreateProjectRequest> {
    validate_upload_size(request.body.len(), MAX_UPLOAD_SIZE)?;

    let content_type = request.header("Content-Type").unwrap_or("");
    let form = if MultipartForm::is_multipart(content_type) {
        Some(MultipartForm::parse(content_type, &request.body)?)
    } else {
        None
    };
    let param = |name: &str| {
        request
            .query_param(name)
            .map(str::to_string)
            .or_else(|| form.as_ref().and_then(|form| form.field(name)))
    };

    let name = param("name").ok_or_else(|| VtrackError::MissingParameter {
        name: "name".to_string(),
    })?;
    let description = param("description").unwrap_or_default();

    let (file_name, manifest) = match &form {
        Some(form) => {
            let file = form.part("file").ok_or_else(|| VtrackError::MissingParameter {
                name: "file".to_string(),
            })?;
            let file_name = file.file_name.clone().unwrap_or_else(|| "file".to_string());
            (file_name, file.data.clone())
        }
        None => (
            request
                .query_param("file_name")
                .unwrap_or(DEFAULT_UPLOAD_NAME)
                .to_string(),
            request.body.clone(),
        ),
    };

    Ok(CreateProjectRequest::new(name, description, file_name, manifest))
}

fn health(message: &str) -> HttpResponse {
    HttpResponse::ok(ApiResponse::message_only(ResponseStatus::Success, message))
}

fn subject_data(kind: &str, subject: &str) -> Map<String, Value> {
    let mut data = Map::new();
    if !subject.is_empty() {
        data.insert(kind.to_string(), Value::String(subject.to_string()));
    }
    data
}

fn upstream_failure(kind: &str, subject: &str, status: u16) -> HttpResponse {
    let mut data = subject_data(kind, subject);
    data.insert("status_code".to_string(), Value::from(status));
    HttpResponse::new(
        502,
        ApiResponse::error(
            format!(
                "Failed to fetch vulnerability data for {} '{}' (status code {}).",
                kind, subject, status
            ),
            Value::Object(data),
        ),
    )
}

/// Maps an error onto a status code: input errors are the client's fault,
/// everything else is blamed on the vulnerability source
fn failure(err: &anyhow::Error, kind: &str, subject: &str) -> HttpResponse {
    match err.downcast_ref::<VtrackError>() {
        Some(e @ VtrackError::UploadTooLarge { .. }) => HttpResponse::new(
            413,
            ApiResponse::message_only(ResponseStatus::Error, e.to_string()),
        ),
        Some(e) if e.is_input_error() => HttpResponse::new(
            400,
            ApiResponse::message_only(ResponseStatus::Error, e.to_string()),
        ),
        Some(e) => {
            tracing::warn!(%kind, %subject, error = %e, "unusable vulnerability source response");
            HttpResponse::new(
                502,
                ApiResponse::error(e.to_string(), Value::Object(subject_data(kind, subject))),
            )
        }
        None => {
            tracing::error!(%kind, %subject, error = %format!("{:#}", err), "request failed");
            HttpResponse::new(
                502,
                ApiResponse::error(
                    format!("Failed to reach vulnerability source: {:#}", err),
                    Value::Object(subject_data(kind, subject)),
                ),
            )
        }
    }
}

fn normalize_path(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Decodes a project name from the path, trimmed the same way names are on creation
fn decode_path_segment(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes()))
        .trim()
        .to_string()
}
