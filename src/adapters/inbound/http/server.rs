use super::request::{HttpRequest, HttpResponse};
use super::router::Router;
use crate::application::dto::{ApiResponse, ResponseStatus};
use crate::ports::outbound::{ProjectRepository, VulnerabilitySource};
use crate::shared::security::MAX_UPLOAD_SIZE;
use crate::shared::Result;
use anyhow::{anyhow, Context};
use std::future::Future;
use std::io::Read;
use std::sync::Arc;
use tokio::runtime::Handle;

/// HttpServer - accepts connections with tiny_http and hands them to the router
///
/// `tiny_http` blocks on accept, so the accept loop runs on the blocking pool.
/// Each accepted request gets its own blocking task that reads the body and
/// drives the router future on the runtime, so slow uploads do not stall
/// other clients.
pub struct HttpServer<S, R> {
    server: Arc<tiny_http::Server>,
    router: Arc<Router<S, R>>,
}

impl<S, R> HttpServer<S, R>
where
    S: VulnerabilitySource + 'static,
    R: ProjectRepository + 'static,
{
    /// Binds the listening socket
    ///
    /// # Errors
    /// Returns an error if the address cannot be bound
    pub fn bind(address: &str, router: Arc<Router<S, R>>) -> Result<Self> {
        let server = tiny_http::Server::http(address)
            .map_err(|e| anyhow!("Failed to bind {}: {}", address, e))?;
        Ok(Self {
            server: Arc::new(server),
            router,
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Option<std::net::SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serves requests until Ctrl+C is received or the listening socket fails
    pub async fn run(self) -> Result<()> {
        self.run_until(ctrl_c()).await
    }

    /// Serves requests until `shutdown` completes or the listening socket fails
    ///
    /// Requests already accepted keep running on the blocking pool; only the
    /// accept loop is stopped.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let handle = Handle::current();
        if let Some(addr) = self.local_addr() {
            tracing::info!(%addr, "V-Track listening");
        }

        let Self { server, router } = self;
        let mut accept = tokio::task::spawn_blocking({
            let server = Arc::clone(&server);
            move || accept_loop(&server, router, handle)
        });

        tokio::select! {
            joined = &mut accept => return joined.context("HTTP accept loop panicked"),
            () = shutdown => {
                tracing::info!("shutting down HTTP server");
                server.unblock();
            }
        }

        accept.await.context("HTTP accept loop panicked")
    }
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received Ctrl+C"),
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}

fn accept_loop<S, R>(server: &tiny_http::Server, router: Arc<Router<S, R>>, handle: Handle)
where
    S: VulnerabilitySource + 'static,
    R: ProjectRepository + 'static,
{
    // Ends once `unblock` is called or the listener fails
    for request in server.incoming_requests() {
        let router = Arc::clone(&router);
        let runtime = handle.clone();
        handle.spawn_blocking(move || serve_one(request, &router, &runtime));
    }
}

fn serve_one<S, R>(mut raw: tiny_http::Request, router: &Router<S, R>, runtime: &Handle)
where
    S: VulnerabilitySource,
    R: ProjectRepository,
{
    let response = match convert(&mut raw) {
        Ok(request) => runtime.block_on(router.handle(request)),
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "could not read request");
            HttpResponse::new(
                400,
                ApiResponse::message_only(ResponseStatus::Error, format!("{:#}", e)),
            )
        }
    };

    if let Err(e) = raw.respond(to_tiny_response(&response)) {
        tracing::warn!(error = %e, "failed to write response");
    }
}

fn convert(raw: &mut tiny_http::Request) -> Result<HttpRequest> {
    let mut request = HttpRequest::new(&raw.method().to_string(), raw.url());
    for header in raw.headers() {
        request = request.with_header(header.field.as_str().as_str(), header.value.as_str());
    }
    if let Some(addr) = raw.remote_addr() {
        request = request.with_remote_addr(addr.ip());
    }

    // One byte past the limit is enough for the router to reject with 413
    let mut body = Vec::new();
    raw.as_reader()
        .take(MAX_UPLOAD_SIZE as u64 + 1)
        .read_to_end(&mut body)
        .context("Failed to read request body")?;

    Ok(request.with_body(body))
}

fn to_tiny_response(response: &HttpResponse) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut tiny = tiny_http::Response::from_string(response.body_text())
        .with_status_code(response.status);
    if let Ok(header) = tiny_http::Header::from_bytes("Content-Type", "application/json") {
        tiny.add_header(header);
    }
    tiny
}
