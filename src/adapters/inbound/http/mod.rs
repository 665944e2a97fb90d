/// HTTP inbound adapter: tiny_http server, router and request guards
pub mod auth;
pub mod multipart;
pub mod rate_limiter;
pub mod request;
pub mod router;
pub mod server;

pub use auth::{TokenAuthenticator, TOKEN_HEADER};
pub use rate_limiter::{RateLimit, RateLimiter};
pub use request::{HttpRequest, HttpResponse};
pub use router::{Router, RouterSettings};
pub use server::HttpServer;
