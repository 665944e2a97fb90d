use crate::shared::security::constant_time_eq;

/// Header carrying the shared API token
pub const TOKEN_HEADER: &str = "X-API-Token";

/// Message returned with every rejected token
pub const AUTH_FAILURE_MESSAGE: &str = "Missing or invalid token!!!";

/// Paths served without a token
const EXEMPT_PATHS: [&str; 3] = ["/", "/health", "/vulners/health"];

/// TokenAuthenticator checks the static shared secret on every request
#[derive(Debug, Clone)]
pub struct TokenAuthenticator {
    token: String,
}

impl TokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// True when the presented header value matches the configured token
    pub fn authenticate(&self, presented: Option<&str>) -> bool {
        match presented {
            Some(value) => constant_time_eq(value, &self.token),
            None => false,
        }
    }

    pub fn is_exempt(path: &str) -> bool {
        EXEMPT_PATHS.contains(&path)
    }
}
