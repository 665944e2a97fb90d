use crate::application::dto::ApiResponse;
use std::net::IpAddr;

/// HttpRequest - transport-neutral view of one incoming request
///
/// The path is kept raw (percent-encoded); query parameters are decoded,
/// with `+` read as a space.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub remote_addr: Option<IpAddr>,
}

impl HttpRequest {
    /// Splits a request target such as `/dependency?package_name=pandas`
    pub fn new(method: &str, url: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (url, Vec::new()),
        };

        Self {
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
            query,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_remote_addr(mut self, addr: IpAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    /// First header with this name, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Rate limiting key for the calling client
    pub fn client_key(&self) -> String {
        self.remote_addr
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// HttpResponse - status code plus the JSON envelope to send back
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub envelope: ApiResponse,
}

impl HttpResponse {
    pub fn new(status: u16, envelope: ApiResponse) -> Self {
        Self { status, envelope }
    }

    pub fn ok(envelope: ApiResponse) -> Self {
        Self::new(200, envelope)
    }

    pub fn body_text(&self) -> String {
        serde_json::to_string(&self.envelope).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::ResponseStatus;

    #[test]
    fn test_new_splits_and_decodes_query() {
        let request = HttpRequest::new(
            "get",
            "/dependency?package_name=my+pkg&package_version=1.0%2B1&ecosystem=PyPI",
        );
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/dependency");
        assert_eq!(request.query_param("package_name"), Some("my pkg"));
        assert_eq!(request.query_param("package_version"), Some("1.0+1"));
        assert_eq!(request.query_param("ecosystem"), Some("PyPI"));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn test_path_stays_encoded() {
        let request = HttpRequest::new("GET", "/projects/my%20project");
        assert_eq!(request.path, "/projects/my%20project");
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_flag_parameter_without_value() {
        let request = HttpRequest::new("POST", "/project?name=p1&debug");
        assert_eq!(request.query_param("debug"), Some(""));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = HttpRequest::new("GET", "/projects").with_header("x-api-token", "secret");
        assert_eq!(request.header("X-API-Token"), Some("secret"));
        assert_eq!(request.client_key(), "unknown");
    }

    #[test]
    fn test_response_body_text() {
        let response = HttpResponse::ok(ApiResponse::message_only(ResponseStatus::Success, "OK"));
        assert_eq!(
            response.body_text(),
            r#"{"status":"Success","message":"OK","data":{}}"#
        );
    }
}
