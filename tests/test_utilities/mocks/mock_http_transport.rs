use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use v_track::prelude::*;

/// Mock HttpTransport standing in for the OSV API
///
/// Answers batch and single queries from a table of known vulnerable
/// packages, and counts every call so caching can be asserted.
pub struct MockHttpTransport {
    pub vulnerable: HashMap<String, Vec<String>>,
    pub status: u16,
    call_count: AtomicUsize,
    requests: Mutex<Vec<(String, Value)>>,
}

impl MockHttpTransport {
    pub fn new() -> Self {
        Self {
            vulnerable: HashMap::new(),
            status: 200,
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Marks `package` as affected by the given vulnerability ids
    pub fn with_vulnerable(mut self, package: &str, ids: &[&str]) -> Self {
        self.vulnerable.insert(
            package.to_string(),
            ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    /// Makes every call answer with `status` and an error body
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Every (url, parsed body) received, in call order
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    fn result_for(&self, query: &Value) -> Value {
        let name = query["package"]["name"].as_str().unwrap_or_default();
        match self.vulnerable.get(name) {
            Some(ids) => json!({
                "vulns": ids
                    .iter()
                    .map(|id| json!({"id": id, "summary": format!("{} issue", name)}))
                    .collect::<Vec<_>>()
            }),
            None => json!({}),
        }
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<SourceResponse> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let payload: Value = serde_json::from_str(&body)?;
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), payload.clone()));

        if self.status != 200 {
            return Ok(SourceResponse::new(
                self.status,
                json!({"error": "mock failure"}),
            ));
        }

        let body = if url.ends_with("/querybatch") {
            let results: Vec<Value> = payload["queries"]
                .as_array()
                .map(|queries| queries.iter().map(|q| self.result_for(q)).collect())
                .unwrap_or_default();
            json!({ "results": results })
        } else {
            self.result_for(&payload)
        };

        Ok(SourceResponse::new(200, body))
    }
}
