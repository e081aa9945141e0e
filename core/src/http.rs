//! HTTP transport types and the blocking executor.
//!
//! # Design
//! `VpicClient` builds `HttpRequest` values and parses `HttpResponse` values
//! as plain data. Executing the round-trip is the job of a `Transport`, so
//! the request/response mapping stays deterministic and the network can be
//! swapped out in tests. `UreqTransport` is the production implementation.

use std::time::Duration;

use crate::error::TransportError;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// The URL with the query string appended, as it goes on the wire.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.url)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes an `HttpRequest` and returns whatever the server answered.
///
/// Non-2xx statuses are returned as `Ok`; only failures that prevent a
/// response from arriving at all (timeouts, refused connections, DNS) are
/// `Err`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent with a global timeout.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.get(&request.url);
        for (key, value) in &request.query {
            builder = builder.query(key, value);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        let mut response = builder.call()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response.body_mut().read_to_string()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url_appends_query() {
        let req = HttpRequest {
            url: "http://localhost:3000/x".to_string(),
            query: vec![("format".to_string(), "json".to_string())],
            headers: Vec::new(),
        };
        assert_eq!(req.full_url(), "http://localhost:3000/x?format=json");
    }

    #[test]
    fn full_url_without_query() {
        let req = HttpRequest {
            url: "http://localhost:3000/x".to_string(),
            query: Vec::new(),
            headers: Vec::new(),
        };
        assert_eq!(req.full_url(), "http://localhost:3000/x");
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) on loopback is closed on test hosts.
        let transport = UreqTransport::new(Duration::from_secs(2));
        let req = HttpRequest {
            url: "http://127.0.0.1:9/api".to_string(),
            query: Vec::new(),
            headers: Vec::new(),
        };
        assert!(transport.execute(&req).is_err());
    }
}
