//! HTTP requests and responses as plain data, and the seam that executes them.
//!
//! Endpoints only ever build an [`HttpRequest`] and read an [`HttpResponse`];
//! the [`Transport`] in between is swappable, so tests can record requests
//! and answer them from fixtures without a network.

use crate::error::{Result, TscError};
use log::debug;
use reqwest::blocking::Client;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Value of the first header named `name`, compared case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as text, with invalid UTF-8 replaced
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Executes one request and hands back the raw response.
///
/// Non-2xx statuses are not errors at this level; only a failure to get
/// any response at all is.
pub trait Transport {
    /// # Errors
    ///
    /// Returns [`TscError::Transport`] if the request could not be sent or
    /// its body could not be read
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking [`Transport`] backed by `reqwest`
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new(timeout_ms: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(
            "Making {} request to: {} with {} query parameters",
            request.method.as_str(),
            request.url,
            request.query.len()
        );

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.header("Content-Type", "text/xml").body(body.clone());
        }

        let response = builder
            .send()
            .map_err(|e| TscError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        debug!("Request status: {status}");
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .map_err(|e| TscError::Transport(e.to_string()))?
            .to_vec();
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
