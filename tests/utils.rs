#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::rc::Rc;
use tableau_server_client::error::{Result, TscError};
use tableau_server_client::transport::{HttpRequest, HttpResponse, Transport};
use tableau_server_client::{NAMESPACE, Server, SessionContext};
use wiremock::{Match, Request};

pub const ADDRESS: &str = "http://tableau.test";
pub const SITE_URL: &str = "http://tableau.test/api/2.5/sites/site-id";
pub const TOKEN: &str = "9f9e9d9c8b7a";

/// # Panics
///
/// Will panic if a file can't be read or missing
#[must_use = "This function returns the body of the file as a string"]
pub fn body_from_file(path: &str) -> String {
    fs::read_to_string(path).expect("Failed to read file")
}

/// Records every request and answers with queued responses in order
#[derive(Clone, Default)]
pub struct RecordingTransport {
    requests: Rc<RefCell<Vec<HttpRequest>>>,
    responses: Rc<RefCell<VecDeque<HttpResponse>>>,
}

impl RecordingTransport {
    pub fn respond(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.responses.borrow_mut().push_back(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.into(),
        });
        self
    }

    pub fn respond_with_file(&self, path: &str) -> &Self {
        self.respond(200, body_from_file(path))
    }

    pub fn respond_empty(&self) -> &Self {
        self.respond(204, Vec::new())
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("No request was sent")
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| TscError::Transport(format!("no response queued for {}", request.url)))
    }
}

pub fn session() -> SessionContext {
    SessionContext {
        auth_token: TOKEN.to_string(),
        site_id: "site-id".to_string(),
        user_id: "user-id".to_string(),
    }
}

/// A client that is already signed in to `site-id`, talking to `transport`
pub fn signed_in_server(transport: &RecordingTransport) -> Server {
    Server::builder()
        .address(ADDRESS)
        .transport(transport.clone())
        .build()
        .unwrap()
        .with_session(session())
}

/// Value of `attr` on the first `element` of an XML request body
pub fn xml_attr_of(body: &str, element: &str, attr: &str) -> Option<String> {
    let doc = roxmltree::Document::parse(body).ok()?;
    doc.descendants()
        .find(|n| n.has_tag_name(element))
        .and_then(|n| n.attribute(attr))
        .map(str::to_string)
}

pub fn query_value<'a>(request: &'a HttpRequest, key: &str) -> Option<&'a str> {
    request
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn ns_body(inner: &str) -> String {
    format!(r#"<tsResponse xmlns="{NAMESPACE}">{inner}</tsResponse>"#)
}

pub struct XmlAttrExactMatcher {
    element: String,
    attr: String,
    value: String,
}

impl XmlAttrExactMatcher {
    /// Specify the expected value of an attribute in the request body.
    pub fn new<E, A, V>(element: E, attr: A, value: V) -> Self
    where
        E: Into<String>,
        A: Into<String>,
        V: Into<String>,
    {
        Self {
            element: element.into(),
            attr: attr.into(),
            value: value.into(),
        }
    }
}

/// Shorthand for [`XmlAttrExactMatcher::new`].
pub fn xml_attr<E, A, V>(element: E, attr: A, value: V) -> XmlAttrExactMatcher
where
    E: Into<String>,
    A: Into<String>,
    V: Into<String>,
{
    XmlAttrExactMatcher::new(element, attr, value)
}

impl Match for XmlAttrExactMatcher {
    fn matches(&self, request: &Request) -> bool {
        let body = String::from_utf8_lossy(&request.body);
        xml_attr_of(&body, &self.element, &self.attr).as_deref() == Some(self.value.as_str())
    }
}
