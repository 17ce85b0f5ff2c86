use crate::NAMESPACE;
use crate::endpoints::{
    Datasources, Groups, Projects, Schedules, Sites, Tasks, Users, Views, Workbooks,
};
use crate::error::{Result, TscError, ValidationError};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
use log::debug;
use std::cell::RefCell;

/// REST API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "2.5";
/// Request timeout used when none is configured, in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

const AUTH_HEADER: &str = "X-Tableau-Auth";

/// Credentials and site of a signed-in session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub auth_token: String,
    pub site_id: String,
    pub user_id: String,
}

/// Tableau Server REST API client
pub struct Server {
    address: String,
    version: String,
    transport: Box<dyn Transport>,
    session: RefCell<Option<SessionContext>>,
}

impl Server {
    /// Creates a new `Server` client for the given address, API version and transport
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Address or version is empty
    /// - Address doesn't start with "http://" or "https://"
    pub fn new(
        address: impl Into<String>,
        version: impl Into<String>,
        transport: Box<dyn Transport>,
    ) -> std::result::Result<Self, ValidationError> {
        let address = address.into();
        let version = version.into();

        if address.is_empty() {
            return Err(ValidationError::new("address", "Server address cannot be empty"));
        }
        if !address.starts_with("http://") && !address.starts_with("https://") {
            return Err(ValidationError::new(
                "address",
                format!("Server address must start with http:// or https://, got: {address}"),
            ));
        }
        if version.is_empty() {
            return Err(ValidationError::new("version", "API version cannot be empty"));
        }

        let address = address.trim_end_matches('/').to_string();

        Ok(Self {
            address,
            version,
            transport,
            session: RefCell::new(None),
        })
    }

    /// Creates a new `Server` client with a builder pattern
    #[must_use]
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// `{address}/api/{version}`
    #[must_use]
    pub fn baseurl(&self) -> String {
        format!("{}/api/{}", self.address, self.version)
    }

    /// `{baseurl}/sites/{site_id}` of the signed-in site
    ///
    /// # Errors
    ///
    /// Returns [`TscError::NotSignedIn`] without a session
    pub fn site_url(&self) -> Result<String> {
        let session = self.require_session()?;
        Ok(format!("{}/sites/{}", self.baseurl(), session.site_id))
    }

    #[must_use]
    pub fn session(&self) -> Option<SessionContext> {
        self.session.borrow().clone()
    }

    /// Resumes a session obtained earlier, e.g. from a session file
    #[must_use]
    pub fn with_session(self, session: SessionContext) -> Self {
        self.session.replace(Some(session));
        self
    }

    pub fn set_session(&mut self, session: Option<SessionContext>) {
        self.session.replace(session);
    }

    /// Drops the session after the server invalidated it, e.g. by deleting
    /// the signed-in site
    pub(crate) fn clear_session(&self) {
        self.session.replace(None);
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// # Errors
    ///
    /// Returns [`TscError::NotSignedIn`] without a session
    pub fn require_session(&self) -> Result<SessionContext> {
        self.session.borrow().clone().ok_or(TscError::NotSignedIn)
    }

    #[must_use]
    pub fn datasources(&self) -> Datasources<'_> {
        Datasources::new(self)
    }

    #[must_use]
    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    #[must_use]
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    #[must_use]
    pub fn groups(&self) -> Groups<'_> {
        Groups::new(self)
    }

    #[must_use]
    pub fn workbooks(&self) -> Workbooks<'_> {
        Workbooks::new(self)
    }

    #[must_use]
    pub fn sites(&self) -> Sites<'_> {
        Sites::new(self)
    }

    #[must_use]
    pub fn views(&self) -> Views<'_> {
        Views::new(self)
    }

    #[must_use]
    pub fn schedules(&self) -> Schedules<'_> {
        Schedules::new(self)
    }

    #[must_use]
    pub fn tasks(&self) -> Tasks<'_> {
        Tasks::new(self)
    }

    pub(crate) fn get(&self, url: &str, query: Vec<(String, String)>) -> Result<String> {
        self.send(HttpMethod::Get, url, query, None)
            .map(|response| response.text())
    }

    pub(crate) fn get_bytes(&self, url: &str, query: Vec<(String, String)>) -> Result<Vec<u8>> {
        self.send(HttpMethod::Get, url, query, None)
            .map(|response| response.body)
    }

    pub(crate) fn post(&self, url: &str, body: String) -> Result<String> {
        self.send(HttpMethod::Post, url, Vec::new(), Some(body))
            .map(|response| response.text())
    }

    pub(crate) fn put(&self, url: &str, body: String) -> Result<String> {
        self.send(HttpMethod::Put, url, Vec::new(), Some(body))
            .map(|response| response.text())
    }

    pub(crate) fn delete(&self, url: &str) -> Result<()> {
        self.send(HttpMethod::Delete, url, Vec::new(), None)
            .map(|_| ())
    }

    /// Sends one request, attaching the session token when there is one
    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        query: Vec<(String, String)>,
        body: Option<String>,
    ) -> Result<HttpResponse> {
        let mut request = HttpRequest::new(method, url);
        request.query = query;
        request.body = body;
        if let Some(session) = self.session.borrow().as_ref() {
            request
                .headers
                .push((AUTH_HEADER.to_string(), session.auth_token.clone()));
        }

        debug!("{} {url}", method.as_str());
        let response = self.transport.send(&request)?;
        debug!("{} {url} returned {}", method.as_str(), response.status);

        if response.is_success() {
            Ok(response)
        } else {
            Err(TscError::from_response(response.status, &response.body, NAMESPACE))
        }
    }
}

/// Builder for [`Server`] client
#[derive(Default)]
pub struct ServerBuilder {
    address: Option<String>,
    version: Option<String>,
    timeout: Option<u64>,
    transport: Option<Box<dyn Transport>>,
}

impl ServerBuilder {
    /// Sets the server address, e.g. `https://tableau.example.com`
    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the REST API version
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the request timeout in milliseconds
    #[must_use]
    pub fn timeout(mut self, timeout_millis: u64) -> Self {
        self.timeout = Some(timeout_millis);
        self
    }

    /// Replaces the default `reqwest` transport
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Builds the [`Server`] client
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The address is not provided
    /// - The address doesn't start with "http://" or "https://"
    /// - The version is empty
    pub fn build(self) -> std::result::Result<Server, ValidationError> {
        let address = self
            .address
            .ok_or_else(|| ValidationError::new("address", "Server address is required"))?;
        let version = self
            .version
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT_MS);
        let transport = self
            .transport
            .unwrap_or_else(|| Box::new(ReqwestTransport::new(timeout)));

        Server::new(address, version, transport)
    }
}
