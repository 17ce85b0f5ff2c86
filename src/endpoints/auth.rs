use crate::NAMESPACE;
use crate::client::{Server, SessionContext};
use crate::error::{Result, TscError};
use crate::request_factory;
use crate::utils::{find, parse_document, required_attr};
use log::debug;

/// Username and password sign-in to one site
///
/// An empty `site_content_url` selects the default site.
#[derive(Clone)]
pub struct TableauAuth {
    pub username: String,
    pub password: String,
    pub site_content_url: String,
}

impl TableauAuth {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        site_content_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            site_content_url: site_content_url.into(),
        }
    }
}

impl std::fmt::Debug for TableauAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableauAuth")
            .field("username", &self.username)
            .field("password", &"********")
            .field("site_content_url", &self.site_content_url)
            .finish()
    }
}

impl Server {
    /// Signs in and installs the returned session on this client
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Network request fails
    /// - The server rejects the credentials
    /// - The response has no token, site id or user id
    pub fn sign_in(&mut self, auth: &TableauAuth) -> Result<SessionContext> {
        let url = format!("{}/auth/signin", self.baseurl());
        debug!(
            "Signing in as {} to site {:?}",
            auth.username, auth.site_content_url
        );
        let body = self.post(&url, request_factory::signin_req(auth))?;
        let session = parse_credentials(&body)?;
        debug!("Signed in to site {} as user {}", session.site_id, session.user_id);
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Signs out; the local session is only dropped once the server agreed
    ///
    /// # Errors
    ///
    /// Returns [`TscError::NotSignedIn`] without a session, or the error of
    /// the sign-out call
    pub fn sign_out(&mut self) -> Result<()> {
        self.require_session()?;
        let url = format!("{}/auth/signout", self.baseurl());
        self.post(&url, request_factory::empty_req())?;
        self.set_session(None);
        debug!("Signed out");
        Ok(())
    }
}

fn parse_credentials(body: &str) -> Result<SessionContext> {
    let doc = parse_document(body)?;
    let credentials = find(doc.root(), NAMESPACE, "credentials").ok_or_else(|| {
        TscError::MalformedResponse("sign-in response has no <credentials> element".into())
    })?;
    let nested_id = |name: &str| -> Result<String> {
        let node = find(credentials, NAMESPACE, name).ok_or_else(|| {
            TscError::MalformedResponse(format!("sign-in response has no <{name}> element"))
        })?;
        required_attr(node, "id")
    };

    Ok(SessionContext {
        auth_token: required_attr(credentials, "token")?,
        site_id: nested_id("site")?,
        user_id: nested_id("user")?,
    })
}
