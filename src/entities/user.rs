use crate::entities::{Item, Lazy, WorkbookItem, enum_attr};
use crate::error::{Result, TscError, ValidationError};
use crate::macros::string_enum;
use crate::utils::{attr, child, datetime_attr};
use crate::validators::not_empty;
use chrono::{DateTime, Utc};
use roxmltree::Node;

const UNPOPULATED_WORKBOOKS: &str = "User item must be populated with workbooks first.";

string_enum! {
    SiteRole("site_role") {
        Interactor => "Interactor",
        Publisher => "Publisher",
        ServerAdministrator => "ServerAdministrator",
        SiteAdministrator => "SiteAdministrator",
        Unlicensed => "Unlicensed",
        UnlicensedWithPublish => "UnlicensedWithPublish",
        Viewer => "Viewer",
        ViewerWithPublish => "ViewerWithPublish",
        Guest => "Guest",
    }
}

string_enum! {
    AuthSetting("auth_setting") {
        ServerDefault => "ServerDefault",
        Saml => "SAML",
    }
}

/// A user of the signed-in site
#[derive(Debug, Clone)]
pub struct UserItem {
    id: Option<String>,
    name: String,
    site_role: Option<SiteRole>,
    pub auth_setting: Option<AuthSetting>,
    pub fullname: Option<String>,
    pub email: Option<String>,
    /// Only ever sent, never read back from the server
    pub password: Option<String>,
    domain_name: Option<String>,
    external_auth_user_id: Option<String>,
    last_login: Option<DateTime<Utc>>,
    workbooks: Lazy<Vec<WorkbookItem>>,
}

impl UserItem {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` is empty
    pub fn new(name: impl Into<String>, site_role: SiteRole) -> std::result::Result<Self, ValidationError> {
        let mut user = Self::named(name.into())?;
        user.site_role = Some(site_role);
        Ok(user)
    }

    fn named(name: String) -> std::result::Result<Self, ValidationError> {
        not_empty("name", &name)?;
        Ok(Self {
            id: None,
            name,
            site_role: None,
            auth_setting: None,
            fullname: None,
            email: None,
            password: None,
            domain_name: None,
            external_auth_user_id: None,
            last_login: None,
            workbooks: Lazy::default(),
        })
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` is empty
    pub fn set_name(&mut self, name: impl Into<String>) -> std::result::Result<(), ValidationError> {
        let name = name.into();
        not_empty("name", &name)?;
        self.name = name;
        Ok(())
    }

    #[must_use]
    pub fn site_role(&self) -> Option<SiteRole> {
        self.site_role
    }

    pub fn set_site_role(&mut self, site_role: SiteRole) {
        self.site_role = Some(site_role);
    }

    #[must_use]
    pub fn domain_name(&self) -> Option<&str> {
        self.domain_name.as_deref()
    }

    #[must_use]
    pub fn external_auth_user_id(&self) -> Option<&str> {
        self.external_auth_user_id.as_deref()
    }

    #[must_use]
    pub fn last_login(&self) -> Option<&DateTime<Utc>> {
        self.last_login.as_ref()
    }

    /// Workbooks owned by the user
    ///
    /// # Errors
    ///
    /// Fails with [`TscError::UnpopulatedProperty`] before `populate_workbooks`
    pub fn workbooks(&self) -> Result<&Vec<WorkbookItem>> {
        self.workbooks.get(UNPOPULATED_WORKBOOKS)
    }

    pub(crate) fn set_workbooks(&mut self, workbooks: Vec<WorkbookItem>) {
        self.workbooks.set(workbooks);
    }
}

impl Item for UserItem {
    const TAG: &'static str = "user";

    fn from_element(node: Node<'_, '_>, ns: &str) -> Result<Self> {
        let name = attr(node, "name")
            .ok_or_else(|| TscError::MalformedResponse("user element has no name".into()))?;
        let mut user =
            Self::named(name).map_err(|e| TscError::MalformedResponse(e.to_string()))?;
        user.apply_element(node, ns)?;
        Ok(user)
    }

    fn apply_element(&mut self, node: Node<'_, '_>, ns: &str) -> Result<()> {
        if let Some(id) = attr(node, "id") {
            self.id = Some(id);
        }
        if let Some(name) = attr(node, "name") {
            self.name = name;
        }
        if let Some(site_role) = enum_attr(node, "siteRole")? {
            self.site_role = Some(site_role);
        }
        if let Some(auth_setting) = enum_attr(node, "authSetting")? {
            self.auth_setting = Some(auth_setting);
        }
        if let Some(fullname) = attr(node, "fullName") {
            self.fullname = Some(fullname);
        }
        if let Some(email) = attr(node, "email") {
            self.email = Some(email);
        }
        if let Some(external_id) = attr(node, "externalAuthUserId") {
            self.external_auth_user_id = Some(external_id);
        }
        if let Some(last_login) = datetime_attr(node, "lastLogin")? {
            self.last_login = Some(last_login);
        }
        if let Some(domain_name) = child(node, ns, "domain").and_then(|domain| attr(domain, "name")) {
            self.domain_name = Some(domain_name);
        }
        Ok(())
    }
}
