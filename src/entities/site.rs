use crate::entities::{Item, enum_attr};
use crate::error::{Result, TscError, ValidationError};
use crate::macros::string_enum;
use crate::utils::{attr, bool_attr, format_megabytes, int_attr};
use crate::validators::{is_int_in_range, not_empty};
use roxmltree::Node;

string_enum! {
    /// Whether site administrators may manage users
    AdminMode("admin_mode") {
        ContentAndUsers => "ContentAndUsers",
        ContentOnly => "ContentOnly",
    }
}

string_enum! {
    SiteState("state") {
        Active => "Active",
        Suspended => "Suspended",
    }
}

#[derive(Debug, Clone)]
pub struct SiteItem {
    id: Option<String>,
    name: String,
    content_url: Option<String>,
    pub admin_mode: Option<AdminMode>,
    pub state: Option<SiteState>,
    pub user_quota: Option<i64>,
    /// Storage quota in megabytes
    pub storage_quota: Option<i64>,
    pub disable_subscriptions: Option<bool>,
    pub revision_history_enabled: Option<bool>,
    revision_limit: Option<i64>,
}

impl SiteItem {
    /// `content_url` may be empty; it is for the default site.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` is empty
    pub fn new(name: impl Into<String>, content_url: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        let mut site = Self::named(name.into())?;
        site.content_url = Some(content_url.into());
        Ok(site)
    }

    fn named(name: String) -> std::result::Result<Self, ValidationError> {
        not_empty("name", &name)?;
        Ok(Self {
            id: None,
            name,
            content_url: None,
            admin_mode: None,
            state: None,
            user_quota: None,
            storage_quota: None,
            disable_subscriptions: None,
            revision_history_enabled: None,
            revision_limit: None,
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
    pub fn content_url(&self) -> Option<&str> {
        self.content_url.as_deref()
    }

    pub fn set_content_url(&mut self, content_url: impl Into<String>) {
        self.content_url = Some(content_url.into());
    }

    #[must_use]
    pub fn revision_limit(&self) -> Option<i64> {
        self.revision_limit
    }

    /// `-1` means unlimited; anything else must lie in `[2, 10000]`
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for values outside that range
    pub fn set_revision_limit(&mut self, limit: i64) -> std::result::Result<(), ValidationError> {
        if limit != -1 {
            is_int_in_range("revision_limit", limit, 2, 10000)?;
        }
        self.revision_limit = Some(limit);
        Ok(())
    }

    #[must_use]
    pub fn calculate_storage_quota(&self) -> String {
        self.storage_quota
            .and_then(|quota| u64::try_from(quota).ok())
            .map(format_megabytes)
            .unwrap_or_default()
    }
}

impl Item for SiteItem {
    const TAG: &'static str = "site";

    fn from_element(node: Node<'_, '_>, ns: &str) -> Result<Self> {
        let name = attr(node, "name")
            .ok_or_else(|| TscError::MalformedResponse("site element has no name".into()))?;
        let mut site =
            Self::named(name).map_err(|e| TscError::MalformedResponse(e.to_string()))?;
        site.apply_element(node, ns)?;
        Ok(site)
    }

    fn apply_element(&mut self, node: Node<'_, '_>, _ns: &str) -> Result<()> {
        if let Some(id) = attr(node, "id") {
            self.id = Some(id);
        }
        if let Some(name) = attr(node, "name") {
            self.name = name;
        }
        if let Some(content_url) = attr(node, "contentUrl") {
            self.content_url = Some(content_url);
        }
        if let Some(admin_mode) = enum_attr(node, "adminMode")? {
            self.admin_mode = Some(admin_mode);
        }
        if let Some(state) = enum_attr(node, "state")? {
            self.state = Some(state);
        }
        if let Some(user_quota) = int_attr(node, "userQuota")? {
            self.user_quota = Some(user_quota);
        }
        if let Some(storage_quota) = int_attr(node, "storageQuota")? {
            self.storage_quota = Some(storage_quota);
        }
        if let Some(disable) = bool_attr(node, "disableSubscriptions") {
            self.disable_subscriptions = Some(disable);
        }
        if let Some(enabled) = bool_attr(node, "revisionHistoryEnabled") {
            self.revision_history_enabled = Some(enabled);
        }
        if let Some(limit) = int_attr(node, "revisionLimit")? {
            self.revision_limit = Some(limit);
        }
        Ok(())
    }
}
