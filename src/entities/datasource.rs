use crate::entities::{ConnectionItem, Item, Lazy, TagItem, Tags, nested_id_and_name};
use crate::error::{Result, TscError, ValidationError};
use crate::utils::{attr, bool_attr, child, datetime_attr, format_megabytes, int_attr};
use crate::validators::not_empty;
use chrono::{DateTime, Utc};
use roxmltree::Node;
use std::collections::HashSet;

const UNPOPULATED_CONNECTIONS: &str = "Datasource item must be populated with connections first.";

/// A published datasource
#[derive(Debug, Clone)]
pub struct DatasourceItem {
    certified: Option<bool>,
    certification_note: Option<String>,
    connected_workbooks_count: Option<i64>,
    connections: Lazy<Vec<ConnectionItem>>,
    content_url: Option<String>,
    created_at: Option<DateTime<Utc>>,
    datasource_type: Option<String>,
    description: Option<String>,
    encrypt_extracts: Option<bool>,
    favorites_total: Option<i64>,
    has_alert: Option<bool>,
    has_extracts: Option<bool>,
    id: Option<String>,
    name: Option<String>,
    owner_id: Option<String>,
    owner_name: Option<String>,
    project_id: String,
    project_name: Option<String>,
    published: Option<bool>,
    server_name: Option<String>,
    size: Option<i64>,
    tags: Tags,
    updated_at: Option<DateTime<Utc>>,
    use_remote_query_agent: Option<bool>,
    webpage_url: Option<String>,
}

impl DatasourceItem {
    /// Creates a datasource to be published into `project_id`
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `project_id` or `name` is empty
    pub fn new(project_id: impl Into<String>, name: Option<String>) -> std::result::Result<Self, ValidationError> {
        let project_id = project_id.into();
        not_empty("project_id", &project_id)?;
        if let Some(name) = &name {
            not_empty("name", name)?;
        }
        Ok(Self {
            certified: None,
            certification_note: None,
            connected_workbooks_count: None,
            connections: Lazy::default(),
            content_url: None,
            created_at: None,
            datasource_type: None,
            description: None,
            encrypt_extracts: None,
            favorites_total: None,
            has_alert: None,
            has_extracts: None,
            id: None,
            name,
            owner_id: None,
            owner_name: None,
            project_id,
            project_name: None,
            published: None,
            server_name: None,
            size: None,
            tags: Tags::default(),
            updated_at: None,
            use_remote_query_agent: None,
            webpage_url: None,
        })
    }

    #[must_use]
    pub fn certified(&self) -> Option<bool> {
        self.certified
    }

    pub fn set_certified(&mut self, certified: bool) {
        self.certified = Some(certified);
    }

    #[must_use]
    pub fn certification_note(&self) -> Option<&str> {
        self.certification_note.as_deref()
    }

    pub fn set_certification_note(&mut self, note: Option<String>) {
        self.certification_note = note;
    }

    #[must_use]
    pub fn connected_workbooks_count(&self) -> Option<i64> {
        self.connected_workbooks_count
    }

    /// # Errors
    ///
    /// Fails with [`TscError::UnpopulatedProperty`] before `populate_connections`
    pub fn connections(&self) -> Result<&Vec<ConnectionItem>> {
        self.connections.get(UNPOPULATED_CONNECTIONS)
    }

    pub(crate) fn set_connections(&mut self, connections: Vec<ConnectionItem>) {
        self.connections.set(connections);
    }

    #[must_use]
    pub fn content_url(&self) -> Option<&str> {
        self.content_url.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> Option<&DateTime<Utc>> {
        self.created_at.as_ref()
    }

    #[must_use]
    pub fn datasource_type(&self) -> Option<&str> {
        self.datasource_type.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn encrypt_extracts(&self) -> Option<bool> {
        self.encrypt_extracts
    }

    #[must_use]
    pub fn favorites_total(&self) -> Option<i64> {
        self.favorites_total
    }

    #[must_use]
    pub fn has_alert(&self) -> Option<bool> {
        self.has_alert
    }

    #[must_use]
    pub fn has_extracts(&self) -> Option<bool> {
        self.has_extracts
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the name is empty
    pub fn set_name(&mut self, name: impl Into<String>) -> std::result::Result<(), ValidationError> {
        let name = name.into();
        not_empty("name", &name)?;
        self.name = Some(name);
        Ok(())
    }

    #[must_use]
    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the owner id is empty
    pub fn set_owner_id(&mut self, owner_id: impl Into<String>) -> std::result::Result<(), ValidationError> {
        let owner_id = owner_id.into();
        not_empty("owner_id", &owner_id)?;
        self.owner_id = Some(owner_id);
        Ok(())
    }

    #[must_use]
    pub fn owner_name(&self) -> Option<&str> {
        self.owner_name.as_deref()
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the project id is empty
    pub fn set_project_id(&mut self, project_id: impl Into<String>) -> std::result::Result<(), ValidationError> {
        let project_id = project_id.into();
        not_empty("project_id", &project_id)?;
        self.project_id = project_id;
        Ok(())
    }

    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    #[must_use]
    pub fn published(&self) -> Option<bool> {
        self.published
    }

    #[must_use]
    pub fn server_name(&self) -> Option<&str> {
        self.server_name.as_deref()
    }

    /// Size in megabytes
    #[must_use]
    pub fn size(&self) -> Option<i64> {
        self.size
    }

    #[must_use]
    pub fn calculate_size(&self) -> String {
        self.size
            .and_then(|size| u64::try_from(size).ok())
            .map(format_megabytes)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn tags(&self) -> &HashSet<String> {
        self.tags.current()
    }

    pub fn set_tags(&mut self, tags: HashSet<String>) {
        self.tags.replace(tags);
    }

    pub(crate) fn tag_state(&mut self) -> &mut Tags {
        &mut self.tags
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<&DateTime<Utc>> {
        self.updated_at.as_ref()
    }

    #[must_use]
    pub fn use_remote_query_agent(&self) -> Option<bool> {
        self.use_remote_query_agent
    }

    #[must_use]
    pub fn webpage_url(&self) -> Option<&str> {
        self.webpage_url.as_deref()
    }
}

impl Item for DatasourceItem {
    const TAG: &'static str = "datasource";

    fn from_element(node: Node<'_, '_>, ns: &str) -> Result<Self> {
        let (project_id, _) = nested_id_and_name(node, ns, "project");
        let project_id = project_id.ok_or_else(|| {
            TscError::MalformedResponse("datasource element has no project id".into())
        })?;
        let mut datasource = Self::new(project_id, None)
            .map_err(|e| TscError::MalformedResponse(e.to_string()))?;
        datasource.apply_element(node, ns)?;
        Ok(datasource)
    }

    fn apply_element(&mut self, node: Node<'_, '_>, ns: &str) -> Result<()> {
        if let Some(certified) = bool_attr(node, "isCertified") {
            self.certified = Some(certified);
        }
        if let Some(note) = attr(node, "certificationNote") {
            self.certification_note = Some(note);
        }
        if let Some(count) = int_attr(node, "connectedWorkbooksCount")? {
            self.connected_workbooks_count = Some(count);
        }
        if let Some(content_url) = attr(node, "contentUrl") {
            self.content_url = Some(content_url);
        }
        if let Some(created_at) = datetime_attr(node, "createdAt")? {
            self.created_at = Some(created_at);
        }
        if let Some(datasource_type) = attr(node, "type") {
            self.datasource_type = Some(datasource_type);
        }
        if let Some(description) = attr(node, "description") {
            self.description = Some(description);
        }
        if let Some(encrypt) = bool_attr(node, "encryptExtracts") {
            self.encrypt_extracts = Some(encrypt);
        }
        if let Some(favorites) = int_attr(node, "favoritesTotal")? {
            self.favorites_total = Some(favorites);
        }
        if let Some(has_alert) = bool_attr(node, "hasAlert") {
            self.has_alert = Some(has_alert);
        }
        if let Some(has_extracts) = bool_attr(node, "hasExtracts") {
            self.has_extracts = Some(has_extracts);
        }
        if let Some(id) = attr(node, "id") {
            self.id = Some(id);
        }
        if let Some(name) = attr(node, "name") {
            self.name = Some(name);
        }
        if let Some(published) = bool_attr(node, "isPublished") {
            self.published = Some(published);
        }
        if let Some(server_name) = attr(node, "serverName") {
            self.server_name = Some(server_name);
        }
        if let Some(size) = int_attr(node, "size")? {
            self.size = Some(size);
        }
        if let Some(updated_at) = datetime_attr(node, "updatedAt")? {
            self.updated_at = Some(updated_at);
        }
        if let Some(remote) = bool_attr(node, "useRemoteQueryAgent") {
            self.use_remote_query_agent = Some(remote);
        }
        if let Some(webpage_url) = attr(node, "webpageUrl") {
            self.webpage_url = Some(webpage_url);
        }

        let (owner_id, owner_name) = nested_id_and_name(node, ns, "owner");
        if owner_id.is_some() {
            self.owner_id = owner_id;
        }
        if owner_name.is_some() {
            self.owner_name = owner_name;
        }

        let (project_id, project_name) = nested_id_and_name(node, ns, "project");
        if let Some(project_id) = project_id {
            self.project_id = project_id;
        }
        if project_name.is_some() {
            self.project_name = project_name;
        }

        if let Some(tags) = child(node, ns, "tags") {
            self.tags = Tags::parsed(TagItem::from_xml_element(tags, ns));
        }

        // A note only means something on a certified datasource
        if self.certified != Some(true) {
            self.certification_note = None;
        }
        Ok(())
    }
}
