use crate::entities::{ConnectionItem, Item, Lazy, TagItem, Tags, ViewItem, nested_id_and_name};
use crate::error::{Result, TscError, ValidationError};
use crate::utils::{attr, bool_attr, child, datetime_attr, format_megabytes, int_attr};
use crate::validators::not_empty;
use chrono::{DateTime, Utc};
use roxmltree::Node;
use std::collections::HashSet;

const UNPOPULATED_VIEWS: &str = "Workbook item must be populated with views first.";
const UNPOPULATED_CONNECTIONS: &str = "Workbook item must be populated with connections first.";
const UNPOPULATED_PREVIEW: &str = "Workbook item must be populated with its preview image first.";

#[derive(Debug, Clone)]
pub struct WorkbookItem {
    id: Option<String>,
    name: Option<String>,
    content_url: Option<String>,
    webpage_url: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    size: Option<i64>,
    pub show_tabs: bool,
    owner_id: Option<String>,
    project_id: String,
    project_name: Option<String>,
    tags: Tags,
    views: Lazy<Vec<ViewItem>>,
    connections: Lazy<Vec<ConnectionItem>>,
    preview_image: Lazy<Vec<u8>>,
}

impl WorkbookItem {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `project_id` or `name` is empty
    pub fn new(
        project_id: impl Into<String>,
        name: Option<String>,
        show_tabs: bool,
    ) -> std::result::Result<Self, ValidationError> {
        let project_id = project_id.into();
        not_empty("project_id", &project_id)?;
        if let Some(name) = &name {
            not_empty("name", name)?;
        }
        Ok(Self {
            id: None,
            name,
            content_url: None,
            webpage_url: None,
            created_at: None,
            updated_at: None,
            size: None,
            show_tabs,
            owner_id: None,
            project_id,
            project_name: None,
            tags: Tags::default(),
            views: Lazy::default(),
            connections: Lazy::default(),
            preview_image: Lazy::default(),
        })
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
    /// Returns a [`ValidationError`] if `name` is empty
    pub fn set_name(&mut self, name: impl Into<String>) -> std::result::Result<(), ValidationError> {
        let name = name.into();
        not_empty("name", &name)?;
        self.name = Some(name);
        Ok(())
    }

    #[must_use]
    pub fn content_url(&self) -> Option<&str> {
        self.content_url.as_deref()
    }

    #[must_use]
    pub fn webpage_url(&self) -> Option<&str> {
        self.webpage_url.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> Option<&DateTime<Utc>> {
        self.created_at.as_ref()
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<&DateTime<Utc>> {
        self.updated_at.as_ref()
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
    pub fn tags(&self) -> &HashSet<String> {
        self.tags.current()
    }

    pub fn set_tags(&mut self, tags: HashSet<String>) {
        self.tags.replace(tags);
    }

    pub(crate) fn tag_state(&mut self) -> &mut Tags {
        &mut self.tags
    }

    /// # Errors
    ///
    /// Fails with [`TscError::UnpopulatedProperty`] before `populate_views`
    pub fn views(&self) -> Result<&Vec<ViewItem>> {
        self.views.get(UNPOPULATED_VIEWS)
    }

    pub(crate) fn set_views(&mut self, views: Vec<ViewItem>) {
        self.views.set(views);
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

    /// # Errors
    ///
    /// Fails with [`TscError::UnpopulatedProperty`] before `populate_preview_image`
    pub fn preview_image(&self) -> Result<&Vec<u8>> {
        self.preview_image.get(UNPOPULATED_PREVIEW)
    }

    pub(crate) fn set_preview_image(&mut self, image: Vec<u8>) {
        self.preview_image.set(image);
    }
}

impl Item for WorkbookItem {
    const TAG: &'static str = "workbook";

    fn from_element(node: Node<'_, '_>, ns: &str) -> Result<Self> {
        let (project_id, _) = nested_id_and_name(node, ns, "project");
        let project_id = project_id.ok_or_else(|| {
            TscError::MalformedResponse("workbook element has no project id".into())
        })?;
        let mut workbook = Self::new(project_id, None, false)
            .map_err(|e| TscError::MalformedResponse(e.to_string()))?;
        workbook.apply_element(node, ns)?;
        Ok(workbook)
    }

    fn apply_element(&mut self, node: Node<'_, '_>, ns: &str) -> Result<()> {
        if let Some(id) = attr(node, "id") {
            self.id = Some(id);
        }
        if let Some(name) = attr(node, "name") {
            self.name = Some(name);
        }
        if let Some(content_url) = attr(node, "contentUrl") {
            self.content_url = Some(content_url);
        }
        if let Some(webpage_url) = attr(node, "webpageUrl") {
            self.webpage_url = Some(webpage_url);
        }
        if let Some(created_at) = datetime_attr(node, "createdAt")? {
            self.created_at = Some(created_at);
        }
        if let Some(updated_at) = datetime_attr(node, "updatedAt")? {
            self.updated_at = Some(updated_at);
        }
        if let Some(size) = int_attr(node, "size")? {
            self.size = Some(size);
        }
        if let Some(show_tabs) = bool_attr(node, "showTabs") {
            self.show_tabs = show_tabs;
        }

        if let Some(owner_id) = nested_id_and_name(node, ns, "owner").0 {
            self.owner_id = Some(owner_id);
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
        if let Some(views) = child(node, ns, "views") {
            let views = views
                .children()
                .filter(|child| child.has_tag_name((ns, ViewItem::TAG)))
                .map(|child| ViewItem::from_element(child, ns))
                .collect::<Result<Vec<_>>>()?;
            self.views.set(views);
        }
        Ok(())
    }
}
