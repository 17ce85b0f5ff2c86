use crate::entities::{Item, enum_attr};
use crate::error::{Result, TscError, ValidationError};
use crate::macros::string_enum;
use crate::utils::attr;
use crate::validators::not_empty;
use roxmltree::Node;

string_enum! {
    /// Who may change permissions on content inside a project
    ContentPermissions("content_permissions") {
        LockedToProject => "LockedToProject",
        ManagedByOwner => "ManagedByOwner",
    }
}

#[derive(Debug, Clone)]
pub struct ProjectItem {
    id: Option<String>,
    name: String,
    pub description: Option<String>,
    pub content_permissions: Option<ContentPermissions>,
    pub parent_id: Option<String>,
}

impl ProjectItem {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` is empty
    pub fn new(name: impl Into<String>, description: Option<String>) -> std::result::Result<Self, ValidationError> {
        let name = name.into();
        not_empty("name", &name)?;
        Ok(Self {
            id: None,
            name,
            description,
            content_permissions: None,
            parent_id: None,
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
}

impl Item for ProjectItem {
    const TAG: &'static str = "project";

    fn from_element(node: Node<'_, '_>, ns: &str) -> Result<Self> {
        let name = attr(node, "name")
            .ok_or_else(|| TscError::MalformedResponse("project element has no name".into()))?;
        let mut project =
            Self::new(name, None).map_err(|e| TscError::MalformedResponse(e.to_string()))?;
        project.apply_element(node, ns)?;
        Ok(project)
    }

    fn apply_element(&mut self, node: Node<'_, '_>, _ns: &str) -> Result<()> {
        if let Some(id) = attr(node, "id") {
            self.id = Some(id);
        }
        if let Some(name) = attr(node, "name") {
            self.name = name;
        }
        if let Some(description) = attr(node, "description") {
            self.description = Some(description);
        }
        if let Some(permissions) = enum_attr(node, "contentPermissions")? {
            self.content_permissions = Some(permissions);
        }
        if let Some(parent_id) = attr(node, "parentProjectId") {
            self.parent_id = Some(parent_id);
        }
        Ok(())
    }
}
