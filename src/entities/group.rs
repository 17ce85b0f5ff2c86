use crate::entities::{Item, Lazy, UserItem};
use crate::error::{Result, TscError, ValidationError};
use crate::utils::{attr, child};
use crate::validators::not_empty;
use roxmltree::Node;

const UNPOPULATED_USERS: &str = "Group item must be populated with users first.";

#[derive(Debug, Clone)]
pub struct GroupItem {
    id: Option<String>,
    name: String,
    domain_name: Option<String>,
    users: Lazy<Vec<UserItem>>,
}

impl GroupItem {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` is empty
    pub fn new(name: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        let name = name.into();
        not_empty("name", &name)?;
        Ok(Self {
            id: None,
            name,
            domain_name: None,
            users: Lazy::default(),
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
    pub fn domain_name(&self) -> Option<&str> {
        self.domain_name.as_deref()
    }

    /// # Errors
    ///
    /// Fails with [`TscError::UnpopulatedProperty`] before `populate_users`
    pub fn users(&self) -> Result<&Vec<UserItem>> {
        self.users.get(UNPOPULATED_USERS)
    }

    pub(crate) fn set_users(&mut self, users: Vec<UserItem>) {
        self.users.set(users);
    }
}

impl Item for GroupItem {
    const TAG: &'static str = "group";

    fn from_element(node: Node<'_, '_>, ns: &str) -> Result<Self> {
        let name = attr(node, "name")
            .ok_or_else(|| TscError::MalformedResponse("group element has no name".into()))?;
        let mut group = Self::new(name).map_err(|e| TscError::MalformedResponse(e.to_string()))?;
        group.apply_element(node, ns)?;
        Ok(group)
    }

    fn apply_element(&mut self, node: Node<'_, '_>, ns: &str) -> Result<()> {
        if let Some(id) = attr(node, "id") {
            self.id = Some(id);
        }
        if let Some(name) = attr(node, "name") {
            self.name = name;
        }
        if let Some(domain_name) = child(node, ns, "domain").and_then(|domain| attr(domain, "name")) {
            self.domain_name = Some(domain_name);
        }
        Ok(())
    }
}
