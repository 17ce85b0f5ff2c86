use crate::client::Server;
use crate::endpoints::{Listable, first_item, list_items, require_id};
use crate::entities::{GroupItem, PaginationItem, UserItem};
use crate::error::Result;
use crate::request_factory;
use crate::request_options::RequestOptions;
use log::debug;

pub struct Groups<'a> {
    server: &'a Server,
}

impl<'a> Groups<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    fn baseurl(&self) -> Result<String> {
        Ok(format!("{}/groups", self.server.site_url()?))
    }

    /// # Errors
    ///
    /// Returns an error if the server refuses the group
    pub fn create(&self, group: &GroupItem) -> Result<GroupItem> {
        let body = self
            .server
            .post(&self.baseurl()?, request_factory::group_req(group))?;
        let created: GroupItem = first_item(&body)?;
        debug!("Created new group (ID: {:?})", created.id());
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns an error if the id is empty or the server refuses the delete
    pub fn delete(&self, group_id: &str) -> Result<()> {
        let group_id = require_id("group_id", Some(group_id))?;
        self.server
            .delete(&format!("{}/{group_id}", self.baseurl()?))?;
        debug!("Deleted single group (ID: {group_id})");
        Ok(())
    }

    /// Fetches the members of the group into `group`
    ///
    /// # Errors
    ///
    /// Returns an error if the group has no id or the call fails
    pub fn populate_users(&self, group: &mut GroupItem, options: Option<&RequestOptions>) -> Result<PaginationItem> {
        let group_id = require_id("group.id", group.id())?;
        let url = format!("{}/{group_id}/users", self.baseurl()?);
        let (users, pagination) = list_items::<UserItem>(self.server, &url, options, Vec::new())?;
        debug!("Populated {} users for group (ID: {group_id})", users.len());
        group.set_users(users);
        Ok(pagination)
    }

    /// Adds an existing site user to the group
    ///
    /// # Errors
    ///
    /// Returns an error if either id is missing or the call fails
    pub fn add_user(&self, group: &GroupItem, user_id: &str) -> Result<UserItem> {
        let url = format!("{}/{}/users", self.baseurl()?, require_id("group.id", group.id())?);
        let user_id = require_id("user_id", Some(user_id))?;
        let body = self.server.post(&url, request_factory::add_user_req(user_id))?;
        debug!("Added user (ID: {user_id}) to group (ID: {url})");
        first_item(&body)
    }

    /// # Errors
    ///
    /// Returns an error if either id is missing or the call fails
    pub fn remove_user(&self, group: &GroupItem, user_id: &str) -> Result<()> {
        let user_id = require_id("user_id", Some(user_id))?;
        let url = format!(
            "{}/{}/users/{user_id}",
            self.baseurl()?,
            require_id("group.id", group.id())?
        );
        self.server.delete(&url)?;
        debug!("Removed user (ID: {user_id}) from group");
        Ok(())
    }
}

impl Listable for Groups<'_> {
    type Item = GroupItem;

    fn list(&self, options: Option<&RequestOptions>) -> Result<(Vec<GroupItem>, PaginationItem)> {
        list_items(self.server, &self.baseurl()?, options, Vec::new())
    }
}
