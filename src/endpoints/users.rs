use crate::NAMESPACE;
use crate::client::Server;
use crate::endpoints::{Listable, first_item, get_item, list_items, require_id};
use crate::entities::{Item, PaginationItem, UserItem, WorkbookItem};
use crate::error::Result;
use crate::request_factory;
use crate::request_options::RequestOptions;
use log::debug;

/// Users of the signed-in site
pub struct Users<'a> {
    server: &'a Server,
}

impl<'a> Users<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    fn baseurl(&self) -> Result<String> {
        Ok(format!("{}/users", self.server.site_url()?))
    }

    /// # Errors
    ///
    /// Returns an error if the id is empty or the user does not exist
    pub fn get_by_id(&self, user_id: &str) -> Result<UserItem> {
        let user_id = require_id("user_id", Some(user_id))?;
        get_item(self.server, &format!("{}/{user_id}", self.baseurl()?))
    }

    /// Adds the user to the site and returns it with its server-assigned id
    ///
    /// # Errors
    ///
    /// Returns an error if the server refuses the user
    pub fn add(&self, user: &UserItem) -> Result<UserItem> {
        let body = self
            .server
            .post(&self.baseurl()?, request_factory::user_add_req(user))?;
        let added: UserItem = first_item(&body)?;
        debug!("Added new user (ID: {:?})", added.id());
        Ok(added)
    }

    /// # Errors
    ///
    /// Returns an error if the user has no id or the call fails
    pub fn update(&self, user: &mut UserItem) -> Result<()> {
        let url = format!("{}/{}", self.baseurl()?, require_id("user.id", user.id())?);
        let body = self.server.put(&url, request_factory::user_update_req(user))?;
        user.update_from_response(&body, NAMESPACE)?;
        debug!("Updated user item (ID: {url})");
        Ok(())
    }

    /// Removes the user from the site
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or the server refuses the removal
    pub fn remove(&self, user_id: &str) -> Result<()> {
        let user_id = require_id("user_id", Some(user_id))?;
        self.server
            .delete(&format!("{}/{user_id}", self.baseurl()?))?;
        debug!("Removed single user (ID: {user_id})");
        Ok(())
    }

    /// Fetches the workbooks the user owns into `user`
    ///
    /// # Errors
    ///
    /// Returns an error if the user has no id or the call fails
    pub fn populate_workbooks(&self, user: &mut UserItem, options: Option<&RequestOptions>) -> Result<PaginationItem> {
        let user_id = require_id("user.id", user.id())?;
        let url = format!("{}/{user_id}/workbooks", self.baseurl()?);
        let (workbooks, pagination) =
            list_items::<WorkbookItem>(self.server, &url, options, Vec::new())?;
        debug!("Populated {} workbooks for user (ID: {user_id})", workbooks.len());
        user.set_workbooks(workbooks);
        Ok(pagination)
    }
}

impl Listable for Users<'_> {
    type Item = UserItem;

    fn list(&self, options: Option<&RequestOptions>) -> Result<(Vec<UserItem>, PaginationItem)> {
        list_items(self.server, &self.baseurl()?, options, Vec::new())
    }
}
