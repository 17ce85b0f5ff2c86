use crate::NAMESPACE;
use crate::client::Server;
use crate::endpoints::{Listable, first_item, get_item, list_items, require_id, update_tags};
use crate::entities::{ConnectionItem, DatasourceItem, Item, PaginationItem};
use crate::error::Result;
use crate::request_factory;
use crate::request_options::RequestOptions;
use log::debug;

/// Published datasources of the signed-in site
pub struct Datasources<'a> {
    server: &'a Server,
}

impl<'a> Datasources<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    fn baseurl(&self) -> Result<String> {
        Ok(format!("{}/datasources", self.server.site_url()?))
    }

    /// # Errors
    ///
    /// Returns an error if the id is empty or the datasource does not exist
    pub fn get_by_id(&self, datasource_id: &str) -> Result<DatasourceItem> {
        let datasource_id = require_id("datasource_id", Some(datasource_id))?;
        get_item(self.server, &format!("{}/{datasource_id}", self.baseurl()?))
    }

    /// Sends the changed fields and tags, then merges the server's answer
    /// back into `datasource`
    ///
    /// # Errors
    ///
    /// Returns an error if the datasource has no id or any call fails
    pub fn update(&self, datasource: &mut DatasourceItem) -> Result<()> {
        let url = format!(
            "{}/{}",
            self.baseurl()?,
            require_id("datasource.id", datasource.id())?
        );
        update_tags(self.server, &url, datasource.tag_state())?;
        let body = self
            .server
            .put(&url, request_factory::datasource_update_req(datasource))?;
        datasource.update_from_response(&body, NAMESPACE)?;
        debug!("Updated datasource item (ID: {url})");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the id is empty or the server refuses the delete
    pub fn delete(&self, datasource_id: &str) -> Result<()> {
        let datasource_id = require_id("datasource_id", Some(datasource_id))?;
        self.server
            .delete(&format!("{}/{datasource_id}", self.baseurl()?))?;
        debug!("Deleted single datasource (ID: {datasource_id})");
        Ok(())
    }

    /// Fetches the datasource's connections into `datasource`
    ///
    /// # Errors
    ///
    /// Returns an error if the datasource has no id or the call fails
    pub fn populate_connections(&self, datasource: &mut DatasourceItem) -> Result<()> {
        let datasource_id = require_id("datasource.id", datasource.id())?;
        let url = format!("{}/{datasource_id}/connections", self.baseurl()?);
        let body = self.server.get(&url, Vec::new())?;
        let connections = ConnectionItem::from_response(&body, NAMESPACE)?;
        debug!("Populated connections for datasource (ID: {datasource_id})");
        datasource.set_connections(connections);
        Ok(())
    }

    /// Updates one connection of a datasource and returns the server's view of it
    ///
    /// # Errors
    ///
    /// Returns an error if either id is missing or the call fails
    pub fn update_connection(
        &self,
        datasource: &DatasourceItem,
        connection: &ConnectionItem,
    ) -> Result<ConnectionItem> {
        let url = format!(
            "{}/{}/connections/{}",
            self.baseurl()?,
            require_id("datasource.id", datasource.id())?,
            require_id("connection.id", connection.id())?
        );
        let body = self
            .server
            .put(&url, request_factory::connection_update_req(connection))?;
        first_item(&body)
    }
}

impl Listable for Datasources<'_> {
    type Item = DatasourceItem;

    fn list(&self, options: Option<&RequestOptions>) -> Result<(Vec<DatasourceItem>, PaginationItem)> {
        list_items(self.server, &self.baseurl()?, options, Vec::new())
    }
}
