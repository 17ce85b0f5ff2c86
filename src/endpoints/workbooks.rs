use crate::NAMESPACE;
use crate::client::Server;
use crate::endpoints::{Listable, get_item, list_items, require_id, update_tags};
use crate::entities::{ConnectionItem, Item, PaginationItem, ViewItem, WorkbookItem};
use crate::error::Result;
use crate::request_factory;
use crate::request_options::RequestOptions;
use log::debug;

pub struct Workbooks<'a> {
    server: &'a Server,
}

impl<'a> Workbooks<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    fn baseurl(&self) -> Result<String> {
        Ok(format!("{}/workbooks", self.server.site_url()?))
    }

    fn item_url(&self, workbook: &WorkbookItem) -> Result<String> {
        Ok(format!(
            "{}/{}",
            self.baseurl()?,
            require_id("workbook.id", workbook.id())?
        ))
    }

    /// # Errors
    ///
    /// Returns an error if the id is empty or the workbook does not exist
    pub fn get_by_id(&self, workbook_id: &str) -> Result<WorkbookItem> {
        let workbook_id = require_id("workbook_id", Some(workbook_id))?;
        get_item(self.server, &format!("{}/{workbook_id}", self.baseurl()?))
    }

    /// Sends the changed fields and tags, then merges the server's answer
    /// back into `workbook`
    ///
    /// # Errors
    ///
    /// Returns an error if the workbook has no id or any call fails
    pub fn update(&self, workbook: &mut WorkbookItem) -> Result<()> {
        let url = self.item_url(workbook)?;
        update_tags(self.server, &url, workbook.tag_state())?;
        let body = self
            .server
            .put(&url, request_factory::workbook_update_req(workbook))?;
        workbook.update_from_response(&body, NAMESPACE)?;
        debug!("Updated workbook item (ID: {url})");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the id is empty or the server refuses the delete
    pub fn delete(&self, workbook_id: &str) -> Result<()> {
        let workbook_id = require_id("workbook_id", Some(workbook_id))?;
        self.server
            .delete(&format!("{}/{workbook_id}", self.baseurl()?))?;
        debug!("Deleted single workbook (ID: {workbook_id})");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the workbook has no id or the call fails
    pub fn populate_views(&self, workbook: &mut WorkbookItem) -> Result<()> {
        let url = format!("{}/views", self.item_url(workbook)?);
        let body = self.server.get(&url, Vec::new())?;
        let views = ViewItem::from_response(&body, NAMESPACE)?;
        debug!("Populated {} views for workbook ({url})", views.len());
        workbook.set_views(views);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the workbook has no id or the call fails
    pub fn populate_connections(&self, workbook: &mut WorkbookItem) -> Result<()> {
        let url = format!("{}/connections", self.item_url(workbook)?);
        let body = self.server.get(&url, Vec::new())?;
        let connections = ConnectionItem::from_response(&body, NAMESPACE)?;
        debug!("Populated {} connections for workbook ({url})", connections.len());
        workbook.set_connections(connections);
        Ok(())
    }

    /// Fetches the workbook's PNG thumbnail into `workbook`
    ///
    /// # Errors
    ///
    /// Returns an error if the workbook has no id or the call fails
    pub fn populate_preview_image(&self, workbook: &mut WorkbookItem) -> Result<()> {
        let url = format!("{}/previewImage", self.item_url(workbook)?);
        let image = self.server.get_bytes(&url, Vec::new())?;
        debug!("Populated preview image for workbook ({url}), {} bytes", image.len());
        workbook.set_preview_image(image);
        Ok(())
    }
}

impl Listable for Workbooks<'_> {
    type Item = WorkbookItem;

    fn list(&self, options: Option<&RequestOptions>) -> Result<(Vec<WorkbookItem>, PaginationItem)> {
        list_items(self.server, &self.baseurl()?, options, Vec::new())
    }
}
