use crate::NAMESPACE;
use crate::client::Server;
use crate::endpoints::{Listable, first_item, get_item, list_items, require_id};
use crate::entities::{Item, PaginationItem, SiteItem};
use crate::error::Result;
use crate::request_factory;
use crate::request_options::RequestOptions;
use log::debug;

/// Sites of the server; listing and creating them needs server admin rights
pub struct Sites<'a> {
    server: &'a Server,
}

impl<'a> Sites<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    fn baseurl(&self) -> String {
        format!("{}/sites", self.server.baseurl())
    }

    /// # Errors
    ///
    /// Returns an error if the id is empty or the site does not exist
    pub fn get_by_id(&self, site_id: &str) -> Result<SiteItem> {
        self.server.require_session()?;
        let site_id = require_id("site_id", Some(site_id))?;
        get_item(self.server, &format!("{}/{site_id}", self.baseurl()))
    }

    /// # Errors
    ///
    /// Returns an error if the name is empty or no site carries it
    pub fn get_by_name(&self, site_name: &str) -> Result<SiteItem> {
        self.server.require_session()?;
        let site_name = require_id("site_name", Some(site_name))?;
        let url = format!("{}/{}", self.baseurl(), urlencoding::encode(site_name));
        let body = self
            .server
            .get(&url, vec![("key".to_string(), "name".to_string())])?;
        first_item(&body)
    }

    /// # Errors
    ///
    /// Returns an error if the server refuses the site
    pub fn create(&self, site: &SiteItem) -> Result<SiteItem> {
        self.server.require_session()?;
        let body = self
            .server
            .post(&self.baseurl(), request_factory::site_req(site))?;
        let created: SiteItem = first_item(&body)?;
        debug!("Created new site (ID: {:?})", created.id());
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns an error if the site has no id or the call fails
    pub fn update(&self, site: &mut SiteItem) -> Result<()> {
        self.server.require_session()?;
        let url = format!("{}/{}", self.baseurl(), require_id("site.id", site.id())?);
        let body = self.server.put(&url, request_factory::site_req(site))?;
        site.update_from_response(&body, NAMESPACE)?;
        debug!("Updated site item (ID: {url})");
        Ok(())
    }

    /// Deletes a site; deleting the signed-in site also ends the session
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or the server refuses the delete
    pub fn delete(&self, site_id: &str) -> Result<()> {
        let session = self.server.require_session()?;
        let site_id = require_id("site_id", Some(site_id))?;
        self.server
            .delete(&format!("{}/{site_id}", self.baseurl()))?;
        debug!("Deleted single site (ID: {site_id})");
        if session.site_id == site_id {
            self.server.clear_session();
            debug!("Deleted the signed-in site, session cleared");
        }
        Ok(())
    }
}

impl Listable for Sites<'_> {
    type Item = SiteItem;

    fn list(&self, options: Option<&RequestOptions>) -> Result<(Vec<SiteItem>, PaginationItem)> {
        self.server.require_session()?;
        list_items(self.server, &self.baseurl(), options, Vec::new())
    }
}
