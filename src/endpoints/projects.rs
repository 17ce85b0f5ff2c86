use crate::NAMESPACE;
use crate::client::Server;
use crate::endpoints::{Listable, first_item, list_items, require_id};
use crate::entities::{Item, PaginationItem, ProjectItem};
use crate::error::Result;
use crate::request_factory;
use crate::request_options::RequestOptions;
use log::debug;

pub struct Projects<'a> {
    server: &'a Server,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    fn baseurl(&self) -> Result<String> {
        Ok(format!("{}/projects", self.server.site_url()?))
    }

    /// Creates the project and returns it with its server-assigned id
    ///
    /// # Errors
    ///
    /// Returns an error if the server refuses the project
    pub fn create(&self, project: &ProjectItem) -> Result<ProjectItem> {
        let body = self
            .server
            .post(&self.baseurl()?, request_factory::project_req(project))?;
        let created: ProjectItem = first_item(&body)?;
        debug!("Created new project (ID: {:?})", created.id());
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns an error if the project has no id or the call fails
    pub fn update(&self, project: &mut ProjectItem) -> Result<()> {
        let url = format!("{}/{}", self.baseurl()?, require_id("project.id", project.id())?);
        let body = self.server.put(&url, request_factory::project_req(project))?;
        project.update_from_response(&body, NAMESPACE)?;
        debug!("Updated project item (ID: {url})");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the id is empty or the server refuses the delete
    pub fn delete(&self, project_id: &str) -> Result<()> {
        let project_id = require_id("project_id", Some(project_id))?;
        self.server
            .delete(&format!("{}/{project_id}", self.baseurl()?))?;
        debug!("Deleted single project (ID: {project_id})");
        Ok(())
    }
}

impl Listable for Projects<'_> {
    type Item = ProjectItem;

    fn list(&self, options: Option<&RequestOptions>) -> Result<(Vec<ProjectItem>, PaginationItem)> {
        list_items(self.server, &self.baseurl()?, options, Vec::new())
    }
}
