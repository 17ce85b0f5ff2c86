use crate::NAMESPACE;
use crate::client::Server;
use crate::endpoints::{Listable, get_item, list_items, require_id};
use crate::entities::{ExtractRefreshTaskItem, Item, PaginationItem};
use crate::error::{Result, TscError};
use crate::request_factory;
use crate::request_options::RequestOptions;
use crate::utils::{find, parse_document, required_attr};
use log::debug;

/// Extract refresh tasks of the signed-in site
pub struct Tasks<'a> {
    server: &'a Server,
}

impl<'a> Tasks<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    fn baseurl(&self) -> Result<String> {
        Ok(format!("{}/tasks/extractRefreshes", self.server.site_url()?))
    }

    /// # Errors
    ///
    /// Returns an error if the id is empty or the task does not exist
    pub fn get_by_id(&self, task_id: &str) -> Result<ExtractRefreshTaskItem> {
        let task_id = require_id("task_id", Some(task_id))?;
        get_item(self.server, &format!("{}/{task_id}", self.baseurl()?))
    }

    /// Lists the extract refreshes a schedule runs
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or the call fails
    pub fn get_for_schedule(
        &self,
        schedule_id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<(Vec<ExtractRefreshTaskItem>, PaginationItem)> {
        let schedule_id = require_id("schedule_id", Some(schedule_id))?;
        let url = format!("{}/schedules/{schedule_id}/extracts", self.server.site_url()?);
        let (mut tasks, pagination) =
            list_items::<ExtractRefreshTaskItem>(self.server, &url, options, Vec::new())?;
        for task in &mut tasks {
            task.set_schedule_id(schedule_id);
        }
        Ok((tasks, pagination))
    }

    /// Starts the task now and returns the id of the job it queued
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, the call fails or the response
    /// carries no job
    pub fn run_now(&self, task_id: &str) -> Result<String> {
        let task_id = require_id("task_id", Some(task_id))?;
        let url = format!("{}/{task_id}/runNow", self.baseurl()?);
        let body = self.server.post(&url, request_factory::empty_req())?;
        let doc = parse_document(&body)?;
        let job = find(doc.root(), NAMESPACE, "job")
            .ok_or_else(|| TscError::MalformedResponse("runNow response has no <job> element".into()))?;
        let job_id = required_attr(job, "id")?;
        debug!("Queued job (ID: {job_id}) for task (ID: {task_id})");
        Ok(job_id)
    }
}

impl Listable for Tasks<'_> {
    type Item = ExtractRefreshTaskItem;

    /// The task list is not paged by the server; it arrives as a single page
    fn list(&self, options: Option<&RequestOptions>) -> Result<(Vec<ExtractRefreshTaskItem>, PaginationItem)> {
        let query = options.map(RequestOptions::to_query).unwrap_or_default();
        let body = self.server.get(&self.baseurl()?, query)?;
        let tasks = ExtractRefreshTaskItem::from_response(&body, NAMESPACE)?;
        let pagination = PaginationItem::optional_from_response(&body, NAMESPACE)?
            .unwrap_or_else(|| PaginationItem::single_page(tasks.len()));
        Ok((tasks, pagination))
    }
}
