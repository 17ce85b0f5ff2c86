use crate::NAMESPACE;
use crate::client::Server;
use crate::endpoints::{Listable, first_item, list_items, require_id};
use crate::entities::{Item, PaginationItem, ScheduleItem};
use crate::error::Result;
use crate::request_factory;
use crate::request_options::RequestOptions;
use log::debug;

/// Server-wide schedules
pub struct Schedules<'a> {
    server: &'a Server,
}

impl<'a> Schedules<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    fn baseurl(&self) -> String {
        format!("{}/schedules", self.server.baseurl())
    }

    /// # Errors
    ///
    /// Returns an error if the server refuses the schedule
    pub fn create(&self, schedule: &ScheduleItem) -> Result<ScheduleItem> {
        self.server.require_session()?;
        let body = self
            .server
            .post(&self.baseurl(), request_factory::schedule_req(schedule))?;
        let created: ScheduleItem = first_item(&body)?;
        debug!("Created new schedule (ID: {:?})", created.id());
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns an error if the schedule has no id or the call fails
    pub fn update(&self, schedule: &mut ScheduleItem) -> Result<()> {
        self.server.require_session()?;
        let url = format!("{}/{}", self.baseurl(), require_id("schedule.id", schedule.id())?);
        let body = self.server.put(&url, request_factory::schedule_req(schedule))?;
        schedule.update_from_response(&body, NAMESPACE)?;
        debug!("Updated schedule item (ID: {url})");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the id is empty or the server refuses the delete
    pub fn delete(&self, schedule_id: &str) -> Result<()> {
        self.server.require_session()?;
        let schedule_id = require_id("schedule_id", Some(schedule_id))?;
        self.server
            .delete(&format!("{}/{schedule_id}", self.baseurl()))?;
        debug!("Deleted single schedule (ID: {schedule_id})");
        Ok(())
    }
}

impl Listable for Schedules<'_> {
    type Item = ScheduleItem;

    fn list(&self, options: Option<&RequestOptions>) -> Result<(Vec<ScheduleItem>, PaginationItem)> {
        self.server.require_session()?;
        list_items(self.server, &self.baseurl(), options, Vec::new())
    }
}
