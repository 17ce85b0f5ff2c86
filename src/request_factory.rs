//! XML request bodies.
//!
//! Every body is a single `<tsRequest>` document. Attributes whose value is
//! `None` are left out, which is what makes updates partial.

use crate::endpoints::TableauAuth;
use crate::entities::{
    ConnectionItem, DatasourceItem, GroupItem, ProjectItem, ScheduleItem, SiteItem, UserItem,
    WorkbookItem, format_time,
};

#[derive(Debug, Clone)]
pub(crate) struct XmlElement {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.attributes.push((name, value.to_string()));
        self
    }

    pub(crate) fn opt_attr<T: ToString>(self, name: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub(crate) fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    fn render(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(value, out);
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.render(out);
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
    }
}

fn escape_into(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
}

/// Wraps `elements` into a `<tsRequest>` document
pub(crate) fn ts_request(elements: impl IntoIterator<Item = XmlElement>) -> String {
    let root = elements
        .into_iter()
        .fold(XmlElement::new("tsRequest"), XmlElement::child);
    let mut out = String::new();
    root.render(&mut out);
    out
}

fn id_element(name: &'static str, id: &str) -> XmlElement {
    XmlElement::new(name).attr("id", id)
}

pub(crate) fn empty_req() -> String {
    ts_request(Vec::<XmlElement>::new())
}

pub(crate) fn signin_req(auth: &TableauAuth) -> String {
    let credentials = XmlElement::new("credentials")
        .attr("name", &auth.username)
        .attr("password", &auth.password)
        .child(XmlElement::new("site").attr("contentUrl", &auth.site_content_url));
    ts_request([credentials])
}

pub(crate) fn tags_req(labels: &[String]) -> String {
    let tags = labels
        .iter()
        .map(|label| XmlElement::new("tag").attr("label", label))
        .fold(XmlElement::new("tags"), XmlElement::child);
    ts_request([tags])
}

pub(crate) fn datasource_update_req(datasource: &DatasourceItem) -> String {
    let mut element = XmlElement::new("datasource")
        .opt_attr("name", datasource.name())
        .opt_attr("isCertified", datasource.certified())
        .opt_attr("certificationNote", datasource.certification_note())
        .child(id_element("project", datasource.project_id()));
    if let Some(owner_id) = datasource.owner_id() {
        element = element.child(id_element("owner", owner_id));
    }
    ts_request([element])
}

pub(crate) fn connection_update_req(connection: &ConnectionItem) -> String {
    let element = XmlElement::new("connection")
        .opt_attr("serverAddress", connection.server_address.as_deref())
        .opt_attr("serverPort", connection.server_port.as_deref())
        .opt_attr("userName", connection.username.as_deref())
        .opt_attr("password", connection.password.as_deref())
        .opt_attr("embedPassword", connection.embed_password);
    ts_request([element])
}

pub(crate) fn project_req(project: &ProjectItem) -> String {
    let element = XmlElement::new("project")
        .attr("name", project.name())
        .opt_attr("description", project.description.as_deref())
        .opt_attr("contentPermissions", project.content_permissions)
        .opt_attr("parentProjectId", project.parent_id.as_deref());
    ts_request([element])
}

pub(crate) fn user_add_req(user: &UserItem) -> String {
    let element = XmlElement::new("user")
        .attr("name", user.name())
        .opt_attr("siteRole", user.site_role())
        .opt_attr("authSetting", user.auth_setting);
    ts_request([element])
}

pub(crate) fn user_update_req(user: &UserItem) -> String {
    let element = XmlElement::new("user")
        .opt_attr("fullName", user.fullname.as_deref())
        .opt_attr("email", user.email.as_deref())
        .opt_attr("password", user.password.as_deref())
        .opt_attr("siteRole", user.site_role())
        .opt_attr("authSetting", user.auth_setting);
    ts_request([element])
}

pub(crate) fn group_req(group: &GroupItem) -> String {
    ts_request([XmlElement::new("group").attr("name", group.name())])
}

pub(crate) fn add_user_req(user_id: &str) -> String {
    ts_request([id_element("user", user_id)])
}

pub(crate) fn workbook_update_req(workbook: &WorkbookItem) -> String {
    let mut element = XmlElement::new("workbook")
        .opt_attr("name", workbook.name())
        .attr("showTabs", workbook.show_tabs)
        .child(id_element("project", workbook.project_id()));
    if let Some(owner_id) = workbook.owner_id() {
        element = element.child(id_element("owner", owner_id));
    }
    ts_request([element])
}

pub(crate) fn site_req(site: &SiteItem) -> String {
    let element = XmlElement::new("site")
        .attr("name", site.name())
        .opt_attr("contentUrl", site.content_url())
        .opt_attr("adminMode", site.admin_mode)
        .opt_attr("state", site.state)
        .opt_attr("userQuota", site.user_quota)
        .opt_attr("storageQuota", site.storage_quota)
        .opt_attr("disableSubscriptions", site.disable_subscriptions)
        .opt_attr("revisionHistoryEnabled", site.revision_history_enabled)
        .opt_attr("revisionLimit", site.revision_limit());
    ts_request([element])
}

pub(crate) fn schedule_req(schedule: &ScheduleItem) -> String {
    let interval = &schedule.interval;
    let intervals = interval
        .interval_attributes()
        .into_iter()
        .map(|(name, value)| XmlElement::new("interval").attr(name, value))
        .fold(XmlElement::new("intervals"), XmlElement::child);
    let mut details = XmlElement::new("frequencyDetails")
        .attr("start", format_time(interval.start_time()))
        .opt_attr("end", interval.end_time().map(format_time));
    if !intervals.children.is_empty() {
        details = details.child(intervals);
    }

    let element = XmlElement::new("schedule")
        .attr("name", schedule.name())
        .attr("priority", schedule.priority())
        .attr("type", schedule.schedule_type)
        .attr("frequency", interval.frequency())
        .attr("executionOrder", schedule.execution_order)
        .child(details);
    ts_request([element])
}
