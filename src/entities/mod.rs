//! Typed models of the resources the server manages.
//!
//! Every model is parsed from the server's XML with sparse-update semantics:
//! a field only changes when its attribute is present in the element, so
//! anything the response omits keeps its constructor default.

mod connection;
mod datasource;
mod group;
mod pagination;
mod project;
mod schedule;
mod site;
mod tag;
mod task;
mod user;
mod view;
mod workbook;

pub use connection::ConnectionItem;
pub use datasource::DatasourceItem;
pub use group::GroupItem;
pub use pagination::PaginationItem;
pub use project::{ContentPermissions, ProjectItem};
pub use schedule::{ExecutionOrder, IntervalItem, ScheduleItem, ScheduleState, ScheduleType};
pub(crate) use schedule::format_time;
pub use site::{AdminMode, SiteItem, SiteState};
pub use tag::{TagItem, Tags};
pub use task::{ExtractRefreshTaskItem, RefreshType, TaskTarget};
pub use user::{AuthSetting, SiteRole, UserItem};
pub use view::ViewItem;
pub use workbook::WorkbookItem;

use crate::error::{Result, TscError};
use crate::utils::{child, find, find_all, parse_document};
use roxmltree::Node;

/// Shared contract of every resource model.
pub trait Item: Sized {
    /// Local name of the element one item is parsed from.
    const TAG: &'static str;

    /// Builds a fresh item out of one element.
    fn from_element(node: Node<'_, '_>, ns: &str) -> Result<Self>;

    /// Applies the attributes present on `node` to an existing item.
    fn apply_element(&mut self, node: Node<'_, '_>, ns: &str) -> Result<()>;

    /// Parses every `TAG` element of a response document, in document order.
    fn from_response(body: &str, ns: &str) -> Result<Vec<Self>> {
        let doc = parse_document(body)?;
        find_all(doc.root(), ns, Self::TAG)
            .map(|node| Self::from_element(node, ns))
            .collect()
    }

    /// Merges the first `TAG` element of an update response into `self`.
    ///
    /// A response without such an element leaves the item untouched.
    fn update_from_response(&mut self, body: &str, ns: &str) -> Result<()> {
        let doc = parse_document(body)?;
        match find(doc.root(), ns, Self::TAG) {
            Some(node) => self.apply_element(node, ns),
            None => Ok(()),
        }
    }
}

/// A field that is only filled in by a dedicated populate call.
#[derive(Debug, Clone)]
pub struct Lazy<T>(Option<T>);

impl<T> Default for Lazy<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> Lazy<T> {
    /// Returns the populated value, or `UnpopulatedProperty` carrying `message`.
    ///
    /// # Errors
    ///
    /// Fails with [`TscError::UnpopulatedProperty`] until the populate call succeeded
    pub fn get(&self, message: &'static str) -> Result<&T> {
        self.0.as_ref().ok_or(TscError::UnpopulatedProperty(message))
    }

    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.0.is_some()
    }

    pub(crate) fn set(&mut self, value: T) {
        self.0 = Some(value);
    }
}

/// Reads a closed-enum attribute; a value outside the set is a malformed response.
pub(crate) fn enum_attr<T>(node: Node<'_, '_>, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = crate::error::ValidationError>,
{
    node.attribute(name)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| TscError::MalformedResponse(e.to_string()))
        })
        .transpose()
}

/// Reads the `id` and `name` attributes of an optional nested element,
/// e.g. `<owner id="..."/>` or `<project id="..." name="..."/>`.
pub(crate) fn nested_id_and_name(
    node: Node<'_, '_>,
    ns: &str,
    name: &str,
) -> (Option<String>, Option<String>) {
    child(node, ns, name)
        .map(|child| {
            (
                child.attribute("id").map(str::to_string),
                child.attribute("name").map(str::to_string),
            )
        })
        .unwrap_or_default()
}
