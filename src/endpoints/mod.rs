//! One endpoint per server resource.
//!
//! Endpoints borrow the [`Server`] they were obtained from and are cheap to
//! create: `server.datasources().list(None)`.

mod auth;
mod datasources;
mod groups;
mod projects;
mod schedules;
mod sites;
mod tasks;
mod users;
mod views;
mod workbooks;

pub use auth::TableauAuth;
pub use datasources::Datasources;
pub use groups::Groups;
pub use projects::Projects;
pub use schedules::Schedules;
pub use sites::Sites;
pub use tasks::Tasks;
pub use users::Users;
pub use views::Views;
pub use workbooks::Workbooks;

use crate::NAMESPACE;
use crate::client::Server;
use crate::entities::{Item, PaginationItem, Tags};
use crate::error::{Result, TscError};
use crate::request_factory;
use crate::request_options::RequestOptions;
use crate::validators::{not_empty, not_nullable};

/// An endpoint that returns one page of items per call
pub trait Listable {
    type Item;

    /// Fetches the page `options` points at, or the first page
    ///
    /// # Errors
    ///
    /// Returns the transport, server or parse error of the call
    fn list(&self, options: Option<&RequestOptions>) -> Result<(Vec<Self::Item>, PaginationItem)>;
}

impl<E: Listable + ?Sized> Listable for &E {
    type Item = E::Item;

    fn list(&self, options: Option<&RequestOptions>) -> Result<(Vec<Self::Item>, PaginationItem)> {
        (**self).list(options)
    }
}

pub(crate) fn list_items<T: Item>(
    server: &Server,
    url: &str,
    options: Option<&RequestOptions>,
    mut query: Vec<(String, String)>,
) -> Result<(Vec<T>, PaginationItem)> {
    if let Some(options) = options {
        query.extend(options.to_query());
    }
    let body = server.get(url, query)?;
    let pagination = PaginationItem::from_response(&body, NAMESPACE)?;
    let items = T::from_response(&body, NAMESPACE)?;
    Ok((items, pagination))
}

/// Fetches the single item at `url`
pub(crate) fn get_item<T: Item>(server: &Server, url: &str) -> Result<T> {
    let body = server.get(url, Vec::new())?;
    first_item(&body)
}

pub(crate) fn first_item<T: Item>(body: &str) -> Result<T> {
    T::from_response(body, NAMESPACE)?
        .into_iter()
        .next()
        .ok_or_else(|| {
            TscError::MalformedResponse(format!("response has no <{}> element", T::TAG))
        })
}

/// The id of an item that must already exist on the server
pub(crate) fn require_id<'a>(field: &'static str, id: Option<&'a str>) -> Result<&'a str> {
    let id = not_nullable(field, id)?;
    not_empty(field, id)?;
    Ok(id)
}

/// Sends the tags added and removed since the item was parsed
pub(crate) fn update_tags(server: &Server, item_url: &str, tags: &mut Tags) -> Result<()> {
    let additions = tags.additions();
    if !additions.is_empty() {
        server.put(&format!("{item_url}/tags"), request_factory::tags_req(&additions))?;
    }
    for label in tags.removals() {
        server.delete(&format!("{item_url}/tags/{}", urlencoding::encode(&label)))?;
    }
    tags.mark_synced();
    Ok(())
}
