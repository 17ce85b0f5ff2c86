//! Walks every page of a [`Listable`] endpoint.
//!
//! ```rust,no_run
//! # use tableau_server_client::{Pager, Server};
//! # fn run(server: &Server) -> tableau_server_client::error::Result<()> {
//! for datasource in Pager::new(server.datasources(), None) {
//!     println!("{:?}", datasource?.name());
//! }
//! # Ok(())
//! # }
//! ```

use crate::endpoints::Listable;
use crate::error::Result;
use crate::request_options::RequestOptions;
use log::{debug, warn};
use std::collections::VecDeque;

/// Lazy iterator over all items of a paged listing
///
/// Pages are fetched on demand, each exactly once. Filters and sorts of the
/// starting options apply to every page. Once the last page is consumed, or a
/// request fails, the pager yields nothing more.
pub struct Pager<E: Listable> {
    endpoint: E,
    options: RequestOptions,
    buffer: VecDeque<E::Item>,
    next_page: Option<u32>,
    page_size: Option<u32>,
}

impl<E: Listable> Pager<E> {
    /// Starts at the page `options` points at, or the first page
    #[must_use]
    pub fn new(endpoint: E, options: Option<RequestOptions>) -> Self {
        let options = options.unwrap_or_default();
        Self {
            endpoint,
            next_page: Some(options.page_number()),
            page_size: options.page_size(),
            options,
            buffer: VecDeque::new(),
        }
    }

    fn fetch(&mut self, page_number: u32) -> Result<()> {
        let options = self.options.for_page(page_number, self.page_size);
        let (items, pagination) = self.endpoint.list(Some(&options))?;
        debug!(
            "Fetched page {} with {} items ({} available)",
            pagination.page_number,
            items.len(),
            pagination.total_available
        );

        if pagination.has_more() {
            if items.is_empty() {
                warn!(
                    "Page {} is empty although {} items are reported, stopping",
                    pagination.page_number, pagination.total_available
                );
            } else {
                self.next_page = Some(pagination.page_number + 1);
                self.page_size = Some(pagination.page_size);
            }
        }
        self.buffer.extend(items);
        Ok(())
    }
}

impl<E: Listable> Iterator for Pager<E> {
    type Item = Result<E::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            let page_number = self.next_page.take()?;
            if let Err(e) = self.fetch(page_number) {
                return Some(Err(e));
            }
        }
    }
}
