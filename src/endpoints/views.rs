use crate::client::Server;
use crate::endpoints::{Listable, list_items, require_id};
use crate::entities::{PaginationItem, ViewItem};
use crate::error::Result;
use crate::request_options::{ImageRequestOptions, RequestOptions};
use log::debug;

/// Views of the signed-in site
pub struct Views<'a> {
    server: &'a Server,
    usage_statistics: bool,
}

impl<'a> Views<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self {
            server,
            usage_statistics: false,
        }
    }

    /// Makes [`Listable::list`] also report each view's total view count
    #[must_use]
    pub fn with_usage_statistics(mut self) -> Self {
        self.usage_statistics = true;
        self
    }

    fn baseurl(&self) -> Result<String> {
        Ok(format!("{}/views", self.server.site_url()?))
    }

    /// Renders the view as PNG into `view`
    ///
    /// # Errors
    ///
    /// Returns an error if the view has no id or the call fails
    pub fn populate_image(&self, view: &mut ViewItem, options: Option<&ImageRequestOptions>) -> Result<()> {
        let view_id = require_id("view.id", view.id())?;
        let url = format!("{}/{view_id}/image", self.baseurl()?);
        let query = options.map(ImageRequestOptions::to_query).unwrap_or_default();
        let image = self.server.get_bytes(&url, query)?;
        debug!("Populated image for view (ID: {view_id}), {} bytes", image.len());
        view.set_image(image);
        Ok(())
    }

    /// Fetches the view's thumbnail into `view`
    ///
    /// # Errors
    ///
    /// Returns an error if the view has no id or workbook id, or the call fails
    pub fn populate_preview_image(&self, view: &mut ViewItem) -> Result<()> {
        let url = format!(
            "{}/workbooks/{}/views/{}/previewImage",
            self.server.site_url()?,
            require_id("view.workbook_id", view.workbook_id())?,
            require_id("view.id", view.id())?
        );
        let image = self.server.get_bytes(&url, Vec::new())?;
        debug!("Populated preview image for view ({url}), {} bytes", image.len());
        view.set_preview_image(image);
        Ok(())
    }
}

impl Listable for Views<'_> {
    type Item = ViewItem;

    fn list(&self, options: Option<&RequestOptions>) -> Result<(Vec<ViewItem>, PaginationItem)> {
        let query = if self.usage_statistics {
            vec![("includeUsageStatistics".to_string(), "true".to_string())]
        } else {
            Vec::new()
        };
        list_items(self.server, &self.baseurl()?, options, query)
    }
}
