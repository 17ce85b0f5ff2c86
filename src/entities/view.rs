use crate::entities::{Item, Lazy, TagItem, Tags};
use crate::error::Result;
use crate::utils::{attr, child, int_attr};
use roxmltree::Node;
use std::collections::HashSet;

const UNPOPULATED_IMAGE: &str = "View item must be populated with its png image first.";
const UNPOPULATED_PREVIEW: &str = "View item must be populated with its preview image first.";

/// A sheet or dashboard inside a workbook
///
/// Views are only ever created by the server.
#[derive(Debug, Clone, Default)]
pub struct ViewItem {
    id: Option<String>,
    name: Option<String>,
    content_url: Option<String>,
    owner_id: Option<String>,
    workbook_id: Option<String>,
    total_views: Option<i64>,
    tags: Tags,
    image: Lazy<Vec<u8>>,
    preview_image: Lazy<Vec<u8>>,
}

impl ViewItem {
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn content_url(&self) -> Option<&str> {
        self.content_url.as_deref()
    }

    #[must_use]
    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    #[must_use]
    pub fn workbook_id(&self) -> Option<&str> {
        self.workbook_id.as_deref()
    }

    /// Only present when the listing asked for usage statistics
    #[must_use]
    pub fn total_views(&self) -> Option<i64> {
        self.total_views
    }

    #[must_use]
    pub fn tags(&self) -> &HashSet<String> {
        self.tags.current()
    }

    /// PNG bytes of the rendered view
    ///
    /// # Errors
    ///
    /// Fails with [`TscError::UnpopulatedProperty`](crate::error::TscError::UnpopulatedProperty)
    /// before `populate_image`
    pub fn image(&self) -> Result<&Vec<u8>> {
        self.image.get(UNPOPULATED_IMAGE)
    }

    pub(crate) fn set_image(&mut self, image: Vec<u8>) {
        self.image.set(image);
    }

    /// # Errors
    ///
    /// Fails with [`TscError::UnpopulatedProperty`](crate::error::TscError::UnpopulatedProperty)
    /// before `populate_preview_image`
    pub fn preview_image(&self) -> Result<&Vec<u8>> {
        self.preview_image.get(UNPOPULATED_PREVIEW)
    }

    pub(crate) fn set_preview_image(&mut self, image: Vec<u8>) {
        self.preview_image.set(image);
    }
}

impl Item for ViewItem {
    const TAG: &'static str = "view";

    fn from_element(node: Node<'_, '_>, ns: &str) -> Result<Self> {
        let mut view = Self::default();
        view.apply_element(node, ns)?;
        Ok(view)
    }

    fn apply_element(&mut self, node: Node<'_, '_>, ns: &str) -> Result<()> {
        if let Some(id) = attr(node, "id") {
            self.id = Some(id);
        }
        if let Some(name) = attr(node, "name") {
            self.name = Some(name);
        }
        if let Some(content_url) = attr(node, "contentUrl") {
            self.content_url = Some(content_url);
        }
        if let Some(owner_id) = child(node, ns, "owner").and_then(|owner| attr(owner, "id")) {
            self.owner_id = Some(owner_id);
        }
        if let Some(workbook_id) = child(node, ns, "workbook").and_then(|workbook| attr(workbook, "id")) {
            self.workbook_id = Some(workbook_id);
        }
        if let Some(usage) = child(node, ns, "usage") {
            if let Some(total) = int_attr(usage, "totalViewCount")? {
                self.total_views = Some(total);
            }
        }
        if let Some(tags) = child(node, ns, "tags") {
            self.tags = Tags::parsed(TagItem::from_xml_element(tags, ns));
        }
        Ok(())
    }
}
