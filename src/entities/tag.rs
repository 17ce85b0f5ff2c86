use crate::utils::find_all;
use roxmltree::Node;
use std::collections::HashSet;

/// Tags are plain labels read from `<tags><tag label="..."/></tags>`.
pub struct TagItem;

impl TagItem {
    /// Collects the labels below a `<tags>` element; duplicates collapse.
    #[must_use]
    pub fn from_xml_element(tags: Node<'_, '_>, ns: &str) -> HashSet<String> {
        find_all(tags, ns, "tag")
            .filter_map(|tag| tag.attribute("label"))
            .map(str::to_string)
            .collect()
    }
}

/// The tags of an item together with the tags the server last reported,
/// so an update only sends the difference.
#[derive(Debug, Clone, Default)]
pub struct Tags {
    current: HashSet<String>,
    initial: HashSet<String>,
}

impl Tags {
    pub(crate) fn parsed(tags: HashSet<String>) -> Self {
        Self {
            initial: tags.clone(),
            current: tags,
        }
    }

    #[must_use]
    pub fn current(&self) -> &HashSet<String> {
        &self.current
    }

    pub(crate) fn replace(&mut self, tags: HashSet<String>) {
        self.current = tags;
    }

    /// Tags present now but not on the server, sorted for stable requests.
    #[must_use]
    pub fn additions(&self) -> Vec<String> {
        let mut added: Vec<String> = self.current.difference(&self.initial).cloned().collect();
        added.sort();
        added
    }

    /// Tags the server has that were removed locally, sorted.
    #[must_use]
    pub fn removals(&self) -> Vec<String> {
        let mut removed: Vec<String> = self.initial.difference(&self.current).cloned().collect();
        removed.sort();
        removed
    }

    pub(crate) fn mark_synced(&mut self) {
        self.initial = self.current.clone();
    }
}
