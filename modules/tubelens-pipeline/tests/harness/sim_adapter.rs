//! Adapts a `SimPage` to the pipeline's `ListingDom` boundary.
//!
//! Selector translation mirrors how the host page matches entries: the
//! renderer element name is the last segment of the container selector.

use std::sync::Arc;

use simtube::SimPage;
use tubelens_pipeline::{EntryRef, ListingDom};

pub struct SimDom {
    page: Arc<SimPage>,
}

impl SimDom {
    pub fn new(page: Arc<SimPage>) -> Self {
        Self { page }
    }
}

impl ListingDom for SimDom {
    fn path(&self) -> String {
        self.page.path()
    }

    fn containers(&self, selector: &str) -> Vec<EntryRef> {
        let renderer = selector.rsplit(' ').next().unwrap_or(selector);
        self.page
            .entries_with(renderer)
            .into_iter()
            .map(EntryRef)
            .collect()
    }

    fn title_href(&self, entry: EntryRef, _selector: &str) -> Option<String> {
        self.page.title_href(entry.0)
    }

    fn append_metadata(&self, entry: EntryRef, markup: &str) {
        self.page.append_metadata(entry.0, markup);
    }
}
