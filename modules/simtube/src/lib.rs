//! simtube — Simulates a video-listing page for testing.
//!
//! Domain-agnostic: no dependency on pipeline types. Consumers adapt a
//! `SimPage` behind their own DOM boundary trait.
//!
//! A page holds entries tagged with a renderer element name (the last
//! segment of a CSS-like selector), each with an optional title href and a
//! metadata region that records appended markup in order. Interior
//! mutability lets a shared handle be inspected while code under test
//! mutates the page.

use std::sync::Mutex;

use tracing::debug;

/// One simulated video listing entry.
#[derive(Debug, Clone)]
pub struct SimEntry {
    pub id: u64,
    /// Renderer element name, e.g. "ytd-video-renderer".
    pub renderer: String,
    /// Title anchor link target; `None` models an entry missing its anchor.
    pub title_href: Option<String>,
    /// Markup appended into the metadata region, in append order.
    pub metadata: Vec<String>,
}

/// A simulated video-listing page.
pub struct SimPage {
    inner: Mutex<PageInner>,
}

struct PageInner {
    path: String,
    next_id: u64,
    entries: Vec<SimEntry>,
}

impl SimPage {
    pub fn new(path: &str) -> Self {
        Self {
            inner: Mutex::new(PageInner {
                path: path.to_string(),
                next_id: 1,
                entries: Vec::new(),
            }),
        }
    }

    pub fn path(&self) -> String {
        self.inner.lock().unwrap().path.clone()
    }

    /// Add one entry to the listing. Returns its id.
    pub fn add_entry(&self, renderer: &str, title_href: Option<&str>) -> u64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push(SimEntry {
            id,
            renderer: renderer.to_string(),
            title_href: title_href.map(String::from),
            metadata: Vec::new(),
        });
        id
    }

    /// Append a batch of entries, as infinite scroll would.
    pub fn load_more(&self, renderer: &str, hrefs: &[&str]) -> Vec<u64> {
        let ids: Vec<u64> = hrefs
            .iter()
            .map(|href| self.add_entry(renderer, Some(href)))
            .collect();
        debug!(count = ids.len(), renderer, "Loaded more entries");
        ids
    }

    /// Client-side navigation: swap the path and replace the listing.
    pub fn navigate(&self, path: &str) {
        let mut inner = self.inner.lock().unwrap();
        debug!(from = inner.path.as_str(), to = path, "Navigating");
        inner.path = path.to_string();
        inner.entries.clear();
    }

    /// Ids of entries rendered with the given element name, in DOM order.
    pub fn entries_with(&self, renderer: &str) -> Vec<u64> {
        self.inner
            .lock()
            .unwrap()
            .entries
            .iter()
            .filter(|e| e.renderer == renderer)
            .map(|e| e.id)
            .collect()
    }

    pub fn title_href(&self, id: u64) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .entries
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| e.title_href.clone())
    }

    /// Append markup into an entry's metadata region. Unknown ids are
    /// ignored (the host page may have dropped the node).
    pub fn append_metadata(&self, id: u64, markup: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(entry) = inner.entries.iter_mut().find(|e| e.id == id) {
            entry.metadata.push(markup.to_string());
        }
    }

    pub fn metadata(&self, id: u64) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.metadata.clone())
            .unwrap_or_default()
    }

    pub fn entry_count(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_replaces_the_listing() {
        let page = SimPage::new("/results");
        page.add_entry("ytd-video-renderer", Some("/watch?v=a1"));
        assert_eq!(page.entry_count(), 1);

        page.navigate("/watch");
        assert_eq!(page.path(), "/watch");
        assert_eq!(page.entry_count(), 0);
    }

    #[test]
    fn metadata_appends_preserve_order() {
        let page = SimPage::new("/");
        let id = page.add_entry("ytd-rich-item-renderer", Some("/watch?v=a1"));
        page.append_metadata(id, "first");
        page.append_metadata(id, "second");
        assert_eq!(page.metadata(id), vec!["first", "second"]);
    }
}
