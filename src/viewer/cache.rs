use std::collections::{BTreeSet, HashMap};

use crate::foundation::core::{PageCount, PageIndex};
use crate::surface::bitmap::BitmapSurface;

/// Default number of retained pages: the current page and its two neighbours.
pub const DEFAULT_CACHE_PAGES: usize = 3;

/// Bounded store of rasterized pages around the current one.
///
/// Lookups never rasterize. Capacity is enforced on insert by evicting the entry farthest from
/// the page being inserted.
#[derive(Debug)]
pub struct PageCache {
    capacity: usize,
    entries: HashMap<PageIndex, BitmapSurface>,
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_PAGES)
    }
}

impl PageCache {
    /// Cache holding at most `capacity` pages (minimum one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// The keep set for `current`: the page itself and its in-document neighbours.
    pub fn adjacent_window(current: PageIndex, count: PageCount) -> BTreeSet<PageIndex> {
        let mut keep = BTreeSet::new();
        keep.insert(current);
        keep.extend(current.prev());
        keep.extend(current.next_within(count));
        keep
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached bitmap for `page`.
    pub fn get(&self, page: PageIndex) -> Option<&BitmapSurface> {
        self.entries.get(&page)
    }

    /// `true` if `page` is cached.
    pub fn contains(&self, page: PageIndex) -> bool {
        self.entries.contains_key(&page)
    }

    /// Insert or overwrite `page`.
    pub fn put(&mut self, page: PageIndex, surface: BitmapSurface) {
        if !self.entries.contains_key(&page) && self.entries.len() >= self.capacity {
            let victim = self
                .entries
                .keys()
                .copied()
                .max_by_key(|k| (page.distance_to(*k).unsigned_abs(), std::cmp::Reverse(*k)));
            if let Some(victim) = victim {
                tracing::debug!(page = page.get(), evicted = victim.get(), "page cache full");
                self.entries.remove(&victim);
            }
        }
        self.entries.insert(page, surface);
    }

    /// Remove and return `page`.
    pub fn take(&mut self, page: PageIndex) -> Option<BitmapSurface> {
        self.entries.remove(&page)
    }

    /// Drop every entry whose page is not in `keep`.
    pub fn retain_only(&mut self, keep: &BTreeSet<PageIndex>) {
        let before = self.entries.len();
        self.entries.retain(|page, _| keep.contains(page));
        let released = before - self.entries.len();
        if released > 0 {
            tracing::debug!(released, kept = self.entries.len(), "page cache trimmed");
        }
    }

    /// Cached pages in ascending order.
    pub fn keys(&self) -> Vec<PageIndex> {
        let mut keys: Vec<_> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of cached pages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Release every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewer/cache.rs"]
mod tests;
