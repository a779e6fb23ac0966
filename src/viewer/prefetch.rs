use std::cell::{Cell, RefCell};

use crate::document::source::{RasterScale, Rasterizer};
use crate::foundation::core::PageIndex;
use crate::viewer::cache::PageCache;

/// Result of one prefetch request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrefetchOutcome {
    /// Another prefetch was already running, or no page is displayed; nothing was done.
    Skipped,
    /// The neighbours were rasterized (or already cached) and the cache trimmed.
    Completed {
        /// Pages rasterized and cached by this request.
        fetched: Vec<PageIndex>,
        /// Pages whose rasterization failed. They are retried by a later request.
        failed: Vec<PageIndex>,
    },
}

/// Speculative rasterization of the pages next to the current one.
///
/// At most one prefetch runs at a time; overlapping requests return
/// [`PrefetchOutcome::Skipped`] instead of queueing.
#[derive(Debug, Default)]
pub struct Prefetcher {
    in_flight: Cell<bool>,
}

struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Prefetcher {
    /// Create an idle prefetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while a prefetch is running.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Rasterize the neighbours of the current page into `cache`, then trim the cache to the
    /// window around the current page.
    ///
    /// `current` is the live displayed page and is re-read after every rasterization await, so a
    /// page change landing mid-prefetch is honoured: results no longer adjacent to the current
    /// page are dropped and the trim uses the window of the page displayed at trim time.
    /// Out-of-range and already cached neighbours are skipped. The cache is never borrowed
    /// across a rasterization await.
    pub async fn prefetch_adjacent<R: Rasterizer>(
        &self,
        cache: &RefCell<PageCache>,
        rasterizer: &R,
        current: &Cell<Option<PageIndex>>,
        scale: RasterScale,
    ) -> PrefetchOutcome {
        let Some(origin) = current.get() else {
            return PrefetchOutcome::Skipped;
        };
        if self.in_flight.replace(true) {
            tracing::debug!(page = origin.get(), "prefetch already in flight");
            return PrefetchOutcome::Skipped;
        }
        let _guard = InFlight(&self.in_flight);

        let count = rasterizer.page_count();
        let mut fetched = Vec::new();
        let mut failed = Vec::new();
        for page in [origin.prev(), origin.next_within(count)]
            .into_iter()
            .flatten()
        {
            if !is_adjacent(current, page) || cache.borrow().contains(page) {
                continue;
            }
            match rasterizer.rasterize(page, scale).await {
                Ok(bitmap) if is_adjacent(current, page) => {
                    cache.borrow_mut().put(page, bitmap);
                    fetched.push(page);
                }
                Ok(_) => {
                    tracing::debug!(page = page.get(), "page left the window during prefetch");
                }
                Err(err) => {
                    tracing::warn!(page = page.get(), error = %err, "prefetch rasterization failed");
                    failed.push(page);
                }
            }
        }

        if let Some(now) = current.get() {
            cache
                .borrow_mut()
                .retain_only(&PageCache::adjacent_window(now, count));
        }
        tracing::debug!(
            page = origin.get(),
            fetched = fetched.len(),
            failed = failed.len(),
            "prefetch done"
        );
        PrefetchOutcome::Completed { fetched, failed }
    }
}

fn is_adjacent(current: &Cell<Option<PageIndex>>, page: PageIndex) -> bool {
    current
        .get()
        .is_some_and(|now| now.distance_to(page).abs() <= 1)
}

#[cfg(test)]
#[path = "../../tests/unit/viewer/prefetch.rs"]
mod tests;
