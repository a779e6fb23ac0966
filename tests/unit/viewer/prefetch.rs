use super::*;

#[path = "support.rs"]
mod support;

use support::{SolidPages, page};

#[tokio::test]
async fn fetches_both_neighbours_and_trims() {
    let raster = SolidPages::new(5);
    let cache = RefCell::new(PageCache::default());
    let first = raster
        .rasterize(page(1), RasterScale::default())
        .await
        .unwrap();
    cache.borrow_mut().put(page(1), first);
    raster.calls.borrow_mut().clear();

    let pf = Prefetcher::new();
    let out = pf
        .prefetch_adjacent(&cache, &raster, &Cell::new(Some(page(3))), RasterScale::default())
        .await;
    assert_eq!(
        out,
        PrefetchOutcome::Completed {
            fetched: vec![page(2), page(4)],
            failed: vec![],
        }
    );
    // Page 1 is no longer adjacent.
    assert_eq!(cache.borrow().keys(), vec![page(2), page(4)]);
    assert!(!pf.is_in_flight());
}

#[tokio::test]
async fn skips_cached_and_out_of_range_pages() {
    let raster = SolidPages::new(2);
    let cache = RefCell::new(PageCache::default());
    let pf = Prefetcher::new();

    pf.prefetch_adjacent(&cache, &raster, &Cell::new(Some(page(1))), RasterScale::default())
        .await;
    assert_eq!(*raster.calls.borrow(), vec![page(2)]);

    let out = pf
        .prefetch_adjacent(&cache, &raster, &Cell::new(Some(page(1))), RasterScale::default())
        .await;
    assert_eq!(
        out,
        PrefetchOutcome::Completed {
            fetched: vec![],
            failed: vec![],
        }
    );
    assert_eq!(raster.calls.borrow().len(), 1);
}

#[tokio::test]
async fn overlapping_request_is_a_noop() {
    let raster = SolidPages::new(9);
    let cache = RefCell::new(PageCache::default());
    let pf = Prefetcher::new();

    let (five, six) = (Cell::new(Some(page(5))), Cell::new(Some(page(6))));
    let (a, b) = tokio::join!(
        pf.prefetch_adjacent(&cache, &raster, &five, RasterScale::default()),
        pf.prefetch_adjacent(&cache, &raster, &six, RasterScale::default()),
    );
    assert!(matches!(a, PrefetchOutcome::Completed { .. }));
    assert_eq!(b, PrefetchOutcome::Skipped);
    assert_eq!(cache.borrow().keys(), vec![page(4), page(6)]);
    assert!(!pf.is_in_flight());
}

#[tokio::test]
async fn failures_are_reported_not_raised() {
    let raster = SolidPages::new(5);
    raster.fail(4);
    let cache = RefCell::new(PageCache::default());
    let out = Prefetcher::new()
        .prefetch_adjacent(&cache, &raster, &Cell::new(Some(page(3))), RasterScale::default())
        .await;
    assert_eq!(
        out,
        PrefetchOutcome::Completed {
            fetched: vec![page(2)],
            failed: vec![page(4)],
        }
    );
    assert_eq!(cache.borrow().keys(), vec![page(2)]);
}

#[tokio::test]
async fn nothing_displayed_means_nothing_to_prefetch() {
    let raster = SolidPages::new(3);
    let cache = RefCell::new(PageCache::default());
    let out = Prefetcher::new()
        .prefetch_adjacent(&cache, &raster, &Cell::new(None), RasterScale::default())
        .await;
    assert_eq!(out, PrefetchOutcome::Skipped);
    assert!(raster.calls.borrow().is_empty());
}

#[tokio::test]
async fn trim_follows_the_page_displayed_at_the_end() {
    let raster = SolidPages::new(9);
    raster.slow(3);
    let cache = RefCell::new(PageCache::default());
    let current = Cell::new(Some(page(4)));
    let pf = Prefetcher::new();

    let (out, ()) = tokio::join!(
        pf.prefetch_adjacent(&cache, &raster, &current, RasterScale::default()),
        async {
            tokio::task::yield_now().await;
            current.set(Some(page(8)));
        }
    );

    // Page 3 was already rasterizing when the display moved away; page 5 is never started.
    assert_eq!(
        out,
        PrefetchOutcome::Completed {
            fetched: vec![],
            failed: vec![],
        }
    );
    assert_eq!(raster.calls_for(3), 1);
    assert_eq!(raster.calls_for(5), 0);
    assert!(cache.borrow().is_empty());
}
