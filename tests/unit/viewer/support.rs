use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::document::source::{RasterScale, Rasterizer};
use crate::foundation::core::{PageCount, PageIndex, SurfaceSize};
use crate::foundation::error::{ViewerError, ViewerResult};
use crate::surface::bitmap::BitmapSurface;

/// Rasterizer producing one solid color per page, recording every call.
pub(crate) struct SolidPages {
    count: PageCount,
    pub(crate) calls: RefCell<Vec<PageIndex>>,
    pub(crate) failing: RefCell<HashSet<u32>>,
    yields: Cell<u32>,
}

impl SolidPages {
    pub(crate) fn new(pages: u32) -> Self {
        Self {
            count: PageCount::new(pages).unwrap(),
            calls: RefCell::new(Vec::new()),
            failing: RefCell::new(HashSet::new()),
            yields: Cell::new(1),
        }
    }

    pub(crate) fn color(page: PageIndex) -> [u8; 4] {
        [(page.get() * 20) as u8, 0, 255 - (page.get() * 10) as u8, 255]
    }

    pub(crate) fn fail(&self, page: u32) {
        self.failing.borrow_mut().insert(page);
    }

    /// Make every rasterization suspend `yields` times before finishing.
    pub(crate) fn slow(&self, yields: u32) {
        self.yields.set(yields.max(1));
    }

    pub(crate) fn calls_for(&self, page: u32) -> usize {
        self.calls.borrow().iter().filter(|p| p.get() == page).count()
    }
}

pub(crate) fn page(n: u32) -> PageIndex {
    PageIndex::new(n).unwrap()
}

impl Rasterizer for SolidPages {
    fn page_count(&self) -> PageCount {
        self.count
    }

    async fn rasterize(&self, page: PageIndex, scale: RasterScale) -> ViewerResult<BitmapSurface> {
        self.calls.borrow_mut().push(page);
        for _ in 0..self.yields.get() {
            tokio::task::yield_now().await;
        }
        if self.failing.borrow().contains(&page.get()) {
            return Err(ViewerError::rasterization(page.get(), "injected failure"));
        }
        let s = scale.effective();
        let size = SurfaceSize::new((8.0 * s) as u32, (6.0 * s) as u32)?;
        BitmapSurface::solid(size, scale.device_pixel_ratio, Self::color(page))
    }
}
