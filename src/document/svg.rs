use std::sync::Arc;

use crate::document::source::{DocumentInfo, DocumentSource, RasterScale, Rasterizer};
use crate::foundation::core::{PageCount, PageIndex, SurfaceSize};
use crate::foundation::error::{ViewerError, ViewerResult};
use crate::surface::bitmap::BitmapSurface;

/// Largest pixel dimension a page may be rasterized at.
const MAX_DIM: u32 = 16_384;

#[derive(serde::Deserialize)]
struct DeckManifest {
    pages: Vec<String>,
}

/// A document made of SVG pages.
///
/// The on-disk form is a JSON deck: `{"pages": ["<svg ...>...</svg>", ...]}`. Pages are parsed
/// once at load time and rendered on demand with `resvg`.
#[derive(Clone)]
pub struct SvgDocument {
    pages: Vec<Arc<usvg::Tree>>,
    page_count: PageCount,
}

impl std::fmt::Debug for SvgDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgDocument")
            .field("page_count", &self.page_count.get())
            .finish()
    }
}

impl SvgDocument {
    /// Load a deck from a JSON file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> ViewerResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            ViewerError::load(format!("open document '{}': {e}", path.display()))
        })?;
        Self::load(&bytes)
    }

    /// Build a document from already separated SVG page sources.
    pub fn from_pages<S: AsRef<[u8]>>(pages: &[S]) -> ViewerResult<Self> {
        let opts = usvg::Options::default();
        let trees = pages
            .iter()
            .enumerate()
            .map(|(i, src)| {
                usvg::Tree::from_data(src.as_ref(), &opts)
                    .map(Arc::new)
                    .map_err(|e| ViewerError::load(format!("parse svg page {}: {e}", i + 1)))
            })
            .collect::<ViewerResult<Vec<_>>>()?;
        let count = u32::try_from(trees.len())
            .map_err(|_| ViewerError::load("document has too many pages"))?;
        let page_count = PageCount::new(count)?;
        tracing::debug!(pages = count, "loaded svg document");
        Ok(Self {
            pages: trees,
            page_count,
        })
    }

    fn tree(&self, page: PageIndex) -> ViewerResult<&usvg::Tree> {
        page.checked_in(self.page_count)?;
        Ok(&self.pages[(page.get() - 1) as usize])
    }

    fn render(&self, page: PageIndex, scale: RasterScale) -> ViewerResult<BitmapSurface> {
        let size = self
            .page_dimensions(page, scale)
            .map_err(|e| ViewerError::rasterization(page.get(), e.to_string()))?;
        let tree = self
            .tree(page)
            .map_err(|e| ViewerError::rasterization(page.get(), e.to_string()))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width, size.height)
            .ok_or_else(|| ViewerError::rasterization(page.get(), "failed to allocate pixmap"))?;

        let sx = (size.width as f32) / tree.size().width();
        let sy = (size.height as f32) / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(tree, xform, &mut pixmap.as_mut());

        // tiny-skia pixmaps are already premultiplied RGBA8.
        BitmapSurface::from_premul_rgba8(
            size.width,
            size.height,
            scale.device_pixel_ratio,
            pixmap.take(),
        )
        .map_err(|e| ViewerError::rasterization(page.get(), e.to_string()))
    }
}

impl DocumentSource for SvgDocument {
    fn load(bytes: &[u8]) -> ViewerResult<Self> {
        let manifest: DeckManifest = serde_json::from_slice(bytes)
            .map_err(|e| ViewerError::load(format!("parse document manifest: {e}")))?;
        if manifest.pages.is_empty() {
            return Err(ViewerError::load("document has no pages"));
        }
        Self::from_pages(&manifest.pages)
    }

    fn info(&self) -> DocumentInfo {
        DocumentInfo {
            page_count: self.page_count,
        }
    }

    fn page_dimensions(&self, page: PageIndex, scale: RasterScale) -> ViewerResult<SurfaceSize> {
        scale.validate()?;
        let tree = self.tree(page)?;
        let s = scale.effective();
        let to_px = |v: f32| -> ViewerResult<u32> {
            let px = (v * s).ceil();
            if !px.is_finite() || px < 1.0 {
                return Err(ViewerError::validation("svg page has invalid width/height"));
            }
            Ok(px as u32)
        };
        let w = to_px(tree.size().width())?;
        let h = to_px(tree.size().height())?;
        if w > MAX_DIM || h > MAX_DIM {
            return Err(ViewerError::validation(format!(
                "page raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
            )));
        }
        SurfaceSize::new(w, h)
    }
}

impl Rasterizer for SvgDocument {
    fn page_count(&self) -> PageCount {
        self.page_count
    }

    async fn rasterize(&self, page: PageIndex, scale: RasterScale) -> ViewerResult<BitmapSurface> {
        // Give other work on the loop a turn before the synchronous render.
        tokio::task::yield_now().await;
        let _span = tracing::debug_span!("rasterize", page = page.get(), scale = scale.effective())
            .entered();
        self.render(page, scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/svg.rs"]
mod tests;
