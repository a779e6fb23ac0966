use std::future::Future;

use crate::foundation::core::{PageCount, PageIndex, SurfaceSize};
use crate::foundation::error::{ViewerError, ViewerResult};
use crate::surface::bitmap::BitmapSurface;

/// Scale a page is rendered at.
///
/// `zoom` is the document zoom level, `device_pixel_ratio` the density of the display surface.
/// Pixel dimensions follow `zoom * device_pixel_ratio`; the produced bitmap carries
/// `device_pixel_ratio` as its display scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RasterScale {
    /// Document zoom (1.0 = natural page size).
    pub zoom: f32,
    /// Physical pixels per logical unit.
    pub device_pixel_ratio: f32,
}

impl Default for RasterScale {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl RasterScale {
    /// Create a validated scale.
    pub fn new(zoom: f32, device_pixel_ratio: f32) -> ViewerResult<Self> {
        let s = Self {
            zoom,
            device_pixel_ratio,
        };
        s.validate()?;
        Ok(s)
    }

    /// Reject non-finite or non-positive factors.
    pub fn validate(self) -> ViewerResult<()> {
        for (name, v) in [("zoom", self.zoom), ("device_pixel_ratio", self.device_pixel_ratio)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ViewerError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Combined pixel scale factor.
    pub fn effective(self) -> f32 {
        self.zoom * self.device_pixel_ratio
    }
}

/// Document metadata known after a successful load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Number of pages.
    pub page_count: PageCount,
}

/// A loaded document that can report page geometry.
pub trait DocumentSource: Sized {
    /// Parse a document from raw bytes.
    fn load(bytes: &[u8]) -> ViewerResult<Self>;

    /// Document metadata.
    fn info(&self) -> DocumentInfo;

    /// Pixel dimensions of `page` rendered at `scale`.
    fn page_dimensions(&self, page: PageIndex, scale: RasterScale) -> ViewerResult<SurfaceSize>;
}

/// Asynchronous page rasterization.
///
/// Each call is single-flight and produces a fresh bitmap; implementations are not expected to
/// cache. Calls for different pages may interleave with cache lookups.
pub trait Rasterizer {
    /// Number of pages the rasterizer can render.
    fn page_count(&self) -> PageCount;

    /// Render `page` at `scale`.
    fn rasterize(
        &self,
        page: PageIndex,
        scale: RasterScale,
    ) -> impl Future<Output = ViewerResult<BitmapSurface>>;
}
