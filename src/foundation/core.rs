use crate::foundation::error::{ViewerError, ViewerResult};

/// 1-based page number inside a loaded document.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PageIndex(u32);

impl PageIndex {
    /// The first page of any document.
    pub const FIRST: PageIndex = PageIndex(1);

    /// Create a page index. Page numbers start at 1.
    pub fn new(n: u32) -> ViewerResult<Self> {
        if n == 0 {
            return Err(ViewerError::validation("page index is 1-based, got 0"));
        }
        Ok(Self(n))
    }

    /// Raw 1-based page number.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Return `self` when it lies inside `count`, otherwise a validation error.
    pub fn checked_in(self, count: PageCount) -> ViewerResult<Self> {
        if count.contains(self) {
            Ok(self)
        } else {
            Err(ViewerError::validation(format!(
                "page {} is outside document bounds [1, {}]",
                self.0,
                count.get()
            )))
        }
    }

    /// Previous page, or `None` on the first page.
    pub fn prev(self) -> Option<Self> {
        (self.0 > 1).then(|| Self(self.0 - 1))
    }

    /// Next page when it exists in a document of `count` pages.
    pub fn next_within(self, count: PageCount) -> Option<Self> {
        let next = Self(self.0.checked_add(1)?);
        count.contains(next).then_some(next)
    }

    /// Signed distance `other - self` in pages.
    pub fn distance_to(self, other: PageIndex) -> i64 {
        i64::from(other.0) - i64::from(self.0)
    }
}

impl std::fmt::Display for PageIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Total number of pages in a document (always at least one).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageCount(u32);

impl PageCount {
    /// Create a validated page count.
    pub fn new(n: u32) -> ViewerResult<Self> {
        if n == 0 {
            return Err(ViewerError::load("document has no pages"));
        }
        Ok(Self(n))
    }

    /// Number of pages.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Return `true` when `page` is in `[1, count]`.
    pub fn contains(self, page: PageIndex) -> bool {
        page.0 >= 1 && page.0 <= self.0
    }

    /// Last page of the document.
    pub fn last(self) -> PageIndex {
        PageIndex(self.0)
    }

    /// Iterate every page in order.
    pub fn pages(self) -> impl Iterator<Item = PageIndex> {
        (1..=self.0).map(PageIndex)
    }
}

/// Pixel dimensions of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a size with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> ViewerResult<Self> {
        if width == 0 || height == 0 {
            return Err(ViewerError::validation(format!(
                "surface size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> ViewerResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ViewerError::validation("surface byte size overflow"))
    }

    /// Logical (display) size for a given device pixel ratio.
    pub fn to_logical(self, scale: f32) -> LogicalSize {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        LogicalSize {
            width: self.width as f32 / scale,
            height: self.height as f32 / scale,
        }
    }
}

/// Display dimensions in logical (density independent) units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicalSize {
    /// Logical width.
    pub width: f32,
    /// Logical height.
    pub height: f32,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
