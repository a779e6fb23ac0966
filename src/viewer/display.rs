use crate::foundation::core::{LogicalSize, SurfaceSize};
use crate::surface::bitmap::BitmapSurface;

/// Which display surface is currently shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visible {
    /// The committed page bitmap.
    Plain,
    /// The transition surface driven by the engine.
    Transition,
}

/// The two display surfaces of a viewer.
///
/// The plain surface holds the committed page; the transition surface only records the size
/// the engine is drawing at. Both carry pixel and logical dimensions for high-density
/// displays.
#[derive(Debug)]
pub struct DisplaySurfaces {
    plain: Option<BitmapSurface>,
    transition: Option<(SurfaceSize, LogicalSize)>,
    visible: Visible,
}

impl Default for DisplaySurfaces {
    fn default() -> Self {
        Self {
            plain: None,
            transition: None,
            visible: Visible::Plain,
        }
    }
}

impl DisplaySurfaces {
    /// The committed page, `None` before the first page was shown.
    pub fn plain(&self) -> Option<&BitmapSurface> {
        self.plain.as_ref()
    }

    /// Pixel size of the plain surface.
    pub fn plain_size(&self) -> Option<SurfaceSize> {
        self.plain.as_ref().map(BitmapSurface::size)
    }

    /// Logical size of the plain surface.
    pub fn plain_logical_size(&self) -> Option<LogicalSize> {
        self.plain.as_ref().map(BitmapSurface::logical_size)
    }

    /// Pixel and logical size of the transition surface, once it was sized.
    pub fn transition_size(&self) -> Option<(SurfaceSize, LogicalSize)> {
        self.transition
    }

    /// Currently visible surface.
    pub fn visible(&self) -> Visible {
        self.visible
    }

    /// Copy of the committed page that survives later resizes and commits.
    pub(crate) fn snapshot(&self) -> Option<BitmapSurface> {
        self.plain.clone()
    }

    /// Size the transition surface for `bitmap` and show it.
    pub(crate) fn show_transition(&mut self, bitmap: &BitmapSurface) {
        self.transition = Some((bitmap.size(), bitmap.logical_size()));
        self.visible = Visible::Transition;
    }

    /// Copy `bitmap` into the plain surface, adopting its pixel and logical size, and show it.
    pub(crate) fn commit(&mut self, bitmap: &BitmapSurface) {
        match self.plain.as_mut() {
            Some(plain) => plain.copy_from(bitmap),
            None => self.plain = Some(bitmap.clone()),
        }
        self.visible = Visible::Plain;
    }

    /// Return to the plain surface without changing its contents.
    pub(crate) fn show_plain(&mut self) {
        self.visible = Visible::Plain;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewer/display.rs"]
mod tests;
