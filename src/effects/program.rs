use kurbo::Point;

use crate::foundation::core::SurfaceSize;
use crate::surface::bitmap::PremulRgba8;

/// Visual effect used for a page transition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Linear cross-blend.
    Fade,
    /// Horizontal wipe whose direction follows the navigation direction.
    Slide,
    /// Scale-and-crossfade.
    Zoom,
    /// An effect registered by name in an [`crate::EffectRegistry`].
    Named(String),
}

impl EffectKind {
    /// Parse an effect name. Built-in names are case-insensitive; anything else is `Named`.
    pub fn parse(name: &str) -> Self {
        let key = name.trim().to_ascii_lowercase();
        match key.as_str() {
            "fade" | "crossfade" => Self::Fade,
            "slide" | "wipe" => Self::Slide,
            "zoom" => Self::Zoom,
            _ => Self::Named(key),
        }
    }

    /// Canonical name.
    pub fn name(&self) -> &str {
        match self {
            Self::Fade => "fade",
            Self::Slide => "slide",
            Self::Zoom => "zoom",
            Self::Named(n) => n,
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Navigation direction of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher page numbers.
    Forward,
    /// Towards lower page numbers.
    Backward,
}

impl Direction {
    /// Direction of a move covering `delta` pages. Zero counts as forward.
    pub fn from_delta(delta: i64) -> Self {
        if delta < 0 {
            Self::Backward
        } else {
            Self::Forward
        }
    }

    /// Signed unit value: `+1.0` forward, `-1.0` backward.
    pub fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Immutable description of one transition run.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionDescriptor {
    /// Effect to run.
    pub kind: EffectKind,
    /// Wall-clock duration. Zero or negative completes immediately.
    pub duration_ms: i64,
    /// Navigation direction.
    pub direction: Direction,
    /// Soft edge width for wipe-like effects, as a fraction of the surface width.
    pub soft_edge: f32,
}

impl TransitionDescriptor {
    /// A descriptor with no soft edge.
    pub fn new(kind: EffectKind, duration_ms: i64, direction: Direction) -> Self {
        Self {
            kind,
            duration_ms,
            direction,
            soft_edge: 0.0,
        }
    }
}

/// Per-draw uniform values handed to a [`FragmentProgram`].
#[derive(Clone, Copy, Debug)]
pub struct Uniforms {
    /// Blend progress in `[0, 1]`.
    pub progress: f32,
    /// Signed direction (`+1` / `-1`).
    pub direction: f32,
    /// Soft edge width in `[0, 1]`.
    pub soft_edge: f32,
    /// Target surface size.
    pub resolution: SurfaceSize,
}

/// Read-only view over an uploaded texture.
#[derive(Clone, Copy)]
pub struct TextureView<'a> {
    size: SurfaceSize,
    data: &'a [u8],
}

impl<'a> TextureView<'a> {
    /// `data` must be `size.width * size.height * 4` premultiplied bytes.
    pub fn new(size: SurfaceSize, data: &'a [u8]) -> Self {
        debug_assert_eq!(Some(data.len()), size.rgba_len().ok());
        Self { size, data }
    }

    /// Texture size in texels.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    fn texel(&self, x: u32, y: u32) -> PremulRgba8 {
        let idx = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        let p = &self.data[idx..idx + 4];
        [p[0], p[1], p[2], p[3]]
    }

    fn texel_coord(uv: f64, len: u32) -> i64 {
        (uv * f64::from(len)).floor() as i64
    }

    /// Nearest-neighbour sample with clamp-to-edge addressing.
    pub fn sample_clamped(&self, uv: Point) -> PremulRgba8 {
        let x = Self::texel_coord(uv.x, self.size.width).clamp(0, i64::from(self.size.width) - 1);
        let y = Self::texel_coord(uv.y, self.size.height).clamp(0, i64::from(self.size.height) - 1);
        self.texel(x as u32, y as u32)
    }

    /// Nearest-neighbour sample returning transparent black outside `[0, 1)`.
    pub fn sample_border(&self, uv: Point) -> PremulRgba8 {
        let x = Self::texel_coord(uv.x, self.size.width);
        let y = Self::texel_coord(uv.y, self.size.height);
        if x < 0 || y < 0 || x >= i64::from(self.size.width) || y >= i64::from(self.size.height) {
            return [0; 4];
        }
        self.texel(x as u32, y as u32)
    }
}

/// A fragment program: computes one output pixel from the two page textures.
///
/// `uv` is the normalized centre of the output pixel, `(0, 0)` top-left.
pub trait FragmentProgram: Send + Sync {
    /// Program name, used in logs.
    fn name(&self) -> &str;

    /// Shade one fragment.
    fn shade(
        &self,
        uv: Point,
        from: &TextureView<'_>,
        to: &TextureView<'_>,
        uniforms: &Uniforms,
    ) -> PremulRgba8;
}

#[cfg(test)]
#[path = "../../tests/unit/effects/program.rs"]
mod tests;
