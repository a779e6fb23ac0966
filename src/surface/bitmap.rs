use crate::foundation::core::{LogicalSize, SurfaceSize};
use crate::foundation::error::{ViewerError, ViewerResult};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// A rasterized page: an owned premultiplied RGBA8 buffer plus its display scale.
///
/// `scale` is the device pixel ratio the bitmap was produced for, so the logical display size
/// is `pixel size / scale`. Copies are always explicit (`Clone`); surfaces are never shared
/// mutably.
#[derive(Clone, PartialEq)]
pub struct BitmapSurface {
    size: SurfaceSize,
    scale: f32,
    data: Vec<u8>,
}

impl std::fmt::Debug for BitmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitmapSurface")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl BitmapSurface {
    /// Wrap a tightly packed premultiplied RGBA8 buffer.
    pub fn from_premul_rgba8(
        width: u32,
        height: u32,
        scale: f32,
        data: Vec<u8>,
    ) -> ViewerResult<Self> {
        let size = SurfaceSize::new(width, height)?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ViewerError::validation(format!(
                "bitmap scale must be finite and > 0, got {scale}"
            )));
        }
        if data.len() != size.rgba_len()? {
            return Err(ViewerError::validation(format!(
                "bitmap buffer is {} bytes, expected {width}x{height}x4",
                data.len()
            )));
        }
        Ok(Self { size, scale, data })
    }

    /// A surface filled with a single premultiplied color.
    pub fn solid(size: SurfaceSize, scale: f32, color: PremulRgba8) -> ViewerResult<Self> {
        let len = size.rgba_len()?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / 4 {
            data.extend_from_slice(&color);
        }
        Self::from_premul_rgba8(size.width, size.height, scale, data)
    }

    /// Convert a straight-alpha image into a premultiplied surface.
    pub fn from_rgba_image(img: &image::RgbaImage, scale: f32) -> ViewerResult<Self> {
        let mut data = img.as_raw().clone();
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            for c in &mut px[..3] {
                *c = crate::foundation::math::mul_div255_u8(u16::from(*c), a);
            }
        }
        Self::from_premul_rgba8(img.width(), img.height(), scale, data)
    }

    /// Convert to a straight-alpha image, e.g. for PNG output.
    pub fn to_rgba_image(&self) -> ViewerResult<image::RgbaImage> {
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 {
                px[..3].fill(0);
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        image::RgbaImage::from_raw(self.size.width, self.size.height, data)
            .ok_or_else(|| ViewerError::validation("bitmap buffer does not match its dimensions"))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Pixel dimensions.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Device pixel ratio this bitmap was rendered for.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Display size in logical units.
    pub fn logical_size(&self) -> LogicalSize {
        self.size.to_logical(self.scale)
    }

    /// Raw premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        let p = &self.data[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Replace this surface's contents with a copy of `src`, adopting its size and scale.
    ///
    /// Reuses the existing allocation when the sizes match.
    pub fn copy_from(&mut self, src: &BitmapSurface) {
        self.size = src.size;
        self.scale = src.scale;
        self.data.clear();
        self.data.extend_from_slice(&src.data);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/bitmap.rs"]
mod tests;
