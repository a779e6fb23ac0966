use kurbo::{Affine, Point};

use crate::effects::composite::{crossfade, wipe_mask};
use crate::effects::program::{FragmentProgram, TextureView, Uniforms};
use crate::foundation::math::smoothstep;
use crate::surface::bitmap::PremulRgba8;

const CENTER: Point = Point::new(0.5, 0.5);

/// Linear cross-blend of the two pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct FadeProgram;

impl FragmentProgram for FadeProgram {
    fn name(&self) -> &str {
        "fade"
    }

    fn shade(
        &self,
        uv: Point,
        from: &TextureView<'_>,
        to: &TextureView<'_>,
        u: &Uniforms,
    ) -> PremulRgba8 {
        crossfade(from.sample_clamped(uv), to.sample_clamped(uv), u.progress)
    }
}

/// Horizontal wipe. Forward reveals the incoming page from the right edge, backward from the
/// left.
#[derive(Debug, Default, Clone, Copy)]
pub struct SlideProgram;

impl FragmentProgram for SlideProgram {
    fn name(&self) -> &str {
        "slide"
    }

    fn shade(
        &self,
        uv: Point,
        from: &TextureView<'_>,
        to: &TextureView<'_>,
        u: &Uniforms,
    ) -> PremulRgba8 {
        let x = uv.x as f32;
        let pos = if u.direction < 0.0 { x } else { 1.0 - x };
        let m = wipe_mask(pos, u.progress, u.soft_edge);
        crossfade(from.sample_clamped(uv), to.sample_clamped(uv), m)
    }
}

/// The outgoing page grows past the viewport while the incoming page scales up from half size;
/// the incoming page only fades in over the second half of the run.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZoomProgram;

impl ZoomProgram {
    fn sample_scaled(tex: &TextureView<'_>, uv: Point, scale: f64) -> PremulRgba8 {
        let inv = Affine::scale_about(scale, CENTER).inverse();
        tex.sample_border(inv * uv)
    }
}

impl FragmentProgram for ZoomProgram {
    fn name(&self) -> &str {
        "zoom"
    }

    fn shade(
        &self,
        uv: Point,
        from: &TextureView<'_>,
        to: &TextureView<'_>,
        u: &Uniforms,
    ) -> PremulRgba8 {
        let p = f64::from(u.progress.clamp(0.0, 1.0));
        let a = Self::sample_scaled(from, uv, 1.0 + 0.5 * p);
        let b = Self::sample_scaled(to, uv, 0.5 + 0.5 * p);
        let alpha = smoothstep(0.5, 1.0, u.progress);
        crossfade(a, b, alpha)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/builtin.rs"]
mod tests;
