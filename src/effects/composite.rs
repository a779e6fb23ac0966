use crate::foundation::math::{mul_div255_u8, smoothstep};
use crate::surface::bitmap::PremulRgba8;

/// Source-over with an extra opacity multiplier, premultiplied.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Linear blend `a * (1 - t) + b * t`, quantized to 1/255 steps.
pub fn crossfade(a: PremulRgba8, b: PremulRgba8, t: f32) -> PremulRgba8 {
    let t = t.clamp(0.0, 1.0);
    let tt = ((t * 255.0).round() as i32).clamp(0, 255) as u16;
    let it = 255u16 - tt;

    let mut out = [0u8; 4];
    for i in 0..4 {
        let av = mul_div255_u8(u16::from(a[i]), it);
        let bv = mul_div255_u8(u16::from(b[i]), tt);
        out[i] = av.saturating_add(bv);
    }
    out
}

/// Reveal mask of a wipe: `1` where the incoming image shows, `0` where the outgoing one does.
///
/// `pos` is the fragment position along the reveal axis in `[0, 1]`, measured from the edge the
/// wipe starts at. `soft_edge` is the feather width as a fraction of the axis.
pub fn wipe_mask(pos: f32, t: f32, soft_edge: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let soft = soft_edge.clamp(0.0, 1.0);
    let edge = t * (1.0 + 2.0 * soft) - soft;
    if soft <= 0.0 {
        if pos < edge { 1.0 } else { 0.0 }
    } else {
        1.0 - smoothstep(edge - soft, edge + soft, pos)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
