pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Hermite smoothstep of `x` between edges `a` and `b`.
pub(crate) fn smoothstep(a: f32, b: f32, x: f32) -> f32 {
    if x <= a {
        return 0.0;
    }
    if x >= b {
        return 1.0;
    }
    let t = (x - a) / (b - a);
    (t * t * (3.0 - 2.0 * t)).clamp(0.0, 1.0)
}

/// Normalized progress of `elapsed_ms` through `duration_ms`, clamped to `[0, 1]`.
///
/// Non-positive durations are complete immediately.
pub(crate) fn progress(elapsed_ms: f64, duration_ms: i64) -> f32 {
    if duration_ms <= 0 {
        return 1.0;
    }
    let p = elapsed_ms / duration_ms as f64;
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 1.0) as f32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
