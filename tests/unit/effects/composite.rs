use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn crossfade_t_0_is_a_and_t_1_is_b() {
    let a = [10, 20, 30, 40];
    let b = [200, 210, 220, 230];
    assert_eq!(crossfade(a, b, 0.0), a);
    assert_eq!(crossfade(a, b, 1.0), b);
}

#[test]
fn crossfade_midpoint_is_linear() {
    let a = [255, 0, 0, 255];
    let b = [0, 0, 255, 255];
    assert_eq!(crossfade(a, b, 0.5), [127, 0, 128, 255]);
}

#[test]
fn hard_wipe_endpoints() {
    assert_eq!(wipe_mask(0.01, 0.0, 0.0), 0.0);
    assert_eq!(wipe_mask(0.99, 1.0, 0.0), 1.0);
    assert_eq!(wipe_mask(0.25, 0.5, 0.0), 1.0);
    assert_eq!(wipe_mask(0.75, 0.5, 0.0), 0.0);
}

#[test]
fn soft_wipe_endpoints_and_feather() {
    assert_eq!(wipe_mask(0.0, 0.0, 0.2), 0.0);
    assert_eq!(wipe_mask(1.0, 1.0, 0.2), 1.0);
    let mid = wipe_mask(0.5, 0.5, 0.2);
    assert!((mid - 0.5).abs() < 1e-5, "feather centre should be half covered, got {mid}");
}
