use super::*;

#[test]
fn effect_kind_parses_builtins_and_aliases() {
    assert_eq!(EffectKind::parse("Fade"), EffectKind::Fade);
    assert_eq!(EffectKind::parse(" crossfade "), EffectKind::Fade);
    assert_eq!(EffectKind::parse("SLIDE"), EffectKind::Slide);
    assert_eq!(EffectKind::parse("wipe"), EffectKind::Slide);
    assert_eq!(EffectKind::parse("zoom"), EffectKind::Zoom);
    assert_eq!(
        EffectKind::parse("Swirl"),
        EffectKind::Named("swirl".to_string())
    );
    assert_eq!(EffectKind::Named("swirl".into()).to_string(), "swirl");
}

#[test]
fn direction_follows_delta_sign() {
    assert_eq!(Direction::from_delta(3), Direction::Forward);
    assert_eq!(Direction::from_delta(-1), Direction::Backward);
    assert_eq!(Direction::Forward.sign(), 1.0);
    assert_eq!(Direction::Backward.sign(), -1.0);
}

#[test]
fn texture_sampling_modes() {
    // 2x1: red, blue
    let data = [255, 0, 0, 255, 0, 0, 255, 255];
    let tex = TextureView::new(SurfaceSize::new(2, 1).unwrap(), &data);
    assert_eq!(tex.sample_clamped(Point::new(0.25, 0.5)), [255, 0, 0, 255]);
    assert_eq!(tex.sample_clamped(Point::new(0.75, 0.5)), [0, 0, 255, 255]);
    assert_eq!(tex.sample_clamped(Point::new(-3.0, 9.0)), [255, 0, 0, 255]);
    assert_eq!(tex.sample_clamped(Point::new(4.0, 0.5)), [0, 0, 255, 255]);
    assert_eq!(tex.sample_border(Point::new(-0.1, 0.5)), [0; 4]);
    assert_eq!(tex.sample_border(Point::new(1.0, 0.5)), [0; 4]);
    assert_eq!(tex.sample_border(Point::new(0.75, 0.5)), [0, 0, 255, 255]);
}
