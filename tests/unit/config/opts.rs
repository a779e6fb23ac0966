use super::*;

#[test]
fn defaults_are_valid() {
    let opts = ViewerOpts::default();
    opts.validate().unwrap();
    assert_eq!(opts.transition.effect, "fade");
    assert_eq!(opts.raster_scale().effective(), 1.0);
}

#[test]
fn partial_json_fills_defaults() {
    let opts = ViewerOpts::from_json_str(
        r#"{ "device_pixel_ratio": 2.0, "transition": { "effect": "slide", "duration_ms": 250 } }"#,
    )
    .unwrap();
    assert_eq!(opts.device_pixel_ratio, 2.0);
    assert_eq!(opts.refresh_hz, 60);
    assert_eq!(opts.transition.duration_ms, 250);
    let d = opts.transition.descriptor(Direction::Backward);
    assert_eq!(d.kind, EffectKind::Slide);
    assert_eq!(d.direction, Direction::Backward);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(matches!(
        ViewerOpts::from_json_str(r#"{ "render_scale": 0.0 }"#),
        Err(ViewerError::Validation(_))
    ));
    assert!(matches!(
        ViewerOpts::from_json_str(r#"{ "refresh_hz": 0 }"#),
        Err(ViewerError::Validation(_))
    ));
    assert!(matches!(
        ViewerOpts::from_json_str(r#"{ "transition": { "effect": " " } }"#),
        Err(ViewerError::Validation(_))
    ));
    assert!(matches!(
        ViewerOpts::from_json_str(r#"{ "zoom_level": 3 }"#),
        Err(ViewerError::Serde(_))
    ));
}

#[test]
fn soft_edge_is_clamped_in_descriptor() {
    let t = TransitionOpts {
        soft_edge: 4.0,
        ..Default::default()
    };
    assert_eq!(t.descriptor(Direction::Forward).soft_edge, 1.0);
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("viewer.json");
    std::fs::write(&path, r#"{ "prefetch": false }"#).unwrap();
    let opts = ViewerOpts::from_path(&path).unwrap();
    assert!(!opts.prefetch);
    assert!(ViewerOpts::from_path(dir.path().join("missing.json")).is_err());
}
