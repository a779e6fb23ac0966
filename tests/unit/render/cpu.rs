use super::*;
use crate::render::device::{DeviceKind, create_device};

fn bitmap(w: u32, h: u32, px: [u8; 4]) -> BitmapSurface {
    BitmapSurface::solid(SurfaceSize::new(w, h).unwrap(), 1.0, px).unwrap()
}

fn uniforms(progress: f32, size: SurfaceSize) -> Uniforms {
    Uniforms {
        progress,
        direction: 1.0,
        soft_edge: 0.0,
        resolution: size,
    }
}

#[test]
fn draw_requires_a_surface() {
    let mut dev = CpuDevice::new(DeviceSettings::default());
    let (prog, _) = dev.compile_program(&EffectKind::Fade).unwrap();
    let a = dev.upload_texture(&bitmap(2, 2, [0; 4])).unwrap();
    let size = SurfaceSize::new(2, 2).unwrap();
    let err = dev.draw(prog, a, a, &uniforms(0.0, size)).unwrap_err();
    assert!(err.is_graphics_init());
}

#[test]
fn oversized_surface_is_a_graphics_init_error() {
    let mut dev = CpuDevice::new(DeviceSettings::default());
    let err = dev
        .resize(SurfaceSize::new(MAX_DIM + 1, 1).unwrap())
        .unwrap_err();
    assert!(err.is_graphics_init());
}

#[test]
fn fade_draw_covers_every_pixel() {
    let mut dev = create_device(DeviceKind::Cpu, DeviceSettings::default()).unwrap();
    let size = SurfaceSize::new(3, 2).unwrap();
    dev.resize(size).unwrap();
    let (prog, kind) = dev.compile_program(&EffectKind::Fade).unwrap();
    assert_eq!(kind, EffectKind::Fade);
    let a = dev.upload_texture(&bitmap(3, 2, [255, 0, 0, 255])).unwrap();
    let b = dev.upload_texture(&bitmap(3, 2, [0, 0, 255, 255])).unwrap();
    assert_eq!(dev.live_textures(), 2);

    dev.draw(prog, a, b, &uniforms(0.0, size)).unwrap();
    let out = dev.read_pixels(1.0).unwrap();
    assert_eq!(out, bitmap(3, 2, [255, 0, 0, 255]));

    dev.draw(prog, a, b, &uniforms(1.0, size)).unwrap();
    let out = dev.read_pixels(2.0).unwrap();
    assert_eq!(out.pixel(2, 1), Some([0, 0, 255, 255]));
    assert_eq!(out.scale(), 2.0);

    dev.release_texture(a);
    dev.release_texture(b);
    assert_eq!(dev.live_textures(), 0);
}

#[test]
fn unknown_effect_compiles_to_fade_and_blends_linearly() {
    let mut dev = CpuDevice::new(DeviceSettings::default());
    let size = SurfaceSize::new(2, 2).unwrap();
    dev.resize(size).unwrap();
    let (prog, kind) = dev.compile_program(&EffectKind::parse("ripple")).unwrap();
    assert_eq!(kind, EffectKind::Fade);
    let a = dev.upload_texture(&bitmap(2, 2, [255, 0, 0, 255])).unwrap();
    let b = dev.upload_texture(&bitmap(2, 2, [0, 0, 255, 255])).unwrap();
    dev.draw(prog, a, b, &uniforms(0.5, size)).unwrap();
    let out = dev.read_pixels(1.0).unwrap();
    let expected = crate::effects::composite::crossfade([255, 0, 0, 255], [0, 0, 255, 255], 0.5);
    assert_eq!(out.pixel(1, 1), Some(expected));
}

#[test]
fn clear_color_backs_transparent_fragments() {
    let mut dev = CpuDevice::new(DeviceSettings {
        clear_rgba: Some([0, 0, 0, 255]),
        ..Default::default()
    });
    let size = SurfaceSize::new(1, 1).unwrap();
    dev.resize(size).unwrap();
    let (prog, _) = dev.compile_program(&EffectKind::Fade).unwrap();
    let a = dev.upload_texture(&bitmap(1, 1, [0; 4])).unwrap();
    dev.draw(prog, a, a, &uniforms(0.0, size)).unwrap();
    assert_eq!(dev.read_pixels(1.0).unwrap().pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn degenerate_surface_is_rejected_and_draw_does_not_panic() {
    let mut dev = CpuDevice::new(DeviceSettings::default());
    for size in [
        SurfaceSize {
            width: 0,
            height: 4,
        },
        SurfaceSize {
            width: 4,
            height: 0,
        },
    ] {
        assert!(matches!(dev.resize(size), Err(ViewerError::Validation(_))));
    }
    assert_eq!(dev.size(), None);

    let (prog, _) = dev.compile_program(&EffectKind::Fade).unwrap();
    let a = dev.upload_texture(&bitmap(1, 1, [0; 4])).unwrap();
    let ok = SurfaceSize::new(1, 1).unwrap();
    assert!(dev.draw(prog, a, a, &uniforms(0.5, ok)).is_err());
}
