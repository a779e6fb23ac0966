use super::*;
use crate::foundation::core::SurfaceSize;

const RED: PremulRgba8 = [255, 0, 0, 255];
const BLUE: PremulRgba8 = [0, 0, 255, 255];

fn solid(w: u32, h: u32, px: PremulRgba8) -> Vec<u8> {
    px.repeat((w * h) as usize)
}

fn uniforms(progress: f32, direction: f32) -> Uniforms {
    Uniforms {
        progress,
        direction,
        soft_edge: 0.0,
        resolution: SurfaceSize::new(4, 4).unwrap(),
    }
}

fn views<'a>(a: &'a [u8], b: &'a [u8]) -> (TextureView<'a>, TextureView<'a>) {
    let size = SurfaceSize::new(4, 4).unwrap();
    (TextureView::new(size, a), TextureView::new(size, b))
}

#[test]
fn fade_midpoint_blends_linearly() {
    let (a, b) = (solid(4, 4, RED), solid(4, 4, BLUE));
    let (from, to) = views(&a, &b);
    let px = FadeProgram.shade(Point::new(0.5, 0.5), &from, &to, &uniforms(0.5, 1.0));
    assert_eq!(px, [127, 0, 128, 255]);
}

#[test]
fn slide_forward_reveals_from_the_right() {
    let (a, b) = (solid(4, 4, RED), solid(4, 4, BLUE));
    let (from, to) = views(&a, &b);
    let u = uniforms(0.5, 1.0);
    assert_eq!(SlideProgram.shade(Point::new(0.875, 0.5), &from, &to, &u), BLUE);
    assert_eq!(SlideProgram.shade(Point::new(0.125, 0.5), &from, &to, &u), RED);
}

#[test]
fn slide_backward_reveals_from_the_left() {
    let (a, b) = (solid(4, 4, RED), solid(4, 4, BLUE));
    let (from, to) = views(&a, &b);
    let u = uniforms(0.5, -1.0);
    assert_eq!(SlideProgram.shade(Point::new(0.125, 0.5), &from, &to, &u), BLUE);
    assert_eq!(SlideProgram.shade(Point::new(0.875, 0.5), &from, &to, &u), RED);
}

#[test]
fn zoom_endpoints_show_each_page() {
    let (a, b) = (solid(4, 4, RED), solid(4, 4, BLUE));
    let (from, to) = views(&a, &b);
    let corner = Point::new(0.125, 0.125);
    assert_eq!(ZoomProgram.shade(corner, &from, &to, &uniforms(0.0, 1.0)), RED);
    assert_eq!(ZoomProgram.shade(corner, &from, &to, &uniforms(1.0, 1.0)), BLUE);
}

#[test]
fn zoom_holds_the_outgoing_page_until_halfway() {
    let (a, b) = (solid(4, 4, RED), solid(4, 4, BLUE));
    let (from, to) = views(&a, &b);
    let centre = Point::new(0.5, 0.5);
    assert_eq!(ZoomProgram.shade(centre, &from, &to, &uniforms(0.4, 1.0)), RED);
    let late = ZoomProgram.shade(centre, &from, &to, &uniforms(0.9, 1.0));
    assert!(late[2] > late[0], "incoming page should dominate late in the run: {late:?}");
}
