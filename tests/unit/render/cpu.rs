use super::*;
use crate::render::plan::TextOp;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas {
        width: w,
        height: h,
    }
}

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    Rect::new(x0, y0, x1, y1).to_path(0.1)
}

#[test]
fn clear_colour_fills_untouched_pixels() {
    let mut backend = CpuBackend::new(FontBook::empty());
    let frame = backend
        .render(&DrawList::new(), canvas(8, 8), Some(Rgba8::rgb(10, 20, 30)))
        .unwrap();
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(4, 4), Some([10, 20, 30, 255]));
}

#[test]
fn fill_path_covers_its_interior() {
    let mut backend = CpuBackend::new(FontBook::empty());
    let mut list = DrawList::new();
    list.fill(square(4.0, 4.0, 28.0, 28.0), Rgba8::rgb(255, 0, 0));
    let frame = backend.render(&list, canvas(32, 32), Some(Rgba8::WHITE)).unwrap();
    assert_eq!(frame.pixel(16, 16), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(1, 1), Some([255, 255, 255, 255]));
}

#[test]
fn transparent_background_when_not_cleared() {
    let mut backend = CpuBackend::new(FontBook::empty());
    let mut list = DrawList::new();
    list.fill(square(0.0, 0.0, 8.0, 16.0), Rgba8::rgb(0, 0, 255));
    let frame = backend.render(&list, canvas(16, 16), None).unwrap();
    assert_eq!(frame.pixel(4, 8), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(12, 8), Some([0, 0, 0, 0]));
}

#[test]
fn stroke_paints_along_the_path() {
    let mut backend = CpuBackend::new(FontBook::empty());
    let mut line = BezPath::new();
    line.move_to((0.0, 16.0));
    line.line_to((32.0, 16.0));
    let mut list = DrawList::new();
    list.stroke(line, Rgba8::BLACK, 4.0);
    let frame = backend.render(&list, canvas(32, 32), Some(Rgba8::WHITE)).unwrap();
    assert_eq!(frame.pixel(16, 16), Some([0, 0, 0, 255]));
    assert_eq!(frame.pixel(16, 4), Some([255, 255, 255, 255]));
}

#[test]
fn invalid_stroke_width_is_an_error() {
    let mut backend = CpuBackend::new(FontBook::empty());
    let mut line = BezPath::new();
    line.move_to((0.0, 0.0));
    line.line_to((4.0, 4.0));
    let mut list = DrawList::new();
    list.stroke(line, Rgba8::BLACK, 0.0);
    assert!(backend.render(&list, canvas(8, 8), None).is_err());
}

#[test]
fn text_without_fonts_is_skipped() {
    let mut backend = CpuBackend::new(FontBook::empty());
    let mut list = DrawList::new();
    list.text(
        TextOp::centered("Classifier Lock", Point::new(16.0, 16.0), 12.0, Rgba8::BLACK)
            .backdrop(Rgba8::rgb(255, 0, 0), 4.0),
    );
    let frame = backend.render(&list, canvas(32, 32), Some(Rgba8::WHITE)).unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
}

#[test]
fn zero_sized_canvas_is_rejected() {
    let mut backend = CpuBackend::new(FontBook::empty());
    assert!(backend.render(&DrawList::new(), canvas(0, 8), None).is_err());
}

#[test]
fn context_is_reused_across_sizes() {
    let mut backend = CpuBackend::new(FontBook::empty());
    let mut list = DrawList::new();
    list.fill(square(0.0, 0.0, 64.0, 64.0), Rgba8::rgb(0, 255, 0));
    let a = backend.render(&list, canvas(16, 16), None).unwrap();
    let b = backend.render(&list, canvas(24, 12), None).unwrap();
    let c = backend.render(&list, canvas(16, 16), None).unwrap();
    assert_eq!(b.data.len(), 24 * 12 * 4);
    assert_eq!(a, c);
}

#[test]
fn system_text_marks_pixels_when_fonts_exist() {
    let mut backend = CpuBackend::system();
    if backend.fonts().face(FaceRole::Regular).is_none() {
        return;
    }
    let mut list = DrawList::new();
    list.text(TextOp::centered("Drift", Point::new(32.0, 16.0), 20.0, Rgba8::BLACK));
    let frame = backend.render(&list, canvas(64, 32), Some(Rgba8::WHITE)).unwrap();
    assert!(frame.data.chunks_exact(4).any(|px| px[0] < 128));
}
