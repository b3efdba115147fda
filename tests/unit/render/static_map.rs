use super::*;
use crate::drift::assign::assign_drift;
use crate::foundation::config::MapperConfig;
use crate::foundation::random::seeded;
use crate::graph::generate::generate_graph;
use crate::layout::spiral::spiral_layout;
use crate::render::text::FontBook;

fn world(seed: u64) -> (DriftGraph, Positions) {
    let mut rng = seeded(seed);
    let mut graph = generate_graph(&MapperConfig::new(3, 4), &mut rng).unwrap();
    let positions = spiral_layout(&graph, &mut rng);
    assign_drift(&mut graph, &mut rng);
    (graph, positions)
}

#[test]
fn defaults_match_the_reference_figure() {
    let o = RenderOpts::default();
    assert_eq!((o.canvas.width, o.canvas.height), (1400, 1400));
    assert!(o.show_legend);
    assert_eq!(o.background, BACKGROUND);
}

#[test]
fn frame_is_opaque_and_sized_to_the_canvas() {
    let (graph, positions) = world(5);
    let mut backend = CpuBackend::new(FontBook::empty());
    let opts = RenderOpts::default().with_canvas(150, 120);
    let frame = render_static(&graph, &positions, &opts, &mut backend, &mut seeded(1), None).unwrap();
    assert_eq!((frame.width, frame.height), (150, 120));
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn legend_changes_the_image() {
    let (graph, positions) = world(5);
    let mut backend = CpuBackend::new(FontBook::empty());
    let with = RenderOpts::default().with_canvas(160, 160);
    let without = with.with_legend(false);
    let a = render_static(&graph, &positions, &with, &mut backend, &mut seeded(1), None).unwrap();
    let b =
        render_static(&graph, &positions, &without, &mut backend, &mut seeded(1), None).unwrap();
    assert_ne!(a, b);
}

#[test]
fn invalid_canvas_is_rejected() {
    let (graph, positions) = world(5);
    let mut backend = CpuBackend::new(FontBook::empty());
    let opts = RenderOpts::default().with_canvas(0, 100);
    assert!(render_static(&graph, &positions, &opts, &mut backend, &mut seeded(1), None).is_err());
}

#[test]
fn save_path_writes_the_frame() {
    let (graph, positions) = world(6);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.bmp");
    let mut backend = CpuBackend::new(FontBook::empty());
    let opts = RenderOpts::default().with_canvas(64, 64);
    render_static(&graph, &positions, &opts, &mut backend, &mut seeded(2), Some(&path)).unwrap();
    assert!(path.exists());
}
