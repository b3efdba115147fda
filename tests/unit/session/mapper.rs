use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::foundation::error::DriftMapError;
use crate::render::text::FontBook;

fn mapper(depth: u32, nodes: u32, seed: u64) -> DriftMapper {
    DriftMapper::new(MapperConfig::new(depth, nodes).with_seed(seed))
        .unwrap()
        .with_backend(CpuBackend::new(FontBook::empty()))
}

fn small_render() -> RenderOpts {
    RenderOpts::default().with_canvas(120, 120)
}

fn small_animation(frames: u32) -> AnimationOpts {
    AnimationOpts {
        canvas: Canvas {
            width: 80,
            height: 80,
        },
        frames,
        ..AnimationOpts::default()
    }
}

#[test]
fn construction_runs_the_whole_pipeline() {
    let m = mapper(4, 5, 42);
    assert_eq!(m.config().depth, 4);
    assert_eq!(m.graph().level_sizes(), vec![5, 4, 3, 3]);
    assert_eq!(m.positions().len(), m.graph().nodes().len());
    assert!(m.graph().nodes().iter().all(|n| (0.0..=1.0).contains(&n.drift)));
}

#[test]
fn invalid_config_fails_before_generation() {
    let err = DriftMapper::new(MapperConfig::new(0, 5)).err().unwrap();
    assert!(matches!(err, DriftMapError::InvalidConfig(_)));
    let err = DriftMapper::new(MapperConfig::new(3, 0)).err().unwrap();
    assert!(matches!(err, DriftMapError::InvalidConfig(_)));
}

#[test]
fn same_seed_same_graph_and_image() {
    let mut a = mapper(3, 4, 7);
    let mut b = mapper(3, 4, 7);
    assert_eq!(a.graph(), b.graph());
    assert_eq!(a.positions(), b.positions());
    let fa = a.visualize(&small_render(), None).unwrap();
    let fb = b.visualize(&small_render(), None).unwrap();
    assert_eq!(fa, fb);
}

#[test]
fn visualize_saves_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.png");
    let mut m = mapper(3, 3, 1);
    let frame = m.visualize(&small_render(), Some(&path)).unwrap();
    assert_eq!((frame.width, frame.height), (120, 120));
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (120, 120));
}

#[test]
fn animate_into_pushes_requested_frames() {
    let mut m = mapper(3, 3, 2);
    let mut sink = InMemorySink::new();
    m.animate_into(&small_animation(3), &mut sink).unwrap();
    assert_eq!(sink.frames().len(), 3);
}

#[test]
fn create_animation_returns_the_written_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut m = mapper(3, 3, 3);
    let out = m
        .create_animation(dir.path().join("anim.gif"), &small_animation(2))
        .unwrap();
    assert_eq!(out, dir.path().join("anim.gif"));
    assert!(std::fs::read(&out).unwrap().starts_with(b"GIF89a"));
}

#[test]
fn html_embeds_png_and_gif() {
    let dir = tempfile::tempdir().unwrap();
    let mut m = mapper(3, 3, 4);
    let html = m
        .generate_html(&small_render(), &small_animation(2), dir.path().join("a.gif"))
        .unwrap();
    assert!(html.contains("data:image/png;base64,iVBORw0KGgo"));
    assert!(html.contains("data:image/gif;base64,R0lGODlh"));
    assert!(dir.path().join("a.gif").exists());
}
