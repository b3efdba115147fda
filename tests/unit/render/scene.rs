use super::*;
use crate::drift::assign::assign_drift;
use crate::foundation::config::MapperConfig;
use crate::foundation::core::Canvas;
use crate::foundation::random::seeded;
use crate::graph::generate::generate_graph;
use crate::layout::spiral::spiral_layout;
use crate::render::plan::DrawOp;

fn pipeline(depth: u32, nodes: u32, seed: u64) -> (DriftGraph, Positions, Viewport) {
    let mut rng = seeded(seed);
    let mut graph = generate_graph(&MapperConfig::new(depth, nodes), &mut rng).unwrap();
    let positions = spiral_layout(&graph, &mut rng);
    assign_drift(&mut graph, &mut rng);
    let vp = Viewport::fit(
        &positions,
        Canvas {
            width: 700,
            height: 700,
        },
    );
    (graph, positions, vp)
}

#[test]
fn node_area_shrinks_with_level_and_is_floored() {
    assert_eq!(node_area_pt2(0), 300.0);
    assert!((node_area_pt2(2) - 210.0).abs() < 1e-9);
    assert_eq!(node_area_pt2(7), 20.0);
    assert_eq!(node_area_pt2(40), 20.0);
}

#[test]
fn edge_styling_follows_drift() {
    assert_eq!(edge_width_pt(0.0), 2.0);
    assert_eq!(edge_width_pt(1.0), 0.5);
    assert_eq!(edge_color(0.0), EDGE_FLOW.sample(1.0));
    assert_eq!(edge_color(1.0), EDGE_FLOW.sample(0.0));
}

#[test]
fn edge_layer_has_one_stroke_per_edge_at_requested_opacity() {
    let (graph, positions, vp) = pipeline(4, 6, 3);
    let list = compile_edge_layer(&graph, &positions, &vp, |_| 0.5).unwrap();
    assert_eq!(list.len(), graph.edges().len());
    for (op, edge) in list.ops.iter().zip(graph.edges()) {
        let DrawOp::StrokePath { color, .. } = op else {
            panic!("expected a stroke");
        };
        assert_eq!(*color, edge_color(edge.drift).with_opacity(0.5));
    }
}

#[test]
fn arrows_are_a_subset_and_seed_stable() {
    let (graph, positions, vp) = pipeline(4, 6, 3);
    let a = compile_arrows(&graph, &positions, &vp, &mut seeded(9)).unwrap();
    let b = compile_arrows(&graph, &positions, &vp, &mut seeded(9)).unwrap();
    assert_eq!(a, b);
    // shaft + head per kept arrow
    assert_eq!(a.len() % 2, 0);
    assert!(a.len() <= 2 * graph.edges().len());
}

#[test]
fn roughly_three_in_ten_edges_get_an_arrow() {
    let (graph, positions, vp) = pipeline(6, 12, 21);
    assert!(!graph.edges().is_empty());

    let mut kept = 0usize;
    let mut total = 0usize;
    for seed in 0..200 {
        let arrows = compile_arrows(&graph, &positions, &vp, &mut seeded(seed)).unwrap();
        kept += arrows.len() / 2;
        total += graph.edges().len();
    }
    let rate = kept as f64 / total as f64;
    assert!((rate - 0.3).abs() < 0.05, "arrow rate {rate}");
}

#[test]
fn arrow_draws_consume_one_value_per_edge() {
    let (graph, positions, vp) = pipeline(3, 4, 5);
    let mut rng = seeded(11);
    compile_arrows(&graph, &positions, &vp, &mut rng).unwrap();
    let after: f64 = rng.r#gen();

    let mut reference = seeded(11);
    for _ in graph.edges() {
        let _: f64 = reference.r#gen();
    }
    assert_eq!(after, reference.r#gen::<f64>());
}

#[test]
fn static_layer_carries_titles_annotation_and_legend() {
    let (graph, positions, vp) = pipeline(4, 6, 42);
    let list = compile_static_layer(&graph, &positions, &vp, StaticLayerStyle::figure(true)).unwrap();
    let lines: Vec<&str> = list.text_lines().collect();
    assert!(lines.contains(&TITLE));
    assert!(lines.contains(&STATIC_SUBTITLE));
    assert!(lines.contains(&COMMAND_ANNOTATION));
    assert!(lines.contains(&LEGEND_HEADING_TEXT));
    assert!(lines.contains(&"DRIFT LEVEL"));
    for glyph in Glyph::ALL {
        assert!(lines.contains(&glyph.label()));
    }
}

#[test]
fn legend_is_optional_and_subtitle_switches() {
    let (graph, positions, vp) = pipeline(4, 6, 42);
    let list =
        compile_static_layer(&graph, &positions, &vp, StaticLayerStyle::animation(false)).unwrap();
    let lines: Vec<&str> = list.text_lines().collect();
    assert!(lines.contains(&ANIMATION_SUBTITLE));
    assert!(!lines.contains(&STATIC_SUBTITLE));
    assert!(!lines.contains(&LEGEND_HEADING_TEXT));
}

#[test]
fn every_node_gets_an_entropy_label_and_classifiers_a_lock() {
    let (graph, positions, vp) = pipeline(5, 8, 7);
    let list = compile_static_layer(&graph, &positions, &vp, StaticLayerStyle::figure(false)).unwrap();
    let lines: Vec<&str> = list.text_lines().collect();
    for node in graph.nodes() {
        let label = format!("{:.2}", node.metadata.attribution_entropy);
        assert!(lines.contains(&label.as_str()));
    }
    let locks = lines.iter().filter(|l| **l == CLASSIFIER_LOCK).count();
    assert_eq!(locks, graph.classifier_count());
}

#[test]
fn missing_position_is_a_render_error() {
    let (graph, _, vp) = pipeline(3, 3, 1);
    let empty = Positions::default();
    let err = compile_static_layer(&graph, &empty, &vp, StaticLayerStyle::figure(true)).unwrap_err();
    assert!(matches!(err, DriftMapError::Render(_)));
}
