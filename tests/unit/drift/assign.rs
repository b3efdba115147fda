use super::*;
use crate::foundation::config::MapperConfig;
use crate::foundation::random::seeded;
use crate::graph::generate::generate_graph;
use crate::graph::model::AttributionClass;

fn meta(glyph: Glyph, inertia: f64) -> NodeMetadata {
    NodeMetadata {
        recursion_depth: 1,
        attribution_entropy: 0.5,
        loopback_density: 0.5,
        classifier_inertia: inertia,
        attribution_class: AttributionClass::Moderate,
        glyph,
    }
}

#[test]
fn classifier_flag_from_glyph_alone() {
    assert!(is_classifier(&meta(Glyph::Classifier, 0.0)));
}

#[test]
fn classifier_flag_from_inertia_alone() {
    assert!(is_classifier(&meta(Glyph::Decay, 0.71)));
    assert!(!is_classifier(&meta(Glyph::Decay, 0.7)));
    assert!(!is_classifier(&meta(Glyph::Feedback, 0.2)));
}

#[test]
fn edge_drift_without_noise_is_the_mean() {
    assert!((edge_drift(0.4, 0.6, 0.0) - 0.5).abs() < 1e-12);
    assert_eq!(edge_drift(0.9, 1.0, 0.5), 1.0);
    assert_eq!(edge_drift(0.0, 0.1, -0.5), 0.0);
}

#[test]
fn node_drift_grows_with_depth_and_caps() {
    assert!((node_drift(0.5, 0, 4) - 0.5).abs() < 1e-12);
    assert!((node_drift(0.5, 2, 4) - 0.75).abs() < 1e-12);
    assert_eq!(node_drift(0.9, 3, 4), 1.0);
}

#[test]
fn assigned_values_are_in_range_and_consistent() {
    for seed in 0..10 {
        let cfg = MapperConfig::new(5, 8);
        let mut rng = seeded(seed);
        let mut g = generate_graph(&cfg, &mut rng).unwrap();
        assign_drift(&mut g, &mut rng);
        for n in g.nodes() {
            assert!((0.0..=1.0).contains(&n.drift));
            assert_eq!(
                n.drift,
                node_drift(n.metadata.attribution_entropy, n.level, 5)
            );
            assert_eq!(n.is_classifier, is_classifier(&n.metadata));
        }
        for e in g.edges() {
            assert!((0.0..=1.0).contains(&e.drift));
        }
    }
}
