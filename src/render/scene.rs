//! Scene compilation: graph + positions into pixel-space [`DrawList`]s.
//!
//! The figure is split into three layers so the animator can re-draw only what changes:
//!
//! - the edge layer (one stroked segment per edge, opacity chosen by the caller),
//! - arrowheads (static image only, randomly thinned),
//! - the static layer: nodes, glyphs, classifier overlays, title, annotation and legend.

use crate::foundation::core::{BezPath, Point, Rect, Rgba8, Vec2};
use crate::foundation::error::{DriftMapError, DriftMapResult};
use crate::graph::model::{DriftGraph, Edge, Glyph, NodeId};
use crate::layout::spiral::Positions;
use crate::render::palette::{
    ANNOTATION, BACKGROUND, CLASSIFIER, DRIFT_PATH, EDGE_FLOW, LEGEND_HEADING, NODE_ENTROPY,
    NODE_OUTLINE,
};
use crate::render::plan::{DrawList, FaceRole, HAlign, TextOp, VAlign};
use crate::render::viewport::Viewport;
use kurbo::Shape;
use rand::Rng;

pub const TITLE: &str = "Recursive QKOV Attribution Drift Map";
pub const STATIC_SUBTITLE: &str = "Symbolic Loopback Density Analysis";
pub const ANIMATION_SUBTITLE: &str = "Symbolic Loopback Density Animation";

/// Command reference printed under the figure and in the HTML report.
pub const COMMAND_ANNOTATION: &str =
    ".p/qkov.recursive.map{drift_analysis=true, glyph_layer=\"∴⇌☍\"}";

pub const LEGEND_HEADING_TEXT: &str = "SYMBOL LEGEND";
pub const CLASSIFIER_LOCK: &str = "Classifier Lock";

pub const LEGEND_EXPLANATION: [&str; 8] = [
    "Recursive QKOV attribution mapping reveals how attention flows through",
    "transformer architecture with symbolic attribution markers.",
    "",
    "Bright paths show low drift (stable attribution), while dim paths",
    "indicate high drift where attribution becomes unstable.",
    "",
    "Classifier inertia nodes (⧖) mark where Q→K resonance stalled",
    "due to classification system interference.",
];

const EDGE_ALPHA: f64 = 0.7;
const NODE_ALPHA: f64 = 0.7;
const ARROW_KEEP_PROBABILITY: f64 = 0.3;
const ARROW_START: f64 = 0.7;
const ARROW_SHAFT: f64 = 0.2;
const ARROW_HEAD_LENGTH: f64 = 0.2;
const ARROW_HEAD_WIDTH: f64 = 0.15;
const MIN_NODE_AREA_PT2: f64 = 20.0;
const CLASSIFIER_RING_RADIUS: f64 = 0.5;
const GRADIENT_STEPS: usize = 100;
const TOLERANCE: f64 = 0.1;

/// What differs between the static figure and the animation backdrop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticLayerStyle {
    pub subtitle: &'static str,
    pub show_legend: bool,
}

impl StaticLayerStyle {
    pub fn figure(show_legend: bool) -> Self {
        Self {
            subtitle: STATIC_SUBTITLE,
            show_legend,
        }
    }

    pub fn animation(show_legend: bool) -> Self {
        Self {
            subtitle: ANIMATION_SUBTITLE,
            show_legend,
        }
    }
}

/// Node marker area in pt², shrinking with depth and floored for very deep levels.
pub fn node_area_pt2(level: u32) -> f64 {
    (300.0 * (1.0 - 0.15 * f64::from(level))).max(MIN_NODE_AREA_PT2)
}

/// Edge stroke width in pt.
pub fn edge_width_pt(drift: f64) -> f64 {
    1.5 * (1.0 - drift) + 0.5
}

/// Edge colour before opacity: low drift is green, high drift red.
pub fn edge_color(drift: f64) -> Rgba8 {
    EDGE_FLOW.sample(1.0 - drift)
}

fn position(positions: &Positions, id: NodeId) -> DriftMapResult<Point> {
    positions
        .get(id)
        .ok_or_else(|| DriftMapError::render(format!("node {id} has no position")))
}

fn segment(a: Point, b: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    path
}

/// One stroked segment per edge, in edge order, at the opacity `opacity(edge)` returns.
pub fn compile_edge_layer(
    graph: &DriftGraph,
    positions: &Positions,
    vp: &Viewport,
    mut opacity: impl FnMut(&Edge) -> f64,
) -> DriftMapResult<DrawList> {
    let mut list = DrawList::new();
    for edge in graph.edges() {
        let a = vp.to_px(position(positions, edge.source)?);
        let b = vp.to_px(position(positions, edge.target)?);
        list.stroke(
            segment(a, b),
            edge_color(edge.drift).with_opacity(opacity(edge)),
            vp.pt(edge_width_pt(edge.drift)),
        );
    }
    Ok(list)
}

/// Edge layer of the static figure (uniform alpha 0.7).
pub fn compile_static_edges(
    graph: &DriftGraph,
    positions: &Positions,
    vp: &Viewport,
) -> DriftMapResult<DrawList> {
    compile_edge_layer(graph, positions, vp, |_| EDGE_ALPHA)
}

/// Direction arrows 70 % along some edges.
///
/// One uniform draw per edge in edge order; the arrow is kept when the draw is below 0.3.
pub fn compile_arrows<R: Rng>(
    graph: &DriftGraph,
    positions: &Positions,
    vp: &Viewport,
    rng: &mut R,
) -> DriftMapResult<DrawList> {
    let mut list = DrawList::new();
    for edge in graph.edges() {
        if rng.r#gen::<f64>() >= ARROW_KEEP_PROBABILITY {
            continue;
        }
        let u = position(positions, edge.source)?;
        let v = position(positions, edge.target)?;
        let d = v - u;
        let len = d.hypot();
        if !len.is_finite() || len <= 0.0 {
            continue;
        }
        let dir = d / len;
        let normal = Vec2::new(-dir.y, dir.x);

        let start = u.lerp(v, ARROW_START);
        let base = start + dir * ARROW_SHAFT;
        let tip = base + dir * ARROW_HEAD_LENGTH;
        let half = normal * (ARROW_HEAD_WIDTH / 2.0);
        let color = edge_color(edge.drift).with_opacity(EDGE_ALPHA);

        list.stroke(
            segment(vp.to_px(start), vp.to_px(base)),
            color,
            vp.pt(edge_width_pt(edge.drift)),
        );
        let mut head = BezPath::new();
        head.move_to(vp.to_px(base + half));
        head.line_to(vp.to_px(tip));
        head.line_to(vp.to_px(base - half));
        head.close_path();
        list.fill(head, color);
    }
    Ok(list)
}

/// Everything that does not change between animation frames.
///
/// Drawn over the edges; the background is left transparent.
pub fn compile_static_layer(
    graph: &DriftGraph,
    positions: &Positions,
    vp: &Viewport,
    style: StaticLayerStyle,
) -> DriftMapResult<DrawList> {
    let mut list = DrawList::new();
    compile_nodes(&mut list, graph, positions, vp)?;
    compile_classifier_overlays(&mut list, graph, positions, vp)?;
    compile_titles(&mut list, vp, style.subtitle);
    if style.show_legend {
        compile_legend(&mut list, vp);
    }
    Ok(list)
}

fn compile_nodes(
    list: &mut DrawList,
    graph: &DriftGraph,
    positions: &Positions,
    vp: &Viewport,
) -> DriftMapResult<()> {
    for node in graph.nodes() {
        let world = position(positions, node.id)?;
        let center = vp.to_px(world);
        let entropy = node.metadata.attribution_entropy;
        let area = node_area_pt2(node.level);
        let radius = vp.pt((area / std::f64::consts::PI).sqrt());

        let circle = kurbo::Circle::new(center, radius).to_path(TOLERANCE);
        list.fill(circle.clone(), NODE_ENTROPY.sample(entropy).with_opacity(NODE_ALPHA));
        list.stroke(circle, NODE_OUTLINE.with_opacity(NODE_ALPHA), vp.pt(1.0));

        let glyph_color = if entropy > 0.5 { Rgba8::WHITE } else { Rgba8::BLACK };
        list.text(
            TextOp::centered(
                node.metadata.glyph.symbol(),
                center,
                vp.pt(10.0 + area / 80.0) as f32,
                glyph_color,
            )
            .face(FaceRole::Symbol)
            .halo(Rgba8::BLACK, vp.pt(2.0) as f32),
        );

        list.text(
            TextOp::centered(
                format!("{entropy:.2}"),
                vp.to_px(world - Vec2::new(0.0, 0.4)),
                vp.pt(7.0) as f32,
                Rgba8::BLACK,
            )
            .backdrop(Rgba8::WHITE.with_opacity(0.5), vp.pt(1.0)),
        );
    }
    Ok(())
}

fn dashed_ring(center: Point, radius: f64, dashes: &[f64]) -> BezPath {
    let ring = kurbo::Circle::new(center, radius).to_path(TOLERANCE);
    kurbo::dash(ring.iter(), 0.0, dashes).collect()
}

fn compile_classifier_overlays(
    list: &mut DrawList,
    graph: &DriftGraph,
    positions: &Positions,
    vp: &Viewport,
) -> DriftMapResult<()> {
    let dashes = [vp.pt(7.4), vp.pt(3.2)];
    for node in graph.nodes().iter().filter(|n| n.is_classifier) {
        let world = position(positions, node.id)?;
        list.stroke(
            dashed_ring(vp.to_px(world), vp.units(CLASSIFIER_RING_RADIUS), &dashes),
            CLASSIFIER.with_opacity(0.8),
            vp.pt(2.0),
        );
        list.text(
            TextOp::centered(
                Glyph::Classifier.symbol(),
                vp.to_px(world + Vec2::new(0.0, 0.7)),
                vp.pt(14.0) as f32,
                CLASSIFIER,
            )
            .face(FaceRole::Symbol)
            .halo(Rgba8::WHITE, vp.pt(3.0) as f32),
        );
        list.text(
            TextOp::centered(
                CLASSIFIER_LOCK,
                vp.to_px(world + Vec2::new(0.0, 1.1)),
                vp.pt(8.0) as f32,
                CLASSIFIER,
            )
            .backdrop(Rgba8::WHITE.with_opacity(0.7), vp.pt(1.0)),
        );
    }
    Ok(())
}

fn compile_titles(list: &mut DrawList, vp: &Viewport, subtitle: &str) {
    let plot = vp.plot();
    let mut title = TextOp::centered(
        TITLE,
        Point::new(f64::from(vp.canvas().width) / 2.0, plot.y0 / 2.0),
        vp.pt(16.0) as f32,
        Rgba8::BLACK,
    )
    .face(FaceRole::Bold);
    title.lines.push(subtitle.to_string());
    list.text(title);

    list.text(
        TextOp::centered(
            COMMAND_ANNOTATION,
            Point::new(plot.center().x, plot.y1 - 0.02 * plot.height()),
            vp.pt(10.0) as f32,
            ANNOTATION.with_opacity(0.8),
        )
        .face(FaceRole::Symbol)
        .align(HAlign::Center, VAlign::Bottom),
    );
}

/// Legend box in the top-left corner of the world bounds, laid out in points.
fn compile_legend(list: &mut DrawList, vp: &Viewport) {
    let world = vp.world();
    let origin = vp.to_px(Point::new(world.x0 + 0.5, world.y1 - 0.5));
    let at = |x_pt: f64, y_pt: f64| Point::new(origin.x + vp.pt(x_pt), origin.y + vp.pt(y_pt));
    let size = |pt: f64| vp.pt(pt) as f32;

    let frame = Rect::from_points(at(0.0, 0.0), at(230.0, 200.0)).to_path(TOLERANCE);
    list.fill(frame.clone(), Rgba8::WHITE.with_opacity(0.8));
    list.stroke(frame, NODE_OUTLINE.with_opacity(0.8), vp.pt(1.0));

    list.text(
        TextOp::centered(LEGEND_HEADING_TEXT, at(115.0, 18.0), size(12.0), Rgba8::BLACK)
            .backdrop(LEGEND_HEADING.with_opacity(0.7), vp.pt(3.0)),
    );

    for (i, glyph) in Glyph::ALL.iter().enumerate() {
        let y = 48.0 + 22.0 * i as f64;
        list.text(
            TextOp::centered(glyph.symbol(), at(20.0, y), size(14.0), Rgba8::BLACK)
                .face(FaceRole::Symbol),
        );
        list.text(
            TextOp::centered(glyph.label(), at(42.0, y), size(10.0), Rgba8::BLACK)
                .align(HAlign::Left, VAlign::Center),
        );
    }

    list.text(TextOp::centered(
        "DRIFT LEVEL",
        at(115.0, 140.0),
        size(10.0),
        Rgba8::BLACK,
    ));

    let (x0, x1) = (20.0, 210.0);
    let (top, bottom) = (at(0.0, 152.0).y, at(0.0, 164.0).y);
    let step = (x1 - x0) / GRADIENT_STEPS as f64;
    for k in 0..GRADIENT_STEPS {
        let t = k as f64 / (GRADIENT_STEPS - 1) as f64;
        let left = at(x0 + step * k as f64, 0.0).x;
        // slices overlap by half a pixel to avoid seams
        let right = at(x0 + step * (k + 1) as f64, 0.0).x + if k + 1 < GRADIENT_STEPS { 0.5 } else { 0.0 };
        list.fill(
            Rect::new(left, top, right, bottom).to_path(TOLERANCE),
            DRIFT_PATH.sample(t),
        );
    }

    list.text(
        TextOp::centered("Low", at(x0, 176.0), size(8.0), Rgba8::BLACK)
            .align(HAlign::Left, VAlign::Center),
    );
    list.text(
        TextOp::centered("High", at(x1, 176.0), size(8.0), Rgba8::BLACK)
            .align(HAlign::Right, VAlign::Center),
    );

    let mut explanation = TextOp::centered("", at(4.0, 212.0), size(8.0), Rgba8::BLACK)
        .face(FaceRole::Symbol)
        .align(HAlign::Left, VAlign::Top)
        .backdrop(BACKGROUND.with_opacity(0.9), vp.pt(3.0));
    explanation.lines = LEGEND_EXPLANATION.iter().map(|s| s.to_string()).collect();
    list.text(explanation);
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
