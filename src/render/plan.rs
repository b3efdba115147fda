//! Backend-agnostic draw list in pixel space.
//!
//! Scene compilation produces a [`DrawList`]; the CPU backend executes it in order (painter's
//! algorithm, later ops on top).

use crate::foundation::core::{BezPath, Point, Rgba8};

/// Font role; each role is resolved to one concrete face by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceRole {
    Regular,
    Bold,
    /// Face with coverage for the glyph symbols (`∴ ⇌ ☍ ⧖`).
    Symbol,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Rounded box painted behind a text block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Backdrop {
    pub fill: Rgba8,
    pub pad_px: f64,
}

/// A block of text lines anchored at a pixel position.
///
/// Every line is aligned independently on `anchor.x`; the block as a whole is aligned on
/// `anchor.y`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    pub lines: Vec<String>,
    pub anchor: Point,
    pub size_px: f32,
    pub color: Rgba8,
    pub face: FaceRole,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Outline stroked under the fill: colour and width in pixels.
    pub halo: Option<(Rgba8, f32)>,
    pub backdrop: Option<Backdrop>,
}

impl TextOp {
    /// Single centred line.
    pub fn centered(text: impl Into<String>, anchor: Point, size_px: f32, color: Rgba8) -> Self {
        Self {
            lines: vec![text.into()],
            anchor,
            size_px,
            color,
            face: FaceRole::Regular,
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            halo: None,
            backdrop: None,
        }
    }

    pub fn face(mut self, face: FaceRole) -> Self {
        self.face = face;
        self
    }

    pub fn align(mut self, h: HAlign, v: VAlign) -> Self {
        self.h_align = h;
        self.v_align = v;
        self
    }

    pub fn halo(mut self, color: Rgba8, width_px: f32) -> Self {
        self.halo = Some((color, width_px));
        self
    }

    pub fn backdrop(mut self, fill: Rgba8, pad_px: f64) -> Self {
        self.backdrop = Some(Backdrop { fill, pad_px });
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillPath {
        path: BezPath,
        color: Rgba8,
    },
    StrokePath {
        path: BezPath,
        color: Rgba8,
        width_px: f64,
    },
    Text(TextOp),
}

/// Ordered list of draw operations for one layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&mut self, path: BezPath, color: Rgba8) {
        self.ops.push(DrawOp::FillPath { path, color });
    }

    pub fn stroke(&mut self, path: BezPath, color: Rgba8, width_px: f64) {
        self.ops.push(DrawOp::StrokePath {
            path,
            color,
            width_px,
        });
    }

    pub fn text(&mut self, op: TextOp) {
        self.ops.push(DrawOp::Text(op));
    }

    pub fn extend(&mut self, other: DrawList) {
        self.ops.extend(other.ops);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// All text strings in draw order, one entry per line.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().flat_map(|op| match op {
            DrawOp::Text(t) => t.lines.iter().map(String::as_str).collect::<Vec<_>>(),
            _ => Vec::new(),
        })
    }
}
