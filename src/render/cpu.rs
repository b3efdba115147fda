use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{DriftMapError, DriftMapResult};
use crate::render::backend::{FrameRGBA, premul_over_in_place};
use crate::render::plan::{DrawList, DrawOp, FaceRole, HAlign, TextOp, VAlign};
use crate::render::text::{FontBook, TextBrushRgba8, TextLayoutEngine};
use kurbo::Shape;
use std::collections::HashMap;

/// Line advance as a multiple of the font size.
const LINE_HEIGHT: f64 = 1.25;

/// CPU raster backend executing [`DrawList`]s with `vello_cpu`.
///
/// Text is shaped with Parley against one face per [`FaceRole`]. A role whose face cannot be
/// resolved is skipped with a single warning; rendering never fails for lack of fonts.
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
    fonts: FontBook,
    engines: HashMap<FaceRole, Option<TextLayoutEngine>>,
}

impl CpuBackend {
    pub fn new(fonts: FontBook) -> Self {
        Self {
            ctx: None,
            fonts,
            engines: HashMap::new(),
        }
    }

    /// Backend using faces resolved from the installed system fonts.
    pub fn system() -> Self {
        Self::new(FontBook::system())
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Render `list` into a fresh premultiplied frame.
    ///
    /// With `clear` set the ops are composited over that colour; otherwise the background stays
    /// transparent.
    pub fn render(
        &mut self,
        list: &DrawList,
        canvas: Canvas,
        clear: Option<Rgba8>,
    ) -> DriftMapResult<FrameRGBA> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| DriftMapError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| DriftMapError::render("canvas height exceeds u16"))?;

        let layer = self.with_ctx_mut(width, height, |this, ctx| {
            for op in &list.ops {
                this.draw_op(ctx, op)?;
            }
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap.data_as_u8_slice().to_vec())
        })?;

        match clear {
            Some(color) => {
                let mut frame = FrameRGBA::solid(canvas, color);
                premul_over_in_place(&mut frame.data, &layer)?;
                Ok(frame)
            }
            None => Ok(FrameRGBA {
                width: canvas.width,
                height: canvas.height,
                data: layer,
                premultiplied: true,
            }),
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> DriftMapResult<R>,
    ) -> DriftMapResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn engine_for(&mut self, role: FaceRole) -> Option<&mut TextLayoutEngine> {
        if !self.engines.contains_key(&role) {
            let engine = match self.fonts.face(role) {
                Some(face) => match TextLayoutEngine::for_face(face) {
                    Ok(engine) => Some(engine),
                    Err(err) => {
                        tracing::warn!(?role, error = %err, "font face unusable, skipping text");
                        None
                    }
                },
                None => {
                    tracing::warn!(?role, "no font face resolved, skipping text");
                    None
                }
            };
            self.engines.insert(role, engine);
        }
        self.engines.get_mut(&role).and_then(Option::as_mut)
    }

    fn draw_op(&mut self, ctx: &mut vello_cpu::RenderContext, op: &DrawOp) -> DriftMapResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::FillPath { path, color } => {
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&bezpath_to_cpu(path));
                Ok(())
            }
            DrawOp::StrokePath {
                path,
                color,
                width_px,
            } => {
                if !width_px.is_finite() || *width_px <= 0.0 {
                    return Err(DriftMapError::render("stroke width must be finite and > 0"));
                }
                ctx.set_paint(color_to_cpu(*color));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width_px));
                ctx.stroke_path(&bezpath_to_cpu(path));
                Ok(())
            }
            DrawOp::Text(t) => self.draw_text(ctx, t),
        }
    }

    fn draw_text(&mut self, ctx: &mut vello_cpu::RenderContext, t: &TextOp) -> DriftMapResult<()> {
        let Some(engine) = self.engine_for(t.face) else {
            return Ok(());
        };

        let brush = TextBrushRgba8 {
            r: t.color.r,
            g: t.color.g,
            b: t.color.b,
            a: t.color.a,
        };
        let font = engine.font().clone();
        let mut shaped = Vec::with_capacity(t.lines.len());
        for line in &t.lines {
            if line.trim().is_empty() {
                shaped.push(None);
            } else {
                shaped.push(Some(engine.layout_line(line, t.size_px, brush)?));
            }
        }

        let line_height = f64::from(t.size_px) * LINE_HEIGHT;
        let block_height = line_height * t.lines.len() as f64;
        let top = match t.v_align {
            VAlign::Top => t.anchor.y,
            VAlign::Center => t.anchor.y - block_height / 2.0,
            VAlign::Bottom => t.anchor.y - block_height,
        };

        let mut placed = Vec::with_capacity(shaped.len());
        let mut extent: Option<Rect> = None;
        for (i, layout) in shaped.iter().enumerate() {
            let Some(layout) = layout else {
                continue;
            };
            let w = f64::from(layout.width());
            let h = f64::from(layout.height());
            let x = match t.h_align {
                HAlign::Left => t.anchor.x,
                HAlign::Center => t.anchor.x - w / 2.0,
                HAlign::Right => t.anchor.x - w,
            };
            let line_top = top + line_height * i as f64;
            let line_rect = Rect::new(x, line_top, x + w, line_top + line_height);
            extent = Some(match extent {
                Some(r) => r.union(line_rect),
                None => line_rect,
            });
            placed.push((layout, Point::new(x, line_top + (line_height - h) / 2.0)));
        }

        if let (Some(backdrop), Some(extent)) = (t.backdrop, extent) {
            let pad = backdrop.pad_px.max(0.0);
            let rr = kurbo::RoundedRect::from_rect(extent.inflate(pad, pad), pad);
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(backdrop.fill));
            ctx.fill_path(&bezpath_to_cpu(&rr.to_path(0.1)));
        }

        for (layout, origin) in placed {
            paint_layout(ctx, &font, layout, origin, t.color, t.halo);
        }
        Ok(())
    }
}

fn paint_layout(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    layout: &parley::Layout<TextBrushRgba8>,
    origin: Point,
    fill: Rgba8,
    halo: Option<(Rgba8, f32)>,
) {
    ctx.set_transform(affine_to_cpu(Affine::translate((origin.x, origin.y))));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let font_size = run.run().font_size();
            let glyphs: Vec<vello_cpu::Glyph> = run
                .positioned_glyphs()
                .map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                })
                .collect();

            if let Some((color, width)) = halo
                && width > 0.0
            {
                ctx.set_paint(color_to_cpu(color));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(width)));
                ctx.glyph_run(font)
                    .font_size(font_size)
                    .stroke_glyphs(glyphs.iter().copied());
            }

            ctx.set_paint(color_to_cpu(fill));
            ctx.glyph_run(font)
                .font_size(font_size)
                .fill_glyphs(glyphs.into_iter());
        }
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
