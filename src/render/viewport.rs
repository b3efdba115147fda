use crate::foundation::core::{Affine, Canvas, Point, Rect};
use crate::layout::spiral::Positions;

/// Figure width the point sizes are calibrated against (14 in at 72 pt/in).
pub const REFERENCE_WIDTH_PT: f64 = 14.0 * 72.0;

const MARGIN_FRACTION: f64 = 0.15;
const MIN_SPAN: f64 = 1.0;
const TITLE_BAND: f64 = 0.09;
const SIDE_BAND: f64 = 0.03;

/// Maps world coordinates (y up) into canvas pixels (y down) with equal aspect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    canvas: Canvas,
    /// Padded world limits (the "axes" of the figure).
    world: Rect,
    /// Pixel rectangle the world limits are fitted into.
    plot: Rect,
    world_to_px: Affine,
    px_per_unit: f64,
    px_per_pt: f64,
}

impl Viewport {
    /// Fit the bounds of `positions`, padded by 15 % of each span, into `canvas`.
    pub fn fit(positions: &Positions, canvas: Canvas) -> Self {
        let bounds = positions
            .bounds()
            .unwrap_or_else(|| Rect::new(-1.0, -1.0, 1.0, 1.0));
        Self::for_world(padded(bounds), canvas)
    }

    pub fn for_world(world: Rect, canvas: Canvas) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let plot = Rect::new(w * SIDE_BAND, h * TITLE_BAND, w * (1.0 - SIDE_BAND), h * (1.0 - SIDE_BAND));

        let sx = plot.width() / world.width().max(MIN_SPAN);
        let sy = plot.height() / world.height().max(MIN_SPAN);
        let px_per_unit = sx.min(sy);

        let wc = world.center();
        let pc = plot.center();
        let world_to_px = Affine::translate((pc.x, pc.y))
            * Affine::scale_non_uniform(px_per_unit, -px_per_unit)
            * Affine::translate((-wc.x, -wc.y));

        Self {
            canvas,
            world,
            plot,
            world_to_px,
            px_per_unit,
            px_per_pt: w / REFERENCE_WIDTH_PT,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn world(&self) -> Rect {
        self.world
    }

    pub fn plot(&self) -> Rect {
        self.plot
    }

    pub fn world_to_px(&self) -> Affine {
        self.world_to_px
    }

    pub fn to_px(&self, p: Point) -> Point {
        self.world_to_px * p
    }

    /// World length to pixels.
    pub fn units(&self, len: f64) -> f64 {
        len * self.px_per_unit
    }

    /// Typographic points to pixels.
    pub fn pt(&self, pt: f64) -> f64 {
        pt * self.px_per_pt
    }
}

fn padded(bounds: Rect) -> Rect {
    let span_x = bounds.width().max(MIN_SPAN);
    let span_y = bounds.height().max(MIN_SPAN);
    let c = bounds.center();
    let half_x = span_x * (0.5 + MARGIN_FRACTION);
    let half_y = span_y * (0.5 + MARGIN_FRACTION);
    Rect::new(c.x - half_x, c.y - half_y, c.x + half_x, c.y + half_y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/viewport.rs"]
mod tests;
