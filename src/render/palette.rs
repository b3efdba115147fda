//! Colour ramps and fixed colours of the drift map.

use crate::foundation::core::Rgba8;

/// Piecewise-linear colour ramp over `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colormap {
    stops: [(f64, Rgba8); 3],
}

impl Colormap {
    pub const fn three_stop(low: Rgba8, mid: Rgba8, high: Rgba8) -> Self {
        Self {
            stops: [(0.0, low), (0.5, mid), (1.0, high)],
        }
    }

    /// Colour at `t`; values outside `[0, 1]` are clamped, NaN maps to the low end.
    pub fn sample(&self, t: f64) -> Rgba8 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        for pair in self.stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let u = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
                return lerp_rgba(c0, c1, u);
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}

fn lerp_rgba(a: Rgba8, b: Rgba8, u: f64) -> Rgba8 {
    let ch = |x: u8, y: u8| -> u8 {
        let xf = f64::from(x);
        let yf = f64::from(y);
        (xf + (yf - xf) * u).round().clamp(0.0, 255.0) as u8
    };
    Rgba8 {
        r: ch(a.r, b.r),
        g: ch(a.g, b.g),
        b: ch(a.b, b.b),
        a: ch(a.a, b.a),
    }
}

/// Edge colours, sampled at `1 - drift`: bright green for stable flow, dim red for drift.
pub const EDGE_FLOW: Colormap = Colormap::three_stop(
    Rgba8::hex(0x00C853),
    Rgba8::hex(0xFFAB00),
    Rgba8::hex(0xDD2C00),
);

/// Node fill, sampled at entropy.
pub const NODE_ENTROPY: Colormap = Colormap::three_stop(
    Rgba8::hex(0x4CAF50),
    Rgba8::hex(0xFFC107),
    Rgba8::hex(0xF44336),
);

/// Legend drift bar.
pub const DRIFT_PATH: Colormap = Colormap::three_stop(
    Rgba8::hex(0x4285F4),
    Rgba8::hex(0x5E35B1),
    Rgba8::hex(0x1A237E),
);

pub const BACKGROUND: Rgba8 = Rgba8::hex(0xF9F9FE);
pub const NODE_OUTLINE: Rgba8 = Rgba8::hex(0x333333);
pub const CLASSIFIER: Rgba8 = Rgba8::hex(0x9C27B0);
pub const ANNOTATION: Rgba8 = Rgba8::hex(0x666666);
pub const LEGEND_HEADING: Rgba8 = Rgba8::hex(0xF0F0F0);

#[cfg(test)]
#[path = "../../tests/unit/render/palette.rs"]
mod tests;
