use super::tolerance::{clamp01, norm2};

/// Distance from P to segment AB, and the clamped projection parameter.
pub fn point_to_segment_distance(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> (f64, f64) {
    let vx = x2 - x1; let vy = y2 - y1;
    let wx = px - x1; let wy = py - y1;
    let vv = vx*vx + vy*vy;
    if vv == 0.0 {
        return (wx.hypot(wy), 0.0);
    }
    let t = clamp01((wx*vx + wy*vy) / vv);
    let projx = x1 + t * vx; let projy = y1 + t * vy;
    ((px - projx).hypot(py - projy), t)
}

/// Point at `t` on segment AB, `t` clamped to [0, 1].
#[inline]
pub fn lerp(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> (f64, f64) {
    let t = clamp01(t);
    (x1 + (x2 - x1) * t, y1 + (y2 - y1) * t)
}

/// z-component of v1 x v2; positive when v2 turns left of v1.
#[inline]
pub fn cross(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    x1 * y2 - x2 * y1
}

#[inline]
pub fn is_left_turn(v1: (f64, f64), v2: (f64, f64)) -> bool {
    cross(v1.0, v1.1, v2.0, v2.1) > 0.0
}

/// Midpoint (t = 0.5) of the quadratic Bezier p0-p1-p2 and its unit tangent.
/// A degenerate curve yields a zero tangent.
pub fn quadratic_midpoint_tangent(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> ((f64, f64), (f64, f64)) {
    let mx = 0.25 * p0.0 + 0.5 * p1.0 + 0.25 * p2.0;
    let my = 0.25 * p0.1 + 0.5 * p1.1 + 0.25 * p2.1;
    // B'(0.5) = (p1 - p0) + (p2 - p1)
    let tx = (p1.0 - p0.0) + (p2.0 - p1.0);
    let ty = (p1.1 - p0.1) + (p2.1 - p1.1);
    let (tangent, _) = norm2(tx, ty);
    ((mx, my), tangent)
}
