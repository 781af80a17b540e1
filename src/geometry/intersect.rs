// Segment-segment intersection in f64.
// Classifies interior crossings and touches at an endpoint or along a
// collinear overlap. Touches report t or u exactly 0 or 1 at the touching end.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegIntersection {
    None,
    // Both parameters come from the line-line solution
    Proper { t: f64, u: f64, x: f64, y: f64 },
    // An endpoint of one segment lies on the other
    Touch { t: f64, u: f64, x: f64, y: f64 },
}

impl SegIntersection {
    /// `(x, y, t, u)` of the hit, if any.
    pub fn hit(&self) -> Option<(f64, f64, f64, f64)> {
        match *self {
            SegIntersection::None => None,
            SegIntersection::Proper { t, u, x, y } | SegIntersection::Touch { t, u, x, y } => {
                Some((x, y, t, u))
            }
        }
    }
}

#[inline]
pub fn orient(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> f64 {
    (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
}

// Bounding-box test; callers have already checked collinearity.
#[inline]
fn on_segment(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> bool {
    ax.min(bx) <= cx && cx <= ax.max(bx) && ay.min(by) <= cy && cy <= ay.max(by)
}

// Parameter of P along AB, measured on x unless AB is vertical.
fn param_on(ax: f64, ay: f64, bx: f64, by: f64, px: f64, py: f64) -> f64 {
    if ax == bx && ay == by {
        0.0
    } else if bx != ax {
        (px - ax) / (bx - ax)
    } else {
        (py - ay) / (by - ay)
    }
}

pub fn intersect_segments(ax: f32, ay: f32, bx: f32, by: f32,
                          cx: f32, cy: f32, dx: f32, dy: f32) -> SegIntersection {
    let ax = ax as f64; let ay = ay as f64; let bx = bx as f64; let by = by as f64;
    let cx = cx as f64; let cy = cy as f64; let dx = dx as f64; let dy = dy as f64;

    let o1 = orient(ax, ay, bx, by, cx, cy);
    let o2 = orient(ax, ay, bx, by, dx, dy);
    let o3 = orient(cx, cy, dx, dy, ax, ay);
    let o4 = orient(cx, cy, dx, dy, bx, by);

    if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
        let denom = (ax - bx) * (cy - dy) - (ay - by) * (cx - dx);
        if denom == 0.0 {
            return SegIntersection::None;
        }
        let t = ((ax - cx) * (cy - dy) - (ay - cy) * (cx - dx)) / denom;
        let u = -((ax - bx) * (ay - cy) - (ay - by) * (ax - cx)) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            return SegIntersection::Proper { t, u, x: ax + t * (bx - ax), y: ay + t * (by - ay) };
        }
        return SegIntersection::None;
    }

    if o1 == 0.0 && on_segment(ax, ay, bx, by, cx, cy) {
        return SegIntersection::Touch { t: param_on(ax, ay, bx, by, cx, cy), u: 0.0, x: cx, y: cy };
    }
    if o2 == 0.0 && on_segment(ax, ay, bx, by, dx, dy) {
        return SegIntersection::Touch { t: param_on(ax, ay, bx, by, dx, dy), u: 1.0, x: dx, y: dy };
    }
    if o3 == 0.0 && on_segment(cx, cy, dx, dy, ax, ay) {
        return SegIntersection::Touch { t: 0.0, u: param_on(cx, cy, dx, dy, ax, ay), x: ax, y: ay };
    }
    if o4 == 0.0 && on_segment(cx, cy, dx, dy, bx, by) {
        return SegIntersection::Touch { t: 1.0, u: param_on(cx, cy, dx, dy, bx, by), x: bx, y: by };
    }
    SegIntersection::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proper_cross() {
        let r = intersect_segments(0.0,0.0,  2.0,2.0,  0.0,2.0,  2.0,0.0);
        match r { SegIntersection::Proper{t,u,x,y} => {
            assert!((t-0.5).abs()<1e-12 && (u-0.5).abs()<1e-12);
            assert!((x-1.0).abs()<1e-12 && (y-1.0).abs()<1e-12);
        }, _ => panic!("expected proper") }
    }

    #[test]
    fn parameters_follow_each_segment() {
        let r = intersect_segments(0.0,0.0,  4.0,0.0,  3.0,-1.0,  3.0,3.0);
        let (x, y, t, u) = r.hit().expect("hit");
        assert!((x-3.0).abs()<1e-12 && y.abs()<1e-12);
        assert!((t-0.75).abs()<1e-12);
        assert!((u-0.25).abs()<1e-12);
    }

    #[test]
    fn endpoint_touch() {
        let r = intersect_segments(0.0,0.0,  2.0,0.0,  1.0,0.0,  1.0,1.0);
        match r { SegIntersection::Touch{t,u,x,y} => {
            assert!((x-1.0).abs()<1e-12 && y.abs()<1e-12);
            assert!((t-0.5).abs()<1e-12);
            assert_eq!(u, 0.0);
        }, _ => panic!("expected touch") }
    }

    #[test]
    fn collinear_touch_reports_end() {
        let r = intersect_segments(0.0,0.0,  2.0,0.0,  2.0,0.0,  5.0,0.0);
        let (_, _, t, u) = r.hit().expect("touch");
        assert_eq!(t, 1.0);
        assert_eq!(u, 0.0);
    }

    #[test]
    fn vertical_touch_uses_y_parameter() {
        let r = intersect_segments(0.0,0.0,  0.0,4.0,  -1.0,1.0,  0.0,1.0);
        let (_, _, t, u) = r.hit().expect("touch");
        assert!((t-0.25).abs()<1e-12);
        assert_eq!(u, 1.0);
    }

    #[test]
    fn disjoint_and_parallel() {
        assert_eq!(intersect_segments(0.0,0.0, 1.0,0.0, 0.0,1.0, 1.0,1.0), SegIntersection::None);
        assert_eq!(intersect_segments(0.0,0.0, 1.0,1.0, 3.0,0.0, 2.0,1.0), SegIntersection::None);
        assert_eq!(intersect_segments(0.0,0.0, 1.0,0.0, 2.0,0.0, 3.0,0.0), SegIntersection::None);
    }
}
