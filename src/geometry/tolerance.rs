// Centralized tolerances and small vector helpers

pub const EPS_LEN: f64 = 1e-9;            // zero-length vector threshold

#[inline] pub fn clamp01(x: f64) -> f64 { x.max(0.0).min(1.0) }

#[inline]
pub fn norm2(mut x: f64, mut y: f64) -> ((f64, f64), f64) {
    let len = (x*x + y*y).sqrt();
    if len > EPS_LEN { x/=len; y/=len; ((x,y), len) } else { ((0.0,0.0), 0.0) }
}
