//! Small vector helpers on top of `glam`. Z is up throughout the crate.

pub use glam::Vec3;

/// Distance between two points ignoring the vertical axis.
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let d = a - b;
    (d.x * d.x + d.y * d.y).sqrt()
}

/// `v` with its height replaced.
#[inline]
pub fn with_height(v: Vec3, height: f32) -> Vec3 {
    Vec3::new(v.x, v.y, height)
}

/// Replace NaN/infinite values with `fallback`, then clamp into `[lo, hi]`.
#[inline]
pub(crate) fn clamp_finite(value: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        fallback
    }
}

/// Non-finite vectors collapse to zero.
#[inline]
pub(crate) fn finite_or_zero(v: Vec3) -> Vec3 {
    if v.is_finite() {
        v
    } else {
        Vec3::ZERO
    }
}
