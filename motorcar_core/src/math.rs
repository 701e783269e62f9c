// motorcar_core/src/math.rs

//! Small interpolation helpers shared by every per-tick blend in the crate.
//!
//! All blends in the vehicle are written as `value = lerp(value, target, rate * dt)`.
//! `lerp` clamps its parameter to `[0, 1]`, so a long frame can never push a
//! value past its target.

use num_traits::Float;

/// Linear interpolation from `a` to `b`. `t` is clamped to `[0, 1]`.
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    let t = clamp01(t);
    a + (b - a) * t
}

/// Where `value` sits between `a` and `b`, clamped to `[0, 1]`.
///
/// Returns zero when `a == b` instead of dividing by zero.
pub fn inverse_lerp<T: Float>(a: T, b: T, value: T) -> T {
    if a == b {
        return T::zero();
    }
    clamp01((value - a) / (b - a))
}

pub fn clamp01<T: Float>(t: T) -> T {
    t.max(T::zero()).min(T::one())
}

/// Frame-rate independent blend factor `rate * dt`, clamped to `[0, 1]`.
pub fn blend_factor<T: Float>(rate: T, dt: T) -> T {
    clamp01(rate * dt)
}
