//! Scalar helpers with game-engine semantics.
//!
//! These differ from the obvious `std` equivalents in edge cases (sign of zero,
//! clamping inside `repeat`) and never panic on NaN inputs.

pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Clamp that propagates NaN instead of panicking like `f64::clamp`.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Wraps `t` into `[0, length]`. A zero length yields NaN.
#[must_use]
pub fn repeat(t: f64, length: f64) -> f64 {
    clamp(t - (t / length).floor() * length, 0.0, length)
}

/// Triangle wave bouncing between `0` and `length`.
#[must_use]
pub fn ping_pong(t: f64, length: f64) -> f64 {
    let t = repeat(t, length * 2.0);
    length - (t - length).abs()
}

/// `1` for non-negative input (including `-0.0`), `-1` otherwise.
#[must_use]
pub fn sign(x: f64) -> f64 {
    if x >= 0.0 { 1.0 } else { -1.0 }
}

/// Fractional part, truncating toward zero.
#[must_use]
pub fn frac(x: f64) -> f64 {
    x - x.trunc()
}

#[must_use]
pub fn log_base(x: f64, base: f64) -> f64 {
    x.ln() / base.ln()
}
