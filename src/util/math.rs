//! Numeric helpers shared by the color and moment code.

/// Wraps a hue angle in degrees into `[0, 360)` by a single positive shift.
///
/// Inputs come from `60 * (x mod 6)` style formulas, so one shift suffices.
pub(crate) fn wrap_hue_deg(hue_deg: f64) -> f64 {
    if hue_deg < 0.0 {
        hue_deg + 360.0
    } else {
        hue_deg
    }
}

/// Squares a value with a single rounding.
#[inline]
pub(crate) fn sq(value: f64) -> f64 {
    value * value
}

/// Raises the zeroth moment to an integer normalization power through `pow`.
#[inline]
pub(crate) fn norm_pow(m00: f64, exponent: i32) -> f64 {
    m00.powf(f64::from(exponent))
}

/// Unit-scale sample in `[0, 1]` from an 8-bit value.
#[inline]
pub(crate) fn unit(sample: u8) -> f64 {
    f64::from(sample) / 255.0
}
