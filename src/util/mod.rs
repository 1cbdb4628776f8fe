//! Scalar helper functions shared by the vector, matrix and quaternion types.

use crate::core::scalar::{Real, Scalar};
use anyhow::{bail, Result};
use num_traits::Float;

pub mod assert;
pub mod linalg;

/// Converts an angle in degrees to radians.
///
/// # Examples
/// ```
/// use linalg_kernel::util;
/// let radians = util::degrees_to_radians(180.0_f64);
/// assert!((radians - std::f64::consts::PI).abs() < 1e-12);
/// ```
pub fn degrees_to_radians<T: Real>(degrees: T) -> T {
    degrees * T::PI() / T::from_literal(180.0)
}

/// Converts an angle in radians to degrees.
///
/// # Examples
/// ```
/// use linalg_kernel::util;
/// let degrees = util::radians_to_degrees(std::f64::consts::FRAC_PI_2);
/// assert!((degrees - 90.0).abs() < 1e-12);
/// ```
pub fn radians_to_degrees<T: Real>(radians: T) -> T {
    radians * T::from_literal(180.0) / T::PI()
}

/// Returns the smaller of two values. If they are unordered (e.g. `NaN`), returns `a`.
pub fn partial_min<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

/// Returns the larger of two values. If they are unordered (e.g. `NaN`), returns `a`.
pub fn partial_max<T: PartialOrd>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

/// Restricts `value` to `[min, max]`.
///
/// Unlike [`f32::clamp`], does not panic if `min > max`; the result is then `max`.
///
/// # Examples
/// ```
/// use linalg_kernel::util;
/// assert_eq!(util::clamp(5, 0, 3), 3);
/// assert_eq!(util::clamp(-1.5, 0.0, 3.0), 0.0);
/// assert_eq!(util::clamp(2u32, 0, 3), 2);
/// ```
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    partial_min(partial_max(value, min), max)
}

/// A linear interpolation between two values. `t` is not clamped, so values outside `[0, 1]`
/// extrapolate.
///
/// # Examples
/// ```
/// use linalg_kernel::util;
/// assert_eq!(util::lerp(0.0, 10.0, 0.0), 0.0);
/// assert_eq!(util::lerp(0.0, 10.0, 1.0), 10.0);
/// assert_eq!(util::lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(util::lerp(0.0, 10.0, 1.5), 15.0);
/// ```
pub fn lerp<T: Scalar>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// A smoothstep function that creates a smooth transition between 0 and 1.
/// Uses a 5th order polynomial for a smooth acceleration and deceleration curve.
///
/// # Examples
/// ```
/// use linalg_kernel::util;
/// assert_eq!(util::smooth(0.0_f32), 0.0); // Start of transition
/// assert_eq!(util::smooth(1.0_f32), 1.0); // End of transition
/// assert_eq!(util::smooth(0.5_f32), 0.5); // Midpoint
/// // Output is always clamped between 0 and 1
/// assert_eq!(util::smooth(-1.0_f32), 0.0);
/// assert_eq!(util::smooth(2.0_f32), 1.0);
/// ```
pub fn smooth<T: Real>(t: T) -> T {
    let t3 = t * t * t;
    let poly = T::from_literal(6.0) * t3 * t * t - T::from_literal(15.0) * t3 * t
        + T::from_literal(10.0) * t3;
    clamp(poly, T::zero(), T::one())
}

/// Narrows `x` to `f32`, failing if it is finite but outside the range of `f32`.
///
/// Infinities and `NaN` carry over unchanged; precision beyond `f32` is truncated.
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_f32(x: f64) -> Result<f32> {
    if x.is_finite() && x.abs() > f64::from(f32::MAX) {
        bail!("{x} does not fit in range of f32");
    }
    Ok(x as f32)
}

/// Maps `-0.0` to `0.0` and leaves every other value unchanged.
pub fn force_positive_zero<T: Float>(x: T) -> T {
    if x.is_zero() {
        T::zero()
    } else {
        x
    }
}

/// Routes `tracing` output into the test harness, so the `debug!` lines emitted for degenerate
/// inputs show up next to a failing test. Safe to call from every test.
#[cfg(test)]
pub(crate) fn init_test_log() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .with_source_location(true),
        )
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn angle_conversion() {
        assert_relative_eq!(
            degrees_to_radians(90.0_f32),
            std::f32::consts::FRAC_PI_2,
            epsilon = 1e-6
        );
        assert_relative_eq!(radians_to_degrees(std::f32::consts::PI), 180.0, epsilon = 1e-4);
        assert_relative_eq!(
            radians_to_degrees(degrees_to_radians(-37.5_f64)),
            -37.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn clamp_and_min_max() {
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp(7_i64, -3, 3), 3);
        assert_eq!(partial_min(2.0, 1.0), 1.0);
        assert_eq!(partial_max(2.0, 1.0), 2.0);
        assert!(partial_min(f32::NAN, 1.0).is_nan());
        assert_eq!(partial_max(1.0, f32::NAN), 1.0);
    }

    #[test]
    fn lerp_is_unclamped() {
        assert_eq!(lerp(2.0, 4.0, -1.0), 0.0);
        assert_eq!(lerp(10_i32, 20, 2), 30);
    }

    #[test]
    fn smooth_is_symmetric() {
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_relative_eq!(smooth(t) + smooth(1.0 - t), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn narrowing() {
        assert_eq!(f64_to_f32(1.5).unwrap(), 1.5_f32);
        assert_eq!(f64_to_f32(f64::from(f32::MAX)).unwrap(), f32::MAX);
        assert!(f64_to_f32(-1e39).is_err());
        assert!(f64_to_f32(f64::NAN).unwrap().is_nan());
        assert_eq!(f64_to_f32(f64::NEG_INFINITY).unwrap(), f32::NEG_INFINITY);
    }

    #[test]
    fn positive_zero() {
        assert!(force_positive_zero(-0.0_f32).is_sign_positive());
        assert_eq!(force_positive_zero(-2.0_f64), -2.0);
    }
}
