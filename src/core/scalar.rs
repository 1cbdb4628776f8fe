//! The numeric capability set every generic type in this crate is built on.
//!
//! [`Scalar`] is the minimum needed for component-wise arithmetic, dot products, determinants and
//! the like; it is implemented for the primitive floats and integers. [`Real`] adds the operations
//! that only make sense for floating point values (square roots, trigonometry) and is what lengths,
//! normalisation, inversion and rotations require.

use crate::core::config::{EPSILON, EPSILON_F64};
use crate::util;
use approx::{RelativeEq, UlpsEq};
use num_traits::{Float, FloatConst, Num, NumCast};
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};

/// A value that can be used as the component type of vectors, matrices and rectangles.
///
/// Provides ordered ring arithmetic (`+`, `-`, `*`, `/`, with [`Zero`](num_traits::Zero) and
/// [`One`](num_traits::One) identities), comparison, and conversion to and from other numeric
/// types through [`NumCast`].
pub trait Scalar:
    Num + NumCast + Copy + PartialOrd + Default + Debug + Display + Send + Sync + 'static
{
    /// Feeds this value into `state`.
    ///
    /// Floating point values are hashed by bit pattern, with `-0.0` folded into `0.0` so that
    /// values comparing equal hash equally.
    fn hash_scalar<H: Hasher>(&self, state: &mut H);
}

macro_rules! integer_scalar {
    ($($types:ty),+) => {
        $(
            impl Scalar for $types {
                fn hash_scalar<H: Hasher>(&self, state: &mut H) {
                    self.hash(state);
                }
            }
        )+
    };
}
integer_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Scalar for f32 {
    fn hash_scalar<H: Hasher>(&self, state: &mut H) {
        util::force_positive_zero(*self).to_bits().hash(state);
    }
}
impl Scalar for f64 {
    fn hash_scalar<H: Hasher>(&self, state: &mut H) {
        util::force_positive_zero(*self).to_bits().hash(state);
    }
}

/// A floating point [`Scalar`]: square root, trigonometry and numeric literals.
pub trait Real: Scalar + Float + FloatConst + RelativeEq<Epsilon = Self> + UlpsEq {
    /// Builds a constant such as `2`, `-1` or `0.999` in this precision.
    fn from_literal(value: f64) -> Self;

    /// The tolerance used by `almost_eq` comparisons.
    fn tolerance() -> Self;

    fn two() -> Self {
        Self::one() + Self::one()
    }
    fn half() -> Self {
        Self::one() / Self::two()
    }
}

impl Real for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_literal(value: f64) -> Self {
        value as f32
    }

    fn tolerance() -> Self {
        EPSILON
    }
}

impl Real for f64 {
    fn from_literal(value: f64) -> Self {
        value
    }

    fn tolerance() -> Self {
        EPSILON_F64
    }
}

/// Converts between scalar types, returning [`None`] if `value` is not representable in `U`.
///
/// Float-to-integer conversions truncate towards zero; `NaN` never converts to an integer.
pub fn cast<T: Scalar, U: Scalar>(value: T) -> Option<U> {
    <U as NumCast>::from(value)
}
