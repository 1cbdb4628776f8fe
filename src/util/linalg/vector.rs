use crate::core::error::{check_index, LinalgError};
use crate::core::scalar::{self, Real, Scalar};
use crate::util;
use crate::util::assert::check_lt;
use crate::util::linalg::{write_components, Matrix2x2, Quaternion};
use anyhow::Result;
use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use num_traits::{Float, Zero};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};
use tracing::debug;

/// A 2D vector, generic over its component type.
///
/// The usual instantiations have aliases: [`Vector2f`], [`Vector2d`], [`Vector2i`] and
/// [`Vector2u`]. All of them share the same implementation; converting between them goes through
/// the explicit conversion functions ([`cast`](Vector2::cast), [`to_f64`](Vector2::to_f64),
/// [`to_f32_lossy`](Vector2::to_f32_lossy), [`try_to_f32`](Vector2::try_to_f32)).
///
/// # Equality
/// Equality is exact per component. Use [`almost_eq`](Vector2::almost_eq) or the [`approx`]
/// traits for tolerance-based comparisons.
///
/// # Examples
///
/// ```
/// use linalg_kernel::util::linalg::Vector2f;
///
/// let v1 = Vector2f::new(3.0, 4.0);
/// let v2 = Vector2f { x: 1.0, y: 2.0 };
/// assert_eq!(v1 + v2, Vector2f::new(4.0, 6.0));
/// assert_eq!(v1.len(), 5.0);
/// ```
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

/// A 3D vector, generic over its component type.
///
/// See [`Vector2`] for the conventions shared by all vector types.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

/// A 4D vector, generic over its component type.
///
/// See [`Vector2`] for the conventions shared by all vector types.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vector4<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

pub type Vector2f = Vector2<f32>;
pub type Vector2d = Vector2<f64>;
pub type Vector2i = Vector2<i32>;
pub type Vector2u = Vector2<u32>;
pub type Vector3f = Vector3<f32>;
pub type Vector3d = Vector3<f64>;
pub type Vector3i = Vector3<i32>;
pub type Vector3u = Vector3<u32>;
pub type Vector4f = Vector4<f32>;
pub type Vector4d = Vector4<f64>;
pub type Vector4i = Vector4<i32>;
pub type Vector4u = Vector4<u32>;

macro_rules! vector_common {
    (@scalar $field:ident) => { T };
    ($name:ident, $n:literal, $($field:ident: $idx:literal),+) => {
        impl<T: Scalar> $name<T> {
            /// The number of components.
            pub const LEN: usize = $n;

            #[must_use]
            pub fn new($($field: T),+) -> Self {
                Self { $($field),+ }
            }

            /// Creates a new vector with every component set to the given value.
            #[must_use]
            pub fn splat(value: T) -> Self {
                Self { $($field: value),+ }
            }

            #[must_use]
            pub fn zero() -> Self {
                Self::splat(T::zero())
            }

            #[must_use]
            pub fn one() -> Self {
                Self::splat(T::one())
            }

            #[must_use]
            pub fn to_array(self) -> [T; $n] {
                [$(self.$field),+]
            }

            #[must_use]
            pub fn from_array(array: [T; $n]) -> Self {
                let [$($field),+] = array;
                Self { $($field),+ }
            }

            /// Applies `f` to every component.
            pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> $name<U> {
                $name { $($field: f(self.$field)),+ }
            }

            fn zip_with(self, rhs: Self, mut f: impl FnMut(T, T) -> T) -> Self {
                Self { $($field: f(self.$field, rhs.$field)),+ }
            }

            #[must_use]
            pub fn dot(&self, other: Self) -> T {
                T::zero() $(+ self.$field * other.$field)+
            }

            /// Returns the squared length of the vector.
            ///
            /// Prefer this over `len()` when comparing lengths; it needs no square root and is
            /// available for integer vectors too.
            #[must_use]
            pub fn len_squared(&self) -> T {
                self.dot(*self)
            }

            #[must_use]
            pub fn dist_squared(&self, other: Self) -> T {
                (*self - other).len_squared()
            }

            /// The component-wise minimum of two vectors.
            #[must_use]
            pub fn component_min(&self, other: Self) -> Self {
                self.zip_with(other, util::partial_min)
            }

            /// The component-wise maximum of two vectors.
            #[must_use]
            pub fn component_max(&self, other: Self) -> Self {
                self.zip_with(other, util::partial_max)
            }

            /// Clamps each component to the corresponding components of `[min, max]`.
            #[must_use]
            pub fn clamp(&self, min: Self, max: Self) -> Self {
                Self { $($field: util::clamp(self.$field, min.$field, max.$field)),+ }
            }

            #[must_use]
            pub fn component_mul(&self, other: Self) -> Self {
                self.zip_with(other, Mul::mul)
            }

            #[must_use]
            pub fn component_div(&self, other: Self) -> Self {
                self.zip_with(other, Div::div)
            }

            /// Linear interpolation `self + (to - self) * t`. `t` is not clamped.
            #[must_use]
            pub fn lerp(&self, to: Self, t: T) -> Self {
                *self + (to - *self) * t
            }

            /// Returns the component at `index`, or an error if `index` is out of range.
            pub fn get(&self, index: usize) -> Result<T, LinalgError> {
                check_index(index, $n)?;
                Ok(self[index])
            }

            /// Overwrites the component at `index`, or returns an error if `index` is out of range.
            pub fn set(&mut self, index: usize, value: T) -> Result<(), LinalgError> {
                check_index(index, $n)?;
                self[index] = value;
                Ok(())
            }

            /// Converts to another scalar type, returning [`None`] if any component is not
            /// representable in `U`.
            #[must_use]
            pub fn cast<U: Scalar>(&self) -> Option<$name<U>> {
                Some($name { $($field: scalar::cast(self.$field)?),+ })
            }
        }

        impl<T: Scalar + Into<f64>> $name<T> {
            /// Widens every component to `f64`. Lossless.
            #[must_use]
            pub fn to_f64(&self) -> $name<f64> {
                self.map(Into::into)
            }
        }

        impl $name<f64> {
            /// Narrows every component to `f32` with native truncation.
            #[must_use]
            #[allow(clippy::cast_possible_truncation)]
            pub fn to_f32_lossy(&self) -> $name<f32> {
                self.map(|v| v as f32)
            }

            /// Narrows every component to `f32`, failing if a finite component overflows `f32`.
            pub fn try_to_f32(&self) -> Result<$name<f32>> {
                let [$($field),+] = self.to_array();
                Ok($name { $($field: util::f64_to_f32($field)?),+ })
            }
        }

        impl<T: Real> $name<T> {
            /// Returns the length of the vector.
            ///
            /// If you only need to compare vector lengths, consider using `len_squared()`.
            #[must_use]
            pub fn len(&self) -> T {
                self.len_squared().sqrt()
            }

            #[must_use]
            pub fn dist(&self, other: Self) -> T {
                self.dist_squared(other).sqrt()
            }

            /// Scales the vector to unit length in place.
            ///
            /// A vector whose squared length is exactly zero is left unchanged.
            pub fn normalise(&mut self) {
                let len_squared = self.len_squared();
                if len_squared.is_zero() {
                    debug!(
                        "{}::normalise(): zero-length vector left unchanged",
                        stringify!($name)
                    );
                    return;
                }
                *self /= len_squared.sqrt();
            }

            /// Returns a unit vector in the same direction, or the zero vector unchanged.
            #[must_use]
            pub fn normalised(&self) -> Self {
                let mut rv = *self;
                rv.normalise();
                rv
            }

            #[must_use]
            pub fn abs(&self) -> Self {
                self.map(Float::abs)
            }

            pub fn is_finite(&self) -> bool {
                $(self.$field.is_finite())&&+
            }

            /// Checks if the vector is approximately equal to another vector.
            ///
            /// Two vectors are considered approximately equal if the length of their difference
            /// is less than [`Real::tolerance`].
            pub fn almost_eq(&self, rhs: Self) -> bool {
                (*self - rhs).len() < T::tolerance()
            }
        }

        impl<T: Scalar> Zero for $name<T> {
            fn zero() -> Self {
                Self::zero()
            }

            fn is_zero(&self) -> bool {
                $(self.$field.is_zero())&&+
            }
        }

        impl<T: Scalar> Hash for $name<T> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                $(self.$field.hash_scalar(state);)+
            }
        }

        impl<T: Scalar> Index<usize> for $name<T> {
            type Output = T;

            fn index(&self, index: usize) -> &Self::Output {
                check_lt!(index, $n, concat!(stringify!($name), " component index"));
                match index {
                    $($idx => &self.$field,)+
                    _ => unreachable!(),
                }
            }
        }
        impl<T: Scalar> IndexMut<usize> for $name<T> {
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                check_lt!(index, $n, concat!(stringify!($name), " component index"));
                match index {
                    $($idx => &mut self.$field,)+
                    _ => unreachable!(),
                }
            }
        }

        impl<T: Scalar> From<[T; $n]> for $name<T> {
            fn from(value: [T; $n]) -> Self {
                Self::from_array(value)
            }
        }
        impl<T: Scalar> From<$name<T>> for [T; $n] {
            fn from(value: $name<T>) -> Self {
                value.to_array()
            }
        }
        impl<T: Scalar> From<($(vector_common!(@scalar $field)),+)> for $name<T> {
            fn from(($($field),+): ($(vector_common!(@scalar $field)),+)) -> Self {
                Self { $($field),+ }
            }
        }
        impl<T: Scalar> From<$name<T>> for ($(vector_common!(@scalar $field)),+) {
            fn from(value: $name<T>) -> Self {
                ($(value.$field),+)
            }
        }
        impl From<$name<f32>> for $name<f64> {
            fn from(value: $name<f32>) -> Self {
                value.to_f64()
            }
        }
        impl From<$name<i32>> for $name<f64> {
            fn from(value: $name<i32>) -> Self {
                value.to_f64()
            }
        }
        impl From<$name<u32>> for $name<f64> {
            fn from(value: $name<u32>) -> Self {
                value.to_f64()
            }
        }

        impl<T: Scalar> fmt::Display for $name<T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "(")?;
                write_components(f, &self.to_array(), ", ")?;
                write!(f, ")")
            }
        }

        impl<T: Scalar> Add<$name<T>> for $name<T> {
            type Output = $name<T>;

            fn add(self, rhs: $name<T>) -> Self::Output {
                self.zip_with(rhs, Add::add)
            }
        }
        impl<T: Scalar> AddAssign<$name<T>> for $name<T> {
            fn add_assign(&mut self, rhs: $name<T>) {
                *self = *self + rhs;
            }
        }
        impl<T: Scalar> Sub<$name<T>> for $name<T> {
            type Output = $name<T>;

            fn sub(self, rhs: $name<T>) -> Self::Output {
                self.zip_with(rhs, Sub::sub)
            }
        }
        impl<T: Scalar> SubAssign<$name<T>> for $name<T> {
            fn sub_assign(&mut self, rhs: $name<T>) {
                *self = *self - rhs;
            }
        }
        impl<T: Scalar> Sum<$name<T>> for $name<T> {
            fn sum<I: Iterator<Item = $name<T>>>(iter: I) -> Self {
                iter.fold(Self::zero(), Add::add)
            }
        }

        impl<T: Scalar> Mul<T> for $name<T> {
            type Output = $name<T>;

            fn mul(self, rhs: T) -> Self::Output {
                self.map(|v| v * rhs)
            }
        }
        impl<T: Scalar> MulAssign<T> for $name<T> {
            fn mul_assign(&mut self, rhs: T) {
                *self = *self * rhs;
            }
        }
        impl<T: Scalar> Mul<$name<T>> for $name<T> {
            type Output = $name<T>;

            fn mul(self, rhs: $name<T>) -> Self::Output {
                self.component_mul(rhs)
            }
        }
        impl<T: Scalar> Div<T> for $name<T> {
            type Output = $name<T>;

            fn div(self, rhs: T) -> Self::Output {
                self.map(|v| v / rhs)
            }
        }
        impl<T: Scalar> DivAssign<T> for $name<T> {
            fn div_assign(&mut self, rhs: T) {
                *self = *self / rhs;
            }
        }
        impl<T: Scalar> Div<$name<T>> for $name<T> {
            type Output = $name<T>;

            fn div(self, rhs: $name<T>) -> Self::Output {
                self.component_div(rhs)
            }
        }

        impl<T: Scalar + Neg<Output = T>> Neg for $name<T> {
            type Output = $name<T>;

            fn neg(self) -> Self::Output {
                self.map(Neg::neg)
            }
        }
        impl<T: Scalar + Neg<Output = T>> Neg for &$name<T> {
            type Output = $name<T>;

            fn neg(self) -> Self::Output {
                -*self
            }
        }

        impl<T: Real> AbsDiffEq for $name<T> {
            type Epsilon = T;

            fn default_epsilon() -> Self::Epsilon {
                <T as AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                $(self.$field.abs_diff_eq(&other.$field, epsilon))&&+
            }
        }
        impl<T: Real> RelativeEq for $name<T> {
            fn default_max_relative() -> Self::Epsilon {
                <T as RelativeEq>::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                $(self.$field.relative_eq(&other.$field, epsilon, max_relative))&&+
            }
        }
        impl<T: Real> UlpsEq for $name<T> {
            fn default_max_ulps() -> u32 {
                <T as UlpsEq>::default_max_ulps()
            }

            fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
                $(self.$field.ulps_eq(&other.$field, epsilon, max_ulps))&&+
            }
        }

        scalar_lhs_mul!($name: f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
    };
}

macro_rules! scalar_lhs_mul {
    ($name:ident: $($types:ty),+) => {
        $(
            impl Mul<$name<$types>> for $types {
                type Output = $name<$types>;

                fn mul(self, rhs: $name<$types>) -> Self::Output {
                    rhs * self
                }
            }
            impl Mul<&$name<$types>> for $types {
                type Output = $name<$types>;

                fn mul(self, rhs: &$name<$types>) -> Self::Output {
                    *rhs * self
                }
            }
        )+
    };
}

vector_common!(Vector2, 2, x: 0, y: 1);
vector_common!(Vector3, 3, x: 0, y: 1, z: 2);
vector_common!(Vector4, 4, x: 0, y: 1, z: 2, w: 3);

impl<T: Scalar> Vector2<T> {
    /// Returns a unit vector along the positive x-axis.
    #[must_use]
    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero())
    }
    /// Returns a unit vector along the positive y-axis.
    #[must_use]
    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one())
    }

    /// Computes the 2D cross product of two vectors.
    ///
    /// In 2D, the cross product is a scalar representing the signed area of the
    /// parallelogram formed by the two vectors. It is positive if `other` lies on the +Y side of
    /// `self` (counter-clockwise with y pointing up).
    ///
    /// # Examples
    ///
    /// ```
    /// use linalg_kernel::util::linalg::Vector2f;
    /// let v1 = Vector2f::new(2.0, 0.0);
    /// let v2 = Vector2f::new(0.0, 3.0);
    /// assert_eq!(v1.perp_dot(v2), 6.0); // 2*3 - 0*0
    /// assert_eq!(v1.perp_dot(-v2), -6.0);
    /// ```
    #[must_use]
    pub fn perp_dot(&self, other: Self) -> T {
        self.x * other.y - self.y * other.x
    }

    /// Appends a `z` component.
    #[must_use]
    pub fn extend(&self, z: T) -> Vector3<T> {
        Vector3::from_vector2(*self, z)
    }
}

impl<T: Scalar + Neg<Output = T>> Vector2<T> {
    /// Returns a vector perpendicular to this one: the components are swapped and the new `y`
    /// negated.
    ///
    /// # Examples
    ///
    /// ```
    /// use linalg_kernel::util::linalg::Vector2i;
    /// let v = Vector2i::new(3, 2);
    /// let perpendicular = v.perpendicular();
    /// assert_eq!(perpendicular, Vector2i::new(2, -3));
    /// assert_eq!(v.dot(perpendicular), 0);
    /// ```
    #[must_use]
    pub fn perpendicular(&self) -> Self {
        Self::new(self.y, -self.x)
    }
}

impl<T: Real> Vector2<T> {
    /// Returns this vector rotated by `degrees`, using the same convention as
    /// [`Matrix2x2::create_rotation`].
    #[must_use]
    pub fn rotated(&self, degrees: T) -> Self {
        Matrix2x2::create_rotation(degrees) * *self
    }

    /// Rotates `(x, y, 0)` by `rotation` and drops the resulting `z` component.
    #[must_use]
    pub fn transform(vector: Self, rotation: Quaternion<T>) -> Self {
        Vector3::transform(vector.extend(T::zero()), rotation).truncate()
    }
}

impl<T: Scalar> Vector3<T> {
    #[must_use]
    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero(), T::zero())
    }
    #[must_use]
    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one(), T::zero())
    }
    #[must_use]
    pub fn unit_z() -> Self {
        Self::new(T::zero(), T::zero(), T::one())
    }

    /// Extends a 2D vector with a `z` component.
    #[must_use]
    pub fn from_vector2(xy: Vector2<T>, z: T) -> Self {
        Self::new(xy.x, xy.y, z)
    }

    /// Drops the `z` component.
    #[must_use]
    pub fn truncate(&self) -> Vector2<T> {
        Vector2::new(self.x, self.y)
    }

    /// Appends a `w` component.
    #[must_use]
    pub fn extend(&self, w: T) -> Vector4<T> {
        Vector4::from_vector3(*self, w)
    }

    /// Computes the right-handed cross product.
    ///
    /// # Examples
    ///
    /// ```
    /// use linalg_kernel::util::linalg::Vector3i;
    /// assert_eq!(Vector3i::unit_x().cross(Vector3i::unit_y()), Vector3i::unit_z());
    /// assert_eq!(Vector3i::unit_y().cross(Vector3i::unit_x()), Vector3i::new(0, 0, -1));
    /// ```
    #[must_use]
    pub fn cross(&self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl<T: Real> Vector3<T> {
    /// Rotates `vector` by `rotation`.
    ///
    /// Evaluates `v + 2w(q × v) + 2 q × (q × v)` in its expanded form; the arithmetic is shared
    /// with [`Matrix3x3::create_from_quaternion`](crate::util::linalg::Matrix3x3), so rotating
    /// through either gives identical results.
    #[must_use]
    pub fn transform(vector: Self, rotation: Quaternion<T>) -> Self {
        let [r0, r1, r2] = rotation.rotation_rows();
        Self::new(
            Self::from_array(r0).dot(vector),
            Self::from_array(r1).dot(vector),
            Self::from_array(r2).dot(vector),
        )
    }
}

impl<T: Scalar> Vector4<T> {
    #[must_use]
    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }
    #[must_use]
    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one(), T::zero(), T::zero())
    }
    #[must_use]
    pub fn unit_z() -> Self {
        Self::new(T::zero(), T::zero(), T::one(), T::zero())
    }
    #[must_use]
    pub fn unit_w() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Extends a 3D vector with a `w` component.
    #[must_use]
    pub fn from_vector3(xyz: Vector3<T>, w: T) -> Self {
        Self::new(xyz.x, xyz.y, xyz.z, w)
    }

    /// Drops the `w` component.
    #[must_use]
    pub fn truncate(&self) -> Vector3<T> {
        Vector3::new(self.x, self.y, self.z)
    }
}
