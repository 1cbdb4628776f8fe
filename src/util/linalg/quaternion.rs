use crate::core::config::SLERP_LINEAR_THRESHOLD;
use crate::core::error::{check_index, LinalgError};
use crate::core::scalar::{self, Real, Scalar};
use crate::util;
use crate::util::assert::check_lt;
use crate::util::linalg::{write_components, Matrix3x3, Vector3};
use anyhow::Result;
use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};
use tracing::debug;

/// A quaternion `xi + yj + zk + w`, used to represent rotations in 3D space.
///
/// Only unit quaternions are pure rotations. The constructors that build rotations
/// ([`from_axis_angle`](Quaternion::from_axis_angle),
/// [`from_euler_angles`](Quaternion::from_euler_angles),
/// [`from_rotation_matrix`](Quaternion::from_rotation_matrix)) return unit quaternions, and the
/// product of unit quaternions stays (up to rounding) unit length.
///
/// Composition follows the Hamilton product: `q1 * q2` applies `q2` first, then `q1`.
///
/// # Examples
///
/// ```
/// use linalg_kernel::util::linalg::{Quaterniond, Vector3d};
///
/// let turn = Quaterniond::from_axis_angle(Vector3d::unit_y(), 180.0);
/// let rotated = turn * Vector3d::unit_x();
/// assert!(rotated.almost_eq(Vector3d::new(-1.0, 0.0, 0.0)));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Quaternion<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

pub type Quaternionf = Quaternion<f32>;
pub type Quaterniond = Quaternion<f64>;

impl<T: Scalar> Quaternion<T> {
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// The quaternion `(0, 0, 0, 1)`, representing no rotation.
    pub fn identity() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Creates a quaternion from its vector part and scalar part.
    pub fn from_vector(xyz: Vector3<T>, w: T) -> Self {
        Self::new(xyz.x, xyz.y, xyz.z, w)
    }

    /// The vector part `(x, y, z)`.
    pub fn xyz(&self) -> Vector3<T> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn set_xyz(&mut self, xyz: Vector3<T>) {
        self.x = xyz.x;
        self.y = xyz.y;
        self.z = xyz.z;
    }

    #[must_use]
    pub fn to_array(self) -> [T; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub fn from_array([x, y, z, w]: [T; 4]) -> Self {
        Self::new(x, y, z, w)
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Quaternion<U> {
        Quaternion {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
            w: f(self.w),
        }
    }

    fn zip_with(self, rhs: Self, mut f: impl FnMut(T, T) -> T) -> Self {
        Self::new(
            f(self.x, rhs.x),
            f(self.y, rhs.y),
            f(self.z, rhs.z),
            f(self.w, rhs.w),
        )
    }

    #[must_use]
    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[must_use]
    pub fn len_squared(&self) -> T {
        self.dot(*self)
    }

    /// Returns the component at `index` (`x`, `y`, `z`, `w` in that order), or an error if
    /// `index` is out of range.
    pub fn get(&self, index: usize) -> Result<T, LinalgError> {
        check_index(index, 4)?;
        Ok(self[index])
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<(), LinalgError> {
        check_index(index, 4)?;
        self[index] = value;
        Ok(())
    }

    /// Converts to another scalar type, returning [`None`] if any component is not
    /// representable in `U`.
    #[must_use]
    pub fn cast<U: Scalar>(&self) -> Option<Quaternion<U>> {
        Some(Quaternion {
            x: scalar::cast(self.x)?,
            y: scalar::cast(self.y)?,
            z: scalar::cast(self.z)?,
            w: scalar::cast(self.w)?,
        })
    }
}

impl<T: Scalar + Into<f64>> Quaternion<T> {
    /// Widens every component to `f64`. Lossless.
    pub fn to_f64(&self) -> Quaternion<f64> {
        self.map(Into::into)
    }
}

impl Quaternion<f64> {
    /// Narrows every component to `f32` with native truncation.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_f32_lossy(&self) -> Quaternion<f32> {
        self.map(|v| v as f32)
    }

    /// Narrows every component to `f32`, failing if a finite component overflows `f32`.
    pub fn try_to_f32(&self) -> Result<Quaternion<f32>> {
        Ok(Quaternion {
            x: util::f64_to_f32(self.x)?,
            y: util::f64_to_f32(self.y)?,
            z: util::f64_to_f32(self.z)?,
            w: util::f64_to_f32(self.w)?,
        })
    }
}

impl<T: Real> Quaternion<T> {
    #[must_use]
    pub fn len(&self) -> T {
        self.len_squared().sqrt()
    }

    /// Scales the quaternion to unit length in place.
    ///
    /// A quaternion whose squared length is exactly zero is left unchanged.
    pub fn normalise(&mut self) {
        let len_squared = self.len_squared();
        if len_squared.is_zero() {
            debug!("Quaternion::normalise(): zero-length quaternion left unchanged");
            return;
        }
        *self /= len_squared.sqrt();
    }

    pub fn normalised(&self) -> Self {
        let mut rv = *self;
        rv.normalise();
        rv
    }

    /// Negates the vector part in place. For a unit quaternion this is the inverse rotation.
    pub fn conjugate(&mut self) {
        *self = Self::new(-self.x, -self.y, -self.z, self.w);
    }

    pub fn conjugated(&self) -> Self {
        let mut rv = *self;
        rv.conjugate();
        rv
    }

    /// Replaces the quaternion with its multiplicative inverse, `conjugate / len_squared`.
    ///
    /// A quaternion whose squared length is exactly zero is left unchanged.
    pub fn invert(&mut self) {
        let len_squared = self.len_squared();
        if len_squared.is_zero() {
            debug!("Quaternion::invert(): zero-length quaternion left unchanged");
            return;
        }
        *self = self.conjugated() / len_squared;
    }

    pub fn inverse(&self) -> Self {
        let mut rv = *self;
        rv.invert();
        rv
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Checks whether the component-wise difference is shorter than [`Real::tolerance`].
    pub fn almost_eq(&self, rhs: Self) -> bool {
        (*self - rhs).len() < T::tolerance()
    }

    /// Spherical linear interpolation between two rotations, along the shorter arc.
    ///
    /// `t = 0` gives `q1` and `t = 1` gives `q2` (negated, if that is the nearer representation
    /// of the same rotation). Nearly parallel inputs are blended linearly. If one input has zero
    /// length the other is returned; if both do, the identity. The blend is not renormalised, so
    /// non-unit inputs keep their length at the endpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use linalg_kernel::util::linalg::{Quaterniond, Vector3d};
    ///
    /// let a = Quaterniond::identity();
    /// let b = Quaterniond::from_axis_angle(Vector3d::unit_z(), 90.0);
    /// let halfway = Quaterniond::slerp(a, b, 0.5);
    /// assert!(halfway.almost_eq(Quaterniond::from_axis_angle(Vector3d::unit_z(), 45.0)));
    /// ```
    pub fn slerp(q1: Self, q2: Self, t: T) -> Self {
        match (q1.len_squared().is_zero(), q2.len_squared().is_zero()) {
            (true, true) => {
                debug!("Quaternion::slerp(): both inputs zero-length, returning identity");
                return Self::identity();
            }
            (true, false) => return q2,
            (false, true) => return q1,
            (false, false) => {}
        }

        let mut q2 = q2;
        let mut cos_omega = q1.dot(q2);
        if cos_omega < T::zero() {
            q2 = -q2;
            cos_omega = -cos_omega;
        }

        let (w1, w2) = if cos_omega > T::from_literal(SLERP_LINEAR_THRESHOLD) {
            (T::one() - t, t)
        } else {
            let omega = cos_omega.acos();
            let sin_omega = omega.sin();
            (
                ((T::one() - t) * omega).sin() / sin_omega,
                (t * omega).sin() / sin_omega,
            )
        };

        q1 * w1 + q2 * w2
    }

    /// Decomposes the rotation into a unit axis and an angle in degrees, in `[0, 360]`.
    ///
    /// For the zero rotation (`w = ±1`) the axis is ill-defined and +X is returned.
    pub fn axis_angle(&self) -> (Vector3<T>, T) {
        let mut q = *self;
        if q.w.abs() > T::one() {
            q.normalise();
        }
        let w = util::clamp(q.w, -T::one(), T::one());
        let angle = util::radians_to_degrees(T::two() * w.acos());
        let denominator = (T::one() - w * w).sqrt();
        let axis = if denominator.is_zero() {
            Vector3::unit_x()
        } else {
            q.xyz() / denominator
        };
        (axis, angle)
    }

    /// Creates a rotation of `degrees` about `axis`. The axis need not be normalised; a zero
    /// axis yields the identity.
    pub fn from_axis_angle(axis: Vector3<T>, degrees: T) -> Self {
        if axis.len_squared().is_zero() {
            debug!("Quaternion::from_axis_angle(): zero axis, returning identity");
            return Self::identity();
        }
        let (sin, cos) = (util::degrees_to_radians(degrees) * T::half()).sin_cos();
        Self::from_vector(axis.normalised() * sin, cos).normalised()
    }

    /// Creates a rotation from Euler angles in degrees: `pitch` about X, `yaw` about Y and `roll`
    /// about Z. Roll is applied first, then pitch, then yaw, i.e. the result equals
    /// `yaw * pitch * roll` composed from the individual axis rotations.
    pub fn from_euler_angles(pitch: T, yaw: T, roll: T) -> Self {
        let half = |degrees: T| (util::degrees_to_radians(degrees) * T::half()).sin_cos();
        let (sx, cx) = half(pitch);
        let (sy, cy) = half(yaw);
        let (sz, cz) = half(roll);
        Self::new(
            cz * cy * sx + cx * sy * sz,
            cz * cx * sy - cy * sx * sz,
            cx * cy * sz - cz * sx * sy,
            cx * cy * cz + sx * sy * sz,
        )
    }

    /// Extracts the rotation from a rotation matrix (Shepperd's method). For a proper rotation
    /// matrix this inverts [`Matrix3x3::create_from_quaternion`] up to the sign of the result.
    pub fn from_rotation_matrix(matrix: Matrix3x3<T>) -> Self {
        let [[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]] = matrix.to_rows();
        let one = T::one();
        let four = T::from_literal(4.0);
        let trace = m00 + m11 + m22;
        let rv = if trace > T::zero() {
            let s = (trace + one).sqrt() * T::two();
            Self::new((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, s / four)
        } else if m00 > m11 && m00 > m22 {
            let s = (one + m00 - m11 - m22).sqrt() * T::two();
            Self::new(s / four, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = (one + m11 - m00 - m22).sqrt() * T::two();
            Self::new((m01 + m10) / s, s / four, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = (one + m22 - m00 - m11).sqrt() * T::two();
            Self::new((m02 + m20) / s, (m12 + m21) / s, s / four, (m10 - m01) / s)
        };
        rv.normalised()
    }

    /// The rows of the rotation matrix for this (unit) quaternion.
    pub(crate) fn rotation_rows(&self) -> [[T; 3]; 3] {
        let Self { x, y, z, w } = *self;
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, yy, zz) = (x * x2, y * y2, z * z2);
        let (xy, xz, yz) = (x * y2, x * z2, y * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        let one = T::one();
        [
            [one - (yy + zz), xy - wz, xz + wy],
            [xy + wz, one - (xx + zz), yz - wx],
            [xz - wy, yz + wx, one - (xx + yy)],
        ]
    }
}

impl<T: Scalar> Default for Quaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Scalar> Hash for Quaternion<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash_scalar(state);
        self.y.hash_scalar(state);
        self.z.hash_scalar(state);
        self.w.hash_scalar(state);
    }
}

impl<T: Scalar> Index<usize> for Quaternion<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        check_lt!(index, 4, "Quaternion component index");
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => &self.w,
        }
    }
}
impl<T: Scalar> IndexMut<usize> for Quaternion<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        check_lt!(index, 4, "Quaternion component index");
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => &mut self.w,
        }
    }
}

impl<T: Scalar> From<[T; 4]> for Quaternion<T> {
    fn from(value: [T; 4]) -> Self {
        Self::from_array(value)
    }
}
impl<T: Scalar> From<Quaternion<T>> for [T; 4] {
    fn from(value: Quaternion<T>) -> Self {
        value.to_array()
    }
}
impl<T: Scalar> From<(T, T, T, T)> for Quaternion<T> {
    fn from((x, y, z, w): (T, T, T, T)) -> Self {
        Self::new(x, y, z, w)
    }
}
impl<T: Scalar> From<Quaternion<T>> for (T, T, T, T) {
    fn from(value: Quaternion<T>) -> Self {
        (value.x, value.y, value.z, value.w)
    }
}
impl From<Quaternion<f32>> for Quaternion<f64> {
    fn from(value: Quaternion<f32>) -> Self {
        value.to_f64()
    }
}

impl<T: Scalar> fmt::Display for Quaternion<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_components(f, &self.to_array(), ", ")?;
        write!(f, ")")
    }
}

impl<T: Scalar> Add<Quaternion<T>> for Quaternion<T> {
    type Output = Quaternion<T>;

    fn add(self, rhs: Quaternion<T>) -> Self::Output {
        self.zip_with(rhs, Add::add)
    }
}
impl<T: Scalar> AddAssign<Quaternion<T>> for Quaternion<T> {
    fn add_assign(&mut self, rhs: Quaternion<T>) {
        *self = *self + rhs;
    }
}
impl<T: Scalar> Sub<Quaternion<T>> for Quaternion<T> {
    type Output = Quaternion<T>;

    fn sub(self, rhs: Quaternion<T>) -> Self::Output {
        self.zip_with(rhs, Sub::sub)
    }
}
impl<T: Scalar> SubAssign<Quaternion<T>> for Quaternion<T> {
    fn sub_assign(&mut self, rhs: Quaternion<T>) {
        *self = *self - rhs;
    }
}
impl<T: Scalar + Neg<Output = T>> Neg for Quaternion<T> {
    type Output = Quaternion<T>;

    fn neg(self) -> Self::Output {
        self.map(Neg::neg)
    }
}

impl<T: Scalar> Mul<T> for Quaternion<T> {
    type Output = Quaternion<T>;

    fn mul(self, rhs: T) -> Self::Output {
        self.map(|v| v * rhs)
    }
}
impl<T: Scalar> MulAssign<T> for Quaternion<T> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}
impl<T: Scalar> Div<T> for Quaternion<T> {
    type Output = Quaternion<T>;

    fn div(self, rhs: T) -> Self::Output {
        self.map(|v| v / rhs)
    }
}
impl<T: Scalar> DivAssign<T> for Quaternion<T> {
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

/// The Hamilton product: `xyz = w1·v2 + w2·v1 + v1 × v2`, `w = w1·w2 − v1·v2`.
impl<T: Scalar> Mul<Quaternion<T>> for Quaternion<T> {
    type Output = Quaternion<T>;

    fn mul(self, rhs: Quaternion<T>) -> Self::Output {
        let (v1, v2) = (self.xyz(), rhs.xyz());
        Self::from_vector(
            v2 * self.w + v1 * rhs.w + v1.cross(v2),
            self.w * rhs.w - v1.dot(v2),
        )
    }
}
impl<T: Scalar> MulAssign<Quaternion<T>> for Quaternion<T> {
    fn mul_assign(&mut self, rhs: Quaternion<T>) {
        *self = *self * rhs;
    }
}

impl<T: Real> Mul<Vector3<T>> for Quaternion<T> {
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Self::Output {
        Vector3::transform(rhs, self)
    }
}

impl Mul<Quaternion<f32>> for f32 {
    type Output = Quaternion<f32>;

    fn mul(self, rhs: Quaternion<f32>) -> Self::Output {
        rhs * self
    }
}
impl Mul<Quaternion<f64>> for f64 {
    type Output = Quaternion<f64>;

    fn mul(self, rhs: Quaternion<f64>) -> Self::Output {
        rhs * self
    }
}

impl<T: Real> AbsDiffEq for Quaternion<T> {
    type Epsilon = T;

    fn default_epsilon() -> Self::Epsilon {
        <T as AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}
impl<T: Real> RelativeEq for Quaternion<T> {
    fn default_max_relative() -> Self::Epsilon {
        <T as RelativeEq>::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}
impl<T: Real> UlpsEq for Quaternion<T> {
    fn default_max_ulps() -> u32 {
        <T as UlpsEq>::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.x.ulps_eq(&other.x, epsilon, max_ulps)
            && self.y.ulps_eq(&other.y, epsilon, max_ulps)
            && self.z.ulps_eq(&other.z, epsilon, max_ulps)
            && self.w.ulps_eq(&other.w, epsilon, max_ulps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::linalg::{Matrix3x3d, Vector3d, Vector3f};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::hash_map::DefaultHasher;

    fn random_rotation(rng: &mut StdRng) -> Quaterniond {
        loop {
            let q = Quaterniond::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if q.len_squared() > 0.01 {
                return q.normalised();
            }
        }
    }

    fn assert_same_rotation(a: Quaterniond, b: Quaterniond) {
        assert_relative_eq!(a.dot(b).abs(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn identity() {
        let q = Quaterniond::identity();
        assert_eq!(q, Quaterniond::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(Quaterniond::default(), q);
        assert_eq!(q * q, q);
        assert_eq!(q * Vector3d::new(1.0, 2.0, 3.0), Vector3d::new(1.0, 2.0, 3.0));
        assert_eq!(q.len(), 1.0);
    }

    #[test]
    fn components() {
        let mut q = Quaternion::from_vector(Vector3::new(1, 2, 3), 4);
        assert_eq!(q.xyz(), Vector3::new(1, 2, 3));
        assert_eq!((q[0], q[3]), (1, 4));
        q.set_xyz(Vector3::new(5, 6, 7));
        q[3] = 8;
        assert_eq!(q.to_array(), [5, 6, 7, 8]);
        assert_eq!(q.get(2), Ok(7));
        assert_eq!(
            q.get(4),
            Err(LinalgError::IndexOutOfRange { index: 4, len: 4 })
        );
        assert!(q.set(1, 0).is_ok());
        assert!(q.set(7, 0).is_err());
        assert_eq!(<(i32, i32, i32, i32)>::from(q), (5, 0, 7, 8));
        assert_eq!(Quaternion::from([1, 2, 3, 4]), Quaternion::from((1, 2, 3, 4)));
    }

    #[test]
    #[should_panic(expected = "Quaternion component index")]
    fn index_out_of_range() {
        let _ = Quaterniond::identity()[4];
    }

    #[test]
    fn normalise() {
        let mut q = Quaterniond::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(q.len(), 2.0);
        q.normalise();
        assert_eq!(q, Quaterniond::new(0.5, 0.5, 0.5, 0.5));

        let zero = Quaternionf::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(zero.normalised(), zero);
        assert!(zero.normalised().is_finite());
    }

    #[test]
    fn conjugate_and_inverse() {
        let q = Quaterniond::new(1.0, -2.0, 3.0, 4.0);
        assert_eq!(q.conjugated(), Quaterniond::new(-1.0, 2.0, -3.0, 4.0));
        assert_abs_diff_eq!(q * q.inverse(), Quaterniond::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(q.inverse() * q, Quaterniond::identity(), epsilon = 1e-12);

        let unit = q.normalised();
        assert_abs_diff_eq!(unit.inverse(), unit.conjugated(), epsilon = 1e-12);
    }

    #[test]
    fn zero_inverse_is_guarded() {
        crate::util::init_test_log();
        let mut zero_f = Quaternionf::new(0.0, 0.0, 0.0, 0.0);
        zero_f.invert();
        assert_eq!(zero_f, Quaternionf::new(0.0, 0.0, 0.0, 0.0));

        let zero_d = Quaterniond::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(zero_d.inverse(), zero_d);
        assert!(zero_d.inverse().is_finite());
    }

    #[test]
    fn hamilton_product() {
        let i = Quaternion::new(1, 0, 0, 0);
        let j = Quaternion::new(0, 1, 0, 0);
        let k = Quaternion::new(0, 0, 1, 0);
        let minus_one = Quaternion::new(0, 0, 0, -1);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        assert_eq!(i * i, minus_one);
        assert_eq!(i * j * k, minus_one);
    }

    #[test]
    fn composition_is_associative_not_commutative() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..50 {
            let (a, b, c) = (
                random_rotation(&mut rng),
                random_rotation(&mut rng),
                random_rotation(&mut rng),
            );
            assert_abs_diff_eq!((a * b) * c, a * (b * c), epsilon = 1e-12);
            assert_relative_eq!((a * b).len(), 1.0, epsilon = 1e-12);
        }
        let x = Quaterniond::from_axis_angle(Vector3d::unit_x(), 90.0);
        let y = Quaterniond::from_axis_angle(Vector3d::unit_y(), 90.0);
        assert!(!(x * y).almost_eq(y * x));
    }

    #[test]
    fn composition_matches_matrices() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let (a, b) = (random_rotation(&mut rng), random_rotation(&mut rng));
            assert_abs_diff_eq!(
                Matrix3x3d::create_from_quaternion(a * b),
                Matrix3x3d::create_from_quaternion(a) * Matrix3x3d::create_from_quaternion(b),
                epsilon = 1e-12
            );
            let v = Vector3d::new(rng.gen(), rng.gen(), rng.gen());
            assert_abs_diff_eq!((a * b) * v, a * (b * v), epsilon = 1e-12);
        }
    }

    #[test]
    fn rotate_vector() {
        let q = Quaterniond::from_axis_angle(Vector3d::unit_y(), 180.0);
        assert_abs_diff_eq!(
            q * Vector3d::new(1.0, 0.0, 0.0),
            Vector3d::new(-1.0, 0.0, 0.0),
            epsilon = 1e-12
        );
        let q = Quaternionf::from_axis_angle(Vector3f::unit_z(), 90.0);
        assert_abs_diff_eq!(q * Vector3f::unit_x(), Vector3f::unit_y(), epsilon = 1e-6);
        let q = Quaterniond::from_axis_angle(Vector3d::unit_z(), -90.0);
        assert_abs_diff_eq!(
            q * Vector3d::unit_x(),
            Vector3d::new(0.0, -1.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn axis_angle_round_trip() {
        let axis = Vector3d::new(1.0, -2.0, 0.5);
        let q = Quaterniond::from_axis_angle(axis, 73.0);
        assert_relative_eq!(q.len(), 1.0, epsilon = 1e-12);
        let (out_axis, degrees) = q.axis_angle();
        assert_abs_diff_eq!(out_axis, axis.normalised(), epsilon = 1e-9);
        assert_relative_eq!(degrees, 73.0, epsilon = 1e-9);

        let (_, degrees) = Quaternionf::from_axis_angle(Vector3f::unit_x(), 120.0).axis_angle();
        assert_relative_eq!(degrees, 120.0, epsilon = 1e-3);
    }

    #[test]
    fn axis_angle_small_rotation() {
        let q = Quaterniond::from_axis_angle(Vector3d::unit_z(), 0.01);
        let (axis, degrees) = q.axis_angle();
        assert_abs_diff_eq!(axis, Vector3d::unit_z(), epsilon = 1e-6);
        assert_relative_eq!(degrees, 0.01, epsilon = 1e-8);
        let rebuilt = Quaterniond::from_axis_angle(axis, degrees);
        assert_abs_diff_eq!(rebuilt, q, epsilon = 1e-11);
    }

    #[test]
    fn axis_angle_degenerate() {
        assert_eq!(
            Quaterniond::identity().axis_angle(),
            (Vector3d::unit_x(), 0.0)
        );
        assert_eq!(
            Quaterniond::from_axis_angle(Vector3d::zero(), 45.0),
            Quaterniond::identity()
        );
        let (axis, degrees) = Quaterniond::new(0.0, 0.0, 0.0, 2.0).axis_angle();
        assert_eq!((axis, degrees), (Vector3d::unit_x(), 0.0));
    }

    #[test]
    fn slerp_endpoints() {
        let a = Quaterniond::from_axis_angle(Vector3d::new(1.0, 1.0, 0.0), 30.0);
        let b = Quaterniond::from_axis_angle(Vector3d::new(0.0, 1.0, 2.0), 100.0);
        assert!(a.dot(b) > 0.0);
        assert_abs_diff_eq!(Quaterniond::slerp(a, b, 0.0), a, epsilon = 1e-12);
        assert_abs_diff_eq!(Quaterniond::slerp(a, b, 1.0), b, epsilon = 1e-12);
        assert_abs_diff_eq!(Quaterniond::slerp(a, a, 0.3), a, epsilon = 1e-12);
        for i in 0..=10 {
            let q = Quaterniond::slerp(a, b, f64::from(i) / 10.0);
            assert_relative_eq!(q.len(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn slerp_keeps_input_length() {
        let q = Quaterniond::new(0.0, 0.0, 0.0, 2.0);
        assert_eq!(Quaterniond::slerp(q, q, 0.5), q);
        let tilted = Quaterniond::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(Quaterniond::slerp(tilted, Quaterniond::identity(), 0.0), tilted);
    }

    #[test]
    fn slerp_shortest_path() {
        let a = Quaterniond::identity();
        let b = -Quaterniond::from_axis_angle(Vector3d::unit_z(), 90.0);
        let halfway = Quaterniond::slerp(a, b, 0.5);
        assert_same_rotation(halfway, Quaterniond::from_axis_angle(Vector3d::unit_z(), 45.0));
        assert!(halfway.w > 0.0);
    }

    #[test]
    fn slerp_near_parallel_is_linear() {
        let a = Quaterniond::identity();
        let b = Quaterniond::from_axis_angle(Vector3d::unit_x(), 1.0);
        let expected = a * 0.75 + b * 0.25;
        assert_eq!(Quaterniond::slerp(a, b, 0.25), expected);
    }

    #[test]
    fn slerp_degenerate() {
        let zero = Quaterniond::new(0.0, 0.0, 0.0, 0.0);
        let q = Quaterniond::from_axis_angle(Vector3d::unit_y(), 10.0);
        assert_eq!(Quaterniond::slerp(zero, q, 0.5), q);
        assert_eq!(Quaterniond::slerp(q, zero, 0.5), q);
        assert_eq!(
            Quaterniond::slerp(zero, zero, 0.5),
            Quaterniond::identity()
        );
        let zero_f = Quaternionf::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(
            Quaternionf::slerp(zero_f, zero_f, 0.5),
            Quaternionf::identity()
        );
    }

    #[test]
    fn euler_angles_match_composition() {
        for (pitch, yaw, roll) in [(10.0, 20.0, 30.0), (-45.0, 170.0, 5.0), (90.0, 0.0, -90.0)] {
            let composed = Quaterniond::from_axis_angle(Vector3d::unit_y(), yaw)
                * Quaterniond::from_axis_angle(Vector3d::unit_x(), pitch)
                * Quaterniond::from_axis_angle(Vector3d::unit_z(), roll);
            assert_abs_diff_eq!(
                Quaterniond::from_euler_angles(pitch, yaw, roll),
                composed,
                epsilon = 1e-12
            );
        }
        assert_abs_diff_eq!(
            Quaternionf::from_euler_angles(0.0, 90.0, 0.0),
            Quaternionf::from_axis_angle(Vector3f::unit_y(), 90.0),
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            Quaternionf::from_euler_angles(10.0, 20.0, 30.0).to_f64(),
            Quaterniond::from_euler_angles(10.0, 20.0, 30.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn rotation_matrix_round_trip() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut samples: Vec<_> = (0..50).map(|_| random_rotation(&mut rng)).collect();
        samples.extend([
            Quaterniond::identity(),
            Quaterniond::from_axis_angle(Vector3d::unit_x(), 180.0),
            Quaterniond::from_axis_angle(Vector3d::unit_y(), 180.0),
            Quaterniond::from_axis_angle(Vector3d::unit_z(), 180.0),
            Quaterniond::from_axis_angle(Vector3d::new(1.0, 1.0, 1.0), 179.0),
        ]);
        for q in samples {
            let m = Matrix3x3d::create_from_quaternion(q);
            assert_same_rotation(Quaternion::from_rotation_matrix(m), q);
            assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn conversions() {
        let q = Quaternionf::new(0.1, -0.2, 0.3, 0.9);
        assert_eq!(q.to_f64().to_f32_lossy(), q);
        assert_eq!(Quaterniond::from(q), q.to_f64());
        assert_eq!(q.to_f64().try_to_f32().unwrap(), q);
        assert!(Quaterniond::new(0.0, 0.0, 1e300, 1.0).try_to_f32().is_err());
        assert_eq!(
            Quaterniond::new(1.9, -2.5, 0.0, 7.0).cast::<i32>(),
            Some(Quaternion::new(1, -2, 0, 7))
        );
        assert_eq!(Quaterniond::new(f64::NAN, 0.0, 0.0, 1.0).cast::<i32>(), None);
    }

    #[test]
    fn arithmetic() {
        let a = Quaterniond::new(1.0, 2.0, 3.0, 4.0);
        let b = Quaterniond::new(0.5, 0.5, 0.5, 0.5);
        assert_eq!(a + b, Quaterniond::new(1.5, 2.5, 3.5, 4.5));
        assert_eq!(a - b, Quaterniond::new(0.5, 1.5, 2.5, 3.5));
        assert_eq!(2.0 * b, Quaterniond::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(a / 2.0, Quaterniond::new(0.5, 1.0, 1.5, 2.0));
        assert_eq!(a.dot(b), 5.0);
        let mut c = a;
        c += b;
        c -= b;
        c *= 2.0;
        c /= 2.0;
        assert_eq!(c, a);
        c *= Quaterniond::identity();
        assert_eq!(c, a);
    }

    #[test]
    fn display_serde_hash() {
        let q = Quaterniond::new(0.0, -0.5, 0.3, 1.0);
        assert_eq!(q.to_string(), "(0, -0.5, 0.3, 1)");
        assert_eq!(format!("{q:.1}"), "(0.0, -0.5, 0.3, 1.0)");

        let encoded = bincode::serialize(&q).unwrap();
        assert_eq!(bincode::deserialize::<Quaterniond>(&encoded).unwrap(), q);

        let hash = |q: Quaterniond| {
            let mut hasher = DefaultHasher::new();
            q.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(
            hash(Quaterniond::new(-0.0, 0.0, 0.0, 1.0)),
            hash(Quaterniond::identity())
        );
    }
}
