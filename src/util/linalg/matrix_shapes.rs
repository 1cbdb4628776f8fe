//! Shape-specific matrix operations: cell-wise constructors, products with vectors, growing
//! into a neighbouring shape, determinants, inverses and transform builders.

use crate::core::scalar::{Real, Scalar};
use crate::util;
use crate::util::linalg::{
    Matrix, Matrix2x2, Matrix2x3, Matrix3x2, Matrix3x3, Matrix4x4, Quaternion, Vector2, Vector3,
    Vector4,
};
use std::array;
use std::ops::Mul;
use tracing::debug;

macro_rules! matrix_shape {
    (@scalar $cell:ident) => { T };
    ($r:literal, $c:literal, $row_vec:ident, $col_vec:ident; $($cell:ident),+) => {
        impl<T: Scalar> Matrix<T, $r, $c> {
            /// Creates a matrix from its cells in row-major order.
            #[allow(clippy::too_many_arguments)]
            pub fn new($($cell: T),+) -> Self {
                Self::from_flat([$($cell),+])
            }

            /// Creates a matrix whose rows are the given vectors.
            pub fn from_row_vectors(rows: [$col_vec<T>; $r]) -> Self {
                Self::from_rows(rows.map($col_vec::to_array))
            }

            /// Creates a matrix whose columns are the given vectors.
            pub fn from_column_vectors(columns: [$row_vec<T>; $c]) -> Self {
                Self::from_columns(columns.map($row_vec::to_array))
            }

            /// Returns row `index` as a vector. Panics if `index` is out of range.
            pub fn row_vector(&self, index: usize) -> $col_vec<T> {
                $col_vec::from_array(self.row(index))
            }

            /// Returns column `index` as a vector. Panics if `index` is out of range.
            pub fn column_vector(&self, index: usize) -> $row_vec<T> {
                $row_vec::from_array(self.column(index))
            }
        }

        impl<T: Scalar> From<($(matrix_shape!(@scalar $cell)),+)> for Matrix<T, $r, $c> {
            fn from(($($cell),+): ($(matrix_shape!(@scalar $cell)),+)) -> Self {
                Self::new($($cell),+)
            }
        }
        impl<T: Scalar> From<Matrix<T, $r, $c>> for ($(matrix_shape!(@scalar $cell)),+) {
            fn from(value: Matrix<T, $r, $c>) -> Self {
                let [$($cell),+] = value.to_flat::<{ $r * $c }>();
                ($($cell),+)
            }
        }

        impl<T: Scalar> Mul<$col_vec<T>> for Matrix<T, $r, $c> {
            type Output = $row_vec<T>;

            fn mul(self, rhs: $col_vec<T>) -> Self::Output {
                $row_vec::from_array(self.mul_array(rhs.to_array()))
            }
        }
        impl<T: Scalar> Mul<Matrix<T, $r, $c>> for $row_vec<T> {
            type Output = $col_vec<T>;

            fn mul(self, rhs: Matrix<T, $r, $c>) -> Self::Output {
                $col_vec::from_array(rhs.premul_array(self.to_array()))
            }
        }
    };
}

matrix_shape!(2, 2, Vector2, Vector2; m11, m12, m21, m22);
matrix_shape!(2, 3, Vector2, Vector3; m11, m12, m13, m21, m22, m23);
matrix_shape!(2, 4, Vector2, Vector4; m11, m12, m13, m14, m21, m22, m23, m24);
matrix_shape!(3, 2, Vector3, Vector2; m11, m12, m21, m22, m31, m32);
matrix_shape!(3, 3, Vector3, Vector3; m11, m12, m13, m21, m22, m23, m31, m32, m33);
matrix_shape!(
    3, 4, Vector3, Vector4;
    m11, m12, m13, m14, m21, m22, m23, m24, m31, m32, m33, m34
);
matrix_shape!(4, 2, Vector4, Vector2; m11, m12, m21, m22, m31, m32, m41, m42);
matrix_shape!(
    4, 3, Vector4, Vector3;
    m11, m12, m13, m21, m22, m23, m31, m32, m33, m41, m42, m43
);
matrix_shape!(
    4, 4, Vector4, Vector4;
    m11, m12, m13, m14, m21, m22, m23, m24, m31, m32, m33, m34, m41, m42, m43, m44
);

impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C> {
    fn from_flat<const N: usize>(cells: [T; N]) -> Self {
        debug_assert_eq!(N, R * C);
        Self::from_fn(|row, col| cells[row * C + col])
    }

    fn to_flat<const N: usize>(self) -> [T; N] {
        debug_assert_eq!(N, R * C);
        let rows = self.to_rows();
        array::from_fn(|i| rows[i / C][i % C])
    }
}

macro_rules! with_row {
    ($($r:literal x $c:literal),+) => {
        $(
            impl<T: Scalar> Matrix<T, $r, $c> {
                /// Returns a copy of this matrix with `row` appended at the bottom.
                pub fn with_row(&self, row: [T; $c]) -> Matrix<T, { $r + 1 }, $c> {
                    self.append_row(row)
                }
            }
        )+
    };
}
macro_rules! with_column {
    ($($r:literal x $c:literal),+) => {
        $(
            impl<T: Scalar> Matrix<T, $r, $c> {
                /// Returns a copy of this matrix with `column` appended on the right.
                pub fn with_column(&self, column: [T; $r]) -> Matrix<T, $r, { $c + 1 }> {
                    self.append_column(column)
                }
            }
        )+
    };
}

with_row!(2 x 2, 2 x 3, 2 x 4, 3 x 2, 3 x 3, 3 x 4);
with_column!(2 x 2, 2 x 3, 3 x 2, 3 x 3, 4 x 2, 4 x 3);

impl<T: Scalar> Matrix2x2<T> {
    #[must_use]
    pub fn determinant(&self) -> T {
        let [[a, b], [c, d]] = self.to_rows();
        a * d - b * c
    }

    /// Creates a matrix scaling both axes by `scale`.
    pub fn create_scale(scale: T) -> Self {
        Self::create_scale_xy(scale, scale)
    }

    pub fn create_scale_xy(x: T, y: T) -> Self {
        Self::from_diagonal([x, y])
    }

    pub fn create_scale_vector(scale: Vector2<T>) -> Self {
        Self::create_scale_xy(scale.x, scale.y)
    }
}

impl<T: Real> Matrix2x2<T> {
    /// Creates a rotation matrix:
    /// ```text
    /// | cos(θ)  -sin(θ) |
    /// | sin(θ)   cos(θ) |
    /// ```
    /// A positive angle turns the +X axis towards +Y, which is counterclockwise with y pointing
    /// up and clockwise on a y-down screen.
    ///
    /// # Examples
    ///
    /// ```
    /// use linalg_kernel::util::linalg::{Matrix2x2d, Vector2d};
    ///
    /// let rotated = Matrix2x2d::create_rotation(90.0) * Vector2d::unit_x();
    /// assert!(rotated.almost_eq(Vector2d::unit_y()));
    /// ```
    pub fn create_rotation(degrees: T) -> Self {
        let (sin, cos) = util::degrees_to_radians(degrees).sin_cos();
        Self::new(cos, -sin, sin, cos)
    }

    /// Returns the inverse, or [`None`] if the determinant is exactly zero.
    #[must_use]
    pub fn try_inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.is_zero() {
            return None;
        }
        let [[a, b], [c, d]] = self.to_rows();
        Some(Self::new(d, -b, -c, a) / det)
    }
}

impl<T: Scalar> Matrix3x3<T> {
    /// Computes the determinant by cofactor expansion along the first row.
    ///
    /// # Examples
    /// ```
    /// use linalg_kernel::util::linalg::Matrix3x3;
    ///
    /// assert_eq!(Matrix3x3::<i32>::identity().determinant(), 1);
    /// assert_eq!(Matrix3x3::new(6, 1, 1, 4, -2, 5, 2, 8, 7).determinant(), -306);
    /// ```
    #[must_use]
    pub fn determinant(&self) -> T {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.to_rows();
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }

    pub fn create_scale(scale: T) -> Self {
        Self::create_scale_xyz(scale, scale, scale)
    }

    pub fn create_scale_xyz(x: T, y: T, z: T) -> Self {
        Self::from_diagonal([x, y, z])
    }

    pub fn create_scale_vector(scale: Vector3<T>) -> Self {
        Self::create_scale_xyz(scale.x, scale.y, scale.z)
    }
}

impl<T: Real> Matrix3x3<T> {
    #[must_use]
    pub fn try_inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.is_zero() {
            return None;
        }
        let [[a, b, c], [d, e, f], [g, h, i]] = self.to_rows();
        let adjugate = Self::new(
            e * i - f * h,
            c * h - b * i,
            b * f - c * e,
            f * g - d * i,
            a * i - c * g,
            c * d - a * f,
            d * h - e * g,
            b * g - a * h,
            a * e - b * d,
        );
        Some(adjugate / det)
    }

    /// Creates a rotation about the X axis; positive angles turn +Y towards +Z.
    pub fn create_rotation_x(degrees: T) -> Self {
        let (sin, cos) = util::degrees_to_radians(degrees).sin_cos();
        let (zero, one) = (T::zero(), T::one());
        Self::new(one, zero, zero, zero, cos, -sin, zero, sin, cos)
    }

    /// Creates a rotation about the Y axis; positive angles turn +Z towards +X.
    pub fn create_rotation_y(degrees: T) -> Self {
        let (sin, cos) = util::degrees_to_radians(degrees).sin_cos();
        let (zero, one) = (T::zero(), T::one());
        Self::new(cos, zero, sin, zero, one, zero, -sin, zero, cos)
    }

    /// Creates a rotation about the Z axis; positive angles turn +X towards +Y.
    pub fn create_rotation_z(degrees: T) -> Self {
        let (sin, cos) = util::degrees_to_radians(degrees).sin_cos();
        let (zero, one) = (T::zero(), T::one());
        Self::new(cos, -sin, zero, sin, cos, zero, zero, zero, one)
    }

    /// Creates a rotation of `degrees` about `axis` (Rodrigues' formula). The axis need not be
    /// normalised; a zero axis yields the identity.
    pub fn create_from_axis_angle(axis: Vector3<T>, degrees: T) -> Self {
        if axis.len_squared().is_zero() {
            debug!("Matrix3x3::create_from_axis_angle(): zero axis, returning identity");
            return Self::identity();
        }
        let Vector3 { x, y, z } = axis.normalised();
        let (sin, cos) = util::degrees_to_radians(degrees).sin_cos();
        let t = T::one() - cos;
        Self::new(
            t * x * x + cos,
            t * x * y - sin * z,
            t * x * z + sin * y,
            t * x * y + sin * z,
            t * y * y + cos,
            t * y * z - sin * x,
            t * x * z - sin * y,
            t * y * z + sin * x,
            t * z * z + cos,
        )
    }

    /// Creates the rotation matrix equivalent to `rotation`, which should be a unit quaternion.
    ///
    /// Multiplying a vector by the result gives exactly the same value as `rotation * vector`.
    pub fn create_from_quaternion(rotation: Quaternion<T>) -> Self {
        Self::from_rows(rotation.rotation_rows())
    }
}

impl<T: Scalar> Matrix4x4<T> {
    /// Computes the determinant from the 2x2 sub-determinants of the top and bottom row pairs.
    #[must_use]
    pub fn determinant(&self) -> T {
        let (s, c) = self.sub_determinants();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    fn sub_determinants(&self) -> ([T; 6], [T; 6]) {
        let [[a00, a01, a02, a03], [a10, a11, a12, a13], [a20, a21, a22, a23], [a30, a31, a32, a33]] =
            self.to_rows();
        let s = [
            a00 * a11 - a10 * a01,
            a00 * a12 - a10 * a02,
            a00 * a13 - a10 * a03,
            a01 * a12 - a11 * a02,
            a01 * a13 - a11 * a03,
            a02 * a13 - a12 * a03,
        ];
        let c = [
            a20 * a31 - a30 * a21,
            a20 * a32 - a30 * a22,
            a20 * a33 - a30 * a23,
            a21 * a32 - a31 * a22,
            a21 * a33 - a31 * a23,
            a22 * a33 - a32 * a23,
        ];
        (s, c)
    }

    /// Embeds a 3x3 linear transform in the upper-left corner of a homogeneous matrix.
    pub fn from_linear(linear: Matrix3x3<T>) -> Self {
        let mut rv = linear.resize::<4, 4>();
        rv[(3, 3)] = T::one();
        rv
    }

    pub fn create_scale(scale: T) -> Self {
        Self::create_scale_xyz(scale, scale, scale)
    }

    pub fn create_scale_xyz(x: T, y: T, z: T) -> Self {
        Self::from_diagonal([x, y, z, T::one()])
    }

    pub fn create_scale_vector(scale: Vector3<T>) -> Self {
        Self::create_scale_xyz(scale.x, scale.y, scale.z)
    }

    /// Creates a translation matrix:
    /// ```text
    /// | 1 0 0 x |
    /// | 0 1 0 y |
    /// | 0 0 1 z |
    /// | 0 0 0 1 |
    /// ```
    pub fn create_translation(offset: Vector3<T>) -> Self {
        let mut rv = Self::identity();
        rv[(0, 3)] = offset.x;
        rv[(1, 3)] = offset.y;
        rv[(2, 3)] = offset.z;
        rv
    }

    /// Transforms a direction; the translation column has no effect.
    pub fn transform_vector(&self, vector: Vector3<T>) -> Vector3<T> {
        (*self * vector.extend(T::zero())).truncate()
    }
}

impl<T: Real> Matrix4x4<T> {
    #[must_use]
    pub fn try_inverse(&self) -> Option<Self> {
        let (s, c) = self.sub_determinants();
        let det = s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0];
        if det.is_zero() {
            return None;
        }
        let [[a00, a01, a02, a03], [a10, a11, a12, a13], [a20, a21, a22, a23], [a30, a31, a32, a33]] =
            self.to_rows();
        let adjugate = Self::new(
            a11 * c[5] - a12 * c[4] + a13 * c[3],
            -a01 * c[5] + a02 * c[4] - a03 * c[3],
            a31 * s[5] - a32 * s[4] + a33 * s[3],
            -a21 * s[5] + a22 * s[4] - a23 * s[3],
            -a10 * c[5] + a12 * c[2] - a13 * c[1],
            a00 * c[5] - a02 * c[2] + a03 * c[1],
            -a30 * s[5] + a32 * s[2] - a33 * s[1],
            a20 * s[5] - a22 * s[2] + a23 * s[1],
            a10 * c[4] - a11 * c[2] + a13 * c[0],
            -a00 * c[4] + a01 * c[2] - a03 * c[0],
            a30 * s[4] - a31 * s[2] + a33 * s[0],
            -a20 * s[4] + a21 * s[2] - a23 * s[0],
            -a10 * c[3] + a11 * c[1] - a12 * c[0],
            a00 * c[3] - a01 * c[1] + a02 * c[0],
            -a30 * s[3] + a31 * s[1] - a32 * s[0],
            a20 * s[3] - a21 * s[1] + a22 * s[0],
        );
        Some(adjugate / det)
    }

    pub fn create_rotation_x(degrees: T) -> Self {
        Self::from_linear(Matrix3x3::create_rotation_x(degrees))
    }

    pub fn create_rotation_y(degrees: T) -> Self {
        Self::from_linear(Matrix3x3::create_rotation_y(degrees))
    }

    pub fn create_rotation_z(degrees: T) -> Self {
        Self::from_linear(Matrix3x3::create_rotation_z(degrees))
    }

    pub fn create_from_axis_angle(axis: Vector3<T>, degrees: T) -> Self {
        Self::from_linear(Matrix3x3::create_from_axis_angle(axis, degrees))
    }

    pub fn create_from_quaternion(rotation: Quaternion<T>) -> Self {
        Self::from_linear(Matrix3x3::create_from_quaternion(rotation))
    }

    /// Transforms a point, dividing by the resulting `w` unless it is zero or one.
    ///
    /// # Examples
    ///
    /// ```
    /// use linalg_kernel::util::linalg::{Matrix4x4d, Vector3d};
    ///
    /// let m = Matrix4x4d::create_translation(Vector3d::new(1.0, 2.0, 3.0))
    ///     * Matrix4x4d::create_scale(2.0);
    /// assert_eq!(m.transform_point(Vector3d::one()), Vector3d::new(3.0, 4.0, 5.0));
    /// assert_eq!(m.transform_vector(Vector3d::one()), Vector3d::splat(2.0));
    /// ```
    pub fn transform_point(&self, point: Vector3<T>) -> Vector3<T> {
        let h = *self * point.extend(T::one());
        if h.w.is_zero() || h.w == T::one() {
            h.truncate()
        } else {
            h.truncate() / h.w
        }
    }
}

macro_rules! square_inverse {
    ($($n:literal),+) => {
        $(
            impl<T: Real> Matrix<T, $n, $n> {
                /// Inverts the matrix in place. A singular matrix (determinant exactly zero) is
                /// left unchanged; use `try_inverse()` to detect that case.
                pub fn invert(&mut self) {
                    match self.try_inverse() {
                        Some(inverse) => *self = inverse,
                        None => debug!(
                            "Matrix{}x{}::invert(): singular matrix left unchanged",
                            $n, $n
                        ),
                    }
                }

                pub fn inverse(&self) -> Self {
                    let mut rv = *self;
                    rv.invert();
                    rv
                }
            }
        )+
    };
}
square_inverse!(2, 3, 4);

/// Affine transforms of the plane in column-vector form:
/// ```text
/// | a b tx |
/// | c d ty |
/// ```
/// applied as `M * (x, y, 1)`.
impl<T: Scalar> Matrix2x3<T> {
    /// Combines a linear part and a translation.
    pub fn from_linear(linear: Matrix2x2<T>, translation: Vector2<T>) -> Self {
        linear.append_column(translation.to_array())
    }

    pub fn create_scale(scale: T) -> Self {
        Self::from_linear(Matrix2x2::create_scale(scale), Vector2::zero())
    }

    pub fn create_scale_xy(x: T, y: T) -> Self {
        Self::from_linear(Matrix2x2::create_scale_xy(x, y), Vector2::zero())
    }

    pub fn create_scale_vector(scale: Vector2<T>) -> Self {
        Self::from_linear(Matrix2x2::create_scale_vector(scale), Vector2::zero())
    }

    pub fn create_translation(offset: Vector2<T>) -> Self {
        Self::from_linear(Matrix2x2::identity(), offset)
    }

    /// Transforms a point, applying the translation.
    pub fn transform_point(&self, point: Vector2<T>) -> Vector2<T> {
        *self * point.extend(T::one())
    }

    /// Transforms a direction; the translation has no effect.
    pub fn transform_vector(&self, vector: Vector2<T>) -> Vector2<T> {
        *self * vector.extend(T::zero())
    }

    /// Appends the `(0, 0, 1)` row, so transforms can be composed by multiplication.
    pub fn to_homogeneous(&self) -> Matrix3x3<T> {
        self.append_row([T::zero(), T::zero(), T::one()])
    }
}

impl<T: Real> Matrix2x3<T> {
    /// Creates a rotation with the same convention as [`Matrix2x2::create_rotation`].
    pub fn create_rotation(degrees: T) -> Self {
        Self::from_linear(Matrix2x2::create_rotation(degrees), Vector2::zero())
    }
}

/// Affine transforms of the plane in row-vector form, applied as `(x, y, 1) * M`. Every builder
/// is the transpose of the matching [`Matrix2x3`] builder.
impl<T: Scalar> Matrix3x2<T> {
    pub fn create_scale(scale: T) -> Self {
        Matrix2x3::create_scale(scale).transposed()
    }

    pub fn create_scale_xy(x: T, y: T) -> Self {
        Matrix2x3::create_scale_xy(x, y).transposed()
    }

    pub fn create_scale_vector(scale: Vector2<T>) -> Self {
        Matrix2x3::create_scale_vector(scale).transposed()
    }

    pub fn create_translation(offset: Vector2<T>) -> Self {
        Matrix2x3::create_translation(offset).transposed()
    }

    pub fn transform_point(&self, point: Vector2<T>) -> Vector2<T> {
        point.extend(T::one()) * *self
    }

    pub fn transform_vector(&self, vector: Vector2<T>) -> Vector2<T> {
        vector.extend(T::zero()) * *self
    }

    /// Appends the `(0, 0, 1)` column, so transforms can be composed by multiplication.
    pub fn to_homogeneous(&self) -> Matrix3x3<T> {
        self.append_column([T::zero(), T::zero(), T::one()])
    }
}

impl<T: Real> Matrix3x2<T> {
    pub fn create_rotation(degrees: T) -> Self {
        Matrix2x3::create_rotation(degrees).transposed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::linalg::{
        Matrix2x2d, Matrix2x2f, Matrix2x3d, Matrix3x2d, Matrix3x3d, Matrix4x2, Matrix4x4d,
        Vector2d, Vector3d,
    };
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_matrix<const N: usize>(rng: &mut StdRng) -> Matrix<f64, N, N> {
        Matrix::from_fn(|_, _| rng.gen_range(-10.0..10.0))
    }

    #[test]
    fn cell_constructors() {
        let m = Matrix2x3::new(1, 2, 3, 4, 5, 6);
        assert_eq!(m, Matrix::from_rows([[1, 2, 3], [4, 5, 6]]));
        assert_eq!(m, Matrix2x3::from((1, 2, 3, 4, 5, 6)));
        assert_eq!(<(i32, i32, i32, i32, i32, i32)>::from(m), (1, 2, 3, 4, 5, 6));

        let big = Matrix4x4::from((1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16));
        assert_eq!(big[(3, 0)], 13);
        assert_eq!(big[15], 16);
        let (a, b, c, d): (i32, i32, i32, i32) = Matrix2x2::new(1, 2, 3, 4).into();
        assert_eq!([a, b, c, d], [1, 2, 3, 4]);

        let rows = Matrix3x2::from_row_vectors([
            Vector2::new(1, 2),
            Vector2::new(3, 4),
            Vector2::new(5, 6),
        ]);
        let columns = Matrix3x2::from_column_vectors([Vector3::new(1, 3, 5), Vector3::new(2, 4, 6)]);
        assert_eq!(rows, columns);
        assert_eq!(rows.row_vector(2), Vector2::new(5, 6));
        assert_eq!(rows.column_vector(1), Vector3::new(2, 4, 6));
    }

    #[test]
    fn growing() {
        let m = Matrix2x2::new(1, 2, 3, 4);
        assert_eq!(m.with_row([5, 6]), Matrix3x2::new(1, 2, 3, 4, 5, 6));
        assert_eq!(m.with_column([5, 6]), Matrix2x3::new(1, 2, 5, 3, 4, 6));
        let m4: Matrix4x4<i32> = Matrix3x3::identity()
            .with_row([0, 0, 0])
            .with_column([1, 2, 3, 1]);
        assert_eq!(m4, Matrix4x4::create_translation(Vector3::new(1, 2, 3)));
        let wide: Matrix<i32, 2, 4> = Matrix2x3::zero().with_column([1, 1]);
        assert_eq!(wide.with_row([0; 4])[(0, 3)], 1);
        let tall: Matrix<i32, 4, 3> = Matrix4x2::zero().with_column([1; 4]);
        assert_eq!(tall.with_column([2; 4]).column(2), [1; 4]);
    }

    #[test]
    fn vector_products() {
        let m = Matrix2x3::new(1, 2, 3, 4, 5, 6);
        assert_eq!(m * Vector3::new(1, 0, -1), Vector2::new(-2, -2));
        assert_eq!(Vector2::new(1, -1) * m, Vector3::new(-3, -3, -3));
        let m = Matrix4x2::new(1, 0, 0, 1, 1, 1, 2, -1);
        assert_eq!(m * Vector2::new(3, 4), Vector4::new(3, 4, 7, 2));
        assert_eq!(Vector4::unit_w() * m, Vector2::new(2, -1));
    }

    #[test]
    fn identity_scenario() {
        let m = Matrix2x2d::new(1.0, 0.0, 0.0, 1.0);
        assert_eq!(m.determinant(), 1.0);
        assert_eq!(m.trace(), 2.0);
        assert_eq!(m.inverse(), m);
        assert_eq!(m.try_inverse(), Some(m));
    }

    #[test]
    fn determinants() {
        assert_eq!(Matrix2x2::new(3, 8, 4, 6).determinant(), -14);
        assert_eq!(Matrix3x3::new(6, 1, 1, 4, -2, 5, 2, 8, 7).determinant(), -306);
        assert_eq!(
            Matrix4x4::new(1, 0, 2, -1, 3, 0, 0, 5, 2, 1, 4, -3, 1, 0, 5, 0).determinant(),
            30
        );
        assert_eq!(Matrix4x4::from_diagonal([2, 3, 4, 5]).determinant(), 120);
        assert_eq!(Matrix4x4::<i64>::identity().determinant(), 1);
    }

    #[test]
    fn inverse_properties() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut checked = 0;
        for _ in 0..200 {
            let m2 = random_matrix::<2>(&mut rng);
            let m3 = random_matrix::<3>(&mut rng);
            let m4 = random_matrix::<4>(&mut rng);
            if m2.determinant().abs() > 1.0 {
                let inv = m2.inverse();
                assert_abs_diff_eq!(m2 * inv, Matrix2x2d::identity(), epsilon = 1e-8);
                assert_abs_diff_eq!(inv * m2, Matrix2x2d::identity(), epsilon = 1e-8);
                checked += 1;
            }
            if m3.determinant().abs() > 1.0 {
                let inv = m3.inverse();
                assert_abs_diff_eq!(m3 * inv, Matrix3x3d::identity(), epsilon = 1e-8);
                assert_abs_diff_eq!(inv * m3, Matrix3x3d::identity(), epsilon = 1e-8);
                checked += 1;
            }
            if m4.determinant().abs() > 1.0 {
                let inv = m4.inverse();
                assert_abs_diff_eq!(m4 * inv, Matrix4x4d::identity(), epsilon = 1e-8);
                assert_abs_diff_eq!(inv * m4, Matrix4x4d::identity(), epsilon = 1e-8);
                assert_relative_eq!(
                    inv.determinant() * m4.determinant(),
                    1.0,
                    epsilon = 1e-8
                );
                checked += 1;
            }
        }
        assert!(checked > 300);
    }

    #[test]
    fn singular_invert_is_no_op() {
        crate::util::init_test_log();
        let mut m2 = Matrix2x2d::new(1.0, 2.0, 2.0, 4.0);
        m2.invert();
        assert_eq!(m2, Matrix2x2d::new(1.0, 2.0, 2.0, 4.0));
        assert_eq!(m2.try_inverse(), None);

        let m3 = Matrix3x3d::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 1.0, 2.0, 3.0);
        assert_eq!(m3.inverse(), m3);
        assert_eq!(m3.try_inverse(), None);

        let m4 = Matrix4x4d::zero();
        assert_eq!(m4.inverse(), m4);
        assert_eq!(Matrix4x4d::create_scale_xyz(1.0, 0.0, 1.0).try_inverse(), None);

        let m2f = Matrix2x2f::zero();
        assert_eq!(m2f.inverse(), m2f);
    }

    #[test]
    fn rotation_2d() {
        let x = Vector2d::unit_x();
        assert_abs_diff_eq!(
            Matrix2x2d::create_rotation(90.0) * x,
            Vector2d::new(0.0, 1.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Matrix2x2d::create_rotation(-90.0) * x,
            Vector2d::new(0.0, -1.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Matrix2x2f::create_rotation(180.0) * Vector2::new(1.0, 1.0),
            Vector2::new(-1.0, -1.0),
            epsilon = 1e-6
        );
        let r = Matrix2x2d::create_rotation(30.0);
        assert_abs_diff_eq!(r.inverse(), r.transposed(), epsilon = 1e-12);
        assert_abs_diff_eq!(r.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn scale() {
        assert_eq!(
            Matrix2x2::create_scale_vector(Vector2::new(2, 3)) * Vector2::new(1, 1),
            Vector2::new(2, 3)
        );
        assert_eq!(Matrix3x3::create_scale(2) * Vector3::one(), Vector3::splat(2));
        assert_eq!(
            Matrix4x4::create_scale_vector(Vector3::new(1, 2, 3)).diagonal(),
            [1, 2, 3, 1]
        );
    }

    #[test]
    fn affine_2d() {
        let t = Matrix2x3::create_translation(Vector2::new(10, 20));
        assert_eq!(t.transform_point(Vector2::new(1, 2)), Vector2::new(11, 22));
        assert_eq!(t.transform_vector(Vector2::new(1, 2)), Vector2::new(1, 2));

        let rotate = Matrix2x3d::create_rotation(90.0);
        let translate = Matrix2x3d::create_translation(Vector2d::new(5.0, 0.0));
        let composed = translate.to_homogeneous() * rotate.to_homogeneous();
        let p = composed * Vector3d::new(1.0, 0.0, 1.0);
        assert_abs_diff_eq!(p, Vector3d::new(5.0, 1.0, 1.0), epsilon = 1e-12);

        let s = Matrix2x3::create_scale_xy(2, 3);
        assert_eq!(s.transform_point(Vector2::new(1, 1)), Vector2::new(2, 3));
    }

    #[test]
    fn row_form_is_transpose_of_column_form() {
        let p = Vector2d::new(3.0, -4.0);
        for degrees in [-135.0, 0.0, 45.0, 90.0] {
            let column_form = Matrix2x3d::create_rotation(degrees);
            let row_form = Matrix3x2d::create_rotation(degrees);
            assert_eq!(row_form, column_form.transposed());
            assert_eq!(row_form.transform_point(p), column_form.transform_point(p));
            assert_eq!(p.extend(1.0) * row_form, column_form * p.extend(1.0));
        }
        let offset = Vector2::new(7, 8);
        assert_eq!(
            Matrix3x2::create_translation(offset).transform_point(Vector2::one()),
            Vector2::new(8, 9)
        );
        assert_eq!(
            Matrix3x2::create_translation(offset).transform_vector(Vector2::one()),
            Vector2::one()
        );
        assert_eq!(
            Matrix3x2::create_scale(2).to_homogeneous(),
            Matrix3x3::create_scale_xyz(2, 2, 1)
        );
    }

    #[test]
    fn axis_rotations() {
        assert_abs_diff_eq!(
            Matrix3x3d::create_rotation_z(90.0) * Vector3d::unit_x(),
            Vector3d::unit_y(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Matrix3x3d::create_rotation_x(90.0) * Vector3d::unit_y(),
            Vector3d::unit_z(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Matrix3x3d::create_rotation_y(90.0) * Vector3d::unit_z(),
            Vector3d::unit_x(),
            epsilon = 1e-12
        );
        for degrees in [-60.0, 15.0, 200.0] {
            assert_abs_diff_eq!(
                Matrix3x3d::create_from_axis_angle(Vector3d::unit_x() * 3.0, degrees),
                Matrix3x3d::create_rotation_x(degrees),
                epsilon = 1e-12
            );
            assert_abs_diff_eq!(
                Matrix3x3d::create_from_axis_angle(Vector3d::unit_y(), degrees),
                Matrix3x3d::create_rotation_y(degrees),
                epsilon = 1e-12
            );
            assert_abs_diff_eq!(
                Matrix3x3d::create_from_axis_angle(Vector3d::unit_z(), degrees),
                Matrix3x3d::create_rotation_z(degrees),
                epsilon = 1e-12
            );
        }
        assert_eq!(
            Matrix3x3d::create_from_axis_angle(Vector3d::zero(), 45.0),
            Matrix3x3d::identity()
        );
    }

    #[test]
    fn axis_angle_matches_quaternion() {
        let axis = Vector3d::new(1.0, -2.0, 0.5);
        let q = Quaternion::from_axis_angle(axis, 73.0);
        assert_abs_diff_eq!(
            Matrix3x3d::create_from_quaternion(q),
            Matrix3x3d::create_from_axis_angle(axis, 73.0),
            epsilon = 1e-12
        );
        let v = Vector3d::new(0.3, 4.0, -1.0);
        assert_eq!(Matrix3x3d::create_from_quaternion(q) * v, q * v);
    }

    #[test]
    fn homogeneous_3d() {
        let r = Matrix4x4d::create_rotation_z(90.0);
        let t = Matrix4x4d::create_translation(Vector3d::new(0.0, 0.0, 5.0));
        let p = (t * r).transform_point(Vector3d::unit_x());
        assert_abs_diff_eq!(p, Vector3d::new(0.0, 1.0, 5.0), epsilon = 1e-12);
        assert_abs_diff_eq!(
            (t * r).transform_vector(Vector3d::unit_x()),
            Vector3d::unit_y(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Matrix4x4d::create_from_axis_angle(Vector3d::unit_x(), 90.0),
            Matrix4x4d::create_rotation_x(90.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Matrix4x4d::create_from_quaternion(Quaternion::from_axis_angle(
                Vector3d::unit_y(),
                90.0
            )),
            Matrix4x4d::create_rotation_y(90.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            t.inverse(),
            Matrix4x4d::create_translation(Vector3d::new(0.0, 0.0, -5.0)),
            epsilon = 1e-12
        );

        let mut projective = Matrix4x4d::identity();
        projective[(3, 3)] = 2.0;
        assert_eq!(
            projective.transform_point(Vector3d::new(2.0, 4.0, 6.0)),
            Vector3d::new(1.0, 2.0, 3.0)
        );
    }
}
