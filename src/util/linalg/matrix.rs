use crate::core::error::{check_cell, check_index, LinalgError};
use crate::core::scalar::{self, Real, Scalar};
use crate::util;
use crate::util::assert::check_lt;
use crate::util::linalg::write_components;
use anyhow::Result;
use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use num_traits::Zero;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::array;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A matrix with `R` rows and `C` columns, stored row-major.
///
/// Multiplication is only defined between an `R×C` and a `C×P` matrix, so mismatched shapes are
/// rejected at compile time:
/// ```compile_fail
/// use linalg_kernel::util::linalg::{Matrix2x3d, Matrix2x2d};
/// let _ = Matrix2x3d::zero() * Matrix2x2d::identity();
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[must_use]
pub struct Matrix<T, const R: usize, const C: usize> {
    rows: [[T; C]; R],
}

pub type Matrix2x2<T> = Matrix<T, 2, 2>;
pub type Matrix2x3<T> = Matrix<T, 2, 3>;
pub type Matrix2x4<T> = Matrix<T, 2, 4>;
pub type Matrix3x2<T> = Matrix<T, 3, 2>;
pub type Matrix3x3<T> = Matrix<T, 3, 3>;
pub type Matrix3x4<T> = Matrix<T, 3, 4>;
pub type Matrix4x2<T> = Matrix<T, 4, 2>;
pub type Matrix4x3<T> = Matrix<T, 4, 3>;
pub type Matrix4x4<T> = Matrix<T, 4, 4>;

pub type Matrix2x2f = Matrix2x2<f32>;
pub type Matrix2x2d = Matrix2x2<f64>;
pub type Matrix2x3f = Matrix2x3<f32>;
pub type Matrix2x3d = Matrix2x3<f64>;
pub type Matrix2x4f = Matrix2x4<f32>;
pub type Matrix2x4d = Matrix2x4<f64>;
pub type Matrix3x2f = Matrix3x2<f32>;
pub type Matrix3x2d = Matrix3x2<f64>;
pub type Matrix3x3f = Matrix3x3<f32>;
pub type Matrix3x3d = Matrix3x3<f64>;
pub type Matrix3x4f = Matrix3x4<f32>;
pub type Matrix3x4d = Matrix3x4<f64>;
pub type Matrix4x2f = Matrix4x2<f32>;
pub type Matrix4x2d = Matrix4x2<f64>;
pub type Matrix4x3f = Matrix4x3<f32>;
pub type Matrix4x3d = Matrix4x3<f64>;
pub type Matrix4x4f = Matrix4x4<f32>;
pub type Matrix4x4d = Matrix4x4<f64>;

impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The number of rows.
    pub const ROWS: usize = R;
    /// The number of columns.
    pub const COLUMNS: usize = C;

    /// Creates a matrix with every cell set to zero.
    pub fn zero() -> Self {
        Self {
            rows: [[T::zero(); C]; R],
        }
    }

    /// Creates a matrix from an array of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use linalg_kernel::util::linalg::Matrix2x3;
    /// let m = Matrix2x3::from_rows([
    ///     [1, 2, 3],
    ///     [4, 5, 6],
    /// ]);
    /// assert_eq!(m[(1, 0)], 4);
    /// assert_eq!(m[2], 3);
    /// ```
    pub fn from_rows(rows: [[T; C]; R]) -> Self {
        Self { rows }
    }

    /// Creates a matrix from an array of columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use linalg_kernel::util::linalg::Matrix2x2;
    /// let rows = Matrix2x2::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let columns = Matrix2x2::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    pub fn from_columns(columns: [[T; R]; C]) -> Self {
        Self::from_fn(|row, col| columns[col][row])
    }

    /// Creates a matrix by invoking `f` with the `(row, col)` position of each cell.
    ///
    /// This mirrors [`array::from_fn`].
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self {
        Self {
            rows: array::from_fn(|row| array::from_fn(|col| f(row, col))),
        }
    }

    /// Returns the cells as an array of rows.
    #[must_use]
    pub fn to_rows(self) -> [[T; C]; R] {
        self.rows
    }

    /// Returns the cells as an array of columns.
    #[must_use]
    pub fn to_columns(self) -> [[T; R]; C] {
        self.transposed().rows
    }

    /// Returns row `index` as an array. Panics if `index >= R`.
    #[must_use]
    pub fn row(&self, index: usize) -> [T; C] {
        check_lt!(index, R, "Matrix row index");
        self.rows[index]
    }

    /// Returns column `index` as an array. Panics if `index >= C`.
    #[must_use]
    pub fn column(&self, index: usize) -> [T; R] {
        check_lt!(index, C, "Matrix column index");
        array::from_fn(|row| self.rows[row][index])
    }

    /// Returns the cell at `(row, col)`, or an error if it is outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Result<T, LinalgError> {
        check_cell(row, col, R, C)?;
        Ok(self.rows[row][col])
    }

    /// Overwrites the cell at `(row, col)`, or returns an error if it is outside the matrix.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), LinalgError> {
        check_cell(row, col, R, C)?;
        self.rows[row][col] = value;
        Ok(())
    }

    /// Returns the cell at row-major position `index`, or an error if `index >= R * C`.
    pub fn get_linear(&self, index: usize) -> Result<T, LinalgError> {
        check_index(index, R * C)?;
        Ok(self.rows[index / C][index % C])
    }

    /// Overwrites the cell at row-major position `index`, or returns an error if
    /// `index >= R * C`.
    pub fn set_linear(&mut self, index: usize, value: T) -> Result<(), LinalgError> {
        check_index(index, R * C)?;
        self.rows[index / C][index % C] = value;
        Ok(())
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use linalg_kernel::util::linalg::Matrix;
    /// let m = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]).transposed();
    /// assert_eq!(m, Matrix::from_rows([
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ]));
    /// ```
    pub fn transposed(&self) -> Matrix<T, C, R> {
        Matrix::from_fn(|row, col| self.rows[col][row])
    }

    /// Returns a matrix with the contents of `self`, but a potentially different size.
    ///
    /// Cells not present in `self` are zero; cells outside the new shape are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use linalg_kernel::util::linalg::Matrix;
    /// let m = Matrix::from_rows([
    ///     [1, 2, 3],
    ///     [4, 5, 6],
    /// ]);
    /// assert_eq!(m.resize::<3, 2>(), Matrix::from_rows([
    ///     [1, 2],
    ///     [4, 5],
    ///     [0, 0],
    /// ]));
    /// ```
    pub fn resize<const R2: usize, const C2: usize>(&self) -> Matrix<T, R2, C2> {
        Matrix::from_fn(|row, col| {
            if row < R && col < C {
                self.rows[row][col]
            } else {
                T::zero()
            }
        })
    }

    /// Applies `f` to every cell.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Matrix<U, R, C> {
        Matrix {
            rows: self.rows.map(|row| row.map(&mut f)),
        }
    }

    fn zip_with(self, rhs: Self, mut f: impl FnMut(T, T) -> T) -> Self {
        Self::from_fn(|row, col| f(self.rows[row][col], rhs.rows[row][col]))
    }

    fn cells(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().flatten()
    }

    /// Converts to another scalar type, returning [`None`] if any cell is not representable in `U`.
    #[must_use]
    pub fn cast<U: Scalar>(&self) -> Option<Matrix<U, R, C>> {
        let mut rv = Matrix::zero();
        for (dst, src) in rv.rows.iter_mut().flatten().zip(self.cells()) {
            *dst = scalar::cast(*src)?;
        }
        Some(rv)
    }

    /// Appends `row` below the existing rows. `R2` must be `R + 1`.
    pub(crate) fn append_row<const R2: usize>(&self, row: [T; C]) -> Matrix<T, R2, C> {
        debug_assert_eq!(R2, R + 1);
        Matrix::from_fn(|r, c| if r < R { self.rows[r][c] } else { row[c] })
    }

    /// Appends `column` to the right of the existing columns. `C2` must be `C + 1`.
    pub(crate) fn append_column<const C2: usize>(&self, column: [T; R]) -> Matrix<T, R, C2> {
        debug_assert_eq!(C2, C + 1);
        Matrix::from_fn(|r, c| if c < C { self.rows[r][c] } else { column[r] })
    }

    /// `self * v` for a column vector `v`.
    pub(crate) fn mul_array(&self, v: [T; C]) -> [T; R] {
        array::from_fn(|row| {
            (0..C).fold(T::zero(), |acc, col| acc + self.rows[row][col] * v[col])
        })
    }

    /// `v * self` for a row vector `v`.
    pub(crate) fn premul_array(&self, v: [T; R]) -> [T; C] {
        array::from_fn(|col| {
            (0..R).fold(T::zero(), |acc, row| acc + v[row] * self.rows[row][col])
        })
    }
}

impl<T: Scalar + Into<f64>, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Widens every cell to `f64`. Lossless.
    pub fn to_f64(&self) -> Matrix<f64, R, C> {
        self.map(Into::into)
    }
}

impl<const R: usize, const C: usize> Matrix<f64, R, C> {
    /// Narrows every cell to `f32` with native truncation.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_f32_lossy(&self) -> Matrix<f32, R, C> {
        self.map(|v| v as f32)
    }

    /// Narrows every cell to `f32`, failing if a finite cell overflows `f32`.
    pub fn try_to_f32(&self) -> Result<Matrix<f32, R, C>> {
        let mut rv = Matrix::zero();
        for (dst, src) in rv.rows.iter_mut().flatten().zip(self.cells()) {
            *dst = util::f64_to_f32(*src)?;
        }
        Ok(rv)
    }
}

impl<T: Real, const R: usize, const C: usize> Matrix<T, R, C> {
    pub fn is_finite(&self) -> bool {
        self.cells().all(|v| v.is_finite())
    }

    /// Compares two matrices cell by cell, within [`Real::tolerance`].
    pub fn almost_eq(&self, rhs: Self) -> bool {
        self.cells()
            .zip(rhs.cells())
            .all(|(a, b)| (*a - *b).abs() < T::tolerance())
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Creates an identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use linalg_kernel::util::linalg::Matrix3x3;
    /// let m = Matrix3x3::<i32>::identity();
    /// assert_eq!(m.trace(), 3);
    /// assert_eq!(m * m, m);
    /// ```
    pub fn identity() -> Self {
        Self::from_diagonal([T::one(); N])
    }

    /// Creates a matrix with `diagonal` on the main diagonal and zeros elsewhere.
    pub fn from_diagonal(diagonal: [T; N]) -> Self {
        Self::from_fn(|row, col| if row == col { diagonal[row] } else { T::zero() })
    }

    #[must_use]
    pub fn diagonal(&self) -> [T; N] {
        array::from_fn(|i| self.rows[i][i])
    }

    /// The sum of the main diagonal.
    #[must_use]
    pub fn trace(&self) -> T {
        self.diagonal().into_iter().fold(T::zero(), Add::add)
    }

    /// Transposes the matrix in place.
    pub fn transpose(&mut self) {
        *self = self.transposed();
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl<T: Scalar, const R: usize, const C: usize> Default for Matrix<T, R, C> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Scalar, const R: usize, const C: usize> Zero for Matrix<T, R, C> {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        self.cells().all(Zero::is_zero)
    }
}

impl<T: Scalar, const R: usize, const C: usize> Hash for Matrix<T, R, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in self.cells() {
            value.hash_scalar(state);
        }
    }
}

impl<T: Scalar, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        check_lt!(row, R, "Matrix row index");
        check_lt!(col, C, "Matrix column index");
        &self.rows[row][col]
    }
}
impl<T: Scalar, const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<T, R, C> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        check_lt!(row, R, "Matrix row index");
        check_lt!(col, C, "Matrix column index");
        &mut self.rows[row][col]
    }
}
impl<T: Scalar, const R: usize, const C: usize> Index<usize> for Matrix<T, R, C> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        check_lt!(index, R * C, "Matrix linear index");
        &self.rows[index / C][index % C]
    }
}
impl<T: Scalar, const R: usize, const C: usize> IndexMut<usize> for Matrix<T, R, C> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        check_lt!(index, R * C, "Matrix linear index");
        &mut self.rows[index / C][index % C]
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T, R, C> {
    fn from(rows: [[T; C]; R]) -> Self {
        Self::from_rows(rows)
    }
}
impl<T: Scalar, const R: usize, const C: usize> From<Matrix<T, R, C>> for [[T; C]; R] {
    fn from(value: Matrix<T, R, C>) -> Self {
        value.rows
    }
}
impl<const R: usize, const C: usize> From<Matrix<f32, R, C>> for Matrix<f64, R, C> {
    fn from(value: Matrix<f32, R, C>) -> Self {
        value.to_f64()
    }
}
impl<const R: usize, const C: usize> From<Matrix<i32, R, C>> for Matrix<f64, R, C> {
    fn from(value: Matrix<i32, R, C>) -> Self {
        value.to_f64()
    }
}
impl<const R: usize, const C: usize> From<Matrix<u32, R, C>> for Matrix<f64, R, C> {
    fn from(value: Matrix<u32, R, C>) -> Self {
        value.to_f64()
    }
}

impl<T: Scalar, const R: usize, const C: usize> fmt::Display for Matrix<T, R, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write_components(f, row, ", ")?;
        }
        write!(f, "]")
    }
}

impl<T: Serialize, const R: usize, const C: usize> Serialize for Matrix<T, R, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(R * C)?;
        for value in self.rows.iter().flatten() {
            tuple.serialize_element(value)?;
        }
        tuple.end()
    }
}

struct MatrixVisitor<T, const R: usize, const C: usize>(PhantomData<T>);

impl<'de, T, const R: usize, const C: usize> Visitor<'de> for MatrixVisitor<T, R, C>
where
    T: Scalar + Deserialize<'de>,
{
    type Value = Matrix<T, R, C>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} cells of a {}x{} matrix in row-major order", R * C, R, C)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut rv = Matrix::zero();
        for i in 0..R * C {
            rv.rows[i / C][i % C] = seq
                .next_element()?
                .ok_or_else(|| <A::Error as de::Error>::invalid_length(i, &self))?;
        }
        Ok(rv)
    }
}

impl<'de, T, const R: usize, const C: usize> Deserialize<'de> for Matrix<T, R, C>
where
    T: Scalar + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_tuple(R * C, MatrixVisitor(PhantomData))
    }
}

impl<T: Scalar, const R: usize, const C: usize> Add<Matrix<T, R, C>> for Matrix<T, R, C> {
    type Output = Matrix<T, R, C>;

    fn add(self, rhs: Matrix<T, R, C>) -> Self::Output {
        self.zip_with(rhs, Add::add)
    }
}
impl<T: Scalar, const R: usize, const C: usize> AddAssign<Matrix<T, R, C>> for Matrix<T, R, C> {
    fn add_assign(&mut self, rhs: Matrix<T, R, C>) {
        *self = *self + rhs;
    }
}
impl<T: Scalar, const R: usize, const C: usize> Sub<Matrix<T, R, C>> for Matrix<T, R, C> {
    type Output = Matrix<T, R, C>;

    fn sub(self, rhs: Matrix<T, R, C>) -> Self::Output {
        self.zip_with(rhs, Sub::sub)
    }
}
impl<T: Scalar, const R: usize, const C: usize> SubAssign<Matrix<T, R, C>> for Matrix<T, R, C> {
    fn sub_assign(&mut self, rhs: Matrix<T, R, C>) {
        *self = *self - rhs;
    }
}
impl<T: Scalar + Neg<Output = T>, const R: usize, const C: usize> Neg for Matrix<T, R, C> {
    type Output = Matrix<T, R, C>;

    fn neg(self) -> Self::Output {
        self.map(Neg::neg)
    }
}

impl<T: Scalar, const R: usize, const C: usize> Mul<T> for Matrix<T, R, C> {
    type Output = Matrix<T, R, C>;

    fn mul(self, rhs: T) -> Self::Output {
        self.map(|v| v * rhs)
    }
}
impl<T: Scalar, const R: usize, const C: usize> MulAssign<T> for Matrix<T, R, C> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}
impl<T: Scalar, const R: usize, const C: usize> Div<T> for Matrix<T, R, C> {
    type Output = Matrix<T, R, C>;

    fn div(self, rhs: T) -> Self::Output {
        self.map(|v| v / rhs)
    }
}
impl<T: Scalar, const R: usize, const C: usize> DivAssign<T> for Matrix<T, R, C> {
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

impl<T: Scalar, const R: usize, const C: usize, const P: usize> Mul<Matrix<T, C, P>>
    for Matrix<T, R, C>
{
    type Output = Matrix<T, R, P>;

    fn mul(self, rhs: Matrix<T, C, P>) -> Self::Output {
        Matrix::from_fn(|row, col| {
            (0..C).fold(T::zero(), |acc, k| acc + self.rows[row][k] * rhs.rows[k][col])
        })
    }
}
impl<T: Scalar, const N: usize> MulAssign<Matrix<T, N, N>> for Matrix<T, N, N> {
    fn mul_assign(&mut self, rhs: Matrix<T, N, N>) {
        *self = *self * rhs;
    }
}

macro_rules! scalar_lhs_mul {
    ($($types:ty),+) => {
        $(
            impl<const R: usize, const C: usize> Mul<Matrix<$types, R, C>> for $types {
                type Output = Matrix<$types, R, C>;

                fn mul(self, rhs: Matrix<$types, R, C>) -> Self::Output {
                    rhs * self
                }
            }
        )+
    };
}
scalar_lhs_mul!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: Real, const R: usize, const C: usize> AbsDiffEq for Matrix<T, R, C> {
    type Epsilon = T;

    fn default_epsilon() -> Self::Epsilon {
        <T as AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.cells()
            .zip(other.cells())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}
impl<T: Real, const R: usize, const C: usize> RelativeEq for Matrix<T, R, C> {
    fn default_max_relative() -> Self::Epsilon {
        <T as RelativeEq>::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.cells()
            .zip(other.cells())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
impl<T: Real, const R: usize, const C: usize> UlpsEq for Matrix<T, R, C> {
    fn default_max_ulps() -> u32 {
        <T as UlpsEq>::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.cells()
            .zip(other.cells())
            .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}
