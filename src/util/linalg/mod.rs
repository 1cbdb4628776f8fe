//! Vectors, matrices, quaternions and rectangles, generic over their scalar type.
//!
//! Every type comes in one generic form (e.g. [`Vector3<T>`]) with aliases for the common
//! precisions (`Vector3f`, `Vector3d`, `Vector3i`, `Vector3u`). The aliases share a single
//! implementation, so there is no way for the single- and double-precision variants to drift
//! apart. Arithmetic between different precisions does not type-check; convert explicitly with
//! `cast`, `to_f64`, `to_f32_lossy` or `try_to_f32`.
//!
//! Angles passed to or returned from the rotation builders are in degrees.

use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

mod matrix;
mod matrix_shapes;
mod quaternion;
mod rect;
mod swizzle;
mod vector;

pub use matrix::*;
pub use matrix_shapes::*;
pub use quaternion::*;
pub use rect::*;
pub use vector::*;

/// Writes `components` separated by `separator`, honouring the formatter's precision.
pub(crate) fn write_components<T: Display>(
    f: &mut Formatter<'_>,
    components: &[T],
    separator: &str,
) -> fmt::Result {
    let precision = f.precision();
    write!(
        f,
        "{}",
        components.iter().format_with(separator, |v, g| match precision {
            Some(p) => g(&format_args!("{v:.p$}")),
            None => g(v),
        })
    )
}
