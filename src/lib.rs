//! Vectors, matrices, quaternions and rectangles for real-time graphics and simulation code.
//!
//! Every type is generic over its scalar (see [`core::scalar::Scalar`]) and comes with aliases
//! for the usual precisions. Most users want the prelude:
//!
//! ```
//! use linalg_kernel::core::prelude::*;
//!
//! let spin = Quaterniond::from_axis_angle(Vector3d::unit_z(), 90.0);
//! let m = Matrix4x4d::create_translation(Vector3d::new(0.0, 0.0, 1.0))
//!     * Matrix4x4d::create_from_quaternion(spin);
//! let p = m.transform_point(Vector3d::unit_x());
//! assert!(p.almost_eq(Vector3d::new(0.0, 1.0, 1.0)));
//! ```

pub mod core;
pub mod util;
