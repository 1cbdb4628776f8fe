#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;
#[allow(unused_imports)]
pub use num_traits::{Float, One, Zero};

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Result};
#[allow(unused_imports)]
pub use tracing::{debug, error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    core::{
        config::*,
        error::LinalgError,
        scalar::{Real, Scalar},
    },
    util::{
        self,
        assert::*,
        linalg,
        linalg::{
            AxisAlignedExtent, Matrix, Matrix2x2, Matrix2x2d, Matrix2x2f, Matrix2x3, Matrix2x3d,
            Matrix2x3f, Matrix2x4, Matrix3x2, Matrix3x2d, Matrix3x2f, Matrix3x3, Matrix3x3d,
            Matrix3x3f, Matrix3x4, Matrix4x2, Matrix4x3, Matrix4x4, Matrix4x4d, Matrix4x4f,
            Quaternion, Quaterniond, Quaternionf, Rectangle, Rectangled, Rectanglef, Rectanglei,
            Vector2, Vector2d, Vector2f, Vector2i, Vector2u, Vector3, Vector3d, Vector3f,
            Vector3i, Vector3u, Vector4, Vector4d, Vector4f, Vector4i, Vector4u,
        },
    },
};
