/// Default tolerance used by `almost_eq` on single-precision values.
pub const EPSILON: f32 = 1e-5;
/// Default tolerance used by `almost_eq` on double-precision values.
pub const EPSILON_F64: f64 = 1e-10;
/// Above this cosine, [`Quaternion::slerp`](crate::util::linalg::Quaternion::slerp) blends the
/// inputs linearly instead of dividing by a vanishing `sin(Ω)`.
pub const SLERP_LINEAR_THRESHOLD: f64 = 0.999;
