//! Named swizzle accessors.
//!
//! Each getter returns a new vector made of the named components, in order; each setter scatters
//! the components of its argument back into the named fields. For example `v.zx()` is
//! `Vector2::new(v.z, v.x)` and `v.set_zx(u)` assigns `v.z = u.x; v.x = u.y`.

use crate::core::scalar::Scalar;
use crate::util::linalg::{Vector2, Vector3, Vector4};

macro_rules! swizzles {
    ($name:ident { $($get:ident, $set:ident => $out:ident($($c:ident),+);)+ }) => {
        impl<T: Scalar> $name<T> {
            $(
                #[must_use]
                pub fn $get(&self) -> $out<T> {
                    $out::new($(self.$c),+)
                }
                pub fn $set(&mut self, value: $out<T>) {
                    let [$($c),+] = value.to_array();
                    $(self.$c = $c;)+
                }
            )+
        }
    };
}

swizzles!(Vector2 {
    yx, set_yx => Vector2(y, x);
});

swizzles!(Vector3 {
    xy, set_xy => Vector2(x, y);
    xz, set_xz => Vector2(x, z);
    yx, set_yx => Vector2(y, x);
    yz, set_yz => Vector2(y, z);
    zx, set_zx => Vector2(z, x);
    zy, set_zy => Vector2(z, y);
    xzy, set_xzy => Vector3(x, z, y);
    yxz, set_yxz => Vector3(y, x, z);
    yzx, set_yzx => Vector3(y, z, x);
    zxy, set_zxy => Vector3(z, x, y);
    zyx, set_zyx => Vector3(z, y, x);
});

swizzles!(Vector4 {
    xy, set_xy => Vector2(x, y);
    xz, set_xz => Vector2(x, z);
    xw, set_xw => Vector2(x, w);
    yx, set_yx => Vector2(y, x);
    yz, set_yz => Vector2(y, z);
    yw, set_yw => Vector2(y, w);
    zx, set_zx => Vector2(z, x);
    zy, set_zy => Vector2(z, y);
    zw, set_zw => Vector2(z, w);
    wx, set_wx => Vector2(w, x);
    wy, set_wy => Vector2(w, y);
    wz, set_wz => Vector2(w, z);
    xyz, set_xyz => Vector3(x, y, z);
    xyw, set_xyw => Vector3(x, y, w);
    xzy, set_xzy => Vector3(x, z, y);
    xzw, set_xzw => Vector3(x, z, w);
    xwy, set_xwy => Vector3(x, w, y);
    xwz, set_xwz => Vector3(x, w, z);
    yxz, set_yxz => Vector3(y, x, z);
    yxw, set_yxw => Vector3(y, x, w);
    yzx, set_yzx => Vector3(y, z, x);
    yzw, set_yzw => Vector3(y, z, w);
    ywx, set_ywx => Vector3(y, w, x);
    ywz, set_ywz => Vector3(y, w, z);
    zxy, set_zxy => Vector3(z, x, y);
    zxw, set_zxw => Vector3(z, x, w);
    zyx, set_zyx => Vector3(z, y, x);
    zyw, set_zyw => Vector3(z, y, w);
    zwx, set_zwx => Vector3(z, w, x);
    zwy, set_zwy => Vector3(z, w, y);
    wxy, set_wxy => Vector3(w, x, y);
    wxz, set_wxz => Vector3(w, x, z);
    wyx, set_wyx => Vector3(w, y, x);
    wyz, set_wyz => Vector3(w, y, z);
    wzx, set_wzx => Vector3(w, z, x);
    wzy, set_wzy => Vector3(w, z, y);
});

#[cfg(test)]
mod tests {
    use crate::util::linalg::{Vector2f, Vector2i, Vector3f, Vector3i, Vector4i};

    #[test]
    fn getters_permute() {
        let v = Vector2i::new(1, 2);
        assert_eq!(v.yx(), Vector2i::new(2, 1));

        let v = Vector3f::new(1.0, 2.0, 3.0);
        assert_eq!(v.xy(), Vector2f::new(1.0, 2.0));
        assert_eq!(v.zx(), Vector2f::new(3.0, 1.0));
        assert_eq!(v.xzy(), Vector3f::new(1.0, 3.0, 2.0));
        assert_eq!(v.zyx(), Vector3f::new(3.0, 2.0, 1.0));

        let v = Vector4i::new(1, 2, 3, 4);
        assert_eq!(v.wx(), Vector2i::new(4, 1));
        assert_eq!(v.xyz(), Vector3i::new(1, 2, 3));
        assert_eq!(v.wzy(), Vector3i::new(4, 3, 2));
    }

    #[test]
    fn setters_scatter() {
        let mut v = Vector2i::new(1, 2);
        v.set_yx(Vector2i::new(10, 20));
        assert_eq!(v, Vector2i::new(20, 10));

        let mut v = Vector3i::new(1, 2, 3);
        v.set_zx(Vector2i::new(30, 10));
        assert_eq!(v, Vector3i::new(10, 2, 30));
        v.set_yzx(Vector3i::new(7, 8, 9));
        assert_eq!(v, Vector3i::new(9, 7, 8));

        let mut v = Vector4i::new(1, 2, 3, 4);
        v.set_xyz(Vector3i::new(5, 6, 7));
        assert_eq!(v, Vector4i::new(5, 6, 7, 4));
        v.set_wy(Vector2i::new(0, -1));
        assert_eq!(v, Vector4i::new(5, -1, 7, 0));
    }

    #[test]
    fn get_then_set_is_identity() {
        let original = Vector4i::new(1, 2, 3, 4);
        let mut v = original;
        v.set_zwx(original.zwx());
        assert_eq!(v, original);
        let mut v = original;
        v.set_yw(original.yw());
        assert_eq!(v, original);
    }
}
