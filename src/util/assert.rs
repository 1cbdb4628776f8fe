//! Panicking checks that report the call site, used by the unchecked indexers.

pub fn assert_partial_ord<T: PartialOrd>(_: &T) {}
pub fn assert_same_type<T, U>(_: &T, _: &U) {}

#[allow(unused_macros)]
#[macro_export]
macro_rules! current_location {
    () => {
        format!("{}:{}", file!(), line!())
    };
}
#[allow(unused_imports)]
pub use current_location;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_lt {
    ($lhs:expr, $rhs:expr) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        $crate::util::assert::assert_same_type(&lhs, &rhs);
        $crate::util::assert::assert_partial_ord(&lhs);
        if lhs >= rhs {
            panic!(
                "check failed: {}: {} < {}: {:?} vs. {:?}",
                $crate::util::assert::current_location!(),
                stringify!($lhs),
                stringify!($rhs),
                lhs,
                rhs
            );
        }
    }};
    ($lhs:expr, $rhs:expr, $extra:expr) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        $crate::util::assert::assert_same_type(&lhs, &rhs);
        $crate::util::assert::assert_partial_ord(&lhs);
        if lhs >= rhs {
            panic!(
                "check failed: {}: {} < {}: {:?} vs. {:?}: {}",
                $crate::util::assert::current_location!(),
                stringify!($lhs),
                stringify!($rhs),
                lhs,
                rhs,
                $extra
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_lt;

#[cfg(test)]
mod tests {
    #[test]
    fn check_lt_passes() {
        check_lt!(1, 2);
        check_lt!(0.5, 1.0, "with context");
    }

    #[test]
    #[should_panic(expected = "check failed")]
    fn check_lt_fails() {
        check_lt!(2_usize, 2_usize);
    }

    #[test]
    #[should_panic(expected = "row index")]
    fn check_lt_reports_extra() {
        check_lt!(5_usize, 3_usize, "row index");
    }
}
