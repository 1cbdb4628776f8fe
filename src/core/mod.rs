//! The numeric foundation shared by every linear-algebra type: scalar traits, error types and
//! compile-time constants.

pub mod config;
pub mod error;
pub mod prelude;
pub mod scalar;
