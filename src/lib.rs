#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Extern Self

// Usually, we need to use `crate` in the crate itself and `reflect_access` in
// doc testing. The derive macro can only emit one of the two, so we keep an
// `extern self` to ensure `reflect_access` works as an alias for `crate`.
extern crate self as reflect_access;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod access;
pub mod impls;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use reflection::{Reflect, ReflectDefault};

pub use access::{AccessError, AccessOptions, Entry, Path, PathAccess, entry, get, set, set_boxed};

pub use reflect_access_derive as derive;
