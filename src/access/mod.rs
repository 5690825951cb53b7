//! Path-driven access to reflected values.
//!
//! A path is a `$`-anchored chain of selectors (`.field`) and bracketed
//! literal indices (`[0]`, `["key"]`, `['c']`):
//!
//! - [`Path`] is the parsed form; [`Path::parse`] builds one from text.
//! - [`get`], [`set`] and [`set_boxed`] resolve a path against a value and
//!   read or write the location it names.
//! - [`entry`] resolves to an [`Entry`], exposing the location itself rather
//!   than just its value.
//! - [`AccessOptions`] carries the engine configuration; the free functions
//!   use [`AccessOptions::DEFAULT`].
//! - [`PathAccess`] offers the same operations as methods on any [`Reflect`]
//!   value.

mod entry;
mod error;
mod parse;
mod path;
mod resolve;

pub use entry::{Entry, EntryValue};
pub use error::{AccessError, ParseError};
pub use path::{FromLiteral, Literal, LiteralValue, Path, Segment, SegmentKind};
pub use resolve::{AccessOptions, entry, get, set, set_boxed};

use crate::Reflect;

// -----------------------------------------------------------------------------
// Extension trait

/// Path operations as methods, for any reflected value.
///
/// Blanket-implemented for every [`Reflect`] type; the methods delegate to
/// the free functions of this module.
///
/// # Examples
///
/// ```
/// use reflect_access::PathAccess;
///
/// let mut values = vec![1_i32, 2, 3];
/// values.path_set("$[2]", 30_i32).unwrap();
///
/// let last = values.path_get("$[2]").unwrap();
/// assert_eq!(last.downcast_ref::<i32>(), Some(&30));
/// ```
pub trait PathAccess: Reflect {
    /// Reads the value at `path`. See [`get`].
    fn path_get(&self, path: &str) -> Result<Box<dyn Reflect>, AccessError>
    where
        Self: Sized,
    {
        get(self, path)
    }

    /// Writes `value` at `path`. See [`set`].
    fn path_set(&mut self, path: &str, value: impl Reflect) -> Result<(), AccessError>
    where
        Self: Sized,
    {
        set(self, path, value)
    }

    /// Resolves `path` to an [`Entry`]. See [`entry`].
    fn path_entry(&self, path: &str) -> Result<Entry<'_>, AccessError>
    where
        Self: Sized,
    {
        entry(self, path)
    }
}

impl<T: Reflect> PathAccess for T {}
