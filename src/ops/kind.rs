use core::fmt;

use crate::Reflect;
use crate::ops::{Map, Sequence, Struct, Wrapper};

// -----------------------------------------------------------------------------
// ReflectKind

/// A pure enumeration of the "kinds" a reflected value can have.
///
/// The path engine dispatches on this closed set at every step; extend it only
/// together with [`ReflectRef`], [`ReflectMut`] and the resolver's match arms.
///
/// # Examples
///
/// ```
/// use reflect_access::{Reflect, ops::ReflectKind};
///
/// assert_eq!(10_i32.reflect_kind(), ReflectKind::Opaque);
/// assert_eq!(vec![10].reflect_kind(), ReflectKind::List);
/// assert_eq!(Some(10).reflect_kind(), ReflectKind::Wrapper);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    /// A named-field struct.
    Struct,
    /// A map-like container.
    Map,
    /// A growable positional container, such as `Vec<T>`.
    List,
    /// A fixed-length positional container, such as `[T; N]`.
    Array,
    /// An owned UTF-8 string, indexed by byte.
    Str,
    /// A single-slot indirection, such as `Option<T>` or `Box<T>`.
    Wrapper,
    /// A type-erased value (`Box<dyn Reflect>`).
    Dynamic,
    /// A value with no reflectable structure.
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Struct => "struct",
            Self::Map => "map",
            Self::List => "list",
            Self::Array => "array",
            Self::Str => "string",
            Self::Wrapper => "wrapper",
            Self::Dynamic => "dynamic",
            Self::Opaque => "opaque",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable enumeration of the kinds, carrying the kind-trait reference.
///
/// Returned by [`Reflect::reflect_ref`].
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    Map(&'a dyn Map),
    List(&'a dyn Sequence),
    Array(&'a dyn Sequence),
    Str(&'a String),
    Wrapper(&'a dyn Wrapper),
    Dynamic(&'a dyn Reflect),
    Opaque(&'a dyn Reflect),
}

impl ReflectRef<'_> {
    /// Returns the [`ReflectKind`] of this variant.
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::Map(_) => ReflectKind::Map,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Str(_) => ReflectKind::Str,
            Self::Wrapper(_) => ReflectKind::Wrapper,
            Self::Dynamic(_) => ReflectKind::Dynamic,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable enumeration of the kinds, carrying the kind-trait reference.
///
/// Returned by [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    Map(&'a mut dyn Map),
    List(&'a mut dyn Sequence),
    Array(&'a mut dyn Sequence),
    Str(&'a mut String),
    Wrapper(&'a mut dyn Wrapper),
    Dynamic(&'a mut dyn Reflect),
    Opaque(&'a mut dyn Reflect),
}

impl ReflectMut<'_> {
    /// Returns the [`ReflectKind`] of this variant.
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::Map(_) => ReflectKind::Map,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Str(_) => ReflectKind::Str,
            Self::Wrapper(_) => ReflectKind::Wrapper,
            Self::Dynamic(_) => ReflectKind::Dynamic,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}
