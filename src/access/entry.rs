use crate::Reflect;
use crate::ops::ReflectRef;

// -----------------------------------------------------------------------------
// EntryValue

/// A resolved value that is either borrowed from the root value graph or an
/// owned temporary.
///
/// Temporaries appear when resolution has to materialize something a shared
/// walk cannot point into: the zero value behind an empty wrapper, the zero
/// value of a missing map key, or a single string byte.
pub enum EntryValue<'a> {
    /// A location inside the caller's value graph.
    Borrowed(&'a dyn Reflect),
    /// A materialized temporary, never visible to the caller.
    Owned(Box<dyn Reflect>),
}

impl<'a> EntryValue<'a> {
    /// Borrows the value, wherever it lives.
    #[inline]
    pub fn get(&self) -> &dyn Reflect {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }

    /// Returns `true` if this value is a materialized temporary.
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Converts into an owned boxed value, cloning if borrowed.
    pub fn into_boxed(self) -> Box<dyn Reflect> {
        match self {
            Self::Borrowed(value) => value.reflect_clone(),
            Self::Owned(value) => value,
        }
    }
}

impl core::fmt::Debug for EntryValue<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.get().reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Entry

/// A resolved location in a value graph.
///
/// Produced by [`entry`](crate::entry) (and internally by every `get`), an
/// entry pairs the resolved value with the container that owns it and the key
/// or index used to reach it. It is only valid for the resolution call that
/// produced it; nothing is cached across calls.
///
/// Exactly one of [`key`](Entry::key) and [`index`](Entry::index) is
/// meaningful, decided by the parent's kind: maps record the coerced key,
/// structs the field's ordinal position, sequences and strings the element
/// position. The root-only path `$` has neither, and no parent.
///
/// # Examples
///
/// ```
/// use reflect_access::{derive::Reflect, entry};
///
/// #[derive(Reflect, Clone, Default)]
/// struct Point { x: f64, y: f64 }
///
/// let p = Point { x: 1.0, y: 2.0 };
/// let e = entry(&p, "$.y").unwrap();
///
/// assert_eq!(e.value().downcast_ref::<f64>(), Some(&2.0));
/// assert_eq!(e.index(), Some(1));
/// assert_eq!(e.field_name(), Some("y"));
/// assert!(e.key().is_none());
/// ```
#[derive(Debug)]
pub struct Entry<'a> {
    pub(crate) value: EntryValue<'a>,
    pub(crate) parent: Option<EntryValue<'a>>,
    pub(crate) key: Option<Box<dyn Reflect>>,
    pub(crate) idx: Option<usize>,
}

impl<'a> Entry<'a> {
    /// The degenerate entry for the root-only path.
    pub(crate) fn root(value: &'a dyn Reflect) -> Self {
        Self {
            value: EntryValue::Borrowed(value),
            parent: None,
            key: None,
            idx: None,
        }
    }

    /// The resolved value at this location.
    ///
    /// May still be a wrapper or dynamic value; [`get`](crate::get) is the
    /// operation that fully dereferences before returning.
    #[inline]
    pub fn value(&self) -> &dyn Reflect {
        self.value.get()
    }

    /// The dereferenced container owning [`value`](Entry::value), or `None`
    /// for the root-only path.
    #[inline]
    pub fn parent(&self) -> Option<&dyn Reflect> {
        self.parent.as_ref().map(EntryValue::get)
    }

    /// The coerced map key used for the final step, when the parent is a map.
    #[inline]
    pub fn key(&self) -> Option<&dyn Reflect> {
        self.key.as_deref()
    }

    /// The ordinal field position (struct parent) or element position
    /// (sequence or string parent) of the final step.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.idx
    }

    /// The name of the struct field at this location, when the parent is a
    /// struct.
    pub fn field_name(&self) -> Option<&'static str> {
        let index = self.idx?;
        match self.parent.as_ref()?.get().reflect_ref() {
            ReflectRef::Struct(parent) => parent.field_name(index),
            _ => None,
        }
    }

    /// Consumes the entry, returning the resolved value.
    #[inline]
    pub fn into_value(self) -> EntryValue<'a> {
        self.value
    }
}
