//! The path resolution and mutation engine.
//!
//! Resolution walks a parsed [`Path`] segment by segment against a live
//! value. Before each step the running value is dereferenced (wrapper and
//! dynamic layers stripped), then the step dispatches on the container's
//! [kind]: selectors walk struct fields (searching flattened members for
//! promoted names), indices walk sequences, strings and maps.
//!
//! The shared walk ([`entry`], [`get`]) never mutates the input; locations it
//! cannot point into (empty wrappers, missing map keys, string bytes) are
//! materialized as owned temporaries. The mutable walk ([`set`]) allocates
//! instead: empty wrappers are filled in place and missing map keys inserted,
//! so the terminal write lands in the caller's value graph.
//!
//! [kind]: crate::ops::ReflectKind

use crate::Reflect;
use crate::access::entry::{Entry, EntryValue};
use crate::access::path::{Literal, LiteralValue, Path, Segment, SegmentKind};
use crate::access::AccessError;
use crate::ops::{Map, ReflectKind, ReflectMut, ReflectRef, Struct};

// -----------------------------------------------------------------------------
// Options

/// Configuration for the path engine.
///
/// The single toggle controls wrapper dereferencing: with it disabled, a
/// wrapper location (`Option<T>`, `Box<T>`) is the location, rather than a
/// layer to strip. Dynamic values are always unwrapped.
///
/// The engine is stateless; the options value is plain data, and the
/// top-level [`get`]/[`set`]/[`entry`] functions delegate to
/// [`AccessOptions::DEFAULT`].
///
/// # Examples
///
/// ```
/// use reflect_access::AccessOptions;
///
/// let value = Some(10_i32);
///
/// let through = AccessOptions::DEFAULT.get(&value, "$").unwrap();
/// assert_eq!(through.downcast_ref::<i32>(), Some(&10));
///
/// let kept = AccessOptions::DEFAULT
///     .leave_wrappers()
///     .get(&value, "$")
///     .unwrap();
/// assert_eq!(kept.downcast_ref::<Option<i32>>(), Some(&Some(10)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessOptions {
    /// Strip wrapper layers while resolving. On by default.
    pub deref_wrappers: bool,
}

impl Default for AccessOptions {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl AccessOptions {
    /// The default configuration: wrappers are dereferenced.
    pub const DEFAULT: Self = Self {
        deref_wrappers: true,
    };

    /// Returns the options with wrapper dereferencing disabled.
    #[inline]
    pub const fn leave_wrappers(mut self) -> Self {
        self.deref_wrappers = false;
        self
    }

    /// Resolves `path` against `root` and returns the fully dereferenced
    /// value at the location, cloned out of the graph.
    pub fn get(&self, root: &dyn Reflect, path: &str) -> Result<Box<dyn Reflect>, AccessError> {
        let path = Path::parse(path)?;
        self.get_path(root, &path)
    }

    /// [`get`](Self::get) with a pre-parsed path.
    pub fn get_path(
        &self,
        root: &dyn Reflect,
        path: &Path,
    ) -> Result<Box<dyn Reflect>, AccessError> {
        let entry = self.entry_path(root, path)?;
        let value = self.deref(entry.into_value())?;
        Ok(value.into_boxed())
    }

    /// Resolves `path` against `root` and writes `value` at the location.
    ///
    /// Writing allocates on the way: empty wrappers are filled with zero
    /// values and missing map keys inserted, both along the path and at the
    /// terminal step. Direct assignment requires `value` to have exactly the
    /// location's type; map writes insert-or-overwrite at the coerced key;
    /// string writes splice a byte or a code point depending on `value`'s
    /// type.
    pub fn set(
        &self,
        root: &mut dyn Reflect,
        path: &str,
        value: impl Reflect,
    ) -> Result<(), AccessError> {
        self.set_boxed(root, path, Box::new(value))
    }

    /// [`set`](Self::set) with an already-boxed value.
    pub fn set_boxed(
        &self,
        root: &mut dyn Reflect,
        path: &str,
        value: Box<dyn Reflect>,
    ) -> Result<(), AccessError> {
        let path = Path::parse(path)?;
        self.set_path_boxed(root, &path, value)
    }

    /// [`set`](Self::set) with a pre-parsed path.
    pub fn set_path_boxed(
        &self,
        root: &mut dyn Reflect,
        path: &Path,
        value: Box<dyn Reflect>,
    ) -> Result<(), AccessError> {
        match self.write_site(root, path)? {
            WriteSite::Direct(target) => assign(target, value),
            WriteSite::MapInsert { map, key } => map
                .insert_boxed(key, value)
                .map_err(|err| AccessError::TypeMismatch(err.to_string().into())),
            WriteSite::StrSplice { string, index } => splice(string, index, value),
        }
    }

    /// Resolves `path` against `root` into an [`Entry`] exposing the location
    /// itself: the value, its owning container and the key or index used to
    /// reach it.
    pub fn entry<'a>(&self, root: &'a dyn Reflect, path: &str) -> Result<Entry<'a>, AccessError> {
        let path = Path::parse(path)?;
        self.entry_path(root, &path)
    }

    /// [`entry`](Self::entry) with a pre-parsed path.
    pub fn entry_path<'a>(
        &self,
        root: &'a dyn Reflect,
        path: &Path,
    ) -> Result<Entry<'a>, AccessError> {
        let mut entry = Entry::root(root);
        for segment in path.segments() {
            entry = self.step(entry.value, segment)?;
        }
        Ok(entry)
    }
}

// -----------------------------------------------------------------------------
// Top-level functions

/// Resolves `path` against `root` with the default options and returns the
/// value at the location, cloned out of the graph.
///
/// # Examples
///
/// ```
/// # use reflect_access::get;
/// # use std::collections::HashMap;
/// let map = HashMap::from([(String::from("a"), 1_i32)]);
///
/// let hit = get(&map, r#"$["a"]"#).unwrap();
/// assert_eq!(hit.downcast_ref::<i32>(), Some(&1));
///
/// // A missing key reads as the zero of the value type.
/// let missing = get(&map, r#"$["b"]"#).unwrap();
/// assert_eq!(missing.downcast_ref::<i32>(), Some(&0));
/// ```
#[inline]
pub fn get(root: &dyn Reflect, path: &str) -> Result<Box<dyn Reflect>, AccessError> {
    AccessOptions::DEFAULT.get(root, path)
}

/// Resolves `path` against `root` with the default options and writes `value`
/// at the location. See [`AccessOptions::set`].
///
/// # Examples
///
/// ```
/// # use reflect_access::set;
/// let mut values = vec![1_i32, 2, 3];
/// set(&mut values, "$[1]", 20_i32).unwrap();
/// assert_eq!(values, [1, 20, 3]);
/// ```
#[inline]
pub fn set(root: &mut dyn Reflect, path: &str, value: impl Reflect) -> Result<(), AccessError> {
    AccessOptions::DEFAULT.set(root, path, value)
}

/// [`set`] with an already-boxed value.
#[inline]
pub fn set_boxed(
    root: &mut dyn Reflect,
    path: &str,
    value: Box<dyn Reflect>,
) -> Result<(), AccessError> {
    AccessOptions::DEFAULT.set_boxed(root, path, value)
}

/// Resolves `path` against `root` with the default options into an
/// [`Entry`]. See [`AccessOptions::entry`].
#[inline]
pub fn entry<'a>(root: &'a dyn Reflect, path: &str) -> Result<Entry<'a>, AccessError> {
    AccessOptions::DEFAULT.entry(root, path)
}

// -----------------------------------------------------------------------------
// Shared walk

/// A child resolved relative to a borrowed parent, plus the key or index
/// that reached it.
enum IndexChild<'r> {
    /// A sequence element and its position.
    Element(&'r dyn Reflect, usize),
    /// A string byte, materialized, and its position.
    Byte(u8, usize),
    /// A present map value and the coerced key.
    MapHit(&'r dyn Reflect, Box<dyn Reflect>),
    /// The zero value for an absent map key, and the coerced key.
    MapZero(Box<dyn Reflect>, Box<dyn Reflect>),
}

impl AccessOptions {
    /// Applies one segment: dereference the running value into the parent,
    /// resolve the child, and repack the entry.
    fn step<'a>(&self, value: EntryValue<'a>, segment: &Segment) -> Result<Entry<'a>, AccessError> {
        let parent = self.deref(value)?;
        match &segment.kind {
            SegmentKind::Field(name) => {
                let (index, child) = match &parent {
                    EntryValue::Borrowed(parent) => {
                        let (index, child) = find_field(*parent, name)?;
                        (index, EntryValue::Borrowed(child))
                    }
                    EntryValue::Owned(parent) => {
                        // A child must not borrow from a temporary the entry
                        // also owns; clone it out.
                        let (index, child) = find_field(&**parent, name)?;
                        (index, EntryValue::Owned(child.reflect_clone()))
                    }
                };
                Ok(Entry {
                    value: child,
                    parent: Some(parent),
                    key: None,
                    idx: Some(index),
                })
            }
            SegmentKind::Index(literal) => {
                let (child, key, idx) = match &parent {
                    EntryValue::Borrowed(parent) => match index_child(*parent, literal)? {
                        IndexChild::Element(child, index) => {
                            (EntryValue::Borrowed(child), None, Some(index))
                        }
                        IndexChild::Byte(byte, index) => {
                            (EntryValue::Owned(Box::new(byte)), None, Some(index))
                        }
                        IndexChild::MapHit(child, key) => {
                            (EntryValue::Borrowed(child), Some(key), None)
                        }
                        IndexChild::MapZero(zero, key) => {
                            (EntryValue::Owned(zero), Some(key), None)
                        }
                    },
                    EntryValue::Owned(parent) => match index_child(&**parent, literal)? {
                        IndexChild::Element(child, index) => {
                            (EntryValue::Owned(child.reflect_clone()), None, Some(index))
                        }
                        IndexChild::Byte(byte, index) => {
                            (EntryValue::Owned(Box::new(byte)), None, Some(index))
                        }
                        IndexChild::MapHit(child, key) => {
                            (EntryValue::Owned(child.reflect_clone()), Some(key), None)
                        }
                        IndexChild::MapZero(zero, key) => {
                            (EntryValue::Owned(zero), Some(key), None)
                        }
                    },
                };
                Ok(Entry {
                    value: child,
                    parent: Some(parent),
                    key,
                    idx,
                })
            }
        }
    }

    /// Strips wrapper (when enabled) and dynamic layers off a resolved value.
    ///
    /// An empty wrapper continues on a detached zero temporary; a wrapper
    /// whose target type has no zero is an [`AccessError::InvalidValue`].
    pub(crate) fn deref<'a>(
        &self,
        mut value: EntryValue<'a>,
    ) -> Result<EntryValue<'a>, AccessError> {
        loop {
            match value {
                EntryValue::Borrowed(current) => match current.reflect_ref() {
                    ReflectRef::Wrapper(wrapper) if self.deref_wrappers => {
                        value = match wrapper.target() {
                            Some(target) => EntryValue::Borrowed(target),
                            None => EntryValue::Owned(
                                wrapper.default_target().ok_or(AccessError::InvalidValue)?,
                            ),
                        };
                    }
                    ReflectRef::Dynamic(inner) => value = EntryValue::Borrowed(inner),
                    _ => return Ok(EntryValue::Borrowed(current)),
                },
                EntryValue::Owned(current) => {
                    // Dispatch on the boxed value, not the box: `Box<dyn
                    // Reflect>` has its own `Reflect` impl (the dynamic kind),
                    // and resolving on it would re-wrap the temporary forever.
                    let next = match (*current).reflect_ref() {
                        ReflectRef::Wrapper(wrapper) if self.deref_wrappers => {
                            Some(match wrapper.target() {
                                Some(target) => target.reflect_clone(),
                                None => {
                                    wrapper.default_target().ok_or(AccessError::InvalidValue)?
                                }
                            })
                        }
                        ReflectRef::Dynamic(inner) => Some(inner.reflect_clone()),
                        _ => None,
                    };
                    match next {
                        Some(next) => value = EntryValue::Owned(next),
                        None => return Ok(EntryValue::Owned(current)),
                    }
                }
            }
        }
    }
}

/// Looks up a struct field by name, reporting hidden and missing names.
fn find_field<'r>(
    parent: &'r dyn Reflect,
    name: &str,
) -> Result<(usize, &'r dyn Reflect), AccessError> {
    let ReflectRef::Struct(parent) = parent.reflect_ref() else {
        return Err(AccessError::TypeMismatch(
            format!(
                "cannot access field `{name}` on {} value of type `{}`",
                parent.reflect_ref().kind(),
                parent.type_path()
            )
            .into(),
        ));
    };
    match field_route(parent, name) {
        FieldRoute::Found(route) => {
            let index = route[0];
            let value = field_at_route(parent, &route).ok_or(AccessError::InvalidValue)?;
            Ok((index, value))
        }
        FieldRoute::Hidden => Err(AccessError::NotAccessible { field: name.into() }),
        FieldRoute::Missing => Err(AccessError::FieldNotFound {
            type_path: parent.type_path(),
            field: name.into(),
        }),
    }
}

/// How a promoted field name was (or was not) located.
enum FieldRoute {
    /// Positions to follow, outermost first; length 1 for a direct field.
    Found(Vec<usize>),
    Hidden,
    Missing,
}

/// Finds the positional route to `name`: direct fields first, then flattened
/// members depth-first.
fn field_route(parent: &dyn Struct, name: &str) -> FieldRoute {
    if parent.field_is_hidden(name) {
        return FieldRoute::Hidden;
    }
    if let Some(index) = parent.field_index(name) {
        return FieldRoute::Found(vec![index]);
    }
    for index in 0..parent.field_len() {
        if !parent.field_is_flattened(index) {
            continue;
        }
        let Some(member) = parent.field_at(index) else {
            continue;
        };
        let ReflectRef::Struct(member) = member.reflect_ref() else {
            continue;
        };
        match field_route(member, name) {
            FieldRoute::Missing => {}
            FieldRoute::Found(mut route) => {
                route.insert(0, index);
                return FieldRoute::Found(route);
            }
            hidden => return hidden,
        }
    }
    FieldRoute::Missing
}

/// Follows a positional route produced by [`field_route`].
fn field_at_route<'r>(parent: &'r dyn Struct, route: &[usize]) -> Option<&'r dyn Reflect> {
    let (last, rest) = route.split_last()?;
    let mut current = parent;
    for &index in rest {
        current = match current.field_at(index)?.reflect_ref() {
            ReflectRef::Struct(inner) => inner,
            _ => return None,
        };
    }
    current.field_at(*last)
}

/// Mutable counterpart of [`field_at_route`].
fn field_at_route_mut<'r>(
    parent: &'r mut dyn Struct,
    route: &[usize],
) -> Option<&'r mut dyn Reflect> {
    let (last, rest) = route.split_last()?;
    let mut current = parent;
    for &index in rest {
        current = match current.field_at_mut(index)?.reflect_mut() {
            ReflectMut::Struct(inner) => inner,
            _ => return None,
        };
    }
    current.field_at_mut(*last)
}

/// Resolves one bracketed literal against a sequence, string or map parent.
fn index_child<'r>(parent: &'r dyn Reflect, literal: &Literal) -> Result<IndexChild<'r>, AccessError> {
    match parent.reflect_ref() {
        ReflectRef::List(sequence) | ReflectRef::Array(sequence) => {
            let index = integral_index(parent.type_path(), literal)?;
            let len = sequence.len();
            let element = sequence
                .get(index)
                .ok_or(AccessError::IndexOutOfRange { index, len })?;
            Ok(IndexChild::Element(element, index))
        }
        ReflectRef::Str(string) => {
            let index = integral_index(parent.type_path(), literal)?;
            match string.as_bytes().get(index) {
                Some(byte) => Ok(IndexChild::Byte(*byte, index)),
                None => Err(AccessError::IndexOutOfRange {
                    index,
                    len: string.len(),
                }),
            }
        }
        ReflectRef::Map(map) => {
            let key = map
                .coerce_key(literal)
                .ok_or_else(|| AccessError::InvalidMapKey {
                    literal: literal.raw().into(),
                })?;
            match map.get(&*key) {
                Some(value) => Ok(IndexChild::MapHit(value, key)),
                None => {
                    let zero = map.default_value().ok_or(AccessError::InvalidValue)?;
                    Ok(IndexChild::MapZero(zero, key))
                }
            }
        }
        _ => Err(neither_sequence_nor_map(parent.type_path(), literal)),
    }
}

/// Extracts a sequence index from an integer literal.
fn integral_index(type_path: &'static str, literal: &Literal) -> Result<usize, AccessError> {
    match literal.value() {
        LiteralValue::Int(value) => usize::try_from(*value).map_err(|_| {
            AccessError::TypeMismatch(
                format!(
                    "cannot index value of type `{type_path}` with negative literal {}",
                    literal.raw()
                )
                .into(),
            )
        }),
        _ => Err(AccessError::TypeMismatch(
            format!(
                "cannot index value of type `{type_path}` with non-integer literal {}",
                literal.raw()
            )
            .into(),
        )),
    }
}

fn neither_sequence_nor_map(type_path: &'static str, literal: &Literal) -> AccessError {
    AccessError::TypeMismatch(
        format!(
            "value of type `{type_path}` is neither a sequence nor a map near `[{}]`",
            literal.raw()
        )
        .into(),
    )
}

// -----------------------------------------------------------------------------
// Mutable walk

/// Where a terminal write lands.
enum WriteSite<'a> {
    /// Plain assignment into an addressable location.
    Direct(&'a mut dyn Reflect),
    /// Insert-or-overwrite into a map at a coerced key.
    MapInsert {
        map: &'a mut dyn Map,
        key: Box<dyn Reflect>,
    },
    /// Byte or code-point replacement inside a string.
    StrSplice {
        string: &'a mut String,
        index: usize,
    },
}

impl AccessOptions {
    /// Resolves a path into the site the final write lands on.
    fn write_site<'a>(
        &self,
        root: &'a mut dyn Reflect,
        path: &Path,
    ) -> Result<WriteSite<'a>, AccessError> {
        let Some((last, intermediate)) = path.segments().split_last() else {
            return Ok(WriteSite::Direct(self.deref_assign_site(root)?));
        };
        let mut current = root;
        for segment in intermediate {
            let parent = self.deref_mut(current)?;
            current = step_mut(parent, segment)?;
        }
        let parent = self.deref_mut(current)?;
        self.terminal_site(parent, last)
    }

    /// Mutable dereference for intermediate steps: empty wrappers are
    /// allocated in place, dynamic layers unwrapped.
    fn deref_mut<'r>(&self, value: &'r mut dyn Reflect) -> Result<&'r mut dyn Reflect, AccessError> {
        match value.reflect_kind() {
            ReflectKind::Wrapper if self.deref_wrappers => {
                let ReflectMut::Wrapper(wrapper) = value.reflect_mut() else {
                    unreachable!("reflect_kind and reflect_mut disagree");
                };
                let target = wrapper.ensure_target().ok_or(AccessError::InvalidValue)?;
                self.deref_mut(target)
            }
            ReflectKind::Dynamic => {
                let ReflectMut::Dynamic(inner) = value.reflect_mut() else {
                    unreachable!("reflect_kind and reflect_mut disagree");
                };
                self.deref_mut(inner)
            }
            _ => Ok(value),
        }
    }

    /// Dereference for the terminal assignment target.
    ///
    /// Stops at a dynamic layer: assignment replaces the boxed content
    /// wholesale, so the write site is the slot, not the runtime value.
    fn deref_assign_site<'r>(
        &self,
        value: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, AccessError> {
        match value.reflect_kind() {
            ReflectKind::Wrapper if self.deref_wrappers => {
                let ReflectMut::Wrapper(wrapper) = value.reflect_mut() else {
                    unreachable!("reflect_kind and reflect_mut disagree");
                };
                let target = wrapper.ensure_target().ok_or(AccessError::InvalidValue)?;
                self.deref_assign_site(target)
            }
            _ => Ok(value),
        }
    }

    /// Classifies the final step into a write site.
    fn terminal_site<'r>(
        &self,
        parent: &'r mut dyn Reflect,
        segment: &Segment,
    ) -> Result<WriteSite<'r>, AccessError> {
        match &segment.kind {
            SegmentKind::Field(name) => {
                let child = find_field_mut(parent, name)?;
                Ok(WriteSite::Direct(self.deref_assign_site(child)?))
            }
            SegmentKind::Index(literal) => {
                let type_path = parent.type_path();
                match parent.reflect_mut() {
                    ReflectMut::List(sequence) | ReflectMut::Array(sequence) => {
                        let index = integral_index(type_path, literal)?;
                        let len = sequence.len();
                        let element = sequence
                            .get_mut(index)
                            .ok_or(AccessError::IndexOutOfRange { index, len })?;
                        Ok(WriteSite::Direct(self.deref_assign_site(element)?))
                    }
                    ReflectMut::Str(string) => {
                        let index = integral_index(type_path, literal)?;
                        Ok(WriteSite::StrSplice { string, index })
                    }
                    ReflectMut::Map(map) => {
                        let key =
                            map.coerce_key(literal)
                                .ok_or_else(|| AccessError::InvalidMapKey {
                                    literal: literal.raw().into(),
                                })?;
                        Ok(WriteSite::MapInsert { map, key })
                    }
                    _ => Err(neither_sequence_nor_map(type_path, literal)),
                }
            }
        }
    }
}

/// Steps one intermediate segment mutably.
fn step_mut<'r>(
    parent: &'r mut dyn Reflect,
    segment: &Segment,
) -> Result<&'r mut dyn Reflect, AccessError> {
    match &segment.kind {
        SegmentKind::Field(name) => find_field_mut(parent, name),
        SegmentKind::Index(literal) => {
            let type_path = parent.type_path();
            match parent.reflect_mut() {
                ReflectMut::List(sequence) | ReflectMut::Array(sequence) => {
                    let index = integral_index(type_path, literal)?;
                    let len = sequence.len();
                    sequence
                        .get_mut(index)
                        .ok_or(AccessError::IndexOutOfRange { index, len })
                }
                ReflectMut::Map(map) => {
                    let key = map
                        .coerce_key(literal)
                        .ok_or_else(|| AccessError::InvalidMapKey {
                            literal: literal.raw().into(),
                        })?;
                    // The write-side analog of zero-for-missing: materialize
                    // the key so traversal can continue into the stored value.
                    map.ensure(key).ok_or(AccessError::InvalidValue)
                }
                // A string element is a fresh byte, not a location; a path
                // cannot continue through it mutably.
                ReflectMut::Str(_) => Err(AccessError::Unaddressable),
                _ => Err(neither_sequence_nor_map(type_path, literal)),
            }
        }
    }
}

/// Mutable counterpart of [`find_field`].
fn find_field_mut<'r>(
    parent: &'r mut dyn Reflect,
    name: &str,
) -> Result<&'r mut dyn Reflect, AccessError> {
    let type_path = parent.type_path();
    let kind = parent.reflect_kind();
    let ReflectMut::Struct(parent) = parent.reflect_mut() else {
        return Err(AccessError::TypeMismatch(
            format!("cannot access field `{name}` on {kind} value of type `{type_path}`").into(),
        ));
    };
    match field_route(parent, name) {
        FieldRoute::Found(route) => {
            field_at_route_mut(parent, &route).ok_or(AccessError::InvalidValue)
        }
        FieldRoute::Hidden => Err(AccessError::NotAccessible { field: name.into() }),
        FieldRoute::Missing => Err(AccessError::FieldNotFound {
            type_path,
            field: name.into(),
        }),
    }
}

// -----------------------------------------------------------------------------
// Writes

/// Direct assignment: the value must have exactly the location's type.
fn assign(target: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<(), AccessError> {
    let expected = target.type_path();
    target.set(value).map_err(|value| {
        AccessError::TypeMismatch(
            format!(
                "cannot assign value of type `{}` to location of type `{expected}`",
                value.type_path()
            )
            .into(),
        )
    })
}

/// String splice: a `u8` replaces the byte at `index` (the result must stay
/// valid UTF-8), a `char` replaces the code point at `index`.
fn splice(string: &mut String, index: usize, value: Box<dyn Reflect>) -> Result<(), AccessError> {
    if let Some(byte) = value.downcast_ref::<u8>() {
        let len = string.len();
        if index >= len {
            return Err(AccessError::IndexOutOfRange { index, len });
        }
        let mut bytes = string.clone().into_bytes();
        bytes[index] = *byte;
        match String::from_utf8(bytes) {
            Ok(next) => {
                *string = next;
                Ok(())
            }
            Err(_) => Err(AccessError::InvalidUtf8 { index }),
        }
    } else if let Some(ch) = value.downcast_ref::<char>() {
        let len = string.chars().count();
        if index >= len {
            return Err(AccessError::IndexOutOfRange { index, len });
        }
        *string = string
            .chars()
            .enumerate()
            .map(|(i, c)| if i == index { *ch } else { c })
            .collect();
        Ok(())
    } else {
        Err(AccessError::TypeMismatch(
            format!(
                "replacement for a string element must be a byte or char, got `{}`",
                value.type_path()
            )
            .into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use crate::access::{AccessError, entry, get, set};
    use crate::derive::Reflect;
    use crate::{AccessOptions, Reflect};

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    struct Inner {
        n: i32,
    }

    #[derive(Reflect, Clone, Default)]
    struct Outer {
        inner: Option<Inner>,
        label: String,
    }

    #[test]
    fn field_round_trip() {
        let mut outer = Outer::default();
        set(&mut outer, "$.label", String::from("alpha")).unwrap();
        assert_eq!(outer.label, "alpha");

        let value = get(&outer, "label").unwrap();
        assert_eq!(value.downcast_ref::<String>(), Some(&String::from("alpha")));
    }

    #[test]
    fn get_then_set_back_is_idempotent() {
        let mut outer = Outer {
            inner: Some(Inner { n: 3 }),
            label: String::from("alpha"),
        };
        for path in ["$.inner.n", "$.label", "$.inner"] {
            let read = get(&outer, path).unwrap();
            crate::set_boxed(&mut outer, path, read).unwrap();
        }
        assert_eq!(outer.inner, Some(Inner { n: 3 }));
        assert_eq!(outer.label, "alpha");
    }

    #[test]
    fn root_assignment() {
        let mut value = 1_i32;
        set(&mut value, "$", 9_i32).unwrap();
        assert_eq!(value, 9);
    }

    #[test]
    fn missing_field_names_the_type() {
        let err = get(&Inner::default(), "$.m").unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("type `{}` has no field named `m`", std::any::type_name::<Inner>()),
        );
    }

    #[test]
    fn assignment_requires_exact_type() {
        let mut inner = Inner::default();
        let err = set(&mut inner, "$.n", 1_u8).unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch(_)));
        assert_eq!(inner.n, 0);
    }

    // -------------------------------------------------------------------------
    // Wrappers

    #[test]
    fn reading_through_an_empty_wrapper_yields_zero_without_mutating() {
        let outer = Outer::default();
        let value = get(&outer, "$.inner.n").unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&0));
        assert!(outer.inner.is_none());
    }

    #[test]
    fn writing_through_an_empty_wrapper_allocates() {
        let mut outer = Outer::default();
        set(&mut outer, "$.inner.n", 5_i32).unwrap();
        assert_eq!(outer.inner, Some(Inner { n: 5 }));
    }

    #[test]
    fn nested_wrappers_are_stripped_layer_by_layer() {
        let chain: Option<Option<i32>> = None;
        let value = get(&chain, "$").unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&0));

        let mut chain: Option<Option<i32>> = None;
        set(&mut chain, "$", 6_i32).unwrap();
        assert_eq!(chain, Some(Some(6)));
    }

    #[test]
    fn leave_wrappers_stops_at_the_wrapper() {
        let outer = Outer {
            inner: Some(Inner { n: 3 }),
            label: String::new(),
        };
        let value = AccessOptions::DEFAULT
            .leave_wrappers()
            .get(&outer, "$.inner")
            .unwrap();
        assert_eq!(
            value.downcast_ref::<Option<Inner>>(),
            Some(&Some(Inner { n: 3 })),
        );
    }

    // -------------------------------------------------------------------------
    // Sequences

    #[test]
    fn sequence_index_out_of_range() {
        let values: Vec<u8> = vec![0; 5];
        let err = get(&values, "$[10]").unwrap_err();
        assert_eq!(err.to_string(), "index 10 out of range 5");
    }

    #[test]
    fn sequence_rejects_non_integer_index() {
        let values = vec![1_i32];
        let err = get(&values, r#"$["0"]"#).unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch(_)));
    }

    #[test]
    fn scalar_is_neither_sequence_nor_map() {
        let err = get(&7_i32, "$[0]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "value of type `i32` is neither a sequence nor a map near `[0]`",
        );
    }

    // -------------------------------------------------------------------------
    // Maps

    #[test]
    fn missing_map_key_reads_as_zero_and_set_inserts() {
        let mut map: BTreeMap<String, i32> = BTreeMap::new();

        let zero = get(&map, r#"$["a"]"#).unwrap();
        assert_eq!(zero.downcast_ref::<i32>(), Some(&0));
        assert!(map.is_empty());

        set(&mut map, r#"$["a"]"#, 4_i32).unwrap();
        assert_eq!(map.get("a"), Some(&4));
    }

    #[test]
    fn map_key_coercion_follows_the_key_type() {
        let map = BTreeMap::from([(2_i64, 20_i64)]);
        let hit = get(&map, "$[2]").unwrap();
        assert_eq!(hit.downcast_ref::<i64>(), Some(&20));

        // A string literal does not coerce to an integer key.
        let err = get(&map, r#"$["1"]"#).unwrap_err();
        assert_eq!(err.to_string(), r#"invalid map key "1""#);
    }

    #[test]
    fn missing_map_key_zero_keeps_resolving_deeper_segments() {
        // The detached zero is an owned temporary; the remaining segments
        // must keep stripping its wrapper layers and land on the field.
        let map: HashMap<String, Option<Inner>> = HashMap::from([(
            String::from("present"),
            Some(Inner { n: 1 }),
        )]);

        let value = get(&map, r#"$["absent"].n"#).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&0));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn intermediate_missing_map_key_is_materialized_on_write() {
        let mut map: BTreeMap<String, Inner> = BTreeMap::new();
        set(&mut map, r#"$["a"].n"#, 7_i32).unwrap();
        assert_eq!(map.get("a"), Some(&Inner { n: 7 }));
    }

    // -------------------------------------------------------------------------
    // Hidden and flattened fields

    #[derive(Reflect, Clone, Default)]
    struct WithSecret {
        visible: i32,
        #[reflect(ignore)]
        secret: i32,
    }

    #[test]
    fn hidden_fields_are_not_accessible() {
        let value = WithSecret {
            visible: 1,
            secret: 2,
        };
        assert_eq!(
            get(&value, "$.visible").unwrap().downcast_ref::<i32>(),
            Some(&1),
        );
        let err = get(&value, "$.secret").unwrap_err();
        assert_eq!(err.to_string(), "cannot access unexported field");

        let mut value = value;
        let err = set(&mut value, "$.secret", 3_i32).unwrap_err();
        assert_eq!(err.to_string(), "cannot access unexported field");
        assert_eq!(value.secret, 2);
    }

    #[derive(Reflect, Clone, Default)]
    struct Base {
        id: u32,
    }

    #[derive(Reflect, Clone, Default)]
    struct Node {
        #[reflect(flatten)]
        base: Base,
        label: String,
    }

    #[test]
    fn flattened_fields_are_promoted() {
        let node = Node {
            base: Base { id: 11 },
            label: String::from("n"),
        };
        let direct = get(&node, "$.base.id").unwrap();
        let promoted = get(&node, "$.id").unwrap();
        assert_eq!(direct.downcast_ref::<u32>(), Some(&11));
        assert_eq!(promoted.downcast_ref::<u32>(), Some(&11));

        let mut node = node;
        set(&mut node, "$.id", 12_u32).unwrap();
        assert_eq!(node.base.id, 12);
    }

    // -------------------------------------------------------------------------
    // Strings

    #[test]
    fn string_reads_bytes_and_splices_bytes() {
        let mut s = String::from("hello");
        let byte = get(&s, "$[0]").unwrap();
        assert_eq!(byte.downcast_ref::<u8>(), Some(&b'h'));

        set(&mut s, "$[0]", b'H').unwrap();
        assert_eq!(s, "Hello");
    }

    #[test]
    fn string_splices_chars_by_position() {
        let mut s = String::from("canon");
        set(&mut s, "$[1]", 'a').unwrap();
        set(&mut s, "$[3]", 'ó').unwrap();
        assert_eq!(s, "canón");
    }

    #[test]
    fn byte_splice_must_stay_valid_utf8() {
        let mut s = String::from("né");
        let err = set(&mut s, "$[2]", b'A').unwrap_err();
        assert_eq!(err.to_string(), "replacing byte 2 produces invalid UTF-8");
        assert_eq!(s, "né");
    }

    #[test]
    fn string_elements_cannot_be_traversed_mutably() {
        let mut s = String::from("ab");
        let err = set(&mut s, "$[0][0]", 1_u8).unwrap_err();
        assert_eq!(err.to_string(), "value is unaddressable");
    }

    // -------------------------------------------------------------------------
    // Dynamic values

    #[derive(Reflect, Clone)]
    struct Holder {
        payload: Box<dyn Reflect>,
    }

    #[test]
    fn dynamic_values_are_traversed_on_read() {
        let holder = Holder {
            payload: Box::new(Inner { n: 8 }),
        };
        let value = get(&holder, "$.payload.n").unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&8));
    }

    #[test]
    fn dynamic_slots_accept_replacement_of_any_type() {
        let mut holder = Holder {
            payload: Box::new(Inner { n: 8 }),
        };
        set(&mut holder, "$.payload", String::from("swapped")).unwrap();
        let value = get(&holder, "$.payload").unwrap();
        assert_eq!(
            value.downcast_ref::<String>(),
            Some(&String::from("swapped")),
        );
    }

    #[test]
    fn dynamic_map_values_are_traversed() {
        let map: HashMap<String, Box<dyn Reflect>> = HashMap::from([
            (String::from("point"), Box::new(Inner { n: 2 }) as Box<dyn Reflect>),
            (String::from("word"), Box::new(String::from("w")) as Box<dyn Reflect>),
        ]);
        let value = get(&map, r#"$["point"].n"#).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&2));

        let byte = get(&map, r#"$["word"][0]"#).unwrap();
        assert_eq!(byte.downcast_ref::<u8>(), Some(&b'w'));
    }

    // -------------------------------------------------------------------------
    // Entries

    #[test]
    fn entry_reports_field_metadata() {
        let outer = Outer {
            inner: None,
            label: String::from("x"),
        };
        let e = entry(&outer, "$.label").unwrap();
        assert_eq!(e.field_name(), Some("label"));
        assert_eq!(e.index(), Some(1));
        assert!(e.key().is_none());
    }

    #[test]
    fn entry_reports_map_keys_and_sequence_indices() {
        let map = HashMap::from([(String::from("k"), vec![5_i32])]);
        let e = entry(&map, r#"$["k"][0]"#).unwrap();
        assert_eq!(e.index(), Some(0));
        assert_eq!(e.value().downcast_ref::<i32>(), Some(&5));

        let e = entry(&map, r#"$["k"]"#).unwrap();
        assert_eq!(
            e.key().and_then(|key| key.downcast_ref::<String>()),
            Some(&String::from("k")),
        );
    }
}
