use core::fmt;

use crate::Reflect;
use crate::access::Literal;

// -----------------------------------------------------------------------------
// Insert error

/// The reason a [`Map::insert_boxed`] call was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapInsertError {
    /// The boxed key does not have the map's declared key type.
    #[error("cannot insert key of type `{found}` into map with key type `{expected}`")]
    Key {
        expected: &'static str,
        found: &'static str,
    },
    /// The boxed value does not have the map's declared value type.
    #[error("cannot insert value of type `{found}` into map with value type `{expected}`")]
    Value {
        expected: &'static str,
        found: &'static str,
    },
}

// -----------------------------------------------------------------------------
// Map

/// A reflected map-like container.
///
/// Beyond plain keyed access, this interface carries the three designed
/// operations the path engine needs from a map:
///
/// - [`coerce_key`] turns a bracketed path literal into a key of the map's
///   declared key type, or reports that the literal cannot be converted.
/// - [`default_value`] produces the zero value of the declared value type,
///   which is what reading a missing key yields.
/// - [`ensure`] is the write-side counterpart: look up a key and insert the
///   zero value first if the key is absent, so traversal can continue into
///   the stored value.
///
/// # Examples
///
/// ```
/// # use reflect_access::{Reflect, ops::{Map, ReflectRef}};
/// # use std::collections::BTreeMap;
/// let mut map = BTreeMap::new();
/// map.insert(String::from("key"), 42);
/// let ReflectRef::Map(map) = map.reflect_ref() else { unreachable!() };
///
/// assert_eq!(map.len(), 1);
/// let key = String::from("key");
/// assert!(map.get(&key).is_some());
/// ```
///
/// [`coerce_key`]: Map::coerce_key
/// [`default_value`]: Map::default_value
/// [`ensure`]: Map::ensure
pub trait Map: Reflect {
    /// Returns a reference to the value associated with the given key.
    ///
    /// Returns `None` if the key is absent or does not have the map's
    /// declared key type.
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the value associated with the given key.
    ///
    /// Returns `None` if the key is absent or does not have the map's
    /// declared key type.
    fn get_mut(&mut self, key: &dyn Reflect) -> Option<&mut dyn Reflect>;

    /// Returns the number of key-value pairs in the map.
    fn len(&self) -> usize;

    /// Returns `true` if the map contains no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts or overwrites the value at the given key.
    ///
    /// Both boxes must downcast to the map's declared key and value types.
    /// A map with `Box<dyn Reflect>` values instead accepts any value and
    /// stores it boxed.
    fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), MapInsertError>;

    /// Returns a mutable reference to the value at the given key, inserting
    /// the zero value of the value type first when the key is absent.
    ///
    /// Returns `None` if the key does not have the declared key type, or if
    /// the value type has no zero value to insert.
    fn ensure(&mut self, key: Box<dyn Reflect>) -> Option<&mut dyn Reflect>;

    /// Returns the zero value of the map's declared value type.
    ///
    /// Returns `None` when the value type has no zero value
    /// (see [`ReflectDefault`](crate::ReflectDefault)).
    fn default_value(&self) -> Option<Box<dyn Reflect>>;

    /// Converts a path literal into a key of the map's declared key type.
    ///
    /// Returns `None` when the literal cannot be converted.
    fn coerce_key(&self, literal: &Literal) -> Option<Box<dyn Reflect>>;

    /// The type path of the map's declared key type.
    fn key_type_path(&self) -> &'static str;

    /// The type path of the map's declared value type.
    fn value_type_path(&self) -> &'static str;
}

impl fmt::Debug for dyn Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Map<{}, {}>({} entries)",
            self.key_type_path(),
            self.value_type_path(),
            self.len()
        )
    }
}
