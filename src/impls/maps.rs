use core::any::type_name;
use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeMap, HashMap, btree_map, hash_map};

use crate::access::{FromLiteral, Literal};
use crate::impls::take_value;
use crate::ops::{Map, MapInsertError};
use crate::reflection::impl_reflect_cast_fn;
use crate::{Reflect, ReflectDefault};

// The value type must carry a zero value capability (possibly answering
// "none") because reading a missing key yields the value type's zero.
// The key type must be coercible from a path literal.

// -----------------------------------------------------------------------------
// HashMap

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: Reflect + FromLiteral + Eq + Hash + Clone,
    V: Reflect + ReflectDefault + Clone,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    impl_reflect_cast_fn!(Map);

    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&(self as &dyn Map), f)
    }
}

impl<K, V, S> Map for HashMap<K, V, S>
where
    K: Reflect + FromLiteral + Eq + Hash + Clone,
    V: Reflect + ReflectDefault + Clone,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
        let key = key.downcast_ref::<K>()?;
        HashMap::get(self, key).map(|value| value as &dyn Reflect)
    }

    fn get_mut(&mut self, key: &dyn Reflect) -> Option<&mut dyn Reflect> {
        let key = key.downcast_ref::<K>()?;
        HashMap::get_mut(self, key).map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), MapInsertError> {
        let key = key.take::<K>().map_err(|key| MapInsertError::Key {
            expected: type_name::<K>(),
            found: key.type_path(),
        })?;
        let value = take_value::<V>(value).map_err(|value| MapInsertError::Value {
            expected: type_name::<V>(),
            found: value.type_path(),
        })?;
        self.insert(key, value);
        Ok(())
    }

    fn ensure(&mut self, key: Box<dyn Reflect>) -> Option<&mut dyn Reflect> {
        let key = key.take::<K>().ok()?;
        match self.entry(key) {
            hash_map::Entry::Occupied(entry) => Some(entry.into_mut() as &mut dyn Reflect),
            hash_map::Entry::Vacant(entry) => {
                Some(entry.insert(V::reflect_default()?) as &mut dyn Reflect)
            }
        }
    }

    fn default_value(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(V::reflect_default()?))
    }

    fn coerce_key(&self, literal: &Literal) -> Option<Box<dyn Reflect>> {
        Some(Box::new(K::from_literal(literal)?))
    }

    #[inline]
    fn key_type_path(&self) -> &'static str {
        type_name::<K>()
    }

    #[inline]
    fn value_type_path(&self) -> &'static str {
        type_name::<V>()
    }
}

impl<K, V, S: Default> ReflectDefault for HashMap<K, V, S> {
    #[inline]
    fn reflect_default() -> Option<Self> {
        Some(HashMap::default())
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + FromLiteral + Ord + Clone,
    V: Reflect + ReflectDefault + Clone,
{
    impl_reflect_cast_fn!(Map);

    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&(self as &dyn Map), f)
    }
}

impl<K, V> Map for BTreeMap<K, V>
where
    K: Reflect + FromLiteral + Ord + Clone,
    V: Reflect + ReflectDefault + Clone,
{
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
        let key = key.downcast_ref::<K>()?;
        BTreeMap::get(self, key).map(|value| value as &dyn Reflect)
    }

    fn get_mut(&mut self, key: &dyn Reflect) -> Option<&mut dyn Reflect> {
        let key = key.downcast_ref::<K>()?;
        BTreeMap::get_mut(self, key).map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), MapInsertError> {
        let key = key.take::<K>().map_err(|key| MapInsertError::Key {
            expected: type_name::<K>(),
            found: key.type_path(),
        })?;
        let value = take_value::<V>(value).map_err(|value| MapInsertError::Value {
            expected: type_name::<V>(),
            found: value.type_path(),
        })?;
        self.insert(key, value);
        Ok(())
    }

    fn ensure(&mut self, key: Box<dyn Reflect>) -> Option<&mut dyn Reflect> {
        let key = key.take::<K>().ok()?;
        match self.entry(key) {
            btree_map::Entry::Occupied(entry) => Some(entry.into_mut() as &mut dyn Reflect),
            btree_map::Entry::Vacant(entry) => {
                Some(entry.insert(V::reflect_default()?) as &mut dyn Reflect)
            }
        }
    }

    fn default_value(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(V::reflect_default()?))
    }

    fn coerce_key(&self, literal: &Literal) -> Option<Box<dyn Reflect>> {
        Some(Box::new(K::from_literal(literal)?))
    }

    #[inline]
    fn key_type_path(&self) -> &'static str {
        type_name::<K>()
    }

    #[inline]
    fn value_type_path(&self) -> &'static str {
        type_name::<V>()
    }
}

impl<K, V> ReflectDefault for BTreeMap<K, V> {
    #[inline]
    fn reflect_default() -> Option<Self> {
        Some(BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::Reflect;
    use crate::ops::{Map, ReflectRef};

    #[test]
    fn map_keyed_access() {
        let mut map = HashMap::new();
        map.insert(String::from("a"), 1_i32);

        let ReflectRef::Map(map) = map.reflect_ref() else {
            unreachable!()
        };
        let key = String::from("a");
        let value = map.get(&key).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&1));

        let missing = String::from("b");
        assert!(map.get(&missing).is_none());
    }

    #[test]
    fn insert_rejects_wrong_value_type() {
        let mut map = HashMap::new();
        map.insert(String::from("a"), 1_i32);

        let err = map
            .insert_boxed(Box::new(String::from("b")), Box::new(true))
            .unwrap_err();
        assert!(err.to_string().contains("value of type"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn dynamic_values_accept_anything() {
        let mut map: HashMap<String, Box<dyn Reflect>> = HashMap::new();
        map.insert_boxed(Box::new(String::from("n")), Box::new(42_i32))
            .unwrap();
        assert_eq!(map["n"].downcast_ref::<i32>(), Some(&42));
    }
}
