//! [`Reflect`] implementations for the std types the path engine understands.
//!
//! - scalars and `&'static str`: [`Opaque`](crate::ops::ReflectKind::Opaque)
//! - `String`: [`Str`](crate::ops::ReflectKind::Str)
//! - `Vec<T>`, `VecDeque<T>`: [`List`](crate::ops::ReflectKind::List)
//! - `[T; N]`: [`Array`](crate::ops::ReflectKind::Array)
//! - `HashMap<K, V, S>`, `BTreeMap<K, V>`: [`Map`](crate::ops::ReflectKind::Map)
//! - `Option<T>`, `Box<T>`: [`Wrapper`](crate::ops::ReflectKind::Wrapper)
//! - `Box<dyn Reflect>`: [`Dynamic`](crate::ops::ReflectKind::Dynamic)
//!
//! [`Reflect`]: crate::Reflect

use core::any::{Any, TypeId};

use crate::Reflect;

mod maps;
mod scalar;
mod sequences;
mod string;
mod wrappers;

/// Unboxes a reflected value into the concrete slot type `V`.
///
/// When `V` is `Box<dyn Reflect>` (a dynamic slot) any value is accepted and
/// stored boxed; otherwise the types must match exactly.
pub(crate) fn take_value<V: Reflect>(value: Box<dyn Reflect>) -> Result<V, Box<dyn Reflect>> {
    let value = match value.take::<V>() {
        Ok(value) => return Ok(value),
        Err(value) => value,
    };
    if TypeId::of::<V>() == TypeId::of::<Box<dyn Reflect>>() {
        let boxed: Box<dyn Any> = Box::new(value);
        #[expect(unsafe_code, reason = "type is already checked")]
        Ok(unsafe { *boxed.downcast::<V>().unwrap_unchecked() })
    } else {
        Err(value)
    }
}
