use crate::Reflect;

/// A reflected positional container.
///
/// One interface backs both positional [kinds]: `List` (growable, e.g.
/// `Vec<T>`) and `Array` (fixed-length, e.g. `[T; N]`). The distinction
/// lives in [`ReflectKind`], not in the access methods, because the path
/// engine reads and writes elements the same way for both.
///
/// # Examples
///
/// ```
/// # use reflect_access::{Reflect, ops::{ReflectRef, Sequence}};
/// let values = vec![10, 20, 30];
/// let ReflectRef::List(seq) = values.reflect_ref() else { unreachable!() };
///
/// assert_eq!(seq.len(), 3);
/// assert_eq!(seq.get(1).unwrap().downcast_ref::<i32>(), Some(&20));
/// assert!(seq.get(3).is_none());
/// ```
///
/// [kinds]: crate::ops::ReflectKind
/// [`ReflectKind`]: crate::ops::ReflectKind
pub trait Sequence: Reflect {
    /// Returns a reference to the element at `index`.
    ///
    /// Returns `None` if `index` is out of bounds.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the element at `index`.
    ///
    /// Returns `None` if `index` is out of bounds.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence contains no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
