use crate::Reflect;

/// A reflected single-slot indirection.
///
/// Covers `Option<T>` (a slot that may be empty) and `Box<T>` (a slot that
/// never is). The path engine strips wrapper layers before every step, so a
/// path never names the wrapper itself.
///
/// The two "ensure storage" operations make empty slots traversable:
///
/// - [`ensure_target`] allocates the zero value into an empty slot and hands
///   back the target, so writes through `None` succeed in place.
/// - [`default_target`] produces a detached zero value, so reads through
///   `None` can continue on a temporary that is never visible to the caller.
///
/// Both return `None` when the target type has no zero value.
///
/// # Examples
///
/// ```
/// # use reflect_access::{Reflect, ops::{ReflectMut, Wrapper}};
/// let mut slot: Option<i32> = None;
/// let ReflectMut::Wrapper(w) = slot.reflect_mut() else { unreachable!() };
///
/// let target = w.ensure_target().unwrap();
/// assert_eq!(target.downcast_ref::<i32>(), Some(&0));
/// assert_eq!(slot, Some(0));
/// ```
///
/// [`ensure_target`]: Wrapper::ensure_target
/// [`default_target`]: Wrapper::default_target
pub trait Wrapper: Reflect {
    /// Returns a reference to the wrapped value, if the slot is occupied.
    fn target(&self) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the wrapped value, if the slot is
    /// occupied.
    fn target_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns a mutable reference to the wrapped value, filling an empty
    /// slot with the target type's zero value first.
    ///
    /// Returns `None` when the slot is empty and the target type has no zero
    /// value.
    fn ensure_target(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns a freshly allocated zero value of the target type.
    ///
    /// Only consulted when the slot is empty; wrappers whose slot is always
    /// occupied keep the default.
    #[inline]
    fn default_target(&self) -> Option<Box<dyn Reflect>> {
        None
    }
}
