use core::any::TypeId;

use crate::ops::{ReflectKind, ReflectMut, ReflectRef, Wrapper};
use crate::reflection::impl_reflect_cast_fn;
use crate::{Reflect, ReflectDefault};

// -----------------------------------------------------------------------------
// Option

impl<T: Reflect + Clone + ReflectDefault> Reflect for Option<T> {
    impl_reflect_cast_fn!(Wrapper);

    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Some(value) => write!(f, "Some({:?})", value as &dyn Reflect),
            None => f.write_str("None"),
        }
    }
}

impl<T: Reflect + Clone + ReflectDefault> Wrapper for Option<T> {
    #[inline]
    fn target(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn target_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    fn ensure_target(&mut self) -> Option<&mut dyn Reflect> {
        if self.is_none() {
            *self = Some(T::reflect_default()?);
        }
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    fn default_target(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(T::reflect_default()?))
    }
}

impl<T> ReflectDefault for Option<T> {
    #[inline]
    fn reflect_default() -> Option<Self> {
        Some(None)
    }
}

// -----------------------------------------------------------------------------
// Box

impl<T: Reflect + Clone> Reflect for Box<T> {
    impl_reflect_cast_fn!(Wrapper);

    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        (**self).reflect_debug(f)
    }
}

impl<T: Reflect + Clone> Wrapper for Box<T> {
    #[inline]
    fn target(&self) -> Option<&dyn Reflect> {
        Some(&**self)
    }

    #[inline]
    fn target_mut(&mut self) -> Option<&mut dyn Reflect> {
        Some(&mut **self)
    }

    #[inline]
    fn ensure_target(&mut self) -> Option<&mut dyn Reflect> {
        Some(&mut **self)
    }
}

impl<T: Reflect + Clone + ReflectDefault> ReflectDefault for Box<T> {
    #[inline]
    fn reflect_default() -> Option<Self> {
        Some(Box::new(T::reflect_default()?))
    }
}

// -----------------------------------------------------------------------------
// Box<dyn Reflect>

// The dynamic kind: a slot whose static type carries no concrete shape.
// Reads unwrap it to the runtime value; assignment replaces the boxed
// content with any reflected value, mirroring how such a slot is filled in
// the first place.
impl Reflect for Box<dyn Reflect> {
    #[inline]
    fn type_path(&self) -> &'static str {
        (**self).type_path()
    }

    #[inline]
    fn ty_id(&self) -> TypeId {
        (**self).ty_id()
    }

    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = match value.take::<Self>() {
            Ok(inner) => inner,
            Err(value) => value,
        };
        Ok(())
    }

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Dynamic
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Dynamic(&**self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Dynamic(&mut **self)
    }

    #[inline]
    fn reflect_clone(&self) -> Box<dyn Reflect> {
        Box::new(self.clone())
    }

    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        (**self).reflect_debug(f)
    }
}

impl Clone for Box<dyn Reflect> {
    #[inline]
    fn clone(&self) -> Self {
        (**self).reflect_clone()
    }
}

impl ReflectDefault for Box<dyn Reflect> {
    /// There is no universal zero value for a type-erased slot.
    #[inline]
    fn reflect_default() -> Option<Self> {
        None
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use crate::ops::{ReflectKind, ReflectMut, Wrapper};
    use crate::{Reflect, ReflectDefault};

    #[test]
    fn option_ensure_allocates_zero() {
        let mut slot: Option<i32> = None;
        let ReflectMut::Wrapper(w) = slot.reflect_mut() else {
            unreachable!()
        };
        assert_eq!(w.ensure_target().unwrap().downcast_ref::<i32>(), Some(&0));
        assert_eq!(slot, Some(0));
    }

    #[test]
    fn option_without_zero_target_stays_empty() {
        let mut slot: Option<Box<dyn Reflect>> = None;
        let ReflectMut::Wrapper(w) = slot.reflect_mut() else {
            unreachable!()
        };
        assert!(w.ensure_target().is_none());
        assert!(w.default_target().is_none());
        assert!(slot.is_none());
    }

    #[test]
    fn boxed_dyn_is_dynamic_and_accepts_any_assignment() {
        let mut slot: Box<dyn Reflect> = Box::new(10_i32);
        assert_eq!(slot.reflect_kind(), ReflectKind::Dynamic);

        Reflect::set(&mut slot, Box::new(String::from("now a string"))).unwrap();
        assert_eq!(
            (*slot).downcast_ref::<String>(),
            Some(&String::from("now a string"))
        );
    }

    #[test]
    fn boxed_dyn_ty_id_is_the_content_type() {
        let slot: Box<dyn Reflect> = Box::new(32_i32);
        assert_eq!(slot.ty_id(), TypeId::of::<i32>());
        assert!((*slot).is::<i32>());

        // Re-boxing keeps reporting the innermost content.
        let rewrapped: Box<dyn Reflect> = Box::new(slot);
        assert_eq!(rewrapped.ty_id(), TypeId::of::<i32>());
    }

    #[test]
    fn boxed_dyn_set_unwraps_a_double_box() {
        let mut slot: Box<dyn Reflect> = Box::new(0_i32);
        let double: Box<dyn Reflect> = Box::new(Box::new(7_i32) as Box<dyn Reflect>);

        Reflect::set(&mut slot, double).unwrap();
        assert!((*slot).is::<i32>());
        assert_eq!((*slot).downcast_ref::<i32>(), Some(&7));
    }

    #[test]
    fn option_zero_is_none() {
        assert_eq!(Option::<i32>::reflect_default(), Some(None));
    }
}
