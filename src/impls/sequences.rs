use std::collections::VecDeque;

use crate::ops::Sequence;
use crate::reflection::impl_reflect_cast_fn;
use crate::{Reflect, ReflectDefault};

// -----------------------------------------------------------------------------
// Vec

impl<T: Reflect + Clone> Reflect for Vec<T> {
    impl_reflect_cast_fn!(List);

    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|item| item as &dyn Reflect))
            .finish()
    }
}

impl<T: Reflect + Clone> Sequence for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T> ReflectDefault for Vec<T> {
    #[inline]
    fn reflect_default() -> Option<Self> {
        Some(Vec::new())
    }
}

// -----------------------------------------------------------------------------
// VecDeque

impl<T: Reflect + Clone> Reflect for VecDeque<T> {
    impl_reflect_cast_fn!(List);

    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|item| item as &dyn Reflect))
            .finish()
    }
}

impl<T: Reflect + Clone> Sequence for VecDeque<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        VecDeque::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T> ReflectDefault for VecDeque<T> {
    #[inline]
    fn reflect_default() -> Option<Self> {
        Some(VecDeque::new())
    }
}

// -----------------------------------------------------------------------------
// Array

impl<T: Reflect + Clone, const N: usize> Reflect for [T; N] {
    impl_reflect_cast_fn!(Array);

    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|item| item as &dyn Reflect))
            .finish()
    }
}

impl<T: Reflect + Clone, const N: usize> Sequence for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }
}

impl<T: ReflectDefault, const N: usize> ReflectDefault for [T; N] {
    fn reflect_default() -> Option<Self> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::reflect_default()?);
        }
        items.try_into().ok()
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::ops::{ReflectKind, ReflectRef};

    #[test]
    fn vec_is_list_and_array_is_array() {
        assert_eq!(vec![1, 2].reflect_kind(), ReflectKind::List);
        assert_eq!([1, 2].reflect_kind(), ReflectKind::Array);
    }

    #[test]
    fn sequence_access() {
        let values = vec![10_i32, 20, 30];
        let ReflectRef::List(seq) = values.reflect_ref() else {
            unreachable!()
        };
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(2).unwrap().downcast_ref::<i32>(), Some(&30));
        assert!(seq.get(3).is_none());
    }
}
