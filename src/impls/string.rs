use crate::reflection::impl_reflect_cast_fn;
use crate::{Reflect, ReflectDefault};

// `String` is its own kind: paths index it by byte on read, and writes splice
// a byte or a code point depending on the replacement value.
impl Reflect for String {
    impl_reflect_cast_fn!(Str);

    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

impl ReflectDefault for String {
    #[inline]
    fn reflect_default() -> Option<Self> {
        Some(String::new())
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::ops::ReflectKind;

    #[test]
    fn strings_have_their_own_kind() {
        let s = String::from("hello");
        assert_eq!(s.reflect_kind(), ReflectKind::Str);
    }
}
