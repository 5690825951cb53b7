use crate::reflection::impl_reflect_cast_fn;

/// Implement [`Reflect`](crate::Reflect) as an opaque leaf for a `Clone +
/// Debug + Default` scalar.
macro_rules! impl_scalar_reflect {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::Reflect for $ty {
            impl_reflect_cast_fn!(Opaque);

            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }

        impl $crate::ReflectDefault for $ty {
            #[inline]
            fn reflect_default() -> Option<Self> {
                Some(<$ty as ::core::default::Default>::default())
            }
        }
    )*};
}

impl_scalar_reflect!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

// Borrowed string slices have no owned backing to splice, so they stay opaque
// leaves rather than joining the `Str` kind.
impl_scalar_reflect!(&'static str);

#[cfg(test)]
mod tests {
    use crate::ops::ReflectKind;
    use crate::{Reflect, ReflectDefault};

    #[test]
    fn scalars_are_opaque() {
        assert_eq!(10_i32.reflect_kind(), ReflectKind::Opaque);
        assert_eq!(true.reflect_kind(), ReflectKind::Opaque);
        assert_eq!("hi".reflect_kind(), ReflectKind::Opaque);
    }

    #[test]
    fn set_requires_exact_type() {
        let mut x = 10_i32;
        assert!(x.set(Box::new(20_i32)).is_ok());
        assert_eq!(x, 20);
        assert!(x.set(Box::new(20_u32)).is_err());
        assert_eq!(x, 20);
    }

    #[test]
    fn zero_values() {
        assert_eq!(i32::reflect_default(), Some(0));
        assert_eq!(bool::reflect_default(), Some(false));
        assert_eq!(f64::reflect_default(), Some(0.0));
    }
}
