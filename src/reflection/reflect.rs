use core::any::{Any, TypeId};

use crate::ops::{ReflectKind, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime reflection in [`reflect_access`].
///
/// This trait enables dynamic access and modification of data without
/// compile-time type information. It is the abstraction the path engine walks:
/// every value a path can traverse implements `Reflect`.
///
/// # Recommendations
///
/// It's strongly recommended to use [the derive macro for `Reflect`] rather
/// than manually implementing this trait. The derive macro automatically
/// implements this trait along with [`Struct`] and [`ReflectDefault`] based on
/// the type's structure.
///
/// # Core Functionality
///
/// ## Type Identification
///
/// While `Reflect` supports [`Any`], note that [`Any::type_id`] on
/// `Box<dyn Reflect>` returns the container's type ID, not the inner value's.
/// Use [`Reflect::ty_id`] instead:
///
/// ```rust
/// # use reflect_access::Reflect;
/// # use core::any::{Any, TypeId};
/// let x: Box<dyn Reflect> = Box::new(32_i32).into_reflect();
///
/// assert!(x.type_id() != TypeId::of::<i32>());    // Container type ID
/// assert!((*x).type_id() == TypeId::of::<i32>()); // Dereferenced works
/// assert!(x.ty_id() == TypeId::of::<i32>());      // Preferred method
/// ```
///
/// ## Kind Casting
///
/// Use [`reflect_ref`] and [`reflect_mut`] to cast to the kind traits
/// ([`Struct`], [`Map`], [`Sequence`], [`Wrapper`]):
///
/// ```rust
/// # use reflect_access::{Reflect, ops::{ReflectRef, Sequence}};
/// let vec = vec![1, 2, 3];
/// let ReflectRef::List(seq) = vec.reflect_ref() else { unreachable!() };
/// assert_eq!(seq.len(), 3);
/// ```
///
/// Use `downcast_ref`, `downcast_mut`, `downcast` and `take` for concrete
/// type conversion:
///
/// ```rust
/// # use reflect_access::Reflect;
/// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
/// let y = x.downcast_ref::<i32>().unwrap();
/// assert_eq!(*y, 10);
/// ```
///
/// # Implementation Guide
///
/// Most methods have one standard implementation per [kind]:
///
/// ```rust, ignore
/// fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
///     *self = value.take::<Self>()?;  // Extract Self from Box<dyn Reflect>
///     Ok(())
/// }
///
/// fn reflect_kind(&self) -> ReflectKind {
///     ReflectKind::Kind  // e.g., ReflectKind::Struct, ReflectKind::Map
/// }
///
/// fn reflect_ref(&self) -> ReflectRef<'_> {
///     ReflectRef::Kind(self)  // Construct appropriate ReflectRef variant
/// }
///
/// fn reflect_mut(&mut self) -> ReflectMut<'_> {
///     ReflectMut::Kind(self)  // Construct appropriate ReflectMut variant
/// }
/// ```
///
/// The [`reflect_kind`], [`reflect_ref`] and [`reflect_mut`] implementations
/// must agree: returning [`ReflectKind::Map`] from one and a non-map variant
/// from another breaks the path engine's dispatch.
///
/// [kind]: Reflect::reflect_kind
/// [`reflect_kind`]: Reflect::reflect_kind
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
/// [`reflect_access`]: crate
/// [the derive macro for `Reflect`]: crate::derive::Reflect
/// [`Struct`]: crate::ops::Struct
/// [`Map`]: crate::ops::Map
/// [`Sequence`]: crate::ops::Sequence
/// [`Wrapper`]: crate::ops::Wrapper
/// [`ReflectDefault`]: crate::ReflectDefault
/// [`ReflectKind::Map`]: crate::ops::ReflectKind::Map
/// [`Any`]: core::any::Any
pub trait Reflect: Send + Sync + Any {
    /// Casts this type to a fully-reflected value.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable, fully-reflected value.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a boxed, fully-reflected value.
    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value as a fully-reflected value.
    ///
    /// # Example
    ///
    /// ```
    /// use reflect_access::Reflect;
    ///
    /// let r = 32.into_boxed_reflect();
    /// // Equal to this:
    /// // let r = Box::new(32) as Box<dyn Reflect>;
    /// ```
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the full type path of the underlying type.
    #[inline]
    fn type_path(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Return the [`TypeId`] of the underlying type.
    ///
    /// When you call `Box<dyn Reflect>::type_id`, it will return the [`TypeId`]
    /// of the entire container, instead of the boxed value. This is prone to
    /// errors, so we provide this method.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Performs a type-checked assignment of a reflected value to this value.
    ///
    /// The incoming type must match `Self` exactly; on mismatch the value is
    /// handed back unchanged in the `Err` variant.
    ///
    /// The one exception is [`Box<dyn Reflect>`] itself, whose implementation
    /// accepts any reflected value and stores it as the new boxed content.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reflect_access::Reflect;
    /// let data = vec![1_i32, 2_i32, 3_i32].into_boxed_reflect();
    /// let mut vec = Vec::<i32>::new();
    ///
    /// vec.set(data).unwrap();
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns a pure enumeration of ["kinds"](ReflectKind) of type.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reflect_access::{Reflect, ops::ReflectKind};
    /// let vec = vec![1, 2, 3];
    ///
    /// assert_eq!(vec.reflect_kind(), ReflectKind::List);
    /// ```
    fn reflect_kind(&self) -> ReflectKind;

    /// Returns an immutable enumeration of ["kinds"](ReflectRef) of type.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable enumeration of ["kinds"](ReflectMut) of type.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Clones `Self` into a boxed reflected value.
    ///
    /// The returned value must have the same underlying type as `self`;
    /// the path engine relies on it when materializing temporaries.
    ///
    /// # Example
    ///
    /// ```
    /// # use reflect_access::Reflect;
    /// let value = vec![1, 2, 3];
    /// let cloned = value.reflect_clone();
    /// assert!(cloned.is::<Vec<i32>>())
    /// ```
    fn reflect_clone(&self) -> Box<dyn Reflect>;

    /// Debug formatter for the value.
    ///
    /// Implementations for concrete types forward to [`Debug`](core::fmt::Debug)
    /// where available; the fallback writes the type path.
    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "<{}>", self.type_path())
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// This checks the concrete stored type, so for a dynamic slot it is the
    /// slot itself (`Box<dyn Reflect>`), not its content; [`Reflect::ty_id`]
    /// sees through the slot.
    ///
    /// ```
    /// # use reflect_access::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// assert!(x.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        (self as &dyn Any).type_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reflect_access::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let y = x.downcast_ref::<i32>().unwrap();
    /// assert_eq!(*y, 10);
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reflect_access::Reflect;
    /// let mut x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let y = x.downcast_mut::<i32>().unwrap();
    /// *y += 2;
    ///
    /// assert_eq!(*y, 12);
    /// ```
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reflect_access::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let x: Box<i32> = x.downcast::<i32>().unwrap();
    /// assert_eq!(*x, 10);
    /// ```
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            // TODO: replace to `downcast_uncheck` when it's stable,
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reflect_access::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let x = x.take::<i32>().unwrap();
    /// assert_eq!(x, 10);
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        if self.is::<T>() {
            // TODO: replace to `downcast_uncheck` when it's stable,
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { *<Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }
}

impl core::fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implement the common methods `set`, `reflect_kind`, `reflect_ref`,
/// `reflect_mut` and `reflect_clone` for a `Clone` type of the given kind.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::std::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::ops::ReflectKind {
            $crate::ops::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }

        #[inline]
        fn reflect_clone(&self) -> ::std::boxed::Box<dyn $crate::Reflect> {
            ::std::boxed::Box::new(Clone::clone(self))
        }
    };
}

pub(crate) use impl_reflect_cast_fn;
