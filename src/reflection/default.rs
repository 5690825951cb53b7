/// The "zero value" capability of a reflected type.
///
/// The path engine materializes values in two situations: dereferencing an
/// empty [`Wrapper`] and reading or inserting a missing map key. Both route
/// through this trait.
///
/// Unlike [`Default`], the zero value is optional: `Box<dyn Reflect>` has no
/// universal zero, so a map with dynamic values cannot materialize missing
/// keys and reports that to the caller instead.
///
/// [The derive macro](crate::derive::Reflect) emits a structural
/// implementation for named structs: the zero of a struct is the zero of each
/// of its fields, and it exists only when every field has one.
///
/// # Examples
///
/// ```
/// use reflect_access::{Reflect, ReflectDefault};
///
/// assert_eq!(i32::reflect_default(), Some(0));
/// assert_eq!(Option::<bool>::reflect_default(), Some(None));
/// assert!(Box::<dyn Reflect>::reflect_default().is_none());
/// ```
///
/// [`Wrapper`]: crate::ops::Wrapper
pub trait ReflectDefault: Sized {
    /// Returns the zero value of this type, if it has one.
    fn reflect_default() -> Option<Self>;
}
