use crate::Reflect;

/// A reflected named-field struct.
///
/// Fields are addressed by name or by ordinal position. Positions cover the
/// *reflected* fields only: a field marked `#[reflect(ignore)]` is absent from
/// the positional view and is reported through [`field_is_hidden`] instead.
///
/// A field marked `#[reflect(flatten)]` stays a regular field under its own
/// name, and additionally promotes the names of its member struct: path
/// lookup finds `inner_field` in `Outer { #[reflect(flatten)] inner: Inner }`
/// without naming `inner`. The promotion itself is performed by the path
/// engine; this trait only reports which fields are flattened.
///
/// # Examples
///
/// ```
/// # use reflect_access::{derive::Reflect, ops::Struct};
/// #[derive(Reflect, Clone)]
/// struct Foo {
///     a: i32,
///     b: bool,
/// }
///
/// let foo = Foo { a: 1, b: true };
///
/// assert_eq!(foo.field_len(), 2);
/// assert_eq!(foo.field_name(1), Some("b"));
/// assert!(foo.field("a").is_some());
/// assert!(foo.field("c").is_none());
/// ```
///
/// [`field_is_hidden`]: Struct::field_is_hidden
pub trait Struct: Reflect {
    /// Returns a reference to the value of the field named `name`.
    ///
    /// Returns `None` if the field does not exist or is hidden.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the value of the field named `name`.
    ///
    /// Returns `None` if the field does not exist or is hidden.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns a reference to the value of the field at position `index`.
    ///
    /// Returns `None` if `index` is out of bounds.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the value of the field at position
    /// `index`.
    ///
    /// Returns `None` if `index` is out of bounds.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the name of the field at position `index`.
    ///
    /// Returns `None` if `index` is out of bounds.
    fn field_name(&self, index: usize) -> Option<&'static str>;

    /// Returns the position of the field named `name`.
    ///
    /// Returns `None` if the field does not exist or is hidden.
    fn field_index(&self, name: &str) -> Option<usize>;

    /// Returns the number of reflected fields.
    fn field_len(&self) -> usize;

    /// Returns `true` if the field at position `index` promotes the names of
    /// its member struct.
    #[inline]
    fn field_is_flattened(&self, index: usize) -> bool {
        let _ = index;
        false
    }

    /// Returns `true` if `name` denotes a field excluded from reflection.
    ///
    /// Hidden fields are invisible to the positional and by-name accessors;
    /// this method is what lets the path engine tell "hidden" apart from
    /// "absent" when reporting the failure.
    #[inline]
    fn field_is_hidden(&self, name: &str) -> bool {
        let _ = name;
        false
    }
}
