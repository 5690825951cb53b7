//! Interfaces for kind-based data access.
//!
//! ## Menu
//!
//! The following are the subtraits of [`Reflect`], which provide data access
//! methods for the different [kinds]:
//!
//! - [`Struct`]: For named-field structs (e.g. `A { .. }`).
//! - [`Sequence`]: For positional containers, both growable (`Vec<i32>`)
//!   and fixed (`[i32; 5]`).
//! - [`Map`]: For map-like containers (e.g. `HashMap<i32, f32>`).
//! - [`Wrapper`]: For single-slot indirections (e.g. `Option<T>`, `Box<T>`).
//!
//! Strings and type-erased values carry no subtrait; [`ReflectRef::Str`]
//! exposes the `String` directly and [`ReflectRef::Dynamic`] exposes the
//! concrete runtime value.
//!
//! [kinds]: ReflectKind
//! [`Reflect`]: crate::Reflect

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod map_ops;
mod sequence_ops;
mod struct_ops;
mod wrapper_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectKind, ReflectMut, ReflectRef};
pub use map_ops::{Map, MapInsertError};
pub use sequence_ops::Sequence;
pub use struct_ops::Struct;
pub use wrapper_ops::Wrapper;
