//! The foundational reflection interface.

mod default;
mod reflect;

pub use default::ReflectDefault;
pub use reflect::Reflect;

pub(crate) use reflect::impl_reflect_cast_fn;
