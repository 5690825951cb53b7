//! Derive support for `reflect_access`.
//!
//! See [`Reflect`].
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements `Reflect`, `Struct` and `ReflectDefault`
/// for a named-field struct. The type must be `Clone`.
///
/// ```rust, ignore
/// #[derive(Reflect, Clone)]
/// struct Server {
///     name: String,
///     ports: Vec<u16>,
/// }
/// ```
///
/// Unit structs carry no fields and are treated as opaque leaves instead;
/// their `ReflectDefault` zero is the struct itself.
///
/// ## Field Attributes
///
/// ### Hidden Fields
///
/// `#[reflect(ignore)]` removes a field from reflection entirely: it gets no
/// ordinal, path access reports it as not accessible, and the generated
/// `ReflectDefault` fills it with `Default::default()`.
///
/// ```rust, ignore
/// #[derive(Reflect, Clone)]
/// struct Connection {
///     addr: String,
///     #[reflect(ignore)]
///     socket: RawHandle,
/// }
/// ```
///
/// ### Flattened Fields
///
/// `#[reflect(flatten)]` keeps the member reachable under its own name while
/// also promoting its fields to this struct, so `$.inner_field` and
/// `$.member.inner_field` name the same location.
///
/// ## Type Attributes
///
/// `#[reflect(opaque)]` skips field inspection and treats the whole type as
/// an opaque leaf. Its `ReflectDefault` zero is the type's `Default` value,
/// when it has one.
///
/// ```rust, ignore
/// #[derive(Reflect, Clone)]
/// #[reflect(opaque)]
/// struct Fingerprint([u8; 32]);
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_reflect(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

// -----------------------------------------------------------------------------
// Expansion

fn expand_reflect(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if type_is_opaque(input)? {
        return Ok(expand_opaque(input, true));
    }
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => expand_struct(input, fields.named.iter()),
            Fields::Unit => Ok(expand_opaque(input, false)),
            Fields::Unnamed(fields) => Err(syn::Error::new_spanned(
                fields,
                "`#[derive(Reflect)]` does not support tuple structs; \
                 mark the type `#[reflect(opaque)]` to treat it as a leaf",
            )),
        },
        Data::Enum(data) => Err(syn::Error::new_spanned(
            data.enum_token,
            "`#[derive(Reflect)]` does not support enums; \
             mark the type `#[reflect(opaque)]` to treat it as a leaf",
        )),
        Data::Union(data) => Err(syn::Error::new_spanned(
            data.union_token,
            "`#[derive(Reflect)]` does not support unions",
        )),
    }
}

/// One named field and what the `#[reflect(..)]` attributes say about it.
struct StructField<'a> {
    ident: &'a syn::Ident,
    name: String,
    ty: &'a syn::Type,
    ignored: bool,
    flattened: bool,
}

fn expand_struct<'a>(
    input: &DeriveInput,
    fields: impl Iterator<Item = &'a Field>,
) -> syn::Result<TokenStream2> {
    let fields = fields
        .map(|field| {
            let (ignored, flattened) = field_attributes(field)?;
            if ignored && flattened {
                return Err(syn::Error::new_spanned(
                    field,
                    "a field cannot be both `ignore` and `flatten`",
                ));
            }
            let ident = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            Ok(StructField {
                ident,
                name: ident.to_string(),
                ty: &field.ty,
                ignored,
                flattened,
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let reflect_where = extend_where_clause(
        where_clause,
        fields
            .iter()
            .filter(|field| !field.ignored)
            .map(|field| field.ty),
        quote!(::reflect_access::Reflect),
    );
    let default_where = extend_where_clause(
        where_clause,
        fields
            .iter()
            .filter(|field| !field.ignored)
            .map(|field| field.ty),
        quote!(::reflect_access::ReflectDefault),
    );

    // Ordinals count reflected fields only; ignored fields get none.
    let reflected: Vec<&StructField> = fields.iter().filter(|field| !field.ignored).collect();

    let field_arms = reflected.iter().map(|field| {
        let (ident, name) = (field.ident, &field.name);
        quote! {
            #name => ::core::option::Option::Some(&self.#ident as &dyn ::reflect_access::Reflect),
        }
    });
    let field_mut_arms = reflected.iter().map(|field| {
        let (ident, name) = (field.ident, &field.name);
        quote! {
            #name => {
                ::core::option::Option::Some(&mut self.#ident as &mut dyn ::reflect_access::Reflect)
            }
        }
    });
    let field_at_arms = reflected.iter().enumerate().map(|(index, field)| {
        let ident = field.ident;
        quote! {
            #index => ::core::option::Option::Some(&self.#ident as &dyn ::reflect_access::Reflect),
        }
    });
    let field_at_mut_arms = reflected.iter().enumerate().map(|(index, field)| {
        let ident = field.ident;
        quote! {
            #index => {
                ::core::option::Option::Some(&mut self.#ident as &mut dyn ::reflect_access::Reflect)
            }
        }
    });
    let field_name_arms = reflected.iter().enumerate().map(|(index, field)| {
        let name = &field.name;
        quote!(#index => ::core::option::Option::Some(#name),)
    });
    let field_index_arms = reflected.iter().enumerate().map(|(index, field)| {
        let name = &field.name;
        quote!(#name => ::core::option::Option::Some(#index),)
    });
    let field_len = reflected.len();
    let flattened_indices: Vec<_> = reflected
        .iter()
        .enumerate()
        .filter(|(_, field)| field.flattened)
        .map(|(index, _)| quote!(#index))
        .collect();
    // The trait defaults both predicates to `false`; override only when a
    // field actually opts in.
    let field_is_flattened = if flattened_indices.is_empty() {
        TokenStream2::new()
    } else {
        quote! {
            fn field_is_flattened(&self, index: usize) -> bool {
                matches!(index, #(#flattened_indices)|*)
            }
        }
    };
    let hidden_names: Vec<_> = fields
        .iter()
        .filter(|field| field.ignored)
        .map(|field| {
            let name = &field.name;
            quote!(#name)
        })
        .collect();
    let field_is_hidden = if hidden_names.is_empty() {
        TokenStream2::new()
    } else {
        quote! {
            fn field_is_hidden(&self, name: &str) -> bool {
                matches!(name, #(#hidden_names)|*)
            }
        }
    };

    // `ReflectDefault` zeroes reflected fields through the reflection model
    // and falls back to `Default` for ignored ones.
    let default_fields = fields.iter().map(|field| {
        let ident = field.ident;
        let ty = field.ty;
        if field.ignored {
            quote!(#ident: ::core::default::Default::default())
        } else {
            quote!(#ident: <#ty as ::reflect_access::ReflectDefault>::reflect_default()?)
        }
    });

    Ok(quote! {
        impl #impl_generics ::reflect_access::Reflect for #name #ty_generics #reflect_where {
            fn set(
                &mut self,
                value: ::std::boxed::Box<dyn ::reflect_access::Reflect>,
            ) -> ::core::result::Result<(), ::std::boxed::Box<dyn ::reflect_access::Reflect>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> ::reflect_access::ops::ReflectKind {
                ::reflect_access::ops::ReflectKind::Struct
            }

            #[inline]
            fn reflect_ref(&self) -> ::reflect_access::ops::ReflectRef<'_> {
                ::reflect_access::ops::ReflectRef::Struct(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ::reflect_access::ops::ReflectMut<'_> {
                ::reflect_access::ops::ReflectMut::Struct(self)
            }

            #[inline]
            fn reflect_clone(&self) -> ::std::boxed::Box<dyn ::reflect_access::Reflect> {
                ::std::boxed::Box::new(::core::clone::Clone::clone(self))
            }
        }

        impl #impl_generics ::reflect_access::ops::Struct for #name #ty_generics #reflect_where {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn ::reflect_access::Reflect> {
                match name {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<&mut dyn ::reflect_access::Reflect> {
                match name {
                    #(#field_mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at(
                &self,
                index: usize,
            ) -> ::core::option::Option<&dyn ::reflect_access::Reflect> {
                match index {
                    #(#field_at_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::reflect_access::Reflect> {
                match index {
                    #(#field_at_mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_name(&self, index: usize) -> ::core::option::Option<&'static str> {
                match index {
                    #(#field_name_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_index(&self, name: &str) -> ::core::option::Option<usize> {
                match name {
                    #(#field_index_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }

            #field_is_flattened

            #field_is_hidden
        }

        impl #impl_generics ::reflect_access::ReflectDefault for #name #ty_generics #default_where {
            fn reflect_default() -> ::core::option::Option<Self> {
                ::core::option::Option::Some(Self {
                    #(#default_fields,)*
                })
            }
        }
    })
}

/// Expansion for unit structs and `#[reflect(opaque)]` types: an opaque leaf
/// whose zero comes from `Default`.
fn expand_opaque(input: &DeriveInput, needs_default: bool) -> TokenStream2 {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let reflect_default = if needs_default {
        let predicates = where_clause.map(|clause| {
            let predicates = clause.predicates.iter();
            quote!(#(#predicates,)*)
        });
        quote! {
            impl #impl_generics ::reflect_access::ReflectDefault for #name #ty_generics
            where
                #predicates
                Self: ::core::default::Default,
            {
                fn reflect_default() -> ::core::option::Option<Self> {
                    ::core::option::Option::Some(::core::default::Default::default())
                }
            }
        }
    } else {
        // A unit struct is its own zero.
        quote! {
            impl #impl_generics ::reflect_access::ReflectDefault for #name #ty_generics
            #where_clause
            {
                fn reflect_default() -> ::core::option::Option<Self> {
                    ::core::option::Option::Some(Self)
                }
            }
        }
    };

    quote! {
        impl #impl_generics ::reflect_access::Reflect for #name #ty_generics #where_clause {
            fn set(
                &mut self,
                value: ::std::boxed::Box<dyn ::reflect_access::Reflect>,
            ) -> ::core::result::Result<(), ::std::boxed::Box<dyn ::reflect_access::Reflect>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> ::reflect_access::ops::ReflectKind {
                ::reflect_access::ops::ReflectKind::Opaque
            }

            #[inline]
            fn reflect_ref(&self) -> ::reflect_access::ops::ReflectRef<'_> {
                ::reflect_access::ops::ReflectRef::Opaque(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ::reflect_access::ops::ReflectMut<'_> {
                ::reflect_access::ops::ReflectMut::Opaque(self)
            }

            #[inline]
            fn reflect_clone(&self) -> ::std::boxed::Box<dyn ::reflect_access::Reflect> {
                ::std::boxed::Box::new(::core::clone::Clone::clone(self))
            }
        }

        #reflect_default
    }
}

// -----------------------------------------------------------------------------
// Attribute parsing

/// Reads the field-level `#[reflect(..)]` attributes: `(ignored, flattened)`.
fn field_attributes(field: &Field) -> syn::Result<(bool, bool)> {
    let mut ignored = false;
    let mut flattened = false;
    for attr in &field.attrs {
        if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("ignore") {
                ignored = true;
                Ok(())
            } else if meta.path.is_ident("flatten") {
                flattened = true;
                Ok(())
            } else {
                Err(meta.error("expected `ignore` or `flatten`"))
            }
        })?;
    }
    Ok((ignored, flattened))
}

/// Reads the type-level `#[reflect(..)]` attributes: whether to treat the
/// whole type as opaque.
fn type_is_opaque(input: &DeriveInput) -> syn::Result<bool> {
    let mut opaque = false;
    for attr in &input.attrs {
        if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("opaque") {
                opaque = true;
                Ok(())
            } else {
                Err(meta.error("expected `opaque`"))
            }
        })?;
    }
    Ok(opaque)
}

// -----------------------------------------------------------------------------
// Generics

/// Copies the input where-clause and appends `#bound` for every listed type.
fn extend_where_clause<'a>(
    where_clause: Option<&syn::WhereClause>,
    types: impl Iterator<Item = &'a syn::Type>,
    bound: TokenStream2,
) -> TokenStream2 {
    let predicates = where_clause.map(|clause| {
        let predicates = clause.predicates.iter();
        quote!(#(#predicates,)*)
    });
    let bounds = types.map(|ty| quote!(#ty: #bound,));
    quote! {
        where
            #predicates
            #(#bounds)*
    }
}
