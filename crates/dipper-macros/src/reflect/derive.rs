//! Implementation of the `#[derive(Reflect)]` macro.
//!
//! This macro generates `dipper::Reflect` and `dipper::Struct` for a struct
//! with named fields. Public fields are exported, other fields are reported
//! as unexported and `#[dip(skip)]` fields are not reported at all.
//!
//! Zeroing resets exported fields through `Reflect` and the rest with
//! `Default`. A struct is only zeroable when all of its exported fields are,
//! so a zero never stops halfway.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse_quote, spanned::Spanned, Data, DeriveInput, Error, Fields, GenericParam, Result,
    Visibility,
};

use super::attrs::parse_dip_attrs;

/// Main implementation of the Reflect derive macro.
pub fn reflect_derive_impl(mut input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Reflect can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Reflect can only be derived for structs",
            ))
        }
    };

    let mut seen = HashSet::new();
    let mut names: Vec<String> = Vec::new();
    let mut ref_arms: Vec<TokenStream> = Vec::new();
    let mut mut_arms: Vec<TokenStream> = Vec::new();
    let mut zero_stmts: Vec<TokenStream> = Vec::new();
    let mut zeroable_checks: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_dip_attrs(&field.attrs)?;
        let exported = matches!(field.vis, Visibility::Public(_)) && !attrs.skip;

        if exported {
            zero_stmts.push(quote! {
                ::dipper::Reflect::set_zero(&mut self.#field_name);
            });
            zeroable_checks.push(quote! {
                && ::dipper::Reflect::is_zeroable(&self.#field_name)
            });
        } else {
            zero_stmts.push(quote! {
                self.#field_name = ::core::default::Default::default();
            });
        }

        if attrs.skip {
            continue;
        }

        let path_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        if !seen.insert(path_name.clone()) {
            return Err(Error::new(
                attrs.span,
                format!("duplicate path name '{}'", path_name),
            ));
        }

        if exported {
            names.push(path_name.clone());
            ref_arms.push(quote! {
                #path_name => ::dipper::Field::Exported(&self.#field_name),
            });
            mut_arms.push(quote! {
                #path_name => ::dipper::Field::Exported(&mut self.#field_name),
            });
        } else {
            ref_arms.push(quote! {
                #path_name => ::dipper::Field::Unexported,
            });
            mut_arms.push(quote! {
                #path_name => ::dipper::Field::Unexported,
            });
        }
    }

    // Generic parameters must themselves be reflectable.
    let type_params: Vec<_> = input
        .generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => Some(ty.ident.clone()),
            _ => None,
        })
        .collect();
    {
        let where_clause = input.generics.make_where_clause();
        for ident in &type_params {
            where_clause
                .predicates
                .push(parse_quote!(#ident: ::dipper::Reflect));
        }
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::dipper::Reflect for #struct_name #ty_generics #where_clause {
            fn reflect_ref(&self) -> ::dipper::ReflectRef<'_> {
                ::dipper::ReflectRef::Struct(self)
            }

            fn reflect_mut(&mut self) -> ::dipper::ReflectMut<'_> {
                ::dipper::ReflectMut::Struct(self)
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            fn set_zero(&mut self) {
                #(#zero_stmts)*
            }

            fn is_zeroable(&self) -> bool {
                true #(#zeroable_checks)*
            }

            fn assign(&mut self, incoming: &mut ::dipper::Incoming<'_>) -> bool {
                ::dipper::assign_from(self, incoming)
            }
        }

        impl #impl_generics ::dipper::Struct for #struct_name #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::dipper::Field<&dyn ::dipper::Reflect> {
                match name {
                    #(#ref_arms)*
                    _ => ::dipper::Field::Missing,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::dipper::Field<&mut dyn ::dipper::Reflect> {
                match name {
                    #(#mut_arms)*
                    _ => ::dipper::Field::Missing,
                }
            }

            fn field_names(&self) -> &'static [&'static str] {
                &[#(#names),*]
            }
        }
    };

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(input: DeriveInput) -> Result<String> {
        reflect_derive_impl(input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn test_exported_and_unexported_arms() {
        let output = expand(parse_quote! {
            struct Book {
                pub title: String,
                isbn: String,
                #[dip(rename = "Year")]
                pub year: i64,
            }
        })
        .unwrap();

        assert!(output.contains("\"title\" => :: dipper :: Field :: Exported"));
        assert!(output.contains("\"isbn\" => :: dipper :: Field :: Unexported"));
        assert!(output.contains("\"Year\" => :: dipper :: Field :: Exported"));
        assert!(!output.contains("\"year\""));
    }

    #[test]
    fn test_skipped_fields_are_missing() {
        let output = expand(parse_quote! {
            struct Book {
                #[dip(skip)]
                pub cache: Vec<u8>,
            }
        })
        .unwrap();

        assert!(!output.contains("\"cache\""));
        assert!(output.contains("self . cache = :: core :: default :: Default :: default ()"));
        assert!(!output.contains("is_zeroable (& self . cache)"));
    }

    #[test]
    fn test_zeroable_checks_exported_fields() {
        let output = expand(parse_quote! {
            struct Holder {
                pub shared: std::rc::Rc<i32>,
                plain: i32,
            }
        })
        .unwrap();

        assert!(output.contains("true && :: dipper :: Reflect :: is_zeroable (& self . shared)"));
        assert!(!output.contains("is_zeroable (& self . plain)"));
    }

    #[test]
    fn test_generic_params_are_bounded() {
        let output = expand(parse_quote! {
            struct Page<T> {
                pub items: Vec<T>,
            }
        })
        .unwrap();

        assert!(output.contains("T : :: dipper :: Reflect"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = expand(parse_quote! {
            struct Book {
                pub title: String,
                #[dip(rename = "title")]
                pub name: String,
            }
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_tuple_structs_rejected() {
        assert!(expand(parse_quote! { struct Pair(pub i32, pub i32); }).is_err());
        assert!(expand(parse_quote! { enum Kind { A, B } }).is_err());
    }
}
