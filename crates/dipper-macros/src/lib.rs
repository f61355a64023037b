//! Proc macros for dipper.
//!
//! # Derive Macros
//!
//! - [`Reflect`] - Make a struct with named fields addressable by path
//!
//! The generated code refers to the `dipper` crate by absolute path, so use
//! the macro through its re-export, `dipper::Reflect`.

mod reflect;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `dipper::Reflect` and `dipper::Struct` for a struct with named
/// fields.
///
/// # Field Visibility
///
/// | Field | Path lookup |
/// |-------|-------------|
/// | `pub` | returns the field |
/// | not `pub` | fails with `Unexported` |
/// | `#[dip(skip)]` | fails with `NotFound` |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Hide this field from paths |
/// | `rename = "..."` | Address the field by a custom name |
///
/// # Generated Code
///
/// 1. `Reflect`, reporting the struct kind and zeroing every field
/// 2. `Struct::field()` / `Struct::field_mut()` dispatching on the path name
/// 3. `Struct::field_names()` listing the exported names in declaration order
///
/// Exported fields must implement `Reflect`. Unexported and skipped fields
/// must implement `Default`, which is what zeroing writes to them. Type
/// parameters are bounded by `Reflect`.
///
/// # Example
///
/// ```ignore
/// use dipper::Reflect;
///
/// #[derive(Debug, Reflect)]
/// struct Book {
///     pub title: String,
///     #[dip(rename = "Year")]
///     pub year: i64,
///     isbn: String,
///     #[dip(skip)]
///     pub cache: Vec<u8>,
/// }
///
/// let book = Book {
///     title: "El nombre de la rosa".into(),
///     year: 1980,
///     isbn: "1234567890".into(),
///     cache: Vec::new(),
/// };
///
/// assert_eq!(dipper::get_as::<i64>(&book, "Year"), Ok(&1980));
/// assert_eq!(dipper::get(&book, "isbn").unwrap_err(), dipper::DipperError::Unexported);
/// assert_eq!(dipper::get(&book, "cache").unwrap_err(), dipper::DipperError::NotFound);
/// ```
#[proc_macro_derive(Reflect, attributes(dip))]
pub fn reflect_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    reflect::reflect_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
