//! Attribute parsing for the Reflect derive macro.
//!
//! Fields accept `#[dip(...)]` with any of:
//!
//! - `skip`: the field is invisible to paths
//! - `rename = "name"`: the field is addressed as `name`

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[dip(...)]`.
#[derive(Debug, Clone)]
pub struct DipAttr {
    pub skip: bool,
    /// Path name to use instead of the field name.
    pub rename: Option<String>,
    pub span: Span,
}

impl Default for DipAttr {
    fn default() -> Self {
        DipAttr {
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for DipAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = DipAttr {
            span: input.span(),
            ..DipAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(path) if path.is_ident("skip") => attr.skip = true,

                Meta::NameValue(nv) if nv.path.is_ident("rename") => match &nv.value {
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) => {
                        let name = s.value();
                        if name.is_empty() {
                            return Err(Error::new(s.span(), "rename must not be empty"));
                        }
                        attr.rename = Some(name);
                    }
                    other => {
                        return Err(Error::new(
                            other.span(),
                            "rename must be a string literal",
                        ))
                    }
                },

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown dip attribute. Expected: skip or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[dip(...)]` attributes from a field's attributes.
///
/// Several `#[dip]` attributes on one field are merged.
pub fn parse_dip_attrs(attrs: &[Attribute]) -> Result<DipAttr> {
    let mut merged = DipAttr::default();
    for attr in attrs {
        if !attr.path().is_ident("dip") {
            continue;
        }
        let parsed = attr.parse_args::<DipAttr>()?;
        merged.skip |= parsed.skip;
        if parsed.rename.is_some() {
            merged.rename = parsed.rename;
        }
        merged.span = parsed.span;
    }
    Ok(merged)
}
