//! Dipper - read and write deeply nested values by path.
//!
//! Dipper walks an in-memory object graph (structs, maps, sequences,
//! pointers and interface slots) one path segment at a time, so that
//! `"Books.3.Author"` or `"genres[id=2].name"` replaces hand-written
//! traversal code.
//!
//! # Quick Start
//!
//! ```rust
//! use dipper::Reflect;
//!
//! #[derive(Debug, Reflect)]
//! struct Genre {
//!     pub id: i64,
//!     pub name: String,
//! }
//!
//! #[derive(Debug, Reflect)]
//! struct Book {
//!     pub title: String,
//!     pub genres: Vec<Genre>,
//! }
//!
//! let mut book = Book {
//!     title: "El nombre de la rosa".into(),
//!     genres: vec![
//!         Genre { id: 0, name: "Mystery".into() },
//!         Genre { id: 1, name: "Crime".into() },
//!     ],
//! };
//!
//! let name = dipper::get_as::<String>(&book, "genres[id=1].name").unwrap();
//! assert_eq!(name, "Crime");
//!
//! dipper::set(&mut book, "genres.0.name", String::from("Thriller")).unwrap();
//! assert_eq!(book.genres[0].name, "Thriller");
//!
//! assert_eq!(
//!     dipper::get(&book, "genres.5").unwrap_err(),
//!     dipper::DipperError::IndexOutOfRange,
//! );
//! ```
//!
//! # Path Syntax
//!
//! | Segment | On | Meaning |
//! |---------|----|---------|
//! | `name` | struct | public field `name` (case-sensitive) |
//! | `key` | map | entry under the string key `key` |
//! | `3`, `[3]` | sequence | element at index 3 |
//! | `[key=value]` | sequence | first element whose `key` equals `value` |
//! | `[=value]` | sequence | first element equal to `value` |
//!
//! A bracket may follow a segment directly (`Books[3]`). The separator is
//! `.` by default and configurable through [`Options`]; inside brackets it
//! is taken literally.
//!
//! # Writing
//!
//! [`set`] replaces a value with one of the same type, [`set_zero`] resets it
//! and [`delete`] removes map entries. When the last segment names a map key,
//! the entry is inserted if missing. Values reached through an `Rc` or `Arc`
//! that has other owners cannot be changed and report
//! [`DipperError::Unaddressable`].
//!
//! # Features
//!
//! - `derive` (default): `#[derive(Reflect)]` for structs with named fields.
//! - `json` (default): [`Reflect`] for `serde_json::Value` and
//!   `serde_json::Map`.

extern crate self as dipper;

mod accessor;
mod assign;
mod dynamic;
mod error;
mod fields;
mod filter;
mod impls;
#[cfg(feature = "json")]
mod json;
mod reflect;
mod resolve;
mod splitter;
mod value;

pub use accessor::{delete, get, get_as, get_many, set, set_zero, Dipper, Options};
pub use assign::Assignment;
pub use dynamic::Dynamic;
pub use error::{DipperError, Result};
pub use fields::Fields;
pub use filter::{Filter, FilterValue};
#[cfg(feature = "json")]
pub use json::to_json;
pub use reflect::{
    assign_from, Field, Incoming, Kind, Map, MapKey, Reflect, ReflectMut, ReflectRef, Seq,
    Struct,
};
pub use splitter::{Segment, Splitter, DEFAULT_SEPARATOR};
pub use value::{Number, Scalar};

/// Derives [`Reflect`] for a struct with named fields.
///
/// `pub` fields are reachable by path; other fields exist but report
/// [`DipperError::Unexported`]. Field attributes:
///
/// - `#[dip(rename = "name")]`: address the field as `name`.
/// - `#[dip(skip)]`: hide the field entirely.
///
/// Every field type must implement [`Reflect`]; fields that are not `pub`
/// or are skipped must also implement `Default`, used by
/// [`Reflect::set_zero`].
#[cfg(feature = "derive")]
pub use dipper_macros::Reflect;
