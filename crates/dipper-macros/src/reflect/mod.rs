//! Implementation of the `#[derive(Reflect)]` macro.
//!
//! This module generates path access for structs: field lookup by name,
//! exported/unexported reporting and zeroing.

mod attrs;
mod derive;

pub use derive::reflect_derive_impl;
