//! Library half of the `dip` command.
//!
//! The binary only parses arguments, sets up logging and prints what
//! [`commands::execute`] returns.

pub mod cli;
pub mod commands;
pub mod document;

pub use cli::{Cli, Command};
pub use document::{Document, DocumentError, Format};
