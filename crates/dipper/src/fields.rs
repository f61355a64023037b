//! Batch lookup results.

use std::collections::HashMap;
use std::fmt;

use crate::error::{DipperError, Result};
use crate::reflect::Reflect;

/// Resolved values of several paths, keyed by path.
///
/// Every requested path has an entry: either the value it resolved to or the
/// error that stopped it. Iteration and [`first_error`](Fields::first_error)
/// follow the order in which paths were first requested.
#[derive(Default)]
pub struct Fields<'a> {
    order: Vec<String>,
    values: HashMap<String, Result<&'a dyn Reflect>>,
}

impl<'a> Fields<'a> {
    /// Returns `true` if the path was already resolved.
    pub(crate) fn contains(&self, path: &str) -> bool {
        self.values.contains_key(path)
    }

    pub(crate) fn insert(&mut self, path: &str, value: Result<&'a dyn Reflect>) {
        if self.values.insert(path.to_owned(), value).is_none() {
            self.order.push(path.to_owned());
        }
    }

    /// Returns the result for `path`, or `None` if it was not requested.
    pub fn get(&self, path: &str) -> Option<&Result<&'a dyn Reflect>> {
        self.values.get(path)
    }

    /// Returns the value for `path` downcast to `T`, if it resolved to one.
    pub fn value_as<T: Reflect>(&self, path: &str) -> Option<&'a T> {
        match self.values.get(path)? {
            Ok(value) => value.downcast_ref::<T>(),
            Err(_) => None,
        }
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over paths and their results in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Result<&'a dyn Reflect>)> + '_ {
        self.order
            .iter()
            .filter_map(|path| self.values.get(path).map(|value| (path.as_str(), value)))
    }

    /// Returns `true` if any path failed to resolve.
    pub fn has_errors(&self) -> bool {
        self.first_error().is_some()
    }

    /// Returns the error of the first failed path, in request order.
    pub fn first_error(&self) -> Option<DipperError> {
        self.iter().find_map(|(_, value)| value.as_ref().err().copied())
    }
}

impl fmt::Debug for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
