//! The configured accessor and its default-separator shorthands.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assign::{self, Assignment};
use crate::error::{DipperError, Result};
use crate::fields::Fields;
use crate::reflect::{Incoming, Reflect};
use crate::resolve::{resolve, resolve_mut};
use crate::splitter::DEFAULT_SEPARATOR;

/// Configuration of a [`Dipper`].
///
/// Deserializes from partial input: missing fields take their defaults.
///
/// ```
/// use dipper::Options;
///
/// let options = Options::new().separator("->");
/// assert_eq!(options.separator, "->");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Text between path segments. Empty means [`DEFAULT_SEPARATOR`].
    pub separator: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            separator: DEFAULT_SEPARATOR.to_owned(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// Reads and writes nested values by path.
///
/// A `Dipper` only holds its separator; it keeps no state between calls and
/// never retains the values it is given.
///
/// ```
/// use dipper::{Dipper, Options};
/// use std::collections::HashMap;
///
/// let mut config = HashMap::from([(
///     String::from("server"),
///     HashMap::from([(String::from("port"), 8080u16)]),
/// )]);
///
/// let dipper = Dipper::new(Options::new().separator("/"));
/// assert_eq!(dipper.get_as::<u16>(&config, "server/port"), Ok(&8080));
///
/// dipper.set(&mut config, "server/port", 9090u16).unwrap();
/// assert_eq!(config["server"]["port"], 9090);
/// ```
#[derive(Debug, Clone)]
pub struct Dipper {
    separator: String,
}

impl Default for Dipper {
    fn default() -> Self {
        Dipper::new(Options::default())
    }
}

impl Dipper {
    pub fn new(options: Options) -> Self {
        let separator = if options.separator.is_empty() {
            DEFAULT_SEPARATOR.to_owned()
        } else {
            options.separator
        };
        Dipper { separator }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns the value at `path`.
    ///
    /// Pointers along the way are followed. If the final value is a
    /// [`Dynamic`](crate::Dynamic) slot, the value it holds is returned.
    pub fn get<'a>(&self, root: &'a dyn Reflect, path: &str) -> Result<&'a dyn Reflect> {
        resolve(root, path, &self.separator)
    }

    /// Returns the value at `path` as a `T`.
    ///
    /// Fails with [`DipperError::TypesDoNotMatch`] when the value has another
    /// type.
    pub fn get_as<'a, T: Reflect>(&self, root: &'a dyn Reflect, path: &str) -> Result<&'a T> {
        self.get(root, path)?
            .downcast_ref::<T>()
            .ok_or(DipperError::TypesDoNotMatch)
    }

    /// Resolves several paths at once. Repeated paths are resolved once.
    pub fn get_many<'a, I, P>(&self, root: &'a dyn Reflect, paths: I) -> Fields<'a>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let mut fields = Fields::default();
        for path in paths {
            let path = path.as_ref();
            if !fields.contains(path) {
                fields.insert(path, self.get(root, path));
            }
        }
        fields
    }

    /// Replaces the value at `path`.
    ///
    /// The value must have the target's type, or be a `Box` of it. Slots that
    /// accept any type are [`Dynamic`](crate::Dynamic) and, with the `json`
    /// feature, `serde_json::Value`. When the final segment names a map key,
    /// the entry is inserted or replaced.
    pub fn set<T: Reflect>(&self, root: &mut dyn Reflect, path: &str, value: T) -> Result<()> {
        let mut slot = Some(value);
        self.assign(root, path, Assignment::Value(Incoming::new(&mut slot)))
    }

    /// Resets the value at `path` to its type's zero value.
    pub fn set_zero(&self, root: &mut dyn Reflect, path: &str) -> Result<()> {
        self.assign(root, path, Assignment::Zero)
    }

    /// Removes the map entry at `path`, or zeroes the value when `path` does
    /// not end at a map entry.
    pub fn delete(&self, root: &mut dyn Reflect, path: &str) -> Result<()> {
        self.assign(root, path, Assignment::Delete)
    }

    /// Applies `assignment` to the location at `path`.
    ///
    /// On error the location is left unchanged.
    pub fn assign(
        &self,
        root: &mut dyn Reflect,
        path: &str,
        assignment: Assignment<'_>,
    ) -> Result<()> {
        let target = resolve_mut(root, path, &self.separator)?;
        assign::apply(target, assignment)
            .inspect_err(|err| debug!(path, error = %err, "assignment failed"))
    }
}

static DEFAULT: Lazy<Dipper> = Lazy::new(Dipper::default);

/// [`Dipper::get`] with the `"."` separator.
pub fn get<'a>(root: &'a dyn Reflect, path: &str) -> Result<&'a dyn Reflect> {
    DEFAULT.get(root, path)
}

/// [`Dipper::get_as`] with the `"."` separator.
pub fn get_as<'a, T: Reflect>(root: &'a dyn Reflect, path: &str) -> Result<&'a T> {
    DEFAULT.get_as(root, path)
}

/// [`Dipper::get_many`] with the `"."` separator.
pub fn get_many<'a, I, P>(root: &'a dyn Reflect, paths: I) -> Fields<'a>
where
    I: IntoIterator<Item = P>,
    P: AsRef<str>,
{
    DEFAULT.get_many(root, paths)
}

/// [`Dipper::set`] with the `"."` separator.
pub fn set<T: Reflect>(root: &mut dyn Reflect, path: &str, value: T) -> Result<()> {
    DEFAULT.set(root, path, value)
}

/// [`Dipper::set_zero`] with the `"."` separator.
pub fn set_zero(root: &mut dyn Reflect, path: &str) -> Result<()> {
    DEFAULT.set_zero(root, path)
}

/// [`Dipper::delete`] with the `"."` separator.
pub fn delete(root: &mut dyn Reflect, path: &str) -> Result<()> {
    DEFAULT.delete(root, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn empty_separator_falls_back_to_default() {
        let dipper = Dipper::new(Options::new().separator(""));
        assert_eq!(dipper.separator(), ".");
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: Options = serde_json::from_str("{}").unwrap();
        assert_eq!(options, Options::default());

        let options: Options = serde_json::from_str(r#"{"separator": "->"}"#).unwrap();
        assert_eq!(Dipper::new(options).separator(), "->");
    }

    #[test]
    fn custom_separator() {
        let root = BTreeMap::from([(String::from("a.b"), vec![1, 2])]);
        let dipper = Dipper::new(Options::new().separator("->"));
        assert_eq!(dipper.get_as::<i32>(&root, "a.b->1"), Ok(&2));
        assert_eq!(get(&root, "a.b.1").err(), Some(DipperError::NotFound));
    }

    #[test]
    fn get_as_checks_type() {
        let root = vec![1u8];
        assert_eq!(get_as::<u8>(&root, "0"), Ok(&1));
        assert_eq!(get_as::<i8>(&root, "0"), Err(DipperError::TypesDoNotMatch));
    }

    #[test]
    fn get_many_resolves_duplicates_once() {
        let root = vec![1, 2];
        let fields = get_many(&root, ["0", "0", "5"]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.first_error(), Some(DipperError::IndexOutOfRange));
    }

    #[test]
    fn failed_set_leaves_value_unchanged() {
        let mut root = vec![1i32];
        assert_eq!(set(&mut root, "0", 2u8), Err(DipperError::TypesDoNotMatch));
        assert_eq!(root, [1]);
        assert_eq!(set(&mut root, "0", 2i32), Ok(()));
        assert_eq!(root, [2]);
    }
}
