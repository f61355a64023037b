//! Equality filters over sequences.
//!
//! A bracketed segment containing `=` selects the first element of a
//! sequence whose `key` equals a literal:
//!
//! | Segment | Selects |
//! |---|---|
//! | `[id=1]` | first element whose map value or exported field `id` is `1` |
//! | `[name=='Crime']` | `==` is accepted as well as `=` |
//! | `[=3]` | first element that is itself `3` |
//!
//! Literals are `'quoted strings'`, `true`, `false`, `null` or base-10 numbers.
//! Numbers compare by value across integer and float types.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DipperError, Result};
use crate::reflect::{Field, Reflect, ReflectRef, Seq};
use crate::splitter::Segment;
use crate::value::Scalar;

static FILTER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^([0-9A-Za-z_-]*)==?(.*)$").expect("filter pattern is valid")
});

/// The literal side of a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    String(String),
    Bool(bool),
    Null,
    Number(f64),
}

impl FilterValue {
    /// Parses a filter literal.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
            return Ok(FilterValue::String(raw[1..raw.len() - 1].to_owned()));
        }
        match raw {
            "true" => Ok(FilterValue::Bool(true)),
            "false" => Ok(FilterValue::Bool(false)),
            "null" => Ok(FilterValue::Null),
            _ => raw
                .parse::<f64>()
                .map(FilterValue::Number)
                .map_err(|_| DipperError::InvalidFilterValue),
        }
    }

    /// Compares the literal against a value, looking through pointers.
    pub fn matches(&self, value: &dyn Reflect) -> bool {
        let Some(scalar) = value.scalar() else {
            return false;
        };
        match (self, scalar) {
            (FilterValue::String(expected), Scalar::String(actual)) => expected == actual,
            (FilterValue::Bool(expected), Scalar::Bool(actual)) => *expected == actual,
            (FilterValue::Number(expected), Scalar::Number(actual)) => *expected == actual.to_f64(),
            (FilterValue::Null, Scalar::Null) => true,
            _ => false,
        }
    }
}

/// A parsed `[key=value]` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Field or map key to compare; empty to compare the element itself.
    pub key: String,
    pub value: FilterValue,
}

impl Filter {
    /// Parses a segment as a filter.
    ///
    /// Returns `Ok(None)` when the segment is not a filter at all: it must
    /// be bracketed and contain `=`.
    pub fn parse(segment: &Segment<'_>) -> Result<Option<Self>> {
        if !segment.is_bracketed() || !segment.text.contains('=') {
            return Ok(None);
        }

        let captures = FILTER_PATTERN
            .captures(segment.inner())
            .ok_or(DipperError::InvalidFilterExpression)?;
        let key = captures.get(1).map_or("", |m| m.as_str());
        let raw = captures.get(2).map_or("", |m| m.as_str());

        Ok(Some(Filter {
            key: key.to_owned(),
            value: FilterValue::parse(raw)?,
        }))
    }

    /// Returns `true` if `element` satisfies the filter.
    pub fn matches(&self, element: &dyn Reflect) -> bool {
        let element = element.pointee();
        match element.reflect_ref() {
            ReflectRef::Map(map) => map
                .get(&self.key)
                .is_some_and(|value| self.value.matches(value)),
            ReflectRef::Struct(fields) => match fields.field(&self.key) {
                Field::Exported(value) => self.value.matches(value),
                Field::Unexported | Field::Missing => false,
            },
            _ => self.key.is_empty() && self.value.matches(element),
        }
    }

    /// Returns the index of the first matching element.
    pub fn find(&self, seq: &dyn Seq) -> Result<usize> {
        (0..seq.len())
            .find(|&index| seq.get(index).is_some_and(|element| self.matches(element)))
            .ok_or(DipperError::FilterNotFound)
    }
}
