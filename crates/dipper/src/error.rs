//! Error types for the dipper crate.

use thiserror::Error;

/// Errors returned when a path cannot be resolved or a value cannot be set.
///
/// The set is closed: every failure of [`Dipper::get`](crate::Dipper::get)
/// and [`Dipper::set`](crate::Dipper::set) is one of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DipperError {
    /// The struct field or map key does not exist, or the path continues
    /// past a value that has no children.
    #[error("field not found")]
    NotFound,

    /// A sequence was addressed with a segment that is not a number.
    #[error("invalid index")]
    InvalidIndex,

    /// A sequence index is negative or not less than the sequence length.
    #[error("index out of range")]
    IndexOutOfRange,

    /// A map was addressed whose keys are not strings.
    #[error("map key is not of string type")]
    MapKeyNotString,

    /// The struct field exists but is not public.
    #[error("field is unexported")]
    Unexported,

    /// The target can only be reached through a shared pointer that has
    /// other owners, so it cannot be changed in place.
    #[error("field is unaddressable")]
    Unaddressable,

    /// The new value has a different type than the target.
    #[error("value type does not match field type")]
    TypesDoNotMatch,

    /// A bracketed segment is malformed.
    #[error("invalid filter expression")]
    InvalidFilterExpression,

    /// The literal of a filter expression is not a quoted string, a boolean,
    /// `null` or a number.
    #[error("invalid value for filter expression")]
    InvalidFilterValue,

    /// A filter expression matched no element.
    #[error("no matches for filter expression")]
    FilterNotFound,
}

/// Result type for dipper operations.
pub type Result<T> = std::result::Result<T, DipperError>;
