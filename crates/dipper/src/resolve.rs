//! Path resolution.
//!
//! Both directions share one planning step: given the current cursor and a
//! segment, decide whether the segment names a struct field, a map key or a
//! sequence index. Get then follows the plan through shared borrows; set
//! follows it through exclusive borrows and stops one segment early when the
//! final segment is a map key, since a map entry that does not exist yet has
//! no slot to write into.

use tracing::trace;

use crate::error::{DipperError, Result};
use crate::filter::Filter;
use crate::reflect::{Field, Map, Reflect, ReflectMut, ReflectRef};
use crate::splitter::{Segment, Splitter};

/// What a single segment selects on the current cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step<'p> {
    Field(&'p str),
    Key(&'p str),
    Index(usize),
    /// The empty segment before a bracket at the start of the path.
    Skip,
}

/// A location that set mode can write to.
pub(crate) enum Target<'a, 'p> {
    /// An existing value.
    Slot(&'a mut dyn Reflect),
    /// A map entry that may or may not exist yet.
    Entry { map: &'a mut dyn Map, key: &'p str },
}

/// Resolves `path` against `root` for reading.
pub(crate) fn resolve<'a>(root: &'a dyn Reflect, path: &str, separator: &str) -> Result<&'a dyn Reflect> {
    let mut cursor = root;

    if !path.is_empty() {
        for segment in Splitter::new(path, separator) {
            cursor = cursor.pointee();
            let step = plan(cursor, &segment).inspect_err(|err| failed(&segment, err))?;
            cursor = follow(cursor, step).inspect_err(|err| failed(&segment, err))?;
        }
    }

    Ok(unwrap_interface(cursor))
}

/// Resolves `path` against `root` for writing.
pub(crate) fn resolve_mut<'a, 'p>(
    root: &'a mut dyn Reflect,
    path: &'p str,
    separator: &'p str,
) -> Result<Target<'a, 'p>> {
    if path.is_empty() {
        return Ok(Target::Slot(root));
    }

    let splitter = Splitter::new(path, separator);
    let last = splitter.count_remaining() - 1;
    let mut cursor = root;

    for segment in splitter {
        cursor = deref_mut(cursor).inspect_err(|err| failed(&segment, err))?;
        let step = plan(&*cursor, &segment).inspect_err(|err| failed(&segment, err))?;

        if let Step::Key(key) = step {
            if segment.ordinal == last {
                trace!(key, "stopping at map for final key");
                return match cursor.reflect_mut() {
                    ReflectMut::Map(map) => Ok(Target::Entry { map, key }),
                    _ => Err(DipperError::NotFound),
                };
            }
        }

        cursor = follow_mut(cursor, step).inspect_err(|err| failed(&segment, err))?;
    }

    Ok(Target::Slot(cursor))
}

fn failed(segment: &Segment<'_>, err: &DipperError) {
    trace!(
        segment = segment.text,
        ordinal = segment.ordinal,
        error = %err,
        "path segment did not resolve"
    );
}

fn plan<'p>(cursor: &dyn Reflect, segment: &Segment<'p>) -> Result<Step<'p>> {
    if !segment.is_balanced() {
        return Err(DipperError::InvalidFilterExpression);
    }

    match cursor.reflect_ref() {
        ReflectRef::Map(map) => {
            if map.has_string_keys() {
                Ok(Step::Key(segment.text))
            } else {
                Err(DipperError::MapKeyNotString)
            }
        }
        ReflectRef::Struct(_) => Ok(Step::Field(segment.text)),
        ReflectRef::Seq(seq) => {
            // A path starting with a bracket yields an empty first segment; it selects nothing here.
            if segment.ordinal == 0 && segment.attached && segment.text.is_empty() {
                return Ok(Step::Skip);
            }
            if let Some(filter) = Filter::parse(segment)? {
                return filter.find(seq).map(Step::Index);
            }
            parse_index(segment, seq.len()).map(Step::Index)
        }
        _ => Err(DipperError::NotFound),
    }
}

fn parse_index(segment: &Segment<'_>, len: usize) -> Result<usize> {
    let index: i64 = segment
        .inner()
        .parse()
        .map_err(|_| DipperError::InvalidIndex)?;
    usize::try_from(index)
        .ok()
        .filter(|&index| index < len)
        .ok_or(DipperError::IndexOutOfRange)
}

fn follow<'a>(cursor: &'a dyn Reflect, step: Step<'_>) -> Result<&'a dyn Reflect> {
    match (step, cursor.reflect_ref()) {
        (Step::Skip, _) => Ok(cursor),
        (Step::Key(key), ReflectRef::Map(map)) => map.get(key).ok_or(DipperError::NotFound),
        (Step::Field(name), ReflectRef::Struct(fields)) => exported(fields.field(name)),
        (Step::Index(index), ReflectRef::Seq(seq)) => {
            seq.get(index).ok_or(DipperError::IndexOutOfRange)
        }
        _ => Err(DipperError::NotFound),
    }
}

fn follow_mut<'a>(cursor: &'a mut dyn Reflect, step: Step<'_>) -> Result<&'a mut dyn Reflect> {
    if step == Step::Skip {
        return Ok(cursor);
    }

    match (step, cursor.reflect_mut()) {
        (Step::Key(key), ReflectMut::Map(map)) => map.get_mut(key).ok_or(DipperError::NotFound),
        (Step::Field(name), ReflectMut::Struct(fields)) => exported(fields.field_mut(name)),
        (Step::Index(index), ReflectMut::Seq(seq)) => {
            seq.get_mut(index).ok_or(DipperError::IndexOutOfRange)
        }
        _ => Err(DipperError::NotFound),
    }
}

fn exported<T>(field: Field<T>) -> Result<T> {
    match field {
        Field::Exported(value) => Ok(value),
        Field::Unexported => Err(DipperError::Unexported),
        Field::Missing => Err(DipperError::NotFound),
    }
}

/// Follows pointers and interface slots with exclusive access.
///
/// A pointer whose pointee is shared cannot be passed through.
fn deref_mut(mut cursor: &mut dyn Reflect) -> Result<&mut dyn Reflect> {
    loop {
        let filled = matches!(
            cursor.reflect_ref(),
            ReflectRef::Pointer(Some(_)) | ReflectRef::Interface(Some(_))
        );
        if !filled {
            return Ok(cursor);
        }

        match cursor.reflect_mut() {
            ReflectMut::Pointer(Some(inner)) | ReflectMut::Interface(Some(inner)) => cursor = inner,
            _ => return Err(DipperError::Unaddressable),
        }
    }
}

fn unwrap_interface(mut value: &dyn Reflect) -> &dyn Reflect {
    while let ReflectRef::Interface(Some(inner)) = value.reflect_ref() {
        value = inner;
    }
    value
}
