//! Writing to resolved locations.

use tracing::debug;

use crate::error::{DipperError, Result};
use crate::reflect::{Incoming, Reflect};
use crate::resolve::Target;

/// What to do with the location a path resolves to.
#[derive(Debug)]
pub enum Assignment<'v> {
    /// Replace the value. The carried value must have the slot's type.
    Value(Incoming<'v>),
    /// Reset the value to its type's zero value.
    Zero,
    /// Remove a map entry. On anything other than a map entry this is the
    /// same as [`Assignment::Zero`].
    Delete,
}

pub(crate) fn apply(target: Target<'_, '_>, assignment: Assignment<'_>) -> Result<()> {
    match target {
        Target::Entry { map, key } => match assignment {
            Assignment::Value(mut incoming) => {
                if map.insert(key, &mut incoming) {
                    Ok(())
                } else {
                    debug!(key, "map rejected value type");
                    Err(DipperError::TypesDoNotMatch)
                }
            }
            Assignment::Zero => match map.get_mut(key) {
                Some(value) => zero(value),
                None => Ok(()),
            },
            Assignment::Delete => {
                if !map.remove(key) {
                    debug!(key, "no entry to delete");
                }
                Ok(())
            }
        },
        Target::Slot(slot) => match assignment {
            Assignment::Value(mut incoming) => {
                if slot.assign(&mut incoming) {
                    return Ok(());
                }
                if slot.is_aliased() {
                    return Err(DipperError::Unaddressable);
                }
                debug!(
                    slot = slot.type_name(),
                    value = incoming.peek().map(|value| value.type_name()),
                    "value type does not match slot"
                );
                Err(DipperError::TypesDoNotMatch)
            }
            Assignment::Zero | Assignment::Delete => zero(slot),
        },
    }
}

/// Zeroes `value` unless that would write through a shared pointer, in
/// which case nothing is changed.
fn zero(value: &mut dyn Reflect) -> Result<()> {
    if !value.is_zeroable() {
        debug!(value = value.type_name(), "zero would write through a shared pointer");
        return Err(DipperError::Unaddressable);
    }
    value.set_zero();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    fn value<T: Reflect>(slot: &mut Option<T>) -> Assignment<'_> {
        Assignment::Value(Incoming::new(slot))
    }

    #[test]
    fn entry_insert_checks_type() {
        let mut map: BTreeMap<String, i32> = BTreeMap::new();
        let mut good = Some(1i32);
        let target = Target::Entry { map: &mut map, key: "a" };
        assert_eq!(apply(target, value(&mut good)), Ok(()));

        let mut bad = Some("1");
        let target = Target::Entry { map: &mut map, key: "b" };
        assert_eq!(apply(target, value(&mut bad)), Err(DipperError::TypesDoNotMatch));
        assert_eq!(map, BTreeMap::from([(String::from("a"), 1)]));
    }

    #[test]
    fn entry_zero_and_delete() {
        let mut map = BTreeMap::from([(String::from("a"), 5i32)]);
        let target = Target::Entry { map: &mut map, key: "a" };
        assert_eq!(apply(target, Assignment::Zero), Ok(()));
        assert_eq!(map.get("a"), Some(&0));

        let target = Target::Entry { map: &mut map, key: "missing" };
        assert_eq!(apply(target, Assignment::Zero), Ok(()));
        assert!(!map.contains_key("missing"));

        let target = Target::Entry { map: &mut map, key: "a" };
        assert_eq!(apply(target, Assignment::Delete), Ok(()));
        assert!(map.is_empty());
    }

    #[test]
    fn slot_zero_resets_value() {
        let mut text = String::from("rosa");
        assert_eq!(apply(Target::Slot(&mut text), Assignment::Delete), Ok(()));
        assert_eq!(text, "");
    }

    #[test]
    fn aliased_slot_is_unaddressable() {
        let mut first = Rc::new(1i32);
        let _second = Rc::clone(&first);
        let mut incoming = Some(2i32);
        assert_eq!(
            apply(Target::Slot(&mut first), value(&mut incoming)),
            Err(DipperError::Unaddressable)
        );
        assert_eq!(
            apply(Target::Slot(&mut first), Assignment::Zero),
            Err(DipperError::Unaddressable)
        );
        assert_eq!(*first, 1);
    }

    #[test]
    fn aliased_entry_is_not_zeroed() {
        let shared = Rc::new(5i32);
        let mut map = BTreeMap::from([(String::from("k"), Rc::clone(&shared))]);
        let target = Target::Entry { map: &mut map, key: "k" };
        assert_eq!(apply(target, Assignment::Zero), Err(DipperError::Unaddressable));
        assert_eq!(*shared, 5);

        // Delete removes the entry, which never writes through the pointer.
        let target = Target::Entry { map: &mut map, key: "k" };
        assert_eq!(apply(target, Assignment::Delete), Ok(()));
        assert_eq!(*shared, 5);
    }
}
