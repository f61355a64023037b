//! The reflection model that paths are resolved against.
//!
//! Every value reachable by a path implements [`Reflect`]. A value reports
//! which kind of container it is through [`ReflectRef`] (shared access) and
//! [`ReflectMut`] (exclusive access); the resolver only ever dispatches on
//! those kinds:
//!
//! | Kind | Children addressed by | Implemented for |
//! |---|---|---|
//! | `Struct` | exported field name | `#[derive(Reflect)]` structs |
//! | `Map` | string key | `HashMap`, `BTreeMap`, JSON objects |
//! | `Seq` | index or filter | `Vec`, `VecDeque`, arrays, JSON arrays |
//! | `Pointer` | (dereferenced) | `Option`, `Box`, `Rc`, `Arc` |
//! | `Interface` | (dereferenced) | [`Dynamic`](crate::Dynamic) |
//! | `Scalar` | nothing | numbers, `bool`, strings, `()` |
//!
//! Assignment goes through an [`Incoming`] carrier, which lets a target take
//! ownership of the new value only if its type is acceptable. A rejected value
//! stays in the carrier and the target is left untouched.

use std::any::Any;
use std::fmt;

use crate::value::Scalar;

/// A value that can be navigated and updated by path.
///
/// Most types get this from a provided implementation or from
/// `#[derive(Reflect)]`; implementing it by hand is only needed for custom
/// containers.
pub trait Reflect: Any + fmt::Debug {
    /// Returns the shared view of this value.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns the exclusive view of this value.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Resets the value to its type's zero value.
    ///
    /// Callers check [`Reflect::is_zeroable`] first; a value behind a shared
    /// pointer is left as it is.
    fn set_zero(&mut self);

    /// Returns `false` when [`Reflect::set_zero`] would have to write through
    /// a shared `Rc` or `Arc`.
    ///
    /// Values that zero by replacing themselves, such as `Option` or `Vec`,
    /// are always zeroable.
    fn is_zeroable(&self) -> bool {
        true
    }

    /// Replaces the value with the one held by `incoming`.
    ///
    /// Returns `false`, leaving both sides unchanged, when the incoming type
    /// is not acceptable. Most implementations delegate to [`assign_from`].
    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool;

    /// Builds an owned value of this type out of `incoming`.
    ///
    /// The default accepts `Self` and `Box<Self>`.
    fn from_incoming(incoming: &mut Incoming<'_>) -> Option<Self>
    where
        Self: Sized,
    {
        incoming
            .take::<Self>()
            .or_else(|| incoming.take::<Box<Self>>().map(|boxed| *boxed))
    }

    /// Name of the concrete type, for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Replaces `target` with the value held by `incoming` when
/// [`Reflect::from_incoming`] accepts it.
pub fn assign_from<T: Reflect>(target: &mut T, incoming: &mut Incoming<'_>) -> bool {
    match T::from_incoming(incoming) {
        Some(value) => {
            *target = value;
            true
        }
        None => false,
    }
}

/// Shared view of a value, by kind.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    Map(&'a dyn Map),
    Seq(&'a dyn Seq),
    /// A pointer; `None` when nil.
    Pointer(Option<&'a dyn Reflect>),
    /// An interface slot; `None` when empty.
    Interface(Option<&'a dyn Reflect>),
    Scalar(Scalar<'a>),
}

/// Exclusive view of a value, by kind.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    Map(&'a mut dyn Map),
    Seq(&'a mut dyn Seq),
    /// A pointer; `None` when nil, or when the pointee is shared with other
    /// owners and cannot be borrowed exclusively.
    Pointer(Option<&'a mut dyn Reflect>),
    /// An interface slot; `None` when empty.
    Interface(Option<&'a mut dyn Reflect>),
    Scalar,
}

/// The kind of a value, without the borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Struct,
    Map,
    Seq,
    Pointer,
    Interface,
    Scalar,
}

impl ReflectRef<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            ReflectRef::Struct(_) => Kind::Struct,
            ReflectRef::Map(_) => Kind::Map,
            ReflectRef::Seq(_) => Kind::Seq,
            ReflectRef::Pointer(_) => Kind::Pointer,
            ReflectRef::Interface(_) => Kind::Interface,
            ReflectRef::Scalar(_) => Kind::Scalar,
        }
    }
}

/// Result of looking a struct field up by name.
#[derive(Debug, PartialEq)]
pub enum Field<T> {
    /// The field is public.
    Exported(T),
    /// The field exists but is private.
    Unexported,
    /// No field with that name.
    Missing,
}

impl<T> Field<T> {
    /// Returns the field value if it is exported.
    pub fn exported(self) -> Option<T> {
        match self {
            Field::Exported(value) => Some(value),
            _ => None,
        }
    }
}

/// A struct with named fields.
pub trait Struct {
    /// Looks a field up by its path name.
    fn field(&self, name: &str) -> Field<&dyn Reflect>;

    fn field_mut(&mut self, name: &str) -> Field<&mut dyn Reflect>;

    /// Path names of the exported fields, in declaration order.
    fn field_names(&self) -> &'static [&'static str];
}

/// A map from keys to values.
///
/// Keys always arrive as path text; maps whose key type cannot be built from
/// text report `has_string_keys() == false` and never find anything.
pub trait Map {
    fn has_string_keys(&self) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// String keys of the map. Maps without string keys yield nothing.
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    fn get(&self, key: &str) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect>;

    /// Inserts or replaces the entry under `key` with the incoming value.
    ///
    /// Returns `false` when the value type is not the map's value type.
    fn insert(&mut self, key: &str, incoming: &mut Incoming<'_>) -> bool;

    /// Removes the entry under `key`, returning whether one existed.
    fn remove(&mut self, key: &str) -> bool;
}

/// An indexable sequence.
pub trait Seq {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
}

/// A type usable as a map key.
///
/// Only string-like keys can be addressed by a path; other key types are
/// still reflected so that their maps report `MapKeyNotString` instead of
/// being unusable altogether.
pub trait MapKey: Eq + fmt::Debug + 'static {
    const IS_STRING: bool;

    fn from_segment(segment: &str) -> Option<Self>
    where
        Self: Sized;

    /// The key as path text, for string keys.
    fn as_segment(&self) -> Option<&str>;
}

/// Carrier for a value on its way into a slot.
///
/// The value stays owned by the carrier until a target accepts it, so a
/// failed assignment loses nothing.
pub struct Incoming<'a> {
    carrier: &'a mut dyn Carrier,
}

trait Carrier {
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn peek(&self) -> Option<&dyn Reflect>;
    fn take_boxed(&mut self) -> Option<Box<dyn Reflect>>;
}

impl<T: Reflect> Carrier for Option<T> {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn peek(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    fn take_boxed(&mut self) -> Option<Box<dyn Reflect>> {
        self.take().map(|value| Box::new(value) as Box<dyn Reflect>)
    }
}

impl<'a> Incoming<'a> {
    /// Wraps a slot holding the value to hand over.
    pub fn new<T: Reflect>(slot: &'a mut Option<T>) -> Self {
        Incoming { carrier: slot }
    }

    /// Takes the value if it is exactly a `T`.
    pub fn take<T: Any>(&mut self) -> Option<T> {
        self.carrier
            .as_any_mut()
            .downcast_mut::<Option<T>>()
            .and_then(Option::take)
    }

    /// Looks at the value without taking it.
    pub fn peek(&self) -> Option<&dyn Reflect> {
        self.carrier.peek()
    }

    /// Takes the value, whatever its type.
    pub fn take_boxed(&mut self) -> Option<Box<dyn Reflect>> {
        self.carrier.take_boxed()
    }
}

impl fmt::Debug for Incoming<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Incoming")
            .field("value", &self.peek())
            .finish()
    }
}

impl dyn Reflect {
    pub fn is<T: Reflect>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub fn kind(&self) -> Kind {
        self.reflect_ref().kind()
    }

    /// Follows non-nil pointers and filled interface slots to the value they
    /// hold.
    pub fn pointee(&self) -> &dyn Reflect {
        let mut current = self;
        loop {
            match current.reflect_ref() {
                ReflectRef::Pointer(Some(inner)) | ReflectRef::Interface(Some(inner)) => {
                    current = inner
                }
                _ => return current,
            }
        }
    }

    /// Returns `true` for a nil pointer or an empty interface slot.
    pub fn is_nil(&self) -> bool {
        matches!(
            self.reflect_ref(),
            ReflectRef::Pointer(None) | ReflectRef::Interface(None)
        )
    }

    /// Returns `true` when a chain of non-nil pointers starting here reaches
    /// one whose pointee cannot be borrowed exclusively.
    pub fn is_aliased(&mut self) -> bool {
        let mut current = self;
        loop {
            if !matches!(current.reflect_ref(), ReflectRef::Pointer(Some(_))) {
                return false;
            }
            match current.reflect_mut() {
                ReflectMut::Pointer(Some(inner)) => current = inner,
                _ => return true,
            }
        }
    }

    /// Scalar view of the value after dereferencing, if it is a leaf.
    /// Nil pointers and empty slots read as [`Scalar::Null`].
    pub fn scalar(&self) -> Option<Scalar<'_>> {
        let value = self.pointee();
        match value.reflect_ref() {
            ReflectRef::Scalar(scalar) => Some(scalar),
            ReflectRef::Pointer(None) | ReflectRef::Interface(None) => Some(Scalar::Null),
            _ => None,
        }
    }
}
