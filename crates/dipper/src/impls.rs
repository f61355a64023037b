//! [`Reflect`] implementations for standard library types.

use std::any::Any;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;

use crate::reflect::{
    assign_from, Incoming, Map, MapKey, Reflect, ReflectMut, ReflectRef, Seq,
};
use crate::value::{Number, Scalar};

macro_rules! any_accessors {
    () => {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    };
}

// Scalars

macro_rules! reflect_number {
    ($($ty:ty),*) => {$(
        impl Reflect for $ty {
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Scalar(Scalar::Number(Number::from(*self)))
            }

            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Scalar
            }

            any_accessors!();

            fn set_zero(&mut self) {
                *self = <$ty>::default();
            }

            fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
                assign_from(self, incoming)
            }
        }
    )*};
}

reflect_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Reflect for bool {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Scalar(Scalar::Bool(*self))
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Scalar
    }

    any_accessors!();

    fn set_zero(&mut self) {
        *self = false;
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }
}

impl Reflect for String {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Scalar(Scalar::String(self))
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Scalar
    }

    any_accessors!();

    fn set_zero(&mut self) {
        self.clear();
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }
}

impl Reflect for &'static str {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Scalar(Scalar::String(self))
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Scalar
    }

    any_accessors!();

    fn set_zero(&mut self) {
        *self = "";
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }
}

impl Reflect for () {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Scalar(Scalar::Null)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Scalar
    }

    any_accessors!();

    fn set_zero(&mut self) {}

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }
}

impl Reflect for char {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Scalar(Scalar::Opaque)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Scalar
    }

    any_accessors!();

    fn set_zero(&mut self) {
        *self = '\0';
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }
}

// Map keys

macro_rules! string_key {
    ($($ty:ty),*) => {$(
        impl MapKey for $ty {
            const IS_STRING: bool = true;

            fn from_segment(segment: &str) -> Option<Self> {
                Some(<$ty>::from(segment))
            }

            fn as_segment(&self) -> Option<&str> {
                Some(&**self)
            }
        }
    )*};
}

string_key!(String, Box<str>, Rc<str>, Arc<str>);

macro_rules! opaque_key {
    ($($ty:ty),*) => {$(
        impl MapKey for $ty {
            const IS_STRING: bool = false;

            fn from_segment(_: &str) -> Option<Self> {
                None
            }

            fn as_segment(&self) -> Option<&str> {
                None
            }
        }
    )*};
}

opaque_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, bool, char);

// Sequences

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Seq(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Seq(self)
    }

    any_accessors!();

    fn set_zero(&mut self) {
        self.clear();
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }
}

impl<T: Reflect> Seq for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|item| item as &mut dyn Reflect)
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Seq(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Seq(self)
    }

    any_accessors!();

    fn set_zero(&mut self) {
        self.clear();
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }
}

impl<T: Reflect> Seq for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(|item| item as &dyn Reflect)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        VecDeque::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Seq(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Seq(self)
    }

    any_accessors!();

    fn set_zero(&mut self) {
        for item in self.iter_mut() {
            item.set_zero();
        }
    }

    fn is_zeroable(&self) -> bool {
        self.iter().all(Reflect::is_zeroable)
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }
}

impl<T: Reflect, const N: usize> Seq for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|item| item as &mut dyn Reflect)
    }
}

// Maps

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: MapKey + Hash,
    V: Reflect,
    S: BuildHasher + 'static,
{
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Map(self)
    }

    any_accessors!();

    fn set_zero(&mut self) {
        self.clear();
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }
}

impl<K, V, S> Map for HashMap<K, V, S>
where
    K: MapKey + Hash,
    V: Reflect,
    S: BuildHasher + 'static,
{
    fn has_string_keys(&self) -> bool {
        K::IS_STRING
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(HashMap::keys(self).filter_map(MapKey::as_segment))
    }

    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        let key = K::from_segment(key)?;
        HashMap::get(self, &key).map(|value| value as &dyn Reflect)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
        let key = K::from_segment(key)?;
        HashMap::get_mut(self, &key).map(|value| value as &mut dyn Reflect)
    }

    fn insert(&mut self, key: &str, incoming: &mut Incoming<'_>) -> bool {
        let Some(key) = K::from_segment(key) else {
            return false;
        };
        match V::from_incoming(incoming) {
            Some(value) => {
                HashMap::insert(self, key, value);
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        K::from_segment(key)
            .and_then(|key| HashMap::remove(self, &key))
            .is_some()
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Reflect,
{
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Map(self)
    }

    any_accessors!();

    fn set_zero(&mut self) {
        self.clear();
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }
}

impl<K, V> Map for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Reflect,
{
    fn has_string_keys(&self) -> bool {
        K::IS_STRING
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(BTreeMap::keys(self).filter_map(MapKey::as_segment))
    }

    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        let key = K::from_segment(key)?;
        BTreeMap::get(self, &key).map(|value| value as &dyn Reflect)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
        let key = K::from_segment(key)?;
        BTreeMap::get_mut(self, &key).map(|value| value as &mut dyn Reflect)
    }

    fn insert(&mut self, key: &str, incoming: &mut Incoming<'_>) -> bool {
        let Some(key) = K::from_segment(key) else {
            return false;
        };
        match V::from_incoming(incoming) {
            Some(value) => {
                BTreeMap::insert(self, key, value);
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        K::from_segment(key)
            .and_then(|key| BTreeMap::remove(self, &key))
            .is_some()
    }
}

// Pointers

impl<T: Reflect> Reflect for Option<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Pointer(self.as_ref().map(|value| value as &dyn Reflect))
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Pointer(self.as_mut().map(|value| value as &mut dyn Reflect))
    }

    any_accessors!();

    fn set_zero(&mut self) {
        *self = None;
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }

    fn from_incoming(incoming: &mut Incoming<'_>) -> Option<Self> {
        if let Some(option) = incoming.take::<Option<T>>() {
            return Some(option);
        }
        T::from_incoming(incoming).map(Some)
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Pointer(Some(&**self))
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Pointer(Some(&mut **self))
    }

    any_accessors!();

    fn set_zero(&mut self) {
        (**self).set_zero();
    }

    fn is_zeroable(&self) -> bool {
        (**self).is_zeroable()
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        if let Some(boxed) = incoming.take::<Box<T>>() {
            *self = boxed;
            return true;
        }
        (**self).assign(incoming)
    }

    fn from_incoming(incoming: &mut Incoming<'_>) -> Option<Self> {
        if let Some(boxed) = incoming.take::<Box<T>>() {
            return Some(boxed);
        }
        T::from_incoming(incoming).map(Box::new)
    }
}

macro_rules! reflect_shared {
    ($($ptr:ident),*) => {$(
        impl<T: Reflect> Reflect for $ptr<T> {
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Pointer(Some(&**self))
            }

            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Pointer($ptr::get_mut(self).map(|value| value as &mut dyn Reflect))
            }

            any_accessors!();

            fn set_zero(&mut self) {
                if let Some(value) = $ptr::get_mut(self) {
                    value.set_zero();
                }
            }

            fn is_zeroable(&self) -> bool {
                $ptr::strong_count(self) == 1
                    && $ptr::weak_count(self) == 0
                    && (**self).is_zeroable()
            }

            fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
                if let Some(shared) = incoming.take::<$ptr<T>>() {
                    *self = shared;
                    return true;
                }
                match $ptr::get_mut(self) {
                    Some(value) => value.assign(incoming),
                    None => false,
                }
            }

            fn from_incoming(incoming: &mut Incoming<'_>) -> Option<Self> {
                if let Some(shared) = incoming.take::<$ptr<T>>() {
                    return Some(shared);
                }
                T::from_incoming(incoming).map($ptr::new)
            }
        }
    )*};
}

reflect_shared!(Rc, Arc);
