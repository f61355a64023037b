//! [`Reflect`] for `serde_json` documents.
//!
//! Objects are maps, arrays are sequences and everything else is a scalar.
//! A [`Value`] slot is an interface slot in spirit: it accepts another
//! `Value`, or any scalar, sequence or struct that converts to JSON.

use std::any::Any;

use serde_json::{Map as JsonMap, Value};

use crate::reflect::{assign_from, Incoming, Map, Reflect, ReflectMut, ReflectRef};
use crate::value::{Number, Scalar};

impl Reflect for Value {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self {
            Value::Null => ReflectRef::Scalar(Scalar::Null),
            Value::Bool(b) => ReflectRef::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => ReflectRef::Scalar(Scalar::Number(number(n))),
            Value::String(s) => ReflectRef::Scalar(Scalar::String(s)),
            Value::Array(items) => ReflectRef::Seq(items),
            Value::Object(entries) => ReflectRef::Map(entries),
        }
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        match self {
            Value::Array(items) => ReflectMut::Seq(items),
            Value::Object(entries) => ReflectMut::Map(entries),
            _ => ReflectMut::Scalar,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn set_zero(&mut self) {
        *self = Value::Null;
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }

    fn from_incoming(incoming: &mut Incoming<'_>) -> Option<Self> {
        if let Some(value) = incoming.take::<Value>() {
            return Some(value);
        }
        if let Some(boxed) = incoming.take::<Box<Value>>() {
            return Some(*boxed);
        }
        let converted = incoming.peek().and_then(to_json)?;
        incoming.take_boxed();
        Some(converted)
    }
}

impl Reflect for JsonMap<String, Value> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Map(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn set_zero(&mut self) {
        self.clear();
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        assign_from(self, incoming)
    }
}

impl Map for JsonMap<String, Value> {
    fn has_string_keys(&self) -> bool {
        true
    }

    fn len(&self) -> usize {
        JsonMap::len(self)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(JsonMap::keys(self).map(String::as_str))
    }

    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        JsonMap::get(self, key).map(|value| value as &dyn Reflect)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
        JsonMap::get_mut(self, key).map(|value| value as &mut dyn Reflect)
    }

    fn insert(&mut self, key: &str, incoming: &mut Incoming<'_>) -> bool {
        match Value::from_incoming(incoming) {
            Some(value) => {
                JsonMap::insert(self, key.to_owned(), value);
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        JsonMap::remove(self, key).is_some()
    }
}

fn number(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::I64(i)
    } else if let Some(u) = n.as_u64() {
        Number::U64(u)
    } else {
        Number::F64(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Converts a reflected value into JSON.
///
/// Scalars, sequences, string-keyed maps and the exported fields of structs
/// convert. Maps with other keys, opaque leaves and non-finite floats do not.
pub fn to_json(value: &dyn Reflect) -> Option<Value> {
    if let Some(json) = value.downcast_ref::<Value>() {
        return Some(json.clone());
    }

    match value.reflect_ref() {
        ReflectRef::Pointer(inner) | ReflectRef::Interface(inner) => match inner {
            Some(inner) => to_json(inner),
            None => Some(Value::Null),
        },
        ReflectRef::Scalar(scalar) => match scalar {
            Scalar::Null => Some(Value::Null),
            Scalar::Bool(b) => Some(Value::Bool(b)),
            Scalar::Number(Number::I64(i)) => Some(Value::from(i)),
            Scalar::Number(Number::U64(u)) => Some(Value::from(u)),
            Scalar::Number(Number::F64(f)) => serde_json::Number::from_f64(f).map(Value::Number),
            Scalar::String(s) => Some(Value::String(s.to_owned())),
            Scalar::Opaque => None,
        },
        ReflectRef::Seq(seq) => (0..seq.len())
            .map(|index| seq.get(index).and_then(to_json))
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        ReflectRef::Struct(fields) => {
            let mut object = JsonMap::new();
            for name in fields.field_names() {
                let field = fields.field(name).exported()?;
                object.insert((*name).to_owned(), to_json(field)?);
            }
            Some(Value::Object(object))
        }
        ReflectRef::Map(entries) => {
            if !entries.has_string_keys() {
                return None;
            }
            let mut object = JsonMap::new();
            for key in entries.keys() {
                object.insert(key.to_owned(), to_json(entries.get(key)?)?);
            }
            Some(Value::Object(object))
        }
    }
}
