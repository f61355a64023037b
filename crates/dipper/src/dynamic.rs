//! Interface slots.

use std::any::Any;

use crate::reflect::{Incoming, Reflect, ReflectMut, ReflectRef};

/// A slot that holds a value of any reflected type, or nothing.
///
/// Paths look through a filled slot to the value inside. Setting a slot
/// replaces whatever it held, regardless of type.
///
/// ```
/// use dipper::Dynamic;
///
/// let mut slot = Dynamic::new(1980i32);
/// dipper::set(&mut slot, "", String::from("1980")).unwrap();
/// assert_eq!(dipper::get_as::<String>(&slot, "").unwrap(), "1980");
/// ```
#[derive(Debug, Default)]
pub struct Dynamic(Option<Box<dyn Reflect>>);

impl Dynamic {
    pub fn new<T: Reflect>(value: T) -> Self {
        Dynamic(Some(Box::new(value)))
    }

    /// An empty slot.
    pub fn nil() -> Self {
        Dynamic(None)
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    pub fn get(&self) -> Option<&dyn Reflect> {
        self.0.as_deref()
    }
}

impl From<Box<dyn Reflect>> for Dynamic {
    fn from(value: Box<dyn Reflect>) -> Self {
        Dynamic(Some(value))
    }
}

impl Reflect for Dynamic {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Interface(self.0.as_deref())
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Interface(self.0.as_deref_mut())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn set_zero(&mut self) {
        self.0 = None;
    }

    fn assign(&mut self, incoming: &mut Incoming<'_>) -> bool {
        match Self::from_incoming(incoming) {
            Some(value) => {
                *self = value;
                true
            }
            None => false,
        }
    }

    fn from_incoming(incoming: &mut Incoming<'_>) -> Option<Self> {
        incoming
            .take::<Dynamic>()
            .or_else(|| incoming.take_boxed().map(Dynamic::from))
    }
}
