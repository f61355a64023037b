//! Comparison views of leaf values.
//!
//! Leaves of an object graph expose themselves as a [`Scalar`], which is what
//! filter expressions compare against and what JSON slots convert from.

/// A leaf value, borrowed from the graph it was read from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// The unit value, or JSON `null`.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value of any width.
    Number(Number),
    /// String value.
    String(&'a str),
    /// A leaf that has no comparable representation.
    Opaque,
}

/// Numeric value of any primitive width.
///
/// Integers keep their sign; filters widen both sides to `f64` before
/// checking equality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed integer.
    I64(i64),
    /// Unsigned integer.
    U64(u64),
    /// Floating point.
    F64(f64),
}

impl Number {
    /// Widens the number to `f64`.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($ty:ty),*) => {$(
        impl From<$ty> for Number {
            fn from(n: $ty) -> Self {
                Number::$variant(n as $wide)
            }
        }
    )*};
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_numbers_widen_to_float() {
        assert_eq!(Number::from(3u32).to_f64(), 3.0);
        assert_eq!(Number::from(-2i8).to_f64(), -2.0);
        assert_eq!(Number::I64(3).to_f64(), Number::F64(3.0).to_f64());
    }

    #[test]
    fn conversions_keep_signedness() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42usize), Number::U64(42));
        assert_eq!(Number::from(1.5f32), Number::F64(1.5));
    }
}
