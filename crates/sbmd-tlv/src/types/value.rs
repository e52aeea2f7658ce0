use crate::encoding::control::{ElementType, Tag};
use std::collections::BTreeMap;

/// In-memory form of a TLV value.
///
/// Integers keep their signedness but not their wire width; the width is
/// chosen again on encode from the magnitude or an explicit [`TypeHint`].
///
/// [`TypeHint`]: crate::TypeHint
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// Only produced by decode; encoding writes it as a double.
    Float(f32),
    Double(f64),
    Utf8(String),
    Bytes(Vec<u8>),
    /// Fields keyed by tag number.
    Struct(BTreeMap<u32, Value>),
    Array(Vec<Value>),
    List(Vec<Value>),
}

impl Value {
    pub fn empty_struct() -> Self {
        Self::Struct(BTreeMap::new())
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_struct(&self) -> Option<&BTreeMap<u32, Value>> {
        match self {
            Self::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Members of an array or list.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) | Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn field(&self, tag: u32) -> Option<&Value> {
        self.as_struct().and_then(|fields| fields.get(&tag))
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::UInt(v as u64)
            }
        })*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Int(v as i64)
            }
        })*
    };
}

impl_from_unsigned!(u8, u16, u32, u64);
impl_from_signed!(i8, i16, i32, i64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Utf8(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Utf8(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<BTreeMap<u32, Value>> for Value {
    fn from(v: BTreeMap<u32, Value>) -> Self {
        Self::Struct(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// One decoded element: its tag, its value and the exact wire type it had.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub value: Value,
    pub element_type: ElementType,
}
