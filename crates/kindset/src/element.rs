//! Stored form of admitted values
//!
//! Only scalar kinds have an `Element` representation, so a collection that
//! stores `Element`s can never hold a composite. Floats are wrapped in
//! `OrderedFloat`, which gives them total equality and a hash (all NaNs compare
//! equal, `-0.0 == 0.0`).

use crate::error::{CollectionError, CollectionResult};
use crate::value::{Kind, Value};
use ordered_float::OrderedFloat;
use std::fmt;
use std::sync::Arc;

/// Hashable, totally ordered scalar held by a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(OrderedFloat<f32>),
    F64(OrderedFloat<f64>),
    Char(char),
    String(Arc<str>),
}

impl Element {
    /// Convert a value into its stored form
    ///
    /// # Errors
    /// Returns `CollectionError::InvalidType` for composite and indirection kinds.
    pub fn from_value(value: &Value) -> CollectionResult<Self> {
        let element = match value {
            Value::Bool(b) => Element::Bool(*b),
            Value::I8(n) => Element::I8(*n),
            Value::I16(n) => Element::I16(*n),
            Value::I32(n) => Element::I32(*n),
            Value::I64(n) => Element::I64(*n),
            Value::Isize(n) => Element::Isize(*n),
            Value::U8(n) => Element::U8(*n),
            Value::U16(n) => Element::U16(*n),
            Value::U32(n) => Element::U32(*n),
            Value::U64(n) => Element::U64(*n),
            Value::Usize(n) => Element::Usize(*n),
            Value::F32(n) => Element::F32(OrderedFloat(*n)),
            Value::F64(n) => Element::F64(OrderedFloat(*n)),
            Value::Char(c) => Element::Char(*c),
            Value::String(s) => Element::String(Arc::clone(s)),
            _ => return Err(CollectionError::InvalidType { kind: value.kind() }),
        };
        Ok(element)
    }

    /// Convert back to a dynamic value
    pub fn to_value(&self) -> Value {
        match self {
            Element::Bool(b) => Value::Bool(*b),
            Element::I8(n) => Value::I8(*n),
            Element::I16(n) => Value::I16(*n),
            Element::I32(n) => Value::I32(*n),
            Element::I64(n) => Value::I64(*n),
            Element::Isize(n) => Value::Isize(*n),
            Element::U8(n) => Value::U8(*n),
            Element::U16(n) => Value::U16(*n),
            Element::U32(n) => Value::U32(*n),
            Element::U64(n) => Value::U64(*n),
            Element::Usize(n) => Value::Usize(*n),
            Element::F32(n) => Value::F32(n.0),
            Element::F64(n) => Value::F64(n.0),
            Element::Char(c) => Value::Char(*c),
            Element::String(s) => Value::String(Arc::clone(s)),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Element::Bool(_) => Kind::Bool,
            Element::I8(_) => Kind::I8,
            Element::I16(_) => Kind::I16,
            Element::I32(_) => Kind::I32,
            Element::I64(_) => Kind::I64,
            Element::Isize(_) => Kind::Isize,
            Element::U8(_) => Kind::U8,
            Element::U16(_) => Kind::U16,
            Element::U32(_) => Kind::U32,
            Element::U64(_) => Kind::U64,
            Element::Usize(_) => Kind::Usize,
            Element::F32(_) => Kind::F32,
            Element::F64(_) => Kind::F64,
            Element::Char(_) => Kind::Char,
            Element::String(_) => Kind::String,
        }
    }

    /// Lookup form of an arbitrary value; `None` for kinds that can never be stored
    pub(crate) fn probe(value: impl Into<Value>) -> Option<Self> {
        Element::from_value(&value.into()).ok()
    }
}

impl From<Element> for Value {
    fn from(element: Element) -> Self {
        element.to_value()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::F32(n) => write!(f, "{}", n.0),
            Element::F64(n) => write!(f, "{}", n.0),
            Element::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other.to_value()),
        }
    }
}
