//! Runtime value representation
//!
//! `Value` is the dynamic input type accepted by every collection.
//! - Scalars (bools, integers, floats, chars, strings): admissible elements
//! - Composites and indirections (arrays, slices, maps, structs, channels,
//!   functions, pointers, raw pointers, `any` boxes): representable, but
//!   rejected by the kind gate
//!
//! Every variant maps to exactly one `Kind`.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Structural category of a `Value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Char,
    String,
    /// Fixed-length sequence
    Array,
    /// Pipe between producers and consumers
    Channel,
    Function,
    /// Open dynamic box
    Any,
    Map,
    /// Shared reference
    Pointer,
    /// Dynamic sequence
    Slice,
    /// Named aggregate
    Struct,
    /// Bare address
    RawPointer,
}

/// Kinds no collection may store.
pub const REJECTED_KINDS: [Kind; 9] = [
    Kind::Array,
    Kind::Channel,
    Kind::Function,
    Kind::Any,
    Kind::Map,
    Kind::Pointer,
    Kind::Slice,
    Kind::Struct,
    Kind::RawPointer,
];

impl Kind {
    /// Lowercase name used in messages and rendering
    pub fn name(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Channel => "channel",
            Kind::Function => "function",
            Kind::Any => "any",
            Kind::Map => "map",
            Kind::Pointer => "pointer",
            Kind::Slice => "slice",
            Kind::Struct => "struct",
            Kind::RawPointer => "raw pointer",
        }
    }

    /// True for composite and indirection kinds
    pub fn is_rejected(self) -> bool {
        REJECTED_KINDS.contains(&self)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Copy-on-write dynamic sequence. Cheap to clone (refcount bump).
#[derive(Clone, Debug, Default)]
pub struct ValueArray(Arc<Vec<Value>>);

impl ValueArray {
    pub fn from_vec(v: Vec<Value>) -> Self {
        ValueArray(Arc::new(v))
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append, cloning the backing vector first if it is shared
    pub fn push(&mut self, value: Value) {
        Arc::make_mut(&mut self.0).push(value);
    }
}

impl PartialEq for ValueArray {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice() == other.0.as_slice()
    }
}

/// Copy-on-write string-keyed map. Cheap to clone (refcount bump).
#[derive(Clone, Debug, Default)]
pub struct ValueMap(Arc<HashMap<String, Value>>);

impl ValueMap {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for ValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref() == other.0.as_ref()
    }
}

impl From<HashMap<String, Value>> for ValueMap {
    fn from(m: HashMap<String, Value>) -> Self {
        ValueMap(Arc::new(m))
    }
}

/// Shared mutable cell with reference semantics.
///
/// Mutations are visible to every clone. Two `Shared<T>` are equal only when
/// they point at the same allocation.
#[derive(Clone, Debug, Default)]
pub struct Shared<T>(Arc<Mutex<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Shared(Arc::new(Mutex::new(value)))
    }

    /// Apply a mutation function under the lock. A poisoned lock is recovered.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

impl<T> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Named callable
#[derive(Clone)]
pub struct FunctionRef {
    pub name: Arc<str>,
    pub func: fn(&[Value]) -> Value,
}

impl fmt::Debug for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRef").field("name", &self.name).finish()
    }
}

impl PartialEq for FunctionRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Named aggregate with string-keyed fields
#[derive(Clone, Debug, PartialEq)]
pub struct StructValue {
    pub name: Arc<str>,
    pub fields: ValueMap,
}

/// Dynamic value
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
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
    F32(f32),
    F64(f64),
    Char(char),
    /// String value (reference-counted, immutable)
    String(Arc<str>),
    /// Fixed-length sequence
    Array(Arc<[Value]>),
    /// FIFO pipe shared between its holders
    Channel(Shared<VecDeque<Value>>),
    Function(FunctionRef),
    /// Boxed value of unconstrained type
    Any(Box<Value>),
    Map(ValueMap),
    /// Shared mutable reference to another value
    Pointer(Shared<Value>),
    /// Growable sequence (copy-on-write)
    Slice(ValueArray),
    Struct(StructValue),
    /// Bare memory address
    RawPointer(usize),
}

impl Value {
    /// Create a string value
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Arc::from(s.as_ref()))
    }

    /// Create a fixed-length array value
    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(Arc::from(values))
    }

    /// Create an empty channel
    pub fn channel() -> Self {
        Value::Channel(Shared::new(VecDeque::new()))
    }

    pub fn function(name: &str, func: fn(&[Value]) -> Value) -> Self {
        Value::Function(FunctionRef {
            name: Arc::from(name),
            func,
        })
    }

    /// Box a value as `any`
    pub fn any(value: Value) -> Self {
        Value::Any(Box::new(value))
    }

    /// Create a pointer to a fresh cell holding `value`
    pub fn pointer(value: Value) -> Self {
        Value::Pointer(Shared::new(value))
    }

    pub fn structure(name: &str, fields: HashMap<String, Value>) -> Self {
        Value::Struct(StructValue {
            name: Arc::from(name),
            fields: ValueMap::from(fields),
        })
    }

    /// Structural category of this value
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Isize(_) => Kind::Isize,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::Usize(_) => Kind::Usize,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Char(_) => Kind::Char,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Channel(_) => Kind::Channel,
            Value::Function(_) => Kind::Function,
            Value::Any(_) => Kind::Any,
            Value::Map(_) => Kind::Map,
            Value::Pointer(_) => Kind::Pointer,
            Value::Slice(_) => Kind::Slice,
            Value::Struct(_) => Kind::Struct,
            Value::RawPointer(_) => Kind::RawPointer,
        }
    }

    /// Get the kind name of this value
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    char => Char,
    Arc<str> => String,
    ValueMap => Map,
    ValueArray => Slice,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Slice(ValueArray::from_vec(v))
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(m: HashMap<String, Value>) -> Self {
        Value::Map(ValueMap::from(m))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::I8(n) => write!(f, "{}", n),
            Value::I16(n) => write!(f, "{}", n),
            Value::I32(n) => write!(f, "{}", n),
            Value::I64(n) => write!(f, "{}", n),
            Value::Isize(n) => write!(f, "{}", n),
            Value::U8(n) => write!(f, "{}", n),
            Value::U16(n) => write!(f, "{}", n),
            Value::U32(n) => write!(f, "{}", n),
            Value::U64(n) => write!(f, "{}", n),
            Value::Usize(n) => write!(f, "{}", n),
            Value::F32(n) => write!(f, "{}", n),
            Value::F64(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "{}", c),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) => write_sequence(f, items.iter()),
            Value::Slice(items) => write_sequence(f, items.as_slice().iter()),
            Value::Channel(queue) => queue.with_mut(|q| write!(f, "<channel len={}>", q.len())),
            Value::Function(func) => write!(f, "<fn {}>", func.name),
            Value::Any(inner) => write!(f, "{}", inner),
            Value::Map(map) => write!(f, "<map size={}>", map.len()),
            Value::Pointer(cell) => cell.with_mut(|v| write!(f, "&{}", v)),
            Value::Struct(s) => write!(f, "<struct {}>", s.name),
            Value::RawPointer(addr) => write!(f, "{:#x}", addr),
        }
    }
}

fn write_sequence<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    let rendered: Vec<String> = items.map(|v| v.to_string()).collect();
    write!(f, "[{}]", rendered.join(" "))
}
