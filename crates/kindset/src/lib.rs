//! Kindset - homogeneous collections over dynamic values
//!
//! This library provides three collections whose element type is checked at
//! runtime:
//! - `Set`: unique members, set algebra, random sub-setting
//! - `Stack`: LIFO sequence with bulk pop/peek
//! - `Queue`: FIFO sequence with bulk pop/peek
//!
//! Each collection locks onto the kind of the first value it admits and
//! rejects values of any other kind. Composite and indirection kinds
//! (arrays, slices, maps, structs, channels, functions, pointers) are never
//! admitted.
//!
//! # Example
//!
//! ```rust
//! use kindset::{CollectionError, Kind, Stack};
//!
//! let mut stack = Stack::new();
//! stack.push([1, 2, 3]).unwrap();
//! assert_eq!(stack.locked_kind(), Some(Kind::I32));
//!
//! let err = stack.push_one("four").unwrap_err();
//! assert!(matches!(err, CollectionError::InvalidKind { .. }));
//! ```

/// Kindset version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod collections;
pub mod element;
pub mod error;
pub mod gate;
pub mod settings;
pub mod value;

pub use collections::queue::Queue;
pub use collections::set::Set;
pub use collections::stack::Stack;
pub use element::Element;
pub use error::{CollectionError, CollectionResult};
pub use gate::{merge_locks, KindGate};
pub use settings::Settings;
pub use value::{Kind, Value, REJECTED_KINDS};
