//! Kind locking across all three collections
//!
//! The collections are driven through a small trait so each property is
//! checked once per collection.

use kindset::{CollectionError, CollectionResult, Kind, Queue, Set, Stack, Value};
use rstest::rstest;
use std::collections::HashMap;

trait Collection {
    fn insert(&mut self, values: Vec<Value>) -> CollectionResult<()>;
    fn size(&self) -> usize;
    fn kind(&self) -> Option<Kind>;
    fn remove_all(&mut self);
    fn clear(&mut self);
}

macro_rules! impl_collection {
    ($ty:ty, $insert:ident) => {
        impl Collection for $ty {
            fn insert(&mut self, values: Vec<Value>) -> CollectionResult<()> {
                self.$insert(values)
            }
            fn size(&self) -> usize {
                self.len()
            }
            fn kind(&self) -> Option<Kind> {
                self.locked_kind()
            }
            fn remove_all(&mut self) {
                <$ty>::remove_all(self)
            }
            fn clear(&mut self) {
                <$ty>::clear(self)
            }
        }
    };
}

impl_collection!(Set, add);
impl_collection!(Stack, push);
impl_collection!(Queue, push);

fn collections() -> Vec<(&'static str, Box<dyn Collection>)> {
    vec![
        ("set", Box::new(Set::new())),
        ("stack", Box::new(Stack::new())),
        ("queue", Box::new(Queue::new())),
    ]
}

#[test]
fn test_kind_lock() {
    for (name, mut c) in collections() {
        c.insert(vec![Value::I32(1)]).unwrap();
        let err = c.insert(vec![Value::from("two")]).unwrap_err();
        assert_eq!(
            err,
            CollectionError::InvalidKind {
                expected: Kind::I32,
                found: Kind::String
            },
            "{}",
            name
        );
        assert_eq!(c.size(), 1, "{}", name);
        assert_eq!(c.kind(), Some(Kind::I32), "{}", name);
    }
}

#[rstest]
#[case(Value::array(vec![Value::I32(1)]))]
#[case(Value::channel())]
#[case(Value::function("f", |_| Value::Bool(true)))]
#[case(Value::any(Value::I32(1)))]
#[case(Value::from(HashMap::new()))]
#[case(Value::pointer(Value::I32(1)))]
#[case(Value::from(vec![Value::I32(1)]))]
#[case(Value::structure("Point", HashMap::new()))]
#[case(Value::RawPointer(0x1000))]
fn test_rejected_kinds(#[case] value: Value) {
    let kind = value.kind();
    for (name, mut c) in collections() {
        let err = c.insert(vec![value.clone()]).unwrap_err();
        assert_eq!(err, CollectionError::InvalidType { kind }, "{}", name);
        assert!(err.to_string().contains(kind.name()), "{}", name);
        assert_eq!(c.kind(), None, "{}", name);
        assert_eq!(c.size(), 0, "{}", name);
    }
}

#[test]
fn test_batch_atomicity() {
    for (name, mut c) in collections() {
        let result = c.insert(vec![Value::I32(1), Value::from("bad")]);
        assert!(result.is_err(), "{}", name);
        assert_eq!(c.size(), 0, "{}", name);
        assert_eq!(c.kind(), None, "{}", name);

        // The failed batch must not have pinned the kind to i32.
        c.insert(vec![Value::from("fine")]).unwrap();
        assert_eq!(c.kind(), Some(Kind::String), "{}", name);
    }
}

#[test]
fn test_batch_with_rejected_tail() {
    for (name, mut c) in collections() {
        let result = c.insert(vec![Value::I32(1), Value::pointer(Value::I32(1))]);
        assert!(matches!(result, Err(CollectionError::InvalidKind { .. })), "{}", name);
        assert_eq!(c.size(), 0, "{}", name);
    }
}

#[test]
fn test_clear_resets_lock() {
    for (name, mut c) in collections() {
        c.insert(vec![Value::I32(1), Value::I32(2)]).unwrap();
        c.clear();
        assert_eq!(c.size(), 0, "{}", name);
        assert_eq!(c.kind(), None, "{}", name);
        c.insert(vec![Value::from("now strings")]).unwrap();
        assert_eq!(c.kind(), Some(Kind::String), "{}", name);
    }
}

#[test]
fn test_remove_all_keeps_lock() {
    for (name, mut c) in collections() {
        c.insert(vec![Value::I32(1), Value::I32(2)]).unwrap();
        c.remove_all();
        assert_eq!(c.size(), 0, "{}", name);
        assert_eq!(c.kind(), Some(Kind::I32), "{}", name);
        assert!(c.insert(vec![Value::from("still ints")]).is_err(), "{}", name);
        c.insert(vec![Value::I32(3)]).unwrap();
    }
}

#[test]
fn test_empty_batch_is_noop() {
    for (name, mut c) in collections() {
        c.insert(Vec::new()).unwrap();
        assert_eq!(c.kind(), None, "{}", name);
    }
}
