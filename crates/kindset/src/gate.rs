//! Kind gate - admission policy shared by every collection
//!
//! A gate starts unlocked. The first admitted value locks it to that value's
//! kind; afterwards only values of the locked kind pass. Rejected kinds
//! (see [`REJECTED_KINDS`](crate::value::REJECTED_KINDS)) never pass.
//!
//! Batch admission is all-or-nothing: every candidate is checked against a
//! tentative lock, and the gate is only updated once the whole batch passed.

use crate::element::Element;
use crate::error::{CollectionError, CollectionResult};
use crate::value::{Kind, Value};

/// Per-collection kind lock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindGate {
    locked: Option<Kind>,
}

impl KindGate {
    /// Create an unlocked gate
    pub const fn new() -> Self {
        Self { locked: None }
    }

    /// Create a gate already locked to `kind` (or unlocked for `None`)
    pub(crate) const fn with_lock(locked: Option<Kind>) -> Self {
        Self { locked }
    }

    /// Kind this gate is locked to, if any
    pub fn locked(&self) -> Option<Kind> {
        self.locked
    }

    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    /// Admit a single value
    pub fn admit(&mut self, value: impl Into<Value>) -> CollectionResult<Element> {
        let value = value.into();
        let element = check(self.locked, &value)?;
        self.commit(element.kind());
        Ok(element)
    }

    /// Admit every value or none of them
    ///
    /// # Errors
    /// The first `InvalidType` or `InvalidKind` encountered; the gate is left
    /// untouched in that case.
    pub fn admit_batch<I>(&mut self, values: I) -> CollectionResult<Vec<Element>>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut tentative = self.locked;
        let mut admitted = Vec::new();

        for value in values {
            let value = value.into();
            let element = check(tentative, &value)?;
            tentative = Some(element.kind());
            admitted.push(element);
        }

        if let Some(kind) = tentative {
            self.commit(kind);
        }
        log::trace!("admitted {} value(s) of kind {:?}", admitted.len(), tentative);
        Ok(admitted)
    }

    /// Forget the locked kind
    pub fn reset(&mut self) {
        if let Some(kind) = self.locked.take() {
            log::debug!("kind lock {} released", kind);
        }
    }

    fn commit(&mut self, kind: Kind) {
        if self.locked.is_none() {
            log::debug!("kind lock acquired: {}", kind);
            self.locked = Some(kind);
        }
    }
}

/// Check one value against a (possibly absent) lock
fn check(locked: Option<Kind>, value: &Value) -> CollectionResult<Element> {
    let found = value.kind();

    match locked {
        None if found.is_rejected() => {
            log::debug!("rejected value of unsupported kind {}", found);
            Err(CollectionError::InvalidType { kind: found })
        }
        Some(expected) if expected != found => {
            log::debug!("rejected {} value in collection locked to {}", found, expected);
            Err(CollectionError::InvalidKind { expected, found })
        }
        _ => Element::from_value(value),
    }
}

/// Combine the locks of two sets
///
/// Two locks conflict only when both are present and differ. The combined
/// lock is whichever one is present.
pub fn merge_locks(left: Option<Kind>, right: Option<Kind>) -> CollectionResult<Option<Kind>> {
    match (left, right) {
        (Some(l), Some(r)) if l != r => {
            log::debug!("set kinds conflict: {} vs {}", l, r);
            Err(CollectionError::MismatchedKind { left: l, right: r })
        }
        _ => Ok(left.or(right)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::REJECTED_KINDS;
    use std::collections::HashMap;

    fn rejected_samples() -> Vec<Value> {
        vec![
            Value::array(vec![Value::I32(1)]),
            Value::channel(),
            Value::function("f", |_| Value::Bool(true)),
            Value::any(Value::I32(1)),
            Value::from(HashMap::new()),
            Value::pointer(Value::I32(1)),
            Value::from(vec![Value::I32(1)]),
            Value::structure("S", HashMap::new()),
            Value::RawPointer(8),
        ]
    }

    #[test]
    fn test_first_admission_locks() {
        let mut gate = KindGate::new();
        assert!(!gate.is_locked());
        gate.admit(1i32).unwrap();
        assert_eq!(gate.locked(), Some(Kind::I32));
    }

    #[test]
    fn test_mismatched_kind_rejected() {
        let mut gate = KindGate::new();
        gate.admit(1i32).unwrap();
        let err = gate.admit("one").unwrap_err();
        assert_eq!(
            err,
            CollectionError::InvalidKind {
                expected: Kind::I32,
                found: Kind::String
            }
        );
        assert_eq!(gate.locked(), Some(Kind::I32));
    }

    #[test]
    fn test_every_rejected_kind_fails_on_empty_gate() {
        let samples = rejected_samples();
        assert_eq!(samples.len(), REJECTED_KINDS.len());

        for value in samples {
            let kind = value.kind();
            let mut gate = KindGate::new();
            assert_eq!(gate.admit(value), Err(CollectionError::InvalidType { kind }));
            assert_eq!(gate.locked(), None);
        }
    }

    #[test]
    fn test_rejected_kind_on_locked_gate_is_kind_mismatch() {
        let mut gate = KindGate::new();
        gate.admit(1i32).unwrap();
        let err = gate.admit(Value::pointer(Value::I32(1))).unwrap_err();
        assert!(matches!(err, CollectionError::InvalidKind { .. }));
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let mut gate = KindGate::new();
        let result = gate.admit_batch(vec![Value::I32(1), Value::I32(2), Value::from("x")]);
        assert!(result.is_err());
        assert_eq!(gate.locked(), None);
    }

    #[test]
    fn test_batch_locks_on_first_value() {
        let mut gate = KindGate::new();
        let admitted = gate.admit_batch([1u8, 2, 3]).unwrap();
        assert_eq!(admitted.len(), 3);
        assert_eq!(gate.locked(), Some(Kind::U8));
    }

    #[test]
    fn test_empty_batch_keeps_gate_unlocked() {
        let mut gate = KindGate::new();
        let admitted = gate.admit_batch(Vec::<Value>::new()).unwrap();
        assert!(admitted.is_empty());
        assert!(!gate.is_locked());
    }

    #[test]
    fn test_reset_unlocks() {
        let mut gate = KindGate::new();
        gate.admit('a').unwrap();
        gate.reset();
        assert_eq!(gate.locked(), None);
        gate.admit(true).unwrap();
        assert_eq!(gate.locked(), Some(Kind::Bool));
    }

    #[test]
    fn test_merge_locks() {
        assert_eq!(merge_locks(None, None), Ok(None));
        assert_eq!(merge_locks(Some(Kind::I32), None), Ok(Some(Kind::I32)));
        assert_eq!(merge_locks(None, Some(Kind::I32)), Ok(Some(Kind::I32)));
        assert_eq!(merge_locks(Some(Kind::I32), Some(Kind::I32)), Ok(Some(Kind::I32)));
        assert_eq!(
            merge_locks(Some(Kind::I32), Some(Kind::F64)),
            Err(CollectionError::MismatchedKind {
                left: Kind::I32,
                right: Kind::F64
            })
        );
    }
}
