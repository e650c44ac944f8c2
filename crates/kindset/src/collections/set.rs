//! Set collection - Unique Value Storage
//!
//! Backed by Rust's `HashSet` for O(1) average membership testing.
//!
//! ## Features
//! - Unique value storage (automatic deduplication)
//! - Set algebra over any number of operands: union, intersection, difference
//! - Symmetric difference and in-place disjoining of two sets
//! - Subset/superset/disjoint predicates
//! - Uniform random sub-setting
//!
//! Every operation that combines sets first checks that their locked kinds
//! agree. An unlocked set is always empty and agrees with everything.

use crate::collections::write_elements;
use crate::element::Element;
use crate::error::{CollectionError, CollectionResult};
use crate::gate::{merge_locks, KindGate};
use crate::settings::Settings;
use crate::value::{Kind, Value};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};
use std::fmt;

const NAME: &str = "set";

/// Kind-locked set
#[derive(Debug, Clone, Default)]
pub struct Set {
    inner: HashSet<Element>,
    gate: KindGate,
    settings: Settings,
}

impl Set {
    /// Create new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set configured by `settings`
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            inner: HashSet::with_capacity(settings.initial_capacity),
            gate: KindGate::new(),
            settings,
        }
    }

    /// Create a set holding `values`
    pub fn from_values<I>(values: I) -> CollectionResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut set = Self::new();
        set.add(values)?;
        Ok(set)
    }

    /// Derived set sharing this set's settings
    fn derived(&self, inner: HashSet<Element>, locked: Option<Kind>) -> Self {
        Self {
            inner,
            gate: KindGate::with_lock(locked),
            settings: self.settings.clone(),
        }
    }

    /// Add values; values already present are left alone
    ///
    /// Either every value is admitted or, on error, none is.
    ///
    /// # Example
    /// ```rust
    /// # use kindset::Set;
    /// let mut set = Set::new();
    /// set.add([1, 2, 2, 3]).unwrap();
    /// assert_eq!(set.len(), 3);
    /// assert!(set.add(["four"]).is_err());
    /// ```
    pub fn add<I>(&mut self, values: I) -> CollectionResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let admitted = self.gate.admit_batch(values)?;
        self.inner.extend(admitted);
        Ok(())
    }

    pub fn add_one(&mut self, value: impl Into<Value>) -> CollectionResult<()> {
        let element = self.gate.admit(value)?;
        self.inner.insert(element);
        Ok(())
    }

    /// Remove values; absent values are ignored
    pub fn remove<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        for value in values {
            if let Some(element) = Element::probe(value) {
                self.inner.remove(&element);
            }
        }
    }

    /// Remove all elements, keeping the locked kind
    pub fn remove_all(&mut self) {
        self.inner.clear();
    }

    /// Remove all elements and forget the locked kind
    pub fn clear(&mut self) {
        self.inner.clear();
        self.gate.reset();
    }

    /// Independent copy with the same members and locked kind
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Check if `value` is a member
    pub fn has(&self, value: impl Into<Value>) -> bool {
        Element::probe(value).is_some_and(|element| self.inner.contains(&element))
    }

    pub fn locked_kind(&self) -> Option<Kind> {
        self.gate.locked()
    }

    /// Members of this set and every operand
    ///
    /// # Example
    /// ```rust
    /// # use kindset::Set;
    /// let a = Set::from_values([1, 2, 3]).unwrap();
    /// let b = Set::from_values([2, 3, 4]).unwrap();
    /// let union = a.union(&[&b]).unwrap();
    /// assert_eq!(union.len(), 4);
    /// ```
    pub fn union(&self, others: &[&Set]) -> CollectionResult<Set> {
        let locked = self.common_lock(others)?;

        let mut inner = self.inner.clone();
        for other in others {
            inner.extend(other.inner.iter().cloned());
        }
        Ok(self.derived(inner, locked))
    }

    /// Members present in this set and in every operand
    ///
    /// An unlocked (hence empty) operand makes the result empty.
    pub fn intersection(&self, others: &[&Set]) -> CollectionResult<Set> {
        let locked = self.common_lock(others)?;
        let total = others.len() + 1;

        let mut frequency: HashMap<&Element, usize> = HashMap::new();
        for set in std::iter::once(self).chain(others.iter().copied()) {
            for element in &set.inner {
                *frequency.entry(element).or_insert(0) += 1;
            }
        }

        let inner = frequency
            .into_iter()
            .filter(|&(_, count)| count == total)
            .map(|(element, _)| element.clone())
            .collect();
        Ok(self.derived(inner, locked))
    }

    /// Members of this set that are in none of the operands
    ///
    /// The operands must agree among themselves, and their common kind must
    /// agree with this set's.
    pub fn difference(&self, others: &[&Set]) -> CollectionResult<Set> {
        let operands_lock = others
            .iter()
            .try_fold(None, |acc, other| merge_locks(acc, other.locked_kind()))?;
        merge_locks(self.locked_kind(), operands_lock)?;

        let inner = self
            .inner
            .iter()
            .filter(|element| !others.iter().any(|other| other.inner.contains(*element)))
            .cloned()
            .collect();
        Ok(self.derived(inner, self.locked_kind()))
    }

    /// Members in exactly one of the two sets
    pub fn symmetric_difference(&self, other: &Set) -> CollectionResult<Set> {
        let locked = merge_locks(self.locked_kind(), other.locked_kind())?;
        let inner = self
            .inner
            .symmetric_difference(&other.inner)
            .cloned()
            .collect();
        Ok(self.derived(inner, locked))
    }

    /// Remove the common members from both sets
    ///
    /// # Example
    /// ```rust
    /// # use kindset::Set;
    /// let mut a = Set::from_values([1, 2, 3]).unwrap();
    /// let mut b = Set::from_values([3, 4]).unwrap();
    /// a.make_disjoint(&mut b).unwrap();
    /// assert!(!a.has(3) && !b.has(3));
    /// assert_eq!((a.len(), b.len()), (2, 1));
    /// ```
    pub fn make_disjoint(&mut self, other: &mut Set) -> CollectionResult<()> {
        merge_locks(self.locked_kind(), other.locked_kind())?;

        let common: Vec<Element> = self.inner.intersection(&other.inner).cloned().collect();
        for element in &common {
            self.inner.remove(element);
            other.inner.remove(element);
        }
        Ok(())
    }

    /// New set of `count` members chosen uniformly at random
    ///
    /// The result keeps this set's locked kind, even when `count` is zero.
    ///
    /// # Errors
    /// `InvalidCount` if `count` is negative or larger than the set.
    pub fn make_sub_set(&self, count: isize) -> CollectionResult<Set> {
        let available = self.inner.len();
        let amount = usize::try_from(count)
            .ok()
            .filter(|&amount| amount <= available)
            .ok_or(CollectionError::InvalidCount {
                collection: NAME,
                requested: count,
                available,
            })?;

        // Sorting first makes a seeded draw independent of hash order.
        let mut members = self.to_vec();
        members.sort_unstable();

        let mut rng = match self.settings.sample_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        log::debug!(
            "sampling {} of {} members (seeded: {})",
            amount,
            available,
            self.settings.sample_seed.is_some()
        );

        let (chosen, _) = members.partial_shuffle(&mut rng, amount);
        let inner = chosen.iter().cloned().collect();
        Ok(self.derived(inner, self.locked_kind()))
    }

    /// Check if the sets share no members
    pub fn is_disjoint(&self, other: &Set) -> CollectionResult<bool> {
        Ok(self.intersection(&[other])?.is_empty())
    }

    /// Check if every member of this set is in `other`
    pub fn is_sub_set(&self, other: &Set) -> CollectionResult<bool> {
        merge_locks(self.locked_kind(), other.locked_kind())?;
        Ok(self.inner.is_subset(&other.inner))
    }

    /// Check if every member of `other` is in this set
    pub fn is_super_set(&self, other: &Set) -> CollectionResult<bool> {
        merge_locks(self.locked_kind(), other.locked_kind())?;
        Ok(self.inner.is_superset(&other.inner))
    }

    /// Members in arbitrary order
    pub fn to_vec(&self) -> Vec<Element> {
        self.inner.iter().cloned().collect()
    }

    /// Iterate over members in arbitrary order
    pub fn iter(&self) -> std::collections::hash_set::Iter<'_, Element> {
        self.inner.iter()
    }

    /// Print the set to stdout
    pub fn display(&self) {
        println!("{}", self);
    }

    fn common_lock(&self, others: &[&Set]) -> CollectionResult<Option<Kind>> {
        others
            .iter()
            .try_fold(self.locked_kind(), |acc, other| {
                merge_locks(acc, other.locked_kind())
            })
    }
}

/// Members are rendered in sorted order so output is stable.
impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut members: Vec<&Element> = self.inner.iter().collect();
        members.sort_unstable();
        write_elements(f, members.into_iter(), self.settings.display_limit)
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a Element;
    type IntoIter = std::collections::hash_set::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(values: &[i32]) -> Set {
        Set::from_values(values.iter().copied()).unwrap()
    }

    #[test]
    fn test_set_new() {
        let set = Set::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.locked_kind(), None);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut set = Set::new();
        set.add([42, 42]).unwrap();
        set.add_one(42).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_ignores_absent_and_foreign() {
        let mut set = set_of(&[1, 2, 3]);
        set.remove([Value::I32(2), Value::I32(99), Value::from("x")]);
        assert_eq!(set.len(), 2);
        assert!(!set.has(2));
    }

    #[test]
    fn test_intersection_with_unlocked_operand_is_empty() {
        let a = set_of(&[1, 2]);
        let empty = Set::new();
        let result = a.intersection(&[&empty]).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.locked_kind(), Some(Kind::I32));
    }

    #[test]
    fn test_union_of_unlocked_sets_stays_unlocked() {
        let a = Set::new();
        let b = Set::new();
        let result = a.union(&[&b]).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.locked_kind(), None);
    }

    #[test]
    fn test_union_adopts_operand_kind() {
        let empty = Set::new();
        let b = set_of(&[5]);
        let result = empty.union(&[&b]).unwrap();
        assert_eq!(result.locked_kind(), Some(Kind::I32));
        assert!(result.has(5));
    }

    #[test]
    fn test_symmetric_difference() {
        let a = set_of(&[1, 2, 3]);
        let b = set_of(&[3, 4]);
        let result = a.symmetric_difference(&b).unwrap();
        assert_eq!(result.to_string(), "[1 2 4]");
    }

    #[test]
    fn test_derived_set_keeps_settings() {
        let settings = Settings::default().with_display_limit(1);
        let mut a = Set::with_settings(settings);
        a.add([1, 2]).unwrap();
        let copy = a.union(&[]).unwrap();
        assert_eq!(copy.to_string(), "[1 ...]");
    }

    #[test]
    fn test_make_sub_set_seeded_is_reproducible() {
        let settings = Settings::default().with_sample_seed(7);
        let mut set = Set::with_settings(settings);
        set.add(0..50).unwrap();

        let first = set.make_sub_set(10).unwrap();
        let second = set.make_sub_set(10).unwrap();
        assert_eq!(first.inner, second.inner);
    }
}
