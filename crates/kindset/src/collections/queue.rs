//! Queue collection - FIFO (First-In-First-Out)
//!
//! Backed by `VecDeque` (circular buffer) for O(1) push at the tail and pop
//! at the head.

use crate::collections::write_elements;
use crate::element::Element;
use crate::error::{CollectionError, CollectionResult};
use crate::gate::KindGate;
use crate::settings::Settings;
use crate::value::{Kind, Value};
use std::collections::VecDeque;
use std::fmt;

const NAME: &str = "queue";

/// Kind-locked FIFO queue
#[derive(Debug, Clone, Default)]
pub struct Queue {
    inner: VecDeque<Element>,
    gate: KindGate,
    settings: Settings,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue configured by `settings`
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            inner: VecDeque::with_capacity(settings.initial_capacity),
            gate: KindGate::new(),
            settings,
        }
    }

    /// Append values to the back of the queue, in argument order
    ///
    /// Either every value is appended or, on error, none is.
    pub fn push<I>(&mut self, values: I) -> CollectionResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let admitted = self.gate.admit_batch(values)?;
        self.inner.extend(admitted);
        Ok(())
    }

    pub fn push_one(&mut self, value: impl Into<Value>) -> CollectionResult<()> {
        let element = self.gate.admit(value)?;
        self.inner.push_back(element);
        Ok(())
    }

    /// Remove the front element
    pub fn pop(&mut self) -> CollectionResult<()> {
        self.front_and_pop().map(drop)
    }

    /// Remove the first `count` elements
    pub fn pop_n(&mut self, count: usize) -> CollectionResult<()> {
        self.check_count(count)?;
        self.inner.drain(..count);
        Ok(())
    }

    /// View the front element without removing it
    pub fn front(&self) -> CollectionResult<&Element> {
        self.inner
            .front()
            .ok_or(CollectionError::EmptyCollection { collection: NAME })
    }

    /// View the first `count` elements, front first
    pub fn front_n(&self, count: usize) -> CollectionResult<Vec<Element>> {
        self.check_count(count)?;
        Ok(self.inner.range(..count).cloned().collect())
    }

    /// Remove and return the front element
    pub fn front_and_pop(&mut self) -> CollectionResult<Element> {
        self.inner
            .pop_front()
            .ok_or(CollectionError::EmptyCollection { collection: NAME })
    }

    /// Remove and return the first `count` elements, front first
    pub fn front_n_and_pop_n(&mut self, count: usize) -> CollectionResult<Vec<Element>> {
        self.check_count(count)?;
        Ok(self.inner.drain(..count).collect())
    }

    /// 1-based distance from the front of the first element equal to `value`
    pub fn search(&self, value: impl Into<Value>) -> Option<usize> {
        let needle = Element::probe(value)?;
        self.inner
            .iter()
            .position(|element| *element == needle)
            .map(|index| index + 1)
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

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn locked_kind(&self) -> Option<Kind> {
        self.gate.locked()
    }

    /// Convert queue to vector (front to back)
    pub fn to_vec(&self) -> Vec<Element> {
        self.inner.iter().cloned().collect()
    }

    /// Iterate from front to back
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, Element> {
        self.inner.iter()
    }

    /// Print the queue to stdout
    pub fn display(&self) {
        println!("{}", self);
    }

    fn check_count(&self, count: usize) -> CollectionResult<()> {
        if count > self.inner.len() {
            return Err(CollectionError::count(NAME, count, self.inner.len()));
        }
        Ok(())
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, self.inner.iter(), self.settings.display_limit)
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a Element;
    type IntoIter = std::collections::vec_deque::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
