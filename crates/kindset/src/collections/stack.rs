//! Stack collection - LIFO (Last-In-First-Out)
//!
//! Backed by `Vec` for O(1) push/pop. The top of the stack is the end of the
//! vector, so slices handed out by the stack are ordered oldest-to-newest.

use crate::collections::write_elements;
use crate::element::Element;
use crate::error::{CollectionError, CollectionResult};
use crate::gate::KindGate;
use crate::settings::Settings;
use crate::value::{Kind, Value};
use std::fmt;

const NAME: &str = "stack";

/// Kind-locked LIFO stack
#[derive(Debug, Clone, Default)]
pub struct Stack {
    inner: Vec<Element>,
    gate: KindGate,
    settings: Settings,
}

impl Stack {
    /// Create new empty stack
    ///
    /// # Example
    /// ```rust
    /// # use kindset::Stack;
    /// let stack = Stack::new();
    /// assert!(stack.is_empty());
    /// assert_eq!(stack.locked_kind(), None);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty stack configured by `settings`
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            inner: Vec::with_capacity(settings.initial_capacity),
            gate: KindGate::new(),
            settings,
        }
    }

    /// Push values onto the stack, in argument order
    ///
    /// Either every value is pushed or, on error, none is.
    ///
    /// # Example
    /// ```rust
    /// # use kindset::{Stack, Value};
    /// let mut stack = Stack::new();
    /// stack.push([1, 2, 3]).unwrap();
    /// assert!(stack.push([Value::I32(4), Value::from("five")]).is_err());
    /// assert_eq!(stack.len(), 3);
    /// ```
    pub fn push<I>(&mut self, values: I) -> CollectionResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let admitted = self.gate.admit_batch(values)?;
        self.inner.extend(admitted);
        Ok(())
    }

    /// Push a single value
    pub fn push_one(&mut self, value: impl Into<Value>) -> CollectionResult<()> {
        let element = self.gate.admit(value)?;
        self.inner.push(element);
        Ok(())
    }

    /// Remove the top element
    pub fn pop(&mut self) -> CollectionResult<()> {
        self.top_and_pop().map(drop)
    }

    /// Remove the top `count` elements
    pub fn pop_n(&mut self, count: usize) -> CollectionResult<()> {
        let split = self.split_point(count)?;
        self.inner.truncate(split);
        Ok(())
    }

    /// View the top element without removing it
    ///
    /// # Example
    /// ```rust
    /// # use kindset::{Element, Stack};
    /// let mut stack = Stack::new();
    /// stack.push([1, 2, 3]).unwrap();
    /// assert_eq!(stack.top(), Ok(&Element::I32(3)));
    /// assert_eq!(stack.len(), 3);
    /// ```
    pub fn top(&self) -> CollectionResult<&Element> {
        self.inner
            .last()
            .ok_or(CollectionError::EmptyCollection { collection: NAME })
    }

    /// View the top `count` elements, oldest first
    pub fn top_n(&self, count: usize) -> CollectionResult<&[Element]> {
        let split = self.split_point(count)?;
        Ok(&self.inner[split..])
    }

    /// Remove and return the top element
    pub fn top_and_pop(&mut self) -> CollectionResult<Element> {
        self.inner
            .pop()
            .ok_or(CollectionError::EmptyCollection { collection: NAME })
    }

    /// Remove and return the top `count` elements, oldest first
    pub fn top_n_and_pop_n(&mut self, count: usize) -> CollectionResult<Vec<Element>> {
        let split = self.split_point(count)?;
        Ok(self.inner.split_off(split))
    }

    /// 1-based distance from the top of the nearest element equal to `value`
    ///
    /// # Example
    /// ```rust
    /// # use kindset::Stack;
    /// let mut stack = Stack::new();
    /// stack.push(["a", "b", "a", "c"]).unwrap();
    /// assert_eq!(stack.search("c"), Some(1));
    /// assert_eq!(stack.search("a"), Some(2));
    /// assert_eq!(stack.search("z"), None);
    /// ```
    pub fn search(&self, value: impl Into<Value>) -> Option<usize> {
        let needle = Element::probe(value)?;
        self.inner
            .iter()
            .rev()
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

    /// Elements from bottom to top
    pub fn as_slice(&self) -> &[Element] {
        &self.inner
    }

    /// Convert stack to vector (bottom to top order)
    pub fn to_vec(&self) -> Vec<Element> {
        self.inner.clone()
    }

    /// Iterate from bottom to top
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.inner.iter()
    }

    /// Print the stack to stdout
    pub fn display(&self) {
        println!("{}", self);
    }

    fn split_point(&self, count: usize) -> CollectionResult<usize> {
        self.inner
            .len()
            .checked_sub(count)
            .ok_or_else(|| CollectionError::count(NAME, count, self.inner.len()))
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, self.inner.iter(), self.settings.display_limit)
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
