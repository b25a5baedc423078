//! Sparse per-element deltas carried by an effect.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Element;

/// Signed changes to some subset of the element meters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementDeltas(BTreeMap<Element, i32>);

impl ElementDeltas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delta for an element, replacing any previous value.
    pub fn with(mut self, element: Element, delta: i32) -> Self {
        self.0.insert(element, delta);
        self
    }

    pub fn insert(&mut self, element: Element, delta: i32) {
        self.0.insert(element, delta);
    }

    pub fn get(&self, element: Element) -> Option<i32> {
        self.0.get(&element).copied()
    }

    /// Iterate in canonical element order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, i32)> + '_ {
        self.0.iter().map(|(element, delta)| (*element, *delta))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(Element, i32)> for ElementDeltas {
    fn from_iter<I: IntoIterator<Item = (Element, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
