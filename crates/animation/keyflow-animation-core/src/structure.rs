//! Animation structure tree and the nested numeric result (Mutator) it evaluates to.
//!
//! Interior nodes mirror the attribute layout of the animated target; leaves are
//! [`Sequence`]s. Evaluating a structure yields a [`Mutator`] of identical shape
//! whose leaves are plain numbers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sequence::Sequence;

#[derive(Clone, Debug, PartialEq)]
pub enum AnimationStructure {
    Sequence(Sequence),
    Node(BTreeMap<String, AnimationStructure>),
}

impl Default for AnimationStructure {
    fn default() -> Self {
        Self::node()
    }
}

impl From<Sequence> for AnimationStructure {
    fn from(seq: Sequence) -> Self {
        Self::Sequence(seq)
    }
}

impl AnimationStructure {
    /// Empty interior node.
    pub fn node() -> Self {
        Self::Node(BTreeMap::new())
    }

    /// Builder-style child insertion. No-op on a leaf.
    pub fn with(mut self, name: impl Into<String>, child: impl Into<AnimationStructure>) -> Self {
        self.insert(name, child);
        self
    }

    /// Insert a child under an interior node, returning the replaced child.
    /// Leaves have no children; inserting into one returns `None` and drops `child`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        child: impl Into<AnimationStructure>,
    ) -> Option<AnimationStructure> {
        match self {
            Self::Node(children) => children.insert(name.into(), child.into()),
            Self::Sequence(_) => None,
        }
    }

    pub fn child(&self, name: &str) -> Option<&AnimationStructure> {
        match self {
            Self::Node(children) => children.get(name),
            Self::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(seq) => Some(seq),
            Self::Node(_) => None,
        }
    }

    /// Leaf sequence at an attribute path, e.g. `["components", "Transform", "x"]`.
    pub fn sequence_at(&self, path: &[&str]) -> Option<&Sequence> {
        path.iter()
            .try_fold(self, |node, name| node.child(name))?
            .as_sequence()
    }

    pub fn sequence_at_mut(&mut self, path: &[&str]) -> Option<&mut Sequence> {
        let mut node = self;
        for name in path {
            node = match node {
                Self::Node(children) => children.get_mut(*name)?,
                Self::Sequence(_) => return None,
            };
        }
        match node {
            Self::Sequence(seq) => Some(seq),
            Self::Node(_) => None,
        }
    }

    /// Depth-first walk over every leaf with its attribute path.
    pub fn for_each_sequence(&self, f: &mut dyn FnMut(&[&str], &Sequence)) {
        let mut path = Vec::new();
        self.walk_sequences(&mut path, f);
    }

    fn walk_sequences<'a>(&'a self, path: &mut Vec<&'a str>, f: &mut dyn FnMut(&[&str], &Sequence)) {
        match self {
            Self::Sequence(seq) => f(path, seq),
            Self::Node(children) => {
                for (name, child) in children {
                    path.push(name.as_str());
                    child.walk_sequences(path, f);
                    path.pop();
                }
            }
        }
    }

    /// Same-shaped tree with every leaf replaced by `f(leaf)`.
    pub fn map_sequences(&self, f: &mut dyn FnMut(&Sequence) -> Sequence) -> Self {
        match self {
            Self::Sequence(seq) => Self::Sequence(f(seq)),
            Self::Node(children) => Self::Node(
                children
                    .iter()
                    .map(|(name, child)| (name.clone(), child.map_sequences(f)))
                    .collect(),
            ),
        }
    }

    pub fn sequence_count(&self) -> usize {
        let mut count = 0;
        self.for_each_sequence(&mut |_, _| count += 1);
        count
    }

    /// Latest last-key time over all non-empty leaves, 0 when there are none.
    pub fn max_key_time(&self) -> f64 {
        let mut max = 0.0_f64;
        self.for_each_sequence(&mut |_, seq| {
            if let Some(last) = seq.last_key() {
                max = max.max(last.time);
            }
        });
        max
    }

    /// Evaluate every leaf at `time` into a same-shaped [`Mutator`].
    pub fn evaluate(&self, time: f64) -> Mutator {
        match self {
            Self::Sequence(seq) => Mutator::Value(seq.evaluate(time)),
            Self::Node(children) => Mutator::Node(
                children
                    .iter()
                    .map(|(name, child)| (name.clone(), child.evaluate(time)))
                    .collect(),
            ),
        }
    }
}

/// Nested numeric result applied to a target each tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mutator {
    Value(f64),
    Node(BTreeMap<String, Mutator>),
}

/// Receives the leaves of a [`Mutator`] in depth-first order.
pub trait MutatorVisitor {
    fn visit_value(&mut self, path: &[&str], value: f64);

    fn enter_node(&mut self, _path: &[&str]) {}

    fn leave_node(&mut self, _path: &[&str]) {}
}

impl<F: FnMut(&[&str], f64)> MutatorVisitor for F {
    fn visit_value(&mut self, path: &[&str], value: f64) {
        self(path, value)
    }
}

impl Mutator {
    pub fn get(&self, path: &[&str]) -> Option<&Mutator> {
        path.iter().try_fold(self, |node, name| match node {
            Mutator::Node(children) => children.get(*name),
            Mutator::Value(_) => None,
        })
    }

    /// Leaf value at `path`.
    pub fn value(&self, path: &[&str]) -> Option<f64> {
        self.get(path)?.as_value()
    }

    pub fn as_value(&self) -> Option<f64> {
        match self {
            Mutator::Value(v) => Some(*v),
            Mutator::Node(_) => None,
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Mutator::Value(_) => 1,
            Mutator::Node(children) => children.values().map(Mutator::leaf_count).sum(),
        }
    }

    pub fn accept(&self, visitor: &mut dyn MutatorVisitor) {
        let mut path = Vec::new();
        self.accept_at(&mut path, visitor);
    }

    fn accept_at<'a>(&'a self, path: &mut Vec<&'a str>, visitor: &mut dyn MutatorVisitor) {
        match self {
            Mutator::Value(v) => visitor.visit_value(path, *v),
            Mutator::Node(children) => {
                visitor.enter_node(path);
                for (name, child) in children {
                    path.push(name.as_str());
                    child.accept_at(path, visitor);
                    path.pop();
                }
                visitor.leave_node(path);
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
