//! Seams to the host: where computed values and fired events go.

use hashbrown::HashMap;

use crate::structure::{Mutator, MutatorVisitor};

/// Receives the evaluated [`Mutator`] once per tick that produced new values.
/// The tree has the same attribute nesting as the asset's structure.
pub trait AnimationTarget {
    fn apply_values(&mut self, mutator: &Mutator);
}

/// Receives event notifications, in firing order, before the tick's values are
/// applied.
pub trait EventListener {
    fn on_event(&mut self, name: &str);
}

impl<F: FnMut(&str)> EventListener for F {
    fn on_event(&mut self, name: &str) {
        self(name)
    }
}

/// Target that flattens each applied mutator into `path -> value`, paths
/// joined with `/` (e.g. `"components/Transform/x"`).
#[derive(Debug, Default, Clone)]
pub struct PathTarget {
    pub values: HashMap<String, f64>,
    pub applied: usize,
}

impl PathTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<f64> {
        self.values.get(path).copied()
    }
}

impl AnimationTarget for PathTarget {
    fn apply_values(&mut self, mutator: &Mutator) {
        mutator.accept(&mut Flatten(&mut self.values));
        self.applied += 1;
    }
}

struct Flatten<'a>(&'a mut HashMap<String, f64>);

impl MutatorVisitor for Flatten<'_> {
    fn visit_value(&mut self, path: &[&str], value: f64) {
        self.0.insert(path.join("/"), value);
    }
}
