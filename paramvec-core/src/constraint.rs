//! Cross-argument constraints over whole tuples.

use crate::predicate::Pred;
use crate::value::Value;

/// A labelled tuple predicate.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub label: String,
    pub check: Pred<[Value]>,
}

/// Ordered set of tuple constraints, combined with logical AND.
///
/// An empty set accepts every tuple.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constraint under the next default label (`constraint_{i}`).
    pub fn push<F>(&mut self, f: F)
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        let label = format!("constraint_{}", self.constraints.len());
        self.push_named(label, f);
    }

    pub fn push_named<F>(&mut self, label: impl Into<String>, f: F)
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.constraints.push(Constraint {
            label: label.into(),
            check: Pred::new(f),
        });
    }

    pub fn push_pred(&mut self, label: impl Into<String>, check: Pred<[Value]>) {
        self.constraints.push(Constraint {
            label: label.into(),
            check,
        });
    }

    pub fn clear(&mut self) {
        self.constraints.clear();
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// True iff every constraint accepts the tuple. Short-circuits.
    pub fn evaluate(&self, tuple: &[Value]) -> bool {
        self.constraints.iter().all(|c| c.check.evaluate(tuple))
    }

    /// Labels of the constraints the tuple violates, in insertion order.
    pub fn violations(&self, tuple: &[Value]) -> Vec<&str> {
        self.constraints
            .iter()
            .filter(|c| !c.check.evaluate(tuple))
            .map(|c| c.label.as_str())
            .collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.constraints.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }
}
