//! Vector composition.
//!
//! A [`ParamSet`] holds the ordered argument descriptors of one test, two
//! named catalogues (directed edge cases and regression test vectors) and a
//! set of cross-argument constraints. [`ParamSet::generate_samples`] turns a
//! [`Selection`] into the list of tuples to run:
//!
//! | mode            | result                                              |
//! |-----------------|-----------------------------------------------------|
//! | `all`           | directed ∪ draws                                    |
//! | `mixed`         | directed (if `always_include_directed`) ∪ draws     |
//! | `random_only`   | draws                                               |
//! | `directed_only` | directed                                            |
//! | `test`          | test catalogue                                      |
//!
//! "draws" is `n` constrained random tuples for `Count(n)` and the
//! exhaustive sequence product for `Auto`. A filter overrides everything
//! and returns exactly one directed vector.
//!
//! Constraints only apply to generated tuples. Catalogue entries are taken
//! as authored.

use crate::arg::ArgSpec;
use crate::catalogue::VectorCatalogue;
use crate::constraint::ConstraintSet;
use crate::error::{Catalogue, GenError};
use crate::generator::SequenceGen;
use crate::metadata::{CatalogueMetadata, ParamSetMetadata};
use crate::selection::{SampleCount, Selection, UnboundPolicy, VectorFilter, VectorMode};
use crate::source::SeededSource;
use crate::value::{Value, ValueKind, Vector};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct ParamSet {
    args: Vec<ArgSpec>,
    directed: VectorCatalogue,
    test: VectorCatalogue,
    constraints: ConstraintSet,
    always_include_directed: bool,
    unbound_policy: UnboundPolicy,
}

/// Where an argument's value comes from during exhaustive generation.
enum Slot<'a> {
    Fixed(Value),
    Sequence(&'a SequenceGen),
    Draw(&'a ArgSpec),
}

impl ParamSet {
    /// Fails with `DuplicateArgument` if two descriptors share a name.
    pub fn new(args: Vec<ArgSpec>) -> Result<Self, GenError> {
        let mut seen = HashSet::new();
        for arg in &args {
            if !seen.insert(arg.name()) {
                return Err(GenError::DuplicateArgument(arg.name().to_string()));
            }
        }
        Ok(Self {
            args,
            directed: VectorCatalogue::new(),
            test: VectorCatalogue::new(),
            constraints: ConstraintSet::new(),
            always_include_directed: true,
            unbound_policy: UnboundPolicy::default(),
        })
    }

    // ─── Builder ─────────────────────────────────────────────────────

    pub fn with_directed_vector(mut self, name: impl Into<String>, vector: Vector) -> Result<Self, GenError> {
        self.add_directed_vector(name, vector)?;
        Ok(self)
    }

    pub fn with_test_vector(mut self, name: impl Into<String>, vector: Vector) -> Result<Self, GenError> {
        self.add_test_vector(name, vector)?;
        Ok(self)
    }

    pub fn with_constraint<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.add_constraint(f);
        self
    }

    pub fn with_named_constraint<F>(mut self, label: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.add_named_constraint(label, f);
        self
    }

    pub fn always_include_directed(mut self, include: bool) -> Self {
        self.always_include_directed = include;
        self
    }

    pub fn unbound_policy(mut self, policy: UnboundPolicy) -> Self {
        self.unbound_policy = policy;
        self
    }

    // ─── Catalogues ──────────────────────────────────────────────────

    pub fn add_directed_vector(&mut self, name: impl Into<String>, vector: Vector) -> Result<(), GenError> {
        let name = name.into();
        self.check_len(Catalogue::Directed, &name, &vector)?;
        self.directed.insert(name, vector);
        Ok(())
    }

    pub fn remove_directed_vector(&mut self, name: &str) -> Result<Vector, GenError> {
        let removed = self.directed.remove(name);
        removed.ok_or_else(|| not_found(Catalogue::Directed, name, &self.directed))
    }

    pub fn get_directed_vector(&self, name: &str) -> Option<&Vector> {
        self.directed.get(name)
    }

    pub fn directed_vector_names(&self) -> Vec<&str> {
        self.directed.names()
    }

    pub fn add_test_vector(&mut self, name: impl Into<String>, vector: Vector) -> Result<(), GenError> {
        let name = name.into();
        self.check_len(Catalogue::Test, &name, &vector)?;
        self.test.insert(name, vector);
        Ok(())
    }

    pub fn remove_test_vector(&mut self, name: &str) -> Result<Vector, GenError> {
        let removed = self.test.remove(name);
        removed.ok_or_else(|| not_found(Catalogue::Test, name, &self.test))
    }

    pub fn get_test_vector(&self, name: &str) -> Option<&Vector> {
        self.test.get(name)
    }

    pub fn test_vector_names(&self) -> Vec<&str> {
        self.test.names()
    }

    pub fn directed(&self) -> &VectorCatalogue {
        &self.directed
    }

    pub fn test(&self) -> &VectorCatalogue {
        &self.test
    }

    /// Directed vector by name.
    pub fn vector_by_name(&self, name: &str) -> Result<Vector, GenError> {
        self.directed
            .get(name)
            .cloned()
            .ok_or_else(|| not_found(Catalogue::Directed, name, &self.directed))
    }

    /// Directed vector by insertion index.
    pub fn vector_by_index(&self, index: usize) -> Result<Vector, GenError> {
        self.directed
            .get_index(index)
            .map(|(_, v)| v.clone())
            .ok_or(GenError::IndexOutOfRange {
                index,
                len: self.directed.len(),
            })
    }

    fn check_len(&self, catalogue: Catalogue, name: &str, vector: &[Value]) -> Result<(), GenError> {
        if vector.len() != self.args.len() {
            return Err(GenError::LengthMismatch {
                catalogue,
                name: name.to_string(),
                got: vector.len(),
                expected: self.args.len(),
            });
        }
        Ok(())
    }

    // ─── Constraints ─────────────────────────────────────────────────

    pub fn add_constraint<F>(&mut self, f: F)
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.constraints.push(f);
    }

    pub fn add_named_constraint<F>(&mut self, label: impl Into<String>, f: F)
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.constraints.push_named(label, f);
    }

    pub fn clear_constraints(&mut self) {
        self.constraints.clear();
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Right arity and every constraint holds.
    pub fn validate_vector(&self, vector: &[Value]) -> bool {
        vector.len() == self.args.len() && self.constraints.evaluate(vector)
    }

    // ─── Settings & introspection ────────────────────────────────────

    pub fn set_always_include_directed(&mut self, include: bool) {
        self.always_include_directed = include;
    }

    pub fn includes_directed(&self) -> bool {
        self.always_include_directed
    }

    pub fn set_unbound_policy(&mut self, policy: UnboundPolicy) {
        self.unbound_policy = policy;
    }

    pub fn get_unbound_policy(&self) -> UnboundPolicy {
        self.unbound_policy
    }

    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    pub fn arg(&self, name: &str) -> Result<&ArgSpec, GenError> {
        self.args
            .iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| GenError::UnknownArgument(name.to_string()))
    }

    pub fn arg_names(&self) -> Vec<&str> {
        self.args.iter().map(ArgSpec::name).collect()
    }

    pub fn arg_kinds(&self) -> Vec<ValueKind> {
        self.args.iter().map(ArgSpec::value_kind).collect()
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    // ─── Generation ──────────────────────────────────────────────────

    /// One random tuple. With constraints, the whole tuple is redrawn until
    /// they hold, up to the source's retry budget.
    pub fn generate_vector(&self, src: &mut SeededSource) -> Result<Vector, GenError> {
        if self.constraints.is_empty() {
            return self.draw_tuple(src);
        }
        for _ in 0..src.max_retries() {
            let candidate = self.draw_tuple(src)?;
            if self.constraints.evaluate(&candidate) {
                return Ok(candidate);
            }
        }
        Err(GenError::exhausted(
            "vector satisfying constraints",
            src.max_retries(),
        ))
    }

    fn draw_tuple(&self, src: &mut SeededSource) -> Result<Vector, GenError> {
        self.args.iter().map(|arg| arg.generate(src)).collect()
    }

    /// Tuples for one invocation.
    pub fn generate_samples(&self, src: &mut SeededSource, selection: &Selection) -> Result<Vec<Vector>, GenError> {
        if let Some(filter) = &selection.filter {
            let vector = match filter {
                VectorFilter::ByName(name) => self.vector_by_name(name)?,
                VectorFilter::ByIndex(index) => self.vector_by_index(*index)?,
            };
            return Ok(vec![vector]);
        }

        match selection.mode {
            VectorMode::DirectedOnly => Ok(self.directed.vectors()),
            VectorMode::Test => Ok(self.test.vectors()),
            VectorMode::RandomOnly => self.draws(src, selection.count),
            VectorMode::All => {
                let mut out = self.directed.vectors();
                out.extend(self.draws(src, selection.count)?);
                Ok(out)
            }
            VectorMode::Mixed => {
                let mut out = if self.always_include_directed {
                    self.directed.vectors()
                } else {
                    Vec::new()
                };
                out.extend(self.draws(src, selection.count)?);
                Ok(out)
            }
        }
    }

    fn draws(&self, src: &mut SeededSource, count: SampleCount) -> Result<Vec<Vector>, GenError> {
        match count {
            SampleCount::Auto => self.generate_exhaustive(src),
            SampleCount::Count(n) => (0..n).map(|_| self.generate_vector(src)).collect(),
        }
    }

    /// Cartesian product of every sequence-bound argument, in argument
    /// order with the first argument varying slowest. Static arguments are
    /// substituted; other generator-bound arguments follow the
    /// [`UnboundPolicy`]. Rows failing a constraint are dropped.
    pub fn generate_exhaustive(&self, src: &mut SeededSource) -> Result<Vec<Vector>, GenError> {
        let mut slots = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            let slot = match (arg.static_value(), arg.generator().and_then(|g| g.as_sequence())) {
                (Some(v), _) => {
                    arg.check(v)?;
                    Slot::Fixed(v.clone())
                }
                (None, Some(seq)) => Slot::Sequence(seq),
                (None, None) => match self.unbound_policy {
                    UnboundPolicy::DrawOnce => Slot::Fixed(arg.generate(src)?),
                    UnboundPolicy::DrawPerRow => Slot::Draw(arg),
                },
            };
            slots.push(slot);
        }

        let axes: Vec<&SequenceGen> = slots
            .iter()
            .filter_map(|s| match s {
                Slot::Sequence(seq) => Some(*seq),
                _ => None,
            })
            .collect();
        if axes.is_empty() {
            return Err(GenError::NoSequenceArguments);
        }

        let mut rows = Vec::new();
        let mut cursor = vec![0usize; axes.len()];
        'product: loop {
            let mut axis = 0;
            let mut row = Vec::with_capacity(slots.len());
            for slot in &slots {
                let value = match slot {
                    Slot::Fixed(v) => v.clone(),
                    Slot::Sequence(seq) => {
                        let v = seq.items()[cursor[axis]].clone();
                        axis += 1;
                        v
                    }
                    Slot::Draw(arg) => arg.generate(src)?,
                };
                row.push(value);
            }
            if self.constraints.evaluate(&row) {
                rows.push(row);
            }

            // Advance the odometer; the last axis turns fastest.
            let mut k = axes.len();
            loop {
                if k == 0 {
                    break 'product;
                }
                k -= 1;
                cursor[k] += 1;
                if cursor[k] < axes[k].len() {
                    break;
                }
                cursor[k] = 0;
            }
        }
        Ok(rows)
    }

    pub fn metadata(&self) -> ParamSetMetadata {
        ParamSetMetadata {
            arguments: self.args.iter().map(ArgSpec::metadata).collect(),
            directed_vectors: CatalogueMetadata::from(&self.directed),
            test_vectors: CatalogueMetadata::from(&self.test),
            constraints: self.constraints.labels().into_iter().map(str::to_string).collect(),
            always_include_directed: self.always_include_directed,
            unbound_policy: self.unbound_policy,
        }
    }
}

fn not_found(catalogue: Catalogue, name: &str, cat: &VectorCatalogue) -> GenError {
    GenError::NotFound {
        catalogue,
        name: name.to_string(),
        available: cat.names().join(", "),
    }
}
