//! Parallel resolution of every registered strategy.
//!
//! Each strategy gets its own source derived from the master seed through a
//! [`SeedHierarchy`], so results do not depend on thread count or on the
//! order rayon schedules the work.

use rayon::prelude::*;

use paramvec_core::SeedHierarchy;

use crate::registry::StrategyRegistry;
use crate::runner::{resolve, Invocation, ResolvedStrategy, RunError};

/// Outcome of one strategy in a batch.
#[derive(Debug)]
pub struct BatchEntry {
    pub name: String,
    pub outcome: Result<ResolvedStrategy, RunError>,
}

/// Outcomes of a batch, in registry (name) order.
#[derive(Debug)]
pub struct BatchResults {
    pub master_seed: u64,
    pub entries: Vec<BatchEntry>,
}

impl BatchResults {
    pub fn successes(&self) -> impl Iterator<Item = &ResolvedStrategy> {
        self.entries.iter().filter_map(|e| e.outcome.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &RunError)> {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.as_ref().err().map(|err| (e.name.as_str(), err)))
    }

    pub fn total_vectors(&self) -> usize {
        self.successes().map(ResolvedStrategy::len).sum()
    }

    /// All resolutions, or the first failure in name order.
    pub fn into_result(self) -> Result<Vec<ResolvedStrategy>, RunError> {
        self.entries.into_iter().map(|e| e.outcome).collect()
    }
}

/// Resolve every registered strategy in parallel.
///
/// The invocation's own seed is ignored; each strategy is seeded with
/// `sub_seed(name, 0)` of `master_seed`.
pub fn resolve_all(registry: &StrategyRegistry, invocation: &Invocation, master_seed: u64) -> BatchResults {
    let hierarchy = SeedHierarchy::new(master_seed);
    let invocation = Invocation {
        seed: None,
        ..invocation.clone()
    };
    let names = registry.names();
    tracing::info!(strategies = names.len(), master_seed, "resolving batch");

    let entries: Vec<BatchEntry> = names
        .par_iter()
        .map(|name| {
            let mut src = hierarchy.source_for(name, 0);
            BatchEntry {
                name: name.to_string(),
                outcome: resolve(registry, name, &invocation, &mut src),
            }
        })
        .collect();

    let results = BatchResults {
        master_seed,
        entries,
    };
    let failed = results.failures().count();
    if failed > 0 {
        tracing::warn!(failed, "batch finished with failures");
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StrategyOutput;
    use paramvec_core::{vector, ArgSpec, IntegerGen, ParamSet, VectorMode};

    fn registry() -> StrategyRegistry {
        let mut registry = StrategyRegistry::new();
        for name in ["a", "b", "c", "d"] {
            registry.register_nullary(name, || {
                ParamSet::new(vec![ArgSpec::random("x", IntegerGen::new(0, 1_000_000)?)])
            });
        }
        registry.register_nullary("broken", || {
            Ok(StrategyOutput::legacy(["x", "y"], vec![vector![1]]))
        });
        registry
    }

    #[test]
    fn batch_is_deterministic() {
        let inv = Invocation::new(10, VectorMode::RandomOnly);
        let first = resolve_all(&registry(), &inv, 42);
        let second = resolve_all(&registry(), &inv, 42);
        let a: Vec<_> = first.successes().map(|r| r.vectors.clone()).collect();
        let b: Vec<_> = second.successes().map(|r| r.vectors.clone()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn strategies_get_independent_seeds() {
        let inv = Invocation::new(10, VectorMode::RandomOnly).with_seed(1);
        let results = resolve_all(&registry(), &inv, 42);
        let seeds: Vec<u64> = results.successes().map(|r| r.seed).collect();
        assert_eq!(seeds.len(), 4);
        assert!(seeds.iter().all(|s| *s != 1));
        let hierarchy = SeedHierarchy::new(42);
        assert_eq!(seeds[0], hierarchy.sub_seed("a", 0));
    }

    #[test]
    fn failures_are_reported_per_strategy() {
        let results = resolve_all(&registry(), &Invocation::default(), 7);
        let failures: Vec<&str> = results.failures().map(|(name, _)| name).collect();
        assert_eq!(failures, vec!["broken"]);
        assert_eq!(results.total_vectors(), 40);
        assert!(results.into_result().is_err());
    }
}
