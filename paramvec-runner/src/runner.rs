//! Invocation resolution: from a strategy name plus invocation parameters to
//! the concrete vectors a test run executes.

use std::collections::{BTreeMap, BTreeSet};

use paramvec_core::{
    GenError, SampleCount, SeededSource, Selection, UnboundPolicy, Value, Vector, VectorFilter,
    VectorMode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::registry::{Strategy, StrategyOutput, StrategyRegistry};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("generation error: {0}")]
    Generation(#[from] GenError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("strategy '{0}' is not registered")]
    UnknownStrategy(String),
    #[error("shape mismatch in '{strategy}': {detail}")]
    ShapeMismatch { strategy: String, detail: String },
}

/// What to do when a name or index filter matches no directed vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFilterPolicy {
    /// Fail the resolution.
    #[default]
    Error,
    /// Resolve to zero vectors.
    Empty,
}

/// Parameters of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invocation {
    pub count: SampleCount,
    pub mode: VectorMode,
    pub filter: Option<VectorFilter>,
    /// Reseed the source before generating; `None` keeps its current seed.
    pub seed: Option<u64>,
    pub max_retries: Option<u32>,
    pub unbound_policy: Option<UnboundPolicy>,
    pub missing_filter: MissingFilterPolicy,
}

impl Invocation {
    pub fn new(count: impl Into<SampleCount>, mode: VectorMode) -> Self {
        Self {
            count: count.into(),
            mode,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_filter(mut self, filter: VectorFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn with_unbound_policy(mut self, policy: UnboundPolicy) -> Self {
        self.unbound_policy = Some(policy);
        self
    }

    pub fn with_missing_filter(mut self, policy: MissingFilterPolicy) -> Self {
        self.missing_filter = policy;
        self
    }

    pub fn selection(&self) -> Selection {
        Selection {
            count: self.count,
            mode: self.mode,
            filter: self.filter.clone(),
        }
    }
}

/// Resolved vectors of one strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStrategy {
    pub name: String,
    pub arg_names: Vec<String>,
    pub vectors: Vec<Vector>,
    /// Seed the source held when generation started.
    pub seed: u64,
    /// The factory returned ready-made samples.
    pub legacy: bool,
}

/// One vector as `argument name → value`.
pub type Record = BTreeMap<String, Value>;

impl ResolvedStrategy {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Convert vectors to named records. `fields` must name exactly the
    /// argument set, in any order.
    pub fn records(&self, fields: &[&str]) -> Result<Vec<Record>, RunError> {
        if let Some(dup) = duplicate_name(&self.arg_names) {
            return Err(RunError::ShapeMismatch {
                strategy: self.name.clone(),
                detail: format!("argument name '{dup}' appears more than once"),
            });
        }
        let expected: BTreeSet<&str> = self.arg_names.iter().map(String::as_str).collect();
        let given: BTreeSet<&str> = fields.iter().copied().collect();
        if expected != given {
            let missing: Vec<&str> = expected.difference(&given).copied().collect();
            let extra: Vec<&str> = given.difference(&expected).copied().collect();
            return Err(RunError::ShapeMismatch {
                strategy: self.name.clone(),
                detail: format!(
                    "record fields do not match arguments (missing: [{}], extra: [{}])",
                    missing.join(", "),
                    extra.join(", ")
                ),
            });
        }
        Ok(self
            .vectors
            .iter()
            .map(|v| self.arg_names.iter().cloned().zip(v.iter().cloned()).collect())
            .collect())
    }
}

fn duplicate_name(names: &[String]) -> Option<&str> {
    let mut seen = BTreeSet::new();
    names.iter().map(String::as_str).find(|n| !seen.insert(*n))
}

/// Resolve one strategy.
///
/// The source is reseeded (when the invocation carries a seed) and refreshed
/// before the factory runs, so equal seeds give equal vectors. Legacy outputs
/// are shape-checked and returned as-is: mode, count and filter do not apply.
///
/// A `max_retries` override holds for this call only; the source's own
/// budget is restored afterwards.
pub fn resolve(
    registry: &StrategyRegistry,
    name: &str,
    invocation: &Invocation,
    src: &mut SeededSource,
) -> Result<ResolvedStrategy, RunError> {
    let strategy = registry
        .get(name)
        .ok_or_else(|| RunError::UnknownStrategy(name.to_string()))?;

    let previous_retries = src.max_retries();
    if let Some(max_retries) = invocation.max_retries {
        src.set_max_retries(max_retries);
    }
    let outcome = resolve_with(strategy, name, invocation, src);
    src.set_max_retries(previous_retries);
    outcome
}

fn resolve_with(
    strategy: &Strategy,
    name: &str,
    invocation: &Invocation,
    src: &mut SeededSource,
) -> Result<ResolvedStrategy, RunError> {
    src.reseed(invocation.seed);
    src.refresh();
    let seed = src.current_seed();
    tracing::debug!(
        strategy = name,
        seed,
        count = %invocation.count,
        mode = %invocation.mode,
        "resolving strategy"
    );

    let resolved = match strategy.build(invocation.count)? {
        StrategyOutput::Legacy { arg_names, samples } => {
            if let Some(dup) = duplicate_name(&arg_names) {
                return Err(RunError::ShapeMismatch {
                    strategy: name.to_string(),
                    detail: format!("argument name '{dup}' appears more than once"),
                });
            }
            if let Some((i, bad)) = samples
                .iter()
                .enumerate()
                .find(|(_, s)| s.len() != arg_names.len())
            {
                return Err(RunError::ShapeMismatch {
                    strategy: name.to_string(),
                    detail: format!(
                        "sample {i} has {} values, expected {} ({})",
                        bad.len(),
                        arg_names.len(),
                        arg_names.join(", ")
                    ),
                });
            }
            ResolvedStrategy {
                name: name.to_string(),
                arg_names,
                vectors: samples,
                seed,
                legacy: true,
            }
        }
        StrategyOutput::Structured(mut set) => {
            if let Some(policy) = invocation.unbound_policy {
                set.set_unbound_policy(policy);
            }
            let vectors = match set.generate_samples(src, &invocation.selection()) {
                Ok(vectors) => vectors,
                Err(err @ (GenError::NotFound { .. } | GenError::IndexOutOfRange { .. }))
                    if invocation.missing_filter == MissingFilterPolicy::Empty =>
                {
                    tracing::warn!(strategy = name, error = %err, "filter matched nothing, resolving to no vectors");
                    Vec::new()
                }
                Err(err) => return Err(err.into()),
            };
            ResolvedStrategy {
                name: name.to_string(),
                arg_names: set.arg_names().into_iter().map(str::to_string).collect(),
                vectors,
                seed,
                legacy: false,
            }
        }
    };

    tracing::info!(
        strategy = name,
        seed,
        vectors = resolved.len(),
        legacy = resolved.legacy,
        "resolved strategy"
    );
    Ok(resolved)
}
