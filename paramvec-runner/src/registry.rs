//! Strategy registry.
//!
//! A strategy is a named factory that builds the parameter set for one test.
//! Factories either return a structured [`ParamSet`] (the engine composes the
//! vectors) or a legacy pair of argument names and ready-made samples.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use paramvec_core::{GenError, ParamSet, ParamSetMetadata, SampleCount, Vector};
use serde::Serialize;

/// What a factory returns.
#[derive(Debug, Clone)]
pub enum StrategyOutput {
    Structured(ParamSet),
    Legacy {
        arg_names: Vec<String>,
        samples: Vec<Vector>,
    },
}

impl StrategyOutput {
    pub fn legacy<S: Into<String>>(arg_names: impl IntoIterator<Item = S>, samples: Vec<Vector>) -> Self {
        StrategyOutput::Legacy {
            arg_names: arg_names.into_iter().map(Into::into).collect(),
            samples,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, StrategyOutput::Legacy { .. })
    }
}

impl From<ParamSet> for StrategyOutput {
    fn from(set: ParamSet) -> Self {
        StrategyOutput::Structured(set)
    }
}

type Factory = Arc<dyn Fn(SampleCount) -> Result<StrategyOutput, GenError> + Send + Sync>;

/// A registered strategy.
#[derive(Clone)]
pub struct Strategy {
    name: String,
    description: String,
    factory: Factory,
}

impl Strategy {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn describe(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// Run the factory for the requested sample count.
    pub fn build(&self, count: SampleCount) -> Result<StrategyOutput, GenError> {
        (self.factory)(count)
    }

    pub fn metadata(&self) -> Result<StrategyMetadata, GenError> {
        let (kind, arg_names, param_set, legacy_samples) = match self.build(SampleCount::default())? {
            StrategyOutput::Structured(set) => {
                let names = set.arg_names().into_iter().map(str::to_string).collect();
                ("structured", names, Some(set.metadata()), None)
            }
            StrategyOutput::Legacy { arg_names, samples } => {
                ("legacy", arg_names, None, Some(samples.len()))
            }
        };
        Ok(StrategyMetadata {
            name: self.name.clone(),
            description: self.description.clone(),
            kind: kind.to_string(),
            arg_names,
            param_set,
            legacy_samples,
        })
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Exported description of one strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyMetadata {
    pub name: String,
    pub description: String,
    /// `structured` or `legacy`.
    pub kind: String,
    pub arg_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_set: Option<ParamSetMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_samples: Option<usize>,
}

/// Name → strategy map, listed in name order.
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    strategies: BTreeMap<String, Strategy>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory that receives the requested sample count.
    /// A later registration under the same name replaces the earlier one.
    pub fn register<F, O>(&mut self, name: impl Into<String>, factory: F) -> &mut Strategy
    where
        F: Fn(SampleCount) -> Result<O, GenError> + Send + Sync + 'static,
        O: Into<StrategyOutput>,
    {
        let factory: Factory = Arc::new(move |count| factory(count).map(Into::into));
        self.insert(name.into(), factory)
    }

    /// Register a factory that ignores the sample count.
    pub fn register_nullary<F, O>(&mut self, name: impl Into<String>, factory: F) -> &mut Strategy
    where
        F: Fn() -> Result<O, GenError> + Send + Sync + 'static,
        O: Into<StrategyOutput>,
    {
        let factory: Factory = Arc::new(move |_| factory().map(Into::into));
        self.insert(name.into(), factory)
    }

    fn insert(&mut self, name: String, factory: Factory) -> &mut Strategy {
        let strategy = Strategy {
            name: name.clone(),
            description: String::new(),
            factory,
        };
        match self.strategies.entry(name) {
            Entry::Occupied(mut slot) => {
                tracing::debug!(strategy = %slot.key(), "replacing registered strategy");
                slot.insert(strategy);
                slot.into_mut()
            }
            Entry::Vacant(slot) => {
                tracing::debug!(strategy = %slot.key(), "registered strategy");
                slot.insert(strategy)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Strategy> {
        self.strategies.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Strategy> {
        self.strategies.values()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Metadata for every strategy, in name order.
    pub fn metadata(&self) -> Result<Vec<StrategyMetadata>, GenError> {
        self.strategies.values().map(Strategy::metadata).collect()
    }
}
