//! Weighted range generators.
//!
//! A draw first picks one range with probability proportional to its weight,
//! then draws uniformly inside it. Weights need not sum to one.

use super::ValueGenerator;
use crate::error::GenError;
use crate::predicate::Pred;
use crate::source::{check_finite, check_weights, SeededSource, WeightedRange};
use crate::value::ValueKind;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct WeightedIntegerGen {
    ranges: Vec<WeightedRange<i64>>,
    pred: Option<Pred<i64>>,
}

impl WeightedIntegerGen {
    /// Ranges as `(min, max, weight)` triples.
    pub fn new(ranges: impl IntoIterator<Item = (i64, i64, f64)>) -> Result<Self, GenError> {
        let ranges: Vec<WeightedRange<i64>> = ranges
            .into_iter()
            .map(|(min, max, weight)| WeightedRange::new(min, max, weight))
            .collect();
        check_weights(&ranges)?;
        if let Some(r) = ranges.iter().find(|r| r.min > r.max) {
            return Err(GenError::InvalidArgument(format!(
                "weighted range min {} exceeds max {}",
                r.min, r.max
            )));
        }
        Ok(Self { ranges, pred: None })
    }

    pub fn with_predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&i64) -> bool + Send + Sync + 'static,
    {
        self.pred = Some(Pred::new(f));
        self
    }

    pub fn ranges(&self) -> &[WeightedRange<i64>] {
        &self.ranges
    }
}

impl ValueGenerator for WeightedIntegerGen {
    type Output = i64;

    fn generate(&self, src: &mut SeededSource) -> Result<i64, GenError> {
        src.weighted_integer(&self.ranges, self.pred.as_ref())
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Int
    }

    fn details(&self) -> BTreeMap<String, String> {
        let rendered: Vec<String> = self
            .ranges
            .iter()
            .map(|r| format!("[{}, {}]: {:?}", r.min, r.max, r.weight))
            .collect();
        let mut d = BTreeMap::new();
        d.insert("ranges".into(), rendered.join(", "));
        d
    }
}

#[derive(Debug, Clone)]
pub struct WeightedFloatGen {
    ranges: Vec<WeightedRange<f64>>,
    pred: Option<Pred<f64>>,
}

impl WeightedFloatGen {
    /// Ranges as `(min, max, weight)` triples; reversed bounds are swapped.
    pub fn new(ranges: impl IntoIterator<Item = (f64, f64, f64)>) -> Result<Self, GenError> {
        let ranges: Vec<WeightedRange<f64>> = ranges
            .into_iter()
            .map(|(a, b, weight)| {
                let (min, max) = if a > b { (b, a) } else { (a, b) };
                WeightedRange::new(min, max, weight)
            })
            .collect();
        check_weights(&ranges)?;
        for r in &ranges {
            check_finite(r.min, r.max)?;
        }
        Ok(Self { ranges, pred: None })
    }

    pub fn with_predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&f64) -> bool + Send + Sync + 'static,
    {
        self.pred = Some(Pred::new(f));
        self
    }

    pub fn ranges(&self) -> &[WeightedRange<f64>] {
        &self.ranges
    }
}

impl ValueGenerator for WeightedFloatGen {
    type Output = f64;

    fn generate(&self, src: &mut SeededSource) -> Result<f64, GenError> {
        src.weighted_float(&self.ranges, self.pred.as_ref())
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Float
    }

    fn details(&self) -> BTreeMap<String, String> {
        let rendered: Vec<String> = self
            .ranges
            .iter()
            .map(|r| format!("[{:?}, {:?}]: {:?}", r.min, r.max, r.weight))
            .collect();
        let mut d = BTreeMap::new();
        d.insert("ranges".into(), rendered.join(", "));
        d
    }
}
