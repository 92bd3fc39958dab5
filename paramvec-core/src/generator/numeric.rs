//! Integer, float and boolean generators.

use super::ValueGenerator;
use crate::error::GenError;
use crate::predicate::Pred;
use crate::source::{check_finite, SeededSource};
use crate::value::ValueKind;
use std::collections::BTreeMap;

/// Default integer domain: the signed 32-bit range.
pub const DEFAULT_INT_MIN: i64 = i32::MIN as i64;
pub const DEFAULT_INT_MAX: i64 = i32::MAX as i64;

/// Uniform integer in `[min, max]`.
#[derive(Debug, Clone)]
pub struct IntegerGen {
    min: i64,
    max: i64,
    pred: Option<Pred<i64>>,
}

impl IntegerGen {
    pub fn new(min: i64, max: i64) -> Result<Self, GenError> {
        if min > max {
            return Err(GenError::InvalidArgument(format!(
                "integer min {min} exceeds max {max}"
            )));
        }
        Ok(Self {
            min,
            max,
            pred: None,
        })
    }

    pub fn with_predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&i64) -> bool + Send + Sync + 'static,
    {
        self.pred = Some(Pred::new(f));
        self
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

impl Default for IntegerGen {
    fn default() -> Self {
        Self {
            min: DEFAULT_INT_MIN,
            max: DEFAULT_INT_MAX,
            pred: None,
        }
    }
}

impl ValueGenerator for IntegerGen {
    type Output = i64;

    fn generate(&self, src: &mut SeededSource) -> Result<i64, GenError> {
        src.integer(self.min, self.max, self.pred.as_ref())
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Int
    }

    fn details(&self) -> BTreeMap<String, String> {
        let mut d = BTreeMap::new();
        d.insert("min".into(), self.min.to_string());
        d.insert("max".into(), self.max.to_string());
        d
    }
}

/// Uniform float in `[min, max]`. Reversed bounds are swapped.
#[derive(Debug, Clone)]
pub struct FloatGen {
    min: f64,
    max: f64,
    pred: Option<Pred<f64>>,
}

impl FloatGen {
    pub fn new(min: f64, max: f64) -> Result<Self, GenError> {
        check_finite(min, max)?;
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        Ok(Self {
            min,
            max,
            pred: None,
        })
    }

    pub fn with_predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&f64) -> bool + Send + Sync + 'static,
    {
        self.pred = Some(Pred::new(f));
        self
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for FloatGen {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            pred: None,
        }
    }
}

impl ValueGenerator for FloatGen {
    type Output = f64;

    fn generate(&self, src: &mut SeededSource) -> Result<f64, GenError> {
        src.float(self.min, self.max, self.pred.as_ref())
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Float
    }

    fn details(&self) -> BTreeMap<String, String> {
        let mut d = BTreeMap::new();
        d.insert("min".into(), format!("{:?}", self.min));
        d.insert("max".into(), format!("{:?}", self.max));
        d
    }
}

/// Bernoulli draw with probability `p` of `true`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BooleanGen {
    probability: f64,
}

impl BooleanGen {
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Default for BooleanGen {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl ValueGenerator for BooleanGen {
    type Output = bool;

    fn generate(&self, src: &mut SeededSource) -> Result<bool, GenError> {
        Ok(src.boolean(self.probability))
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Bool
    }

    fn details(&self) -> BTreeMap<String, String> {
        let mut d = BTreeMap::new();
        d.insert("probability".into(), format!("{:?}", self.probability));
        d
    }
}
