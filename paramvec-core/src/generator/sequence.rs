//! Finite ordered domains.
//!
//! A sequence is filtered once when built. Random draws pick uniformly with
//! replacement; exhaustive composition enumerates [`SequenceGen::items`] in
//! order.

use super::{common_kind, display_list, ValueGenerator};
use crate::error::GenError;
use crate::source::SeededSource;
use crate::value::{Value, ValueKind};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceGen {
    items: Vec<Value>,
}

impl SequenceGen {
    pub fn new<I, V>(items: I) -> Result<Self, GenError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items: Vec<Value> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(GenError::EmptyDomain("sequence is empty".into()));
        }
        Ok(Self { items })
    }

    /// Keep only the items `pred` accepts.
    pub fn filtered<I, V, F>(items: I, pred: F) -> Result<Self, GenError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
        F: Fn(&Value) -> bool,
    {
        let items: Vec<Value> = items
            .into_iter()
            .map(Into::into)
            .filter(|v| pred(v))
            .collect();
        if items.is_empty() {
            return Err(GenError::EmptyDomain(
                "sequence is empty after filtering by predicate".into(),
            ));
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ValueGenerator for SequenceGen {
    type Output = Value;

    fn generate(&self, src: &mut SeededSource) -> Result<Value, GenError> {
        src.choice(&self.items)
    }

    fn value_kind(&self) -> ValueKind {
        common_kind(&self.items)
    }

    fn details(&self) -> BTreeMap<String, String> {
        let mut d = BTreeMap::new();
        d.insert("items".into(), display_list(&self.items));
        d.insert("len".into(), self.items.len().to_string());
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filtering_happens_once() {
        let gen = SequenceGen::filtered(1..=10, |v| v.as_int().is_some_and(|x| x % 3 == 0)).unwrap();
        assert_eq!(gen.items(), &[Value::Int(3), Value::Int(6), Value::Int(9)]);
    }

    #[test]
    fn empty_after_filter_rejected() {
        let err = SequenceGen::filtered([1, 2], |_| false).unwrap_err();
        assert!(matches!(err, GenError::EmptyDomain(_)));
        let none: Vec<i64> = vec![];
        assert!(SequenceGen::new(none).is_err());
    }

    #[test]
    fn draws_with_replacement_from_items() {
        let gen = SequenceGen::new(["x", "y"]).unwrap();
        let mut src = SeededSource::new(4);
        let draws: Vec<Value> = (0..20).map(|_| gen.generate(&mut src).unwrap()).collect();
        assert!(draws.iter().all(|v| gen.items().contains(v)));
        assert_eq!(gen.value_kind(), ValueKind::Str);
    }
}
