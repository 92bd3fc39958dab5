//! Serializable descriptions of arguments and parameter sets.
//!
//! Everything is rendered to display strings so the output is stable JSON
//! regardless of value types.

use crate::catalogue::VectorCatalogue;
use crate::generator::GeneratorKind;
use crate::selection::UnboundPolicy;
use crate::value::{Value, ValueKind};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorMetadata {
    pub kind: GeneratorKind,
    pub value_kind: ValueKind,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgMetadata {
    pub name: String,
    pub description: String,
    pub value_kind: ValueKind,
    pub has_static_value: bool,
    pub static_value: Option<String>,
    pub generator: Option<GeneratorMetadata>,
    pub directed_values: Vec<String>,
    pub has_test_values: bool,
    pub test_values: Vec<String>,
    pub always_include_directed: bool,
    pub has_validator: bool,
}

/// A catalogue as `name → [display strings]`, serialized as a JSON object
/// in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogueMetadata(pub Vec<(String, Vec<String>)>);

impl CatalogueMetadata {
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&VectorCatalogue> for CatalogueMetadata {
    fn from(cat: &VectorCatalogue) -> Self {
        CatalogueMetadata(
            cat.iter()
                .map(|(name, v)| (name.to_string(), v.iter().map(Value::to_string).collect()))
                .collect(),
        )
    }
}

impl Serialize for CatalogueMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSetMetadata {
    pub arguments: Vec<ArgMetadata>,
    pub directed_vectors: CatalogueMetadata,
    pub test_vectors: CatalogueMetadata,
    pub constraints: Vec<String>,
    pub always_include_directed: bool,
    pub unbound_policy: UnboundPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector;

    #[test]
    fn catalogue_serializes_in_insertion_order() {
        let mut cat = VectorCatalogue::new();
        cat.insert("zeta", vector![1, 2.5]);
        cat.insert("alpha", vector!["x", true]);
        let meta = CatalogueMetadata::from(&cat);
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"zeta":["1","2.5"],"alpha":["x","true"]}"#);
        assert_eq!(meta.get("alpha").unwrap(), &["x".to_string(), "true".to_string()]);
    }
}
