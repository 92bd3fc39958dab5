//! Choice lists and enum members.

use super::{common_kind, display_list, ValueGenerator};
use crate::error::GenError;
use crate::predicate::Pred;
use crate::source::SeededSource;
use crate::value::{EnumMember, Value, ValueKind};
use std::collections::{BTreeMap, HashSet};

/// Uniform pick from a fixed, non-empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceGen {
    items: Vec<Value>,
}

impl ChoiceGen {
    pub fn new<I, V>(items: I) -> Result<Self, GenError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items: Vec<Value> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(GenError::EmptyDomain("choice list is empty".into()));
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

impl ValueGenerator for ChoiceGen {
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
        d
    }
}

/// A closed, named set of members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    members: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Result<Self, GenError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let members: Vec<String> = members.into_iter().map(Into::into).collect();
        if members.is_empty() {
            return Err(GenError::EmptyDomain(format!("enum {name} has no members")));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = members.iter().find(|m| !seen.insert(m.as_str())) {
            return Err(GenError::InvalidArgument(format!(
                "enum {name} lists member '{dup}' twice"
            )));
        }
        Ok(Self { name, members })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }

    /// The named member as a value, if it belongs to this enum.
    pub fn member(&self, member: &str) -> Result<EnumMember, GenError> {
        if self.contains(member) {
            Ok(EnumMember::new(self.name.clone(), member))
        } else {
            Err(GenError::UnknownEnumMember {
                enum_name: self.name.clone(),
                member: member.to_string(),
            })
        }
    }
}

/// Enum member draw: uniform over all members, or over exactly the weighted
/// members when weights are given.
#[derive(Debug, Clone)]
pub struct EnumGen {
    enum_type: EnumType,
    weights: Option<Vec<(String, f64)>>,
    pred: Option<Pred<EnumMember>>,
}

impl EnumGen {
    pub fn new(enum_type: EnumType) -> Self {
        Self {
            enum_type,
            weights: None,
            pred: None,
        }
    }

    pub fn weighted<I, S>(enum_type: EnumType, weights: I) -> Result<Self, GenError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let weights: Vec<(String, f64)> = weights
            .into_iter()
            .map(|(m, w)| (m.into(), w))
            .collect();
        if weights.is_empty() {
            return Err(GenError::EmptyDomain(format!(
                "no weighted members for enum {}",
                enum_type.name()
            )));
        }
        for (member, weight) in &weights {
            enum_type.member(member)?;
            if !(weight.is_finite() && *weight > 0.0) {
                return Err(GenError::InvalidArgument(format!(
                    "weight for {}.{member} must be positive and finite, got {weight}",
                    enum_type.name()
                )));
            }
        }
        Ok(Self {
            enum_type,
            weights: Some(weights),
            pred: None,
        })
    }

    pub fn with_predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&EnumMember) -> bool + Send + Sync + 'static,
    {
        self.pred = Some(Pred::new(f));
        self
    }

    pub fn enum_type(&self) -> &EnumType {
        &self.enum_type
    }
}

impl ValueGenerator for EnumGen {
    type Output = EnumMember;

    fn generate(&self, src: &mut SeededSource) -> Result<EnumMember, GenError> {
        let name = self.enum_type.name();
        src.draw_until("enum member", self.pred.as_ref(), |src| {
            let member = match &self.weights {
                Some(weights) => src.pick_weighted(weights, |(_, w)| *w).0.clone(),
                None => src.choice(self.enum_type.members())?,
            };
            Ok(EnumMember::new(name, member))
        })
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Enum
    }

    fn details(&self) -> BTreeMap<String, String> {
        let mut d = BTreeMap::new();
        d.insert("enum".into(), self.enum_type.name().to_string());
        d.insert("members".into(), format!("[{}]", self.enum_type.members().join(", ")));
        if let Some(weights) = &self.weights {
            let rendered: Vec<String> = weights.iter().map(|(m, w)| format!("{m}: {w:?}")).collect();
            d.insert("weights".into(), format!("{{{}}}", rendered.join(", ")));
        }
        d
    }
}
