//! Value generators.
//!
//! Each generator is a small immutable description of a domain (range,
//! choice list, weighted ranges, charset, sequence) plus an optional
//! predicate. Drawing goes through a borrowed [`SeededSource`], which owns
//! the stream and the retry budget. Domain errors are raised when the
//! generator is built, so a constructed generator only fails at draw time
//! through predicate exhaustion.

pub mod choice;
pub mod numeric;
pub mod sequence;
pub mod string;
pub mod weighted;

pub use choice::{ChoiceGen, EnumGen, EnumType};
pub use numeric::{BooleanGen, FloatGen, IntegerGen};
pub use sequence::SequenceGen;
pub use string::StringGen;
pub use weighted::{WeightedFloatGen, WeightedIntegerGen};

use crate::error::GenError;
use crate::source::SeededSource;
use crate::value::{Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Common interface of every concrete generator.
pub trait ValueGenerator {
    type Output: Into<Value>;

    fn generate(&self, src: &mut SeededSource) -> Result<Self::Output, GenError>;

    /// Semantic type of the produced values.
    fn value_kind(&self) -> ValueKind;

    /// Display-ready description of the domain, for metadata export.
    fn details(&self) -> BTreeMap<String, String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    Integer,
    Float,
    Boolean,
    Choice,
    Enum,
    WeightedInteger,
    WeightedFloat,
    String,
    Sequence,
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeneratorKind::Integer => "integer",
            GeneratorKind::Float => "float",
            GeneratorKind::Boolean => "boolean",
            GeneratorKind::Choice => "choice",
            GeneratorKind::Enum => "enum",
            GeneratorKind::WeightedInteger => "weighted_integer",
            GeneratorKind::WeightedFloat => "weighted_float",
            GeneratorKind::String => "string",
            GeneratorKind::Sequence => "sequence",
        };
        f.write_str(name)
    }
}

/// Any generator an argument can be bound to.
#[derive(Debug, Clone)]
pub enum Generator {
    Integer(IntegerGen),
    Float(FloatGen),
    Boolean(BooleanGen),
    Choice(ChoiceGen),
    Enum(EnumGen),
    WeightedInteger(WeightedIntegerGen),
    WeightedFloat(WeightedFloatGen),
    String(StringGen),
    Sequence(SequenceGen),
}

impl Generator {
    pub fn generate(&self, src: &mut SeededSource) -> Result<Value, GenError> {
        match self {
            Generator::Integer(g) => g.generate(src).map(Value::from),
            Generator::Float(g) => g.generate(src).map(Value::from),
            Generator::Boolean(g) => g.generate(src).map(Value::from),
            Generator::Choice(g) => g.generate(src),
            Generator::Enum(g) => g.generate(src).map(Value::from),
            Generator::WeightedInteger(g) => g.generate(src).map(Value::from),
            Generator::WeightedFloat(g) => g.generate(src).map(Value::from),
            Generator::String(g) => g.generate(src).map(Value::from),
            Generator::Sequence(g) => g.generate(src),
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            Generator::Integer(_) => GeneratorKind::Integer,
            Generator::Float(_) => GeneratorKind::Float,
            Generator::Boolean(_) => GeneratorKind::Boolean,
            Generator::Choice(_) => GeneratorKind::Choice,
            Generator::Enum(_) => GeneratorKind::Enum,
            Generator::WeightedInteger(_) => GeneratorKind::WeightedInteger,
            Generator::WeightedFloat(_) => GeneratorKind::WeightedFloat,
            Generator::String(_) => GeneratorKind::String,
            Generator::Sequence(_) => GeneratorKind::Sequence,
        }
    }

    pub fn value_kind(&self) -> ValueKind {
        match self {
            Generator::Integer(g) => g.value_kind(),
            Generator::Float(g) => g.value_kind(),
            Generator::Boolean(g) => g.value_kind(),
            Generator::Choice(g) => g.value_kind(),
            Generator::Enum(g) => g.value_kind(),
            Generator::WeightedInteger(g) => g.value_kind(),
            Generator::WeightedFloat(g) => g.value_kind(),
            Generator::String(g) => g.value_kind(),
            Generator::Sequence(g) => g.value_kind(),
        }
    }

    pub fn details(&self) -> BTreeMap<String, String> {
        match self {
            Generator::Integer(g) => g.details(),
            Generator::Float(g) => g.details(),
            Generator::Boolean(g) => g.details(),
            Generator::Choice(g) => g.details(),
            Generator::Enum(g) => g.details(),
            Generator::WeightedInteger(g) => g.details(),
            Generator::WeightedFloat(g) => g.details(),
            Generator::String(g) => g.details(),
            Generator::Sequence(g) => g.details(),
        }
    }

    /// The sequence, when this generator enumerates a finite ordered domain.
    pub fn as_sequence(&self) -> Option<&SequenceGen> {
        match self {
            Generator::Sequence(g) => Some(g),
            _ => None,
        }
    }
}

macro_rules! impl_from_gen {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Generator {
                fn from(g: $ty) -> Self {
                    Generator::$variant(g)
                }
            }
        )+
    };
}

impl_from_gen! {
    Integer => IntegerGen,
    Float => FloatGen,
    Boolean => BooleanGen,
    Choice => ChoiceGen,
    Enum => EnumGen,
    WeightedInteger => WeightedIntegerGen,
    WeightedFloat => WeightedFloatGen,
    String => StringGen,
    Sequence => SequenceGen,
}

/// Common value kind of a list, or `Any` when empty or mixed.
pub(crate) fn common_kind(items: &[Value]) -> ValueKind {
    let mut kinds = items.iter().map(Value::kind);
    match kinds.next() {
        Some(first) if kinds.all(|k| k == first) => first,
        _ => ValueKind::Any,
    }
}

/// `[a, b, c]` display form of a list of values.
pub(crate) fn display_list(items: &[Value]) -> String {
    Value::List(items.to_vec()).to_string()
}
