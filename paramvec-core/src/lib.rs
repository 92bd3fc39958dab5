//! paramvec core: sample generation for parametrized tests.
//!
//! This crate contains the generation engine:
//! - Dynamic values and tuples (`Value`, `Vector`)
//! - Seeded random source with bounded rejection sampling
//! - BLAKE3 seed hierarchy for independent per-strategy sources
//! - Primitive, weighted, string, enum and sequence generators
//! - Argument descriptors with static, generated and directed values
//! - Vector composition over directed/test catalogues and constraints
//! - Serializable metadata for export

pub mod arg;
pub mod catalogue;
pub mod constraint;
pub mod error;
pub mod generator;
pub mod metadata;
pub mod param_set;
pub mod predicate;
pub mod rng;
pub mod selection;
pub mod source;
pub mod value;

pub use arg::{ArgBuilder, ArgSpec};
pub use catalogue::VectorCatalogue;
pub use constraint::{Constraint, ConstraintSet};
pub use error::{Catalogue, ErrorKind, GenError};
pub use generator::{
    BooleanGen, ChoiceGen, EnumGen, EnumType, FloatGen, Generator, GeneratorKind, IntegerGen,
    SequenceGen, StringGen, ValueGenerator, WeightedFloatGen, WeightedIntegerGen,
};
pub use metadata::{ArgMetadata, CatalogueMetadata, GeneratorMetadata, ParamSetMetadata};
pub use param_set::ParamSet;
pub use predicate::{Pred, Predicate};
pub use rng::SeedHierarchy;
pub use selection::{SampleCount, Selection, UnboundPolicy, VectorFilter, VectorMode};
pub use source::{global, with_global, SeededSource, StringLength, WeightedRange, DEFAULT_MAX_RETRIES};
pub use value::{EnumMember, Value, ValueKind, Vector};
