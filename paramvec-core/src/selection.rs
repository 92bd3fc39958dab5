//! Which vectors an invocation asks for.

use crate::error::GenError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Vector selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorMode {
    /// Directed vectors plus draws.
    #[default]
    All,
    /// Draws, plus directed vectors when the set includes them.
    Mixed,
    RandomOnly,
    /// Directed vectors only; the count is ignored.
    DirectedOnly,
    /// Test catalogue only; the count is ignored.
    Test,
}

impl VectorMode {
    pub const ALL: [VectorMode; 5] = [
        VectorMode::All,
        VectorMode::Mixed,
        VectorMode::RandomOnly,
        VectorMode::DirectedOnly,
        VectorMode::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VectorMode::All => "all",
            VectorMode::Mixed => "mixed",
            VectorMode::RandomOnly => "random_only",
            VectorMode::DirectedOnly => "directed_only",
            VectorMode::Test => "test",
        }
    }
}

impl fmt::Display for VectorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VectorMode {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VectorMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| GenError::InvalidMode(s.to_string()))
    }
}

/// Number of random tuples, or `Auto` for the exhaustive product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleCount {
    Count(usize),
    Auto,
}

impl SampleCount {
    pub fn is_auto(&self) -> bool {
        matches!(self, SampleCount::Auto)
    }
}

impl Default for SampleCount {
    fn default() -> Self {
        SampleCount::Count(10)
    }
}

impl From<usize> for SampleCount {
    fn from(n: usize) -> Self {
        SampleCount::Count(n)
    }
}

impl fmt::Display for SampleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleCount::Count(n) => write!(f, "{n}"),
            SampleCount::Auto => f.write_str("auto"),
        }
    }
}

impl FromStr for SampleCount {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(SampleCount::Auto);
        }
        s.parse::<usize>()
            .map(SampleCount::Count)
            .map_err(|_| GenError::InvalidSampleCount(s.to_string()))
    }
}

// Serialized as an integer, or the string "auto".
impl Serialize for SampleCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SampleCount::Count(n) => serializer.serialize_u64(*n as u64),
            SampleCount::Auto => serializer.serialize_str("auto"),
        }
    }
}

impl<'de> Deserialize<'de> for SampleCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => usize::try_from(n)
                .map(SampleCount::Count)
                .map_err(|_| serde::de::Error::custom(GenError::InvalidSampleCount(n.to_string()))),
            Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Pick one directed vector by name or insertion index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorFilter {
    ByName(String),
    ByIndex(usize),
}

impl fmt::Display for VectorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorFilter::ByName(name) => write!(f, "name={name}"),
            VectorFilter::ByIndex(i) => write!(f, "index={i}"),
        }
    }
}

/// How exhaustive generation treats generator-bound arguments that are not
/// sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnboundPolicy {
    /// A fresh draw for every row.
    #[default]
    DrawPerRow,
    /// One draw shared by every row.
    DrawOnce,
}

/// Count, mode and optional filter for one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub count: SampleCount,
    pub mode: VectorMode,
    pub filter: Option<VectorFilter>,
}

impl Selection {
    pub fn new(count: impl Into<SampleCount>, mode: VectorMode) -> Self {
        Self {
            count: count.into(),
            mode,
            filter: None,
        }
    }

    pub fn exhaustive(mode: VectorMode) -> Self {
        Self::new(SampleCount::Auto, mode)
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            filter: Some(VectorFilter::ByName(name.into())),
            ..Self::default()
        }
    }

    pub fn by_index(index: usize) -> Self {
        Self {
            filter: Some(VectorFilter::ByIndex(index)),
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: Option<VectorFilter>) -> Self {
        self.filter = filter;
        self
    }
}
