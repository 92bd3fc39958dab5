//! Random strings over a charset.

use super::ValueGenerator;
use crate::error::GenError;
use crate::source::{SeededSource, StringLength};
use crate::value::ValueKind;
use std::collections::BTreeMap;

pub const DEFAULT_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringGen {
    length: StringLength,
    charset: Vec<char>,
}

impl StringGen {
    pub fn new(length: StringLength, charset: &str) -> Result<Self, GenError> {
        if let StringLength::Between(min, max) = length {
            StringLength::between(min, max)?;
        }
        let charset: Vec<char> = charset.chars().collect();
        if charset.is_empty() && length.max_len() > 0 {
            return Err(GenError::EmptyDomain("string charset is empty".into()));
        }
        Ok(Self { length, charset })
    }

    /// Fixed length over the default charset. Negative lengths are rejected.
    pub fn with_length(len: i64) -> Result<Self, GenError> {
        Self::new(StringLength::exact(len)?, DEFAULT_CHARSET)
    }

    pub fn length(&self) -> StringLength {
        self.length
    }

    pub fn charset(&self) -> String {
        self.charset.iter().collect()
    }
}

impl Default for StringGen {
    fn default() -> Self {
        Self {
            length: StringLength::default(),
            charset: DEFAULT_CHARSET.chars().collect(),
        }
    }
}

impl ValueGenerator for StringGen {
    type Output = String;

    fn generate(&self, src: &mut SeededSource) -> Result<String, GenError> {
        src.string(self.length, &self.charset)
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Str
    }

    fn details(&self) -> BTreeMap<String, String> {
        let mut d = BTreeMap::new();
        match self.length {
            StringLength::Exact(n) => {
                d.insert("length".into(), n.to_string());
            }
            StringLength::Between(min, max) => {
                d.insert("min_length".into(), min.to_string());
                d.insert("max_length".into(), max.to_string());
            }
        }
        d.insert("charset".into(), self.charset());
        d
    }
}
