//! Argument descriptors.
//!
//! An [`ArgSpec`] binds an argument name to its value source: a static value,
//! a generator, or a list of directed values (or several of these). Build one
//! with [`ArgSpec::builder`]; construction fails when no value source is
//! given.

use crate::error::GenError;
use crate::generator::Generator;
use crate::metadata::{ArgMetadata, GeneratorMetadata};
use crate::predicate::Pred;
use crate::source::SeededSource;
use crate::value::{Value, ValueKind};

#[derive(Debug, Clone)]
pub struct ArgSpec {
    name: String,
    description: String,
    generator: Option<Generator>,
    static_value: Option<Value>,
    directed_values: Vec<Value>,
    test_values: Vec<Value>,
    validator: Option<Pred<Value>>,
    always_include_directed: bool,
}

impl ArgSpec {
    pub fn builder(name: impl Into<String>) -> ArgBuilder {
        ArgBuilder {
            name: name.into(),
            description: String::new(),
            generator: None,
            static_value: None,
            directed_values: Vec::new(),
            test_values: Vec::new(),
            validator: None,
            always_include_directed: true,
        }
    }

    /// Generator-bound argument.
    pub fn random(name: impl Into<String>, generator: impl Into<Generator>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            generator: Some(generator.into()),
            static_value: None,
            directed_values: Vec::new(),
            test_values: Vec::new(),
            validator: None,
            always_include_directed: true,
        }
    }

    /// Argument that always takes `value`.
    pub fn fixed(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            generator: None,
            static_value: Some(value.into()),
            directed_values: Vec::new(),
            test_values: Vec::new(),
            validator: None,
            always_include_directed: true,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn generator(&self) -> Option<&Generator> {
        self.generator.as_ref()
    }

    pub fn static_value(&self) -> Option<&Value> {
        self.static_value.as_ref()
    }

    pub fn directed_values(&self) -> &[Value] {
        &self.directed_values
    }

    pub fn test_values(&self) -> &[Value] {
        &self.test_values
    }

    pub fn always_include_directed(&self) -> bool {
        self.always_include_directed
    }

    /// Semantic type: the static value's kind, else the generator's, else
    /// the common kind of the directed values.
    pub fn value_kind(&self) -> ValueKind {
        if let Some(v) = &self.static_value {
            return v.kind();
        }
        if let Some(g) = &self.generator {
            return g.value_kind();
        }
        crate::generator::common_kind(&self.directed_values)
    }

    // ─── Generation ──────────────────────────────────────────────────

    /// One value: the static value if set, else a generator draw.
    pub fn generate(&self, src: &mut SeededSource) -> Result<Value, GenError> {
        let value = match (&self.static_value, &self.generator) {
            (Some(v), _) => v.clone(),
            (None, Some(g)) => g.generate(src)?,
            (None, None) => return Err(GenError::CannotGenerate(self.name.clone())),
        };
        self.check(&value)?;
        Ok(value)
    }

    /// Directed values first (when enabled), then `n` draws from the
    /// generator. A static argument contributes its value once, and only
    /// when no directed values were added.
    pub fn generate_samples(&self, src: &mut SeededSource, n: usize) -> Result<Vec<Value>, GenError> {
        let mut samples = Vec::new();
        if self.always_include_directed {
            samples.extend(self.directed_values.iter().cloned());
        }
        if let Some(v) = &self.static_value {
            if samples.is_empty() {
                samples.push(v.clone());
            }
        } else if self.generator.is_some() {
            samples.reserve(n);
            for _ in 0..n {
                samples.push(self.generate(src)?);
            }
        }
        Ok(samples)
    }

    pub(crate) fn check(&self, value: &Value) -> Result<(), GenError> {
        match &self.validator {
            Some(validator) if !validator.evaluate(value) => Err(GenError::ValidationFailed {
                name: self.name.clone(),
                value: value.to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub fn metadata(&self) -> ArgMetadata {
        ArgMetadata {
            name: self.name.clone(),
            description: self.description.clone(),
            value_kind: self.value_kind(),
            has_static_value: self.static_value.is_some(),
            static_value: self.static_value.as_ref().map(Value::to_string),
            generator: self.generator.as_ref().map(|g| GeneratorMetadata {
                kind: g.kind(),
                value_kind: g.value_kind(),
                details: g.details(),
            }),
            directed_values: self.directed_values.iter().map(Value::to_string).collect(),
            has_test_values: !self.test_values.is_empty(),
            test_values: self.test_values.iter().map(Value::to_string).collect(),
            always_include_directed: self.always_include_directed,
            has_validator: self.validator.is_some(),
        }
    }
}

pub struct ArgBuilder {
    name: String,
    description: String,
    generator: Option<Generator>,
    static_value: Option<Value>,
    directed_values: Vec<Value>,
    test_values: Vec<Value>,
    validator: Option<Pred<Value>>,
    always_include_directed: bool,
}

impl ArgBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn generator(mut self, generator: impl Into<Generator>) -> Self {
        self.generator = Some(generator.into());
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.static_value = Some(value.into());
        self
    }

    pub fn directed_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.directed_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn test_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.test_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn validator<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Pred::new(f));
        self
    }

    pub fn always_include_directed(mut self, include: bool) -> Self {
        self.always_include_directed = include;
        self
    }

    pub fn build(self) -> Result<ArgSpec, GenError> {
        if self.static_value.is_none() && self.generator.is_none() && self.directed_values.is_empty() {
            return Err(GenError::NoValueSource(self.name));
        }
        Ok(ArgSpec {
            name: self.name,
            description: self.description,
            generator: self.generator,
            static_value: self.static_value,
            directed_values: self.directed_values,
            test_values: self.test_values,
            validator: self.validator,
            always_include_directed: self.always_include_directed,
        })
    }
}
