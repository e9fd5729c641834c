//! Search space definition and sampling.
//!
//! A [`SearchSpace`] is an ordered, read-only mapping from parameter names
//! to [`ParameterSpec`] domains. It is built once, validated as a whole,
//! and then shared (cheaply cloned) by every engine that searches it.
//!
//! # Examples
//!
//! ```
//! use hyperopt_search::space::SearchSpace;
//!
//! let space = SearchSpace::builder()
//!     .log_real("learning_rate", 1e-4, 1e-1)
//!     .integer("layers", 1, 8)
//!     .categorical("activation", ["relu", "tanh", "sigmoid"])
//!     .build()
//!     .unwrap();
//!
//! let mut rng = hyperopt_search::random::create_rng(42);
//! let candidate = space.sample(&mut rng);
//! assert_eq!(candidate.len(), 3);
//! assert!(space.contains(&candidate));
//! ```

mod schema;
mod spec;

pub use schema::{ParameterKind, ParameterSchema, SchemaBound};
pub use spec::{ParamValue, ParameterSpec, SpecError};

use std::sync::Arc;

use rand::Rng;

use crate::candidate::Candidate;
use crate::error::{ConfigError, Result};

/// An ordered set of named parameter domains.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpace {
    names: Arc<[String]>,
    specs: Arc<[ParameterSpec]>,
}

impl SearchSpace {
    /// Starts a builder.
    pub fn builder() -> SearchSpaceBuilder {
        SearchSpaceBuilder::default()
    }

    /// Builds a space from `(name, spec)` pairs, preserving their order.
    pub fn new<I, S>(parameters: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ParameterSpec)>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        let mut specs = Vec::new();
        for (name, spec) in parameters {
            let name = name.into();
            if names.contains(&name) {
                return Err(ConfigError::DuplicateParameter(name));
            }
            spec.validate().map_err(|source| ConfigError::Parameter {
                name: name.clone(),
                source,
            })?;
            names.push(name);
            specs.push(spec);
        }
        if names.is_empty() {
            return Err(ConfigError::EmptySpace);
        }
        Ok(Self {
            names: names.into(),
            specs: specs.into(),
        })
    }

    /// Builds a space from unchecked records.
    pub fn from_schema<I, S>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ParameterSchema)>,
        S: Into<String>,
    {
        let parameters = records
            .into_iter()
            .map(|(name, record)| {
                let name = name.into();
                ParameterSpec::try_from(record)
                    .map(|spec| (name.clone(), spec))
                    .map_err(|source| ConfigError::Parameter { name, source })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(parameters)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Always `false` for a built space; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Parameter names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Parameter domains in insertion order.
    pub fn specs(&self) -> &[ParameterSpec] {
        &self.specs
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterSpec)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.specs.iter())
    }

    /// Position of `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Domain of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.index_of(name).map(|i| &self.specs[i])
    }

    /// Draws one candidate: every parameter independently and uniformly.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Candidate {
        let values = self.specs.iter().map(|spec| spec.sample(rng)).collect();
        Candidate::from_parts(Arc::clone(&self.names), values)
    }

    /// Draws `n` independent candidates.
    pub fn sample_many<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Candidate> {
        (0..n).map(|_| self.sample(rng)).collect()
    }

    /// Builds a candidate from explicit values.
    ///
    /// Every parameter must be given exactly once, with a value inside its
    /// domain. Order of `values` does not matter.
    pub fn candidate<I, S, V>(&self, values: I) -> Result<Candidate>
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
        V: Into<ParamValue>,
    {
        let mut slots: Vec<Option<ParamValue>> = vec![None; self.len()];
        for (name, value) in values {
            let name = name.as_ref();
            let index = self
                .index_of(name)
                .ok_or_else(|| ConfigError::UnknownParameter(name.to_owned()))?;
            if slots[index].is_some() {
                return Err(ConfigError::DuplicateParameter(name.to_owned()));
            }
            slots[index] = Some(value.into());
        }

        let mut resolved = Vec::with_capacity(self.len());
        for ((name, spec), slot) in self.iter().zip(slots) {
            let value = slot.ok_or_else(|| {
                ConfigError::CandidateMismatch(format!("no value for '{name}'"))
            })?;
            if !spec.contains(&value) {
                return Err(ConfigError::CandidateMismatch(format!(
                    "value {value} is not a valid {} for '{name}'",
                    spec.kind_name()
                )));
            }
            resolved.push(value);
        }
        Ok(Candidate::from_parts(Arc::clone(&self.names), resolved))
    }

    /// Whether `candidate` has exactly this space's keys and in-domain values.
    pub fn contains(&self, candidate: &Candidate) -> bool {
        self.check(candidate).is_ok()
    }

    /// Like [`contains`](Self::contains), but says what is wrong.
    pub fn check(&self, candidate: &Candidate) -> Result<()> {
        if candidate.names() != self.names() {
            return Err(ConfigError::CandidateMismatch(format!(
                "expected parameters {:?}, got {:?}",
                self.names(),
                candidate.names()
            )));
        }
        for ((name, spec), value) in self.iter().zip(candidate.values()) {
            if !spec.contains(value) {
                return Err(ConfigError::CandidateMismatch(format!(
                    "value {value} is not a valid {} for '{name}'",
                    spec.kind_name()
                )));
            }
        }
        Ok(())
    }
}

/// Incremental construction of a [`SearchSpace`].
///
/// Errors are collected and the first one is reported by
/// [`build`](Self::build), so calls can be chained without `?` at each step.
#[derive(Debug, Default)]
pub struct SearchSpaceBuilder {
    parameters: Vec<(String, std::result::Result<ParameterSpec, SpecError>)>,
}

impl SearchSpaceBuilder {
    pub fn integer(self, name: impl Into<String>, min: i64, max: i64) -> Self {
        self.push(name, ParameterSpec::integer(min, max))
    }

    pub fn real(self, name: impl Into<String>, min: f64, max: f64) -> Self {
        self.push(name, ParameterSpec::real(min, max))
    }

    pub fn log_real(self, name: impl Into<String>, min: f64, max: f64) -> Self {
        self.push(name, ParameterSpec::log_real(min, max))
    }

    pub fn categorical<I, S>(self, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(name, ParameterSpec::categorical(options))
    }

    pub fn parameter(self, name: impl Into<String>, spec: ParameterSpec) -> Self {
        self.push(name, Ok(spec))
    }

    pub fn schema(self, name: impl Into<String>, record: ParameterSchema) -> Self {
        self.push(name, ParameterSpec::try_from(record))
    }

    fn push(
        mut self,
        name: impl Into<String>,
        spec: std::result::Result<ParameterSpec, SpecError>,
    ) -> Self {
        self.parameters.push((name.into(), spec));
        self
    }

    /// Validates everything and produces the space.
    pub fn build(self) -> Result<SearchSpace> {
        let parameters = self
            .parameters
            .into_iter()
            .map(|(name, spec)| match spec {
                Ok(spec) => Ok((name, spec)),
                Err(source) => Err(ConfigError::Parameter { name, source }),
            })
            .collect::<Result<Vec<_>>>()?;
        SearchSpace::new(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn mixed_space() -> SearchSpace {
        SearchSpace::builder()
            .real("learning_rate", 0.0001, 0.1)
            .integer("layers", 1, 8)
            .real("dropout", 0.1, 0.6)
            .categorical("activation", ["relu", "tanh", "sigmoid"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_preserves_order() {
        let space = mixed_space();
        assert_eq!(
            space.names(),
            ["learning_rate", "layers", "dropout", "activation"]
        );
        assert_eq!(space.index_of("dropout"), Some(2));
        assert_eq!(space.get("missing"), None);
    }

    #[test]
    fn test_builder_reports_named_error() {
        let err = SearchSpace::builder()
            .integer("ok", 0, 1)
            .integer("bad", 5, 1)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parameter { ref name, .. } if name == "bad"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = SearchSpace::builder()
            .integer("x", 0, 1)
            .real("x", 0.0, 1.0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateParameter("x".into()));
    }

    #[test]
    fn test_empty_space_rejected() {
        assert_eq!(
            SearchSpace::builder().build().unwrap_err(),
            ConfigError::EmptySpace
        );
    }

    #[test]
    fn test_hand_built_spec_checked_on_insert() {
        let err = SearchSpace::new([(
            "opts",
            ParameterSpec::Categorical {
                options: vec!["a".into(), "a".into()],
            },
        )])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Parameter {
                name: "opts".into(),
                source: SpecError::DuplicateOption("a".into()),
            }
        );
    }

    #[test]
    fn test_from_schema() {
        let space = SearchSpace::from_schema([
            ("lr", ParameterSchema::real(1e-4, 0.1).with_scale("log")),
            ("layers", ParameterSchema::integer(1, 15)),
        ])
        .unwrap();
        assert_eq!(space.len(), 2);

        let err = SearchSpace::from_schema([("layers", ParameterSchema::default())]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Parameter {
                name: "layers".into(),
                source: SpecError::MissingKind,
            }
        );
    }

    #[test]
    fn test_sample_many_is_independent() {
        let space = mixed_space();
        let mut rng = create_rng(3);
        let population = space.sample_many(20, &mut rng);
        assert_eq!(population.len(), 20);
        assert!(population.iter().all(|c| space.contains(c)));
        assert!(population.iter().all(|c| c.fitness().is_none()));
        let distinct = population
            .iter()
            .filter(|c| c.values() != population[0].values())
            .count();
        assert!(distinct > 0, "independent draws should differ");
    }

    #[test]
    fn test_explicit_candidate() {
        let space = mixed_space();
        let candidate = space
            .candidate([
                ("activation", ParamValue::from("tanh")),
                ("layers", ParamValue::Integer(3)),
                ("dropout", ParamValue::Real(0.2)),
                ("learning_rate", ParamValue::Real(0.01)),
            ])
            .unwrap();
        assert_eq!(candidate.get("layers"), Some(&ParamValue::Integer(3)));
        assert_eq!(candidate.names(), space.names());
    }

    #[test]
    fn test_explicit_candidate_errors() {
        let space = mixed_space();
        let err = space
            .candidate([("layers", ParamValue::Integer(3))])
            .unwrap_err();
        assert!(matches!(err, ConfigError::CandidateMismatch(_)));

        let err = space
            .candidate([("epochs", ParamValue::Integer(3))])
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownParameter("epochs".into()));

        let err = space
            .candidate([
                ("activation", ParamValue::from("elu")),
                ("layers", ParamValue::Integer(3)),
                ("dropout", ParamValue::Real(0.2)),
                ("learning_rate", ParamValue::Real(0.01)),
            ])
            .unwrap_err();
        assert!(matches!(err, ConfigError::CandidateMismatch(_)));
    }

    #[test]
    fn test_foreign_candidate_rejected() {
        let space = mixed_space();
        let other = SearchSpace::builder().integer("x", 0, 10).build().unwrap();
        let mut rng = create_rng(9);
        let candidate = other.sample(&mut rng);
        assert!(!space.contains(&candidate));
        assert!(other.contains(&candidate));
    }

    proptest! {
        #[test]
        fn prop_samples_always_in_domain(seed: u64) {
            let space = mixed_space();
            let mut rng = create_rng(seed);
            let candidate = space.sample(&mut rng);
            prop_assert!(space.contains(&candidate));
            let layers = candidate.get("layers").and_then(ParamValue::as_int);
            prop_assert!(matches!(layers, Some(1..=8)));
        }
    }
}
