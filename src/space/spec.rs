//! Parameter domains and their values.

use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;

/// A concrete value assigned to one parameter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum ParamValue {
    Integer(i64),
    Real(f64),
    Categorical(String),
}

impl ParamValue {
    /// Returns the value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a float. Integers widen.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            ParamValue::Real(v) => Some(*v),
            ParamValue::Integer(v) => Some(*v as f64),
            ParamValue::Categorical(_) => None,
        }
    }

    /// Returns the categorical option, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Categorical(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(v) => write!(f, "{v}"),
            ParamValue::Real(v) => write!(f, "{v}"),
            ParamValue::Categorical(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Integer(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Real(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Categorical(v.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Categorical(v)
    }
}

/// Why a single parameter definition is invalid.
///
/// Reported without the parameter name; [`SearchSpace`](super::SearchSpace)
/// wraps it in [`ConfigError::Parameter`](crate::error::ConfigError::Parameter).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpecError {
    #[error("no kind given")]
    MissingKind,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' does not apply to this kind")]
    UnexpectedField(&'static str),

    #[error("integer bounds must be whole numbers")]
    BoundTypeMismatch,

    #[error("bounds must be finite")]
    NonFiniteBound,

    #[error("range is too wide to represent")]
    RangeTooWide,

    #[error("min ({min}) is greater than max ({max})")]
    InvertedBounds { min: String, max: String },

    #[error("log scale requires min > 0")]
    NonPositiveLogBound,

    #[error("categorical options must not be empty")]
    EmptyOptions,

    #[error("duplicate option '{0}'")]
    DuplicateOption(String),
}

/// The domain of one parameter.
///
/// Prefer the checked constructors ([`integer`](Self::integer),
/// [`real`](Self::real), [`log_real`](Self::log_real),
/// [`categorical`](Self::categorical)). Variants built by hand are checked
/// again when they are added to a [`SearchSpace`](super::SearchSpace).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind")
)]
pub enum ParameterSpec {
    /// Whole numbers in `[min, max]`.
    Integer { min: i64, max: i64 },

    /// Floats in `[min, max]`.
    ///
    /// With `log_scale`, sampling and perturbation work on `ln(x)`.
    Real {
        min: f64,
        max: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        log_scale: bool,
    },

    /// One of a fixed, ordered list of distinct options.
    Categorical { options: Vec<String> },
}

impl ParameterSpec {
    pub fn integer(min: i64, max: i64) -> Result<Self, SpecError> {
        let spec = ParameterSpec::Integer { min, max };
        spec.validate()?;
        Ok(spec)
    }

    pub fn real(min: f64, max: f64) -> Result<Self, SpecError> {
        let spec = ParameterSpec::Real {
            min,
            max,
            log_scale: false,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// A real parameter sampled uniformly in log space.
    pub fn log_real(min: f64, max: f64) -> Result<Self, SpecError> {
        let spec = ParameterSpec::Real {
            min,
            max,
            log_scale: true,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn categorical<I, S>(options: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let spec = ParameterSpec::Categorical {
            options: options.into_iter().map(Into::into).collect(),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Checks the invariants of this domain.
    pub fn validate(&self) -> Result<(), SpecError> {
        match self {
            ParameterSpec::Integer { min, max } => {
                if min > max {
                    return Err(SpecError::InvertedBounds {
                        min: min.to_string(),
                        max: max.to_string(),
                    });
                }
            }
            ParameterSpec::Real {
                min,
                max,
                log_scale,
            } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(SpecError::NonFiniteBound);
                }
                if min > max {
                    return Err(SpecError::InvertedBounds {
                        min: min.to_string(),
                        max: max.to_string(),
                    });
                }
                if !(max - min).is_finite() {
                    return Err(SpecError::RangeTooWide);
                }
                if *log_scale && *min <= 0.0 {
                    return Err(SpecError::NonPositiveLogBound);
                }
            }
            ParameterSpec::Categorical { options } => {
                if options.is_empty() {
                    return Err(SpecError::EmptyOptions);
                }
                for (i, option) in options.iter().enumerate() {
                    if options[..i].contains(option) {
                        return Err(SpecError::DuplicateOption(option.clone()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Draws a value uniformly at random from the domain.
    ///
    /// Integers are inclusive of both bounds; reals are drawn from the
    /// closed interval (in log space when `log_scale` is set).
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ParamValue {
        match self {
            ParameterSpec::Integer { min, max } => ParamValue::Integer(rng.random_range(*min..=*max)),
            ParameterSpec::Real {
                min,
                max,
                log_scale: false,
            } => ParamValue::Real(rng.random_range(*min..=*max)),
            ParameterSpec::Real {
                min,
                max,
                log_scale: true,
            } => {
                let log_value = rng.random_range(min.ln()..=max.ln());
                ParamValue::Real(log_value.exp().clamp(*min, *max))
            }
            ParameterSpec::Categorical { options } => {
                // validate() guarantees at least one option
                let choice = options.choose(rng).map_or_else(String::new, Clone::clone);
                ParamValue::Categorical(choice)
            }
        }
    }

    /// Whether `value` has the right kind and lies inside the domain.
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (ParameterSpec::Integer { min, max }, ParamValue::Integer(v)) => v >= min && v <= max,
            (ParameterSpec::Real { min, max, .. }, ParamValue::Real(v)) => v >= min && v <= max,
            (ParameterSpec::Categorical { options }, ParamValue::Categorical(s)) => {
                options.contains(s)
            }
            _ => false,
        }
    }

    /// Short name of the kind, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParameterSpec::Integer { .. } => "integer",
            ParameterSpec::Real { .. } => "real",
            ParameterSpec::Categorical { .. } => "categorical",
        }
    }
}
