//! Loosely-typed parameter records.
//!
//! [`ParameterSchema`] is the shape a parameter definition takes when it
//! comes from outside the program (a config file, a JSON document). Every
//! field is optional so that missing fields can be reported precisely
//! instead of failing deserialization as a whole. Converting it into a
//! [`ParameterSpec`] performs all the checks.

use super::spec::{ParameterSpec, SpecError};

/// The kind tag of a parameter record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterKind {
    #[cfg_attr(feature = "serde", serde(alias = "int", alias = "integer"))]
    Integer,
    #[cfg_attr(feature = "serde", serde(alias = "float", alias = "real"))]
    Real,
    #[cfg_attr(
        feature = "serde",
        serde(alias = "choice", alias = "categorical")
    )]
    Categorical,
}

/// A numeric bound as written in a record.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum SchemaBound {
    Int(i64),
    Float(f64),
}

impl SchemaBound {
    fn as_f64(self) -> f64 {
        match self {
            SchemaBound::Int(v) => v as f64,
            SchemaBound::Float(v) => v,
        }
    }
}

impl From<i64> for SchemaBound {
    fn from(v: i64) -> Self {
        SchemaBound::Int(v)
    }
}

impl From<f64> for SchemaBound {
    fn from(v: f64) -> Self {
        SchemaBound::Float(v)
    }
}

/// An unchecked parameter definition.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ParameterSchema {
    #[cfg_attr(feature = "serde", serde(alias = "type"))]
    pub kind: Option<ParameterKind>,
    pub min: Option<SchemaBound>,
    pub max: Option<SchemaBound>,
    pub options: Option<Vec<String>>,
    /// `"log"` or `"linear"`; only meaningful for real parameters.
    pub scale: Option<String>,
}

impl ParameterSchema {
    pub fn integer(min: i64, max: i64) -> Self {
        Self {
            kind: Some(ParameterKind::Integer),
            min: Some(min.into()),
            max: Some(max.into()),
            ..Self::default()
        }
    }

    pub fn real(min: f64, max: f64) -> Self {
        Self {
            kind: Some(ParameterKind::Real),
            min: Some(min.into()),
            max: Some(max.into()),
            ..Self::default()
        }
    }

    pub fn categorical<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: Some(ParameterKind::Categorical),
            options: Some(options.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: impl Into<String>) -> Self {
        self.scale = Some(scale.into());
        self
    }
}

impl TryFrom<ParameterSchema> for ParameterSpec {
    type Error = SpecError;

    fn try_from(schema: ParameterSchema) -> Result<Self, Self::Error> {
        let kind = schema.kind.ok_or(SpecError::MissingKind)?;
        match kind {
            ParameterKind::Integer => {
                if schema.options.is_some() {
                    return Err(SpecError::UnexpectedField("options"));
                }
                if schema.scale.is_some() {
                    return Err(SpecError::UnexpectedField("scale"));
                }
                let min = whole(schema.min.ok_or(SpecError::MissingField("min"))?)?;
                let max = whole(schema.max.ok_or(SpecError::MissingField("max"))?)?;
                ParameterSpec::integer(min, max)
            }
            ParameterKind::Real => {
                if schema.options.is_some() {
                    return Err(SpecError::UnexpectedField("options"));
                }
                let min = schema.min.ok_or(SpecError::MissingField("min"))?.as_f64();
                let max = schema.max.ok_or(SpecError::MissingField("max"))?.as_f64();
                match schema.scale.as_deref() {
                    None | Some("linear") => ParameterSpec::real(min, max),
                    Some("log") => ParameterSpec::log_real(min, max),
                    Some(_) => Err(SpecError::UnexpectedField("scale")),
                }
            }
            ParameterKind::Categorical => {
                if schema.min.is_some() {
                    return Err(SpecError::UnexpectedField("min"));
                }
                if schema.max.is_some() {
                    return Err(SpecError::UnexpectedField("max"));
                }
                if schema.scale.is_some() {
                    return Err(SpecError::UnexpectedField("scale"));
                }
                let options = schema.options.ok_or(SpecError::MissingField("options"))?;
                ParameterSpec::categorical(options)
            }
        }
    }
}

fn whole(bound: SchemaBound) -> Result<i64, SpecError> {
    match bound {
        SchemaBound::Int(v) => Ok(v),
        SchemaBound::Float(_) => Err(SpecError::BoundTypeMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_records_convert() {
        assert_eq!(
            ParameterSpec::try_from(ParameterSchema::integer(1, 8)),
            Ok(ParameterSpec::Integer { min: 1, max: 8 })
        );
        assert_eq!(
            ParameterSpec::try_from(ParameterSchema::real(0.1, 0.6)),
            Ok(ParameterSpec::Real {
                min: 0.1,
                max: 0.6,
                log_scale: false
            })
        );
        assert_eq!(
            ParameterSpec::try_from(ParameterSchema::categorical(["relu", "tanh"])),
            Ok(ParameterSpec::Categorical {
                options: vec!["relu".into(), "tanh".into()]
            })
        );
    }

    #[test]
    fn test_log_scale_record() {
        let spec = ParameterSpec::try_from(ParameterSchema::real(1e-4, 0.1).with_scale("log"));
        assert!(matches!(
            spec,
            Ok(ParameterSpec::Real {
                log_scale: true,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_fields_reported() {
        let schema = ParameterSchema {
            kind: Some(ParameterKind::Real),
            min: Some(0.0.into()),
            ..ParameterSchema::default()
        };
        assert_eq!(
            ParameterSpec::try_from(schema),
            Err(SpecError::MissingField("max"))
        );

        assert_eq!(
            ParameterSpec::try_from(ParameterSchema::default()),
            Err(SpecError::MissingKind)
        );

        let schema = ParameterSchema {
            kind: Some(ParameterKind::Categorical),
            ..ParameterSchema::default()
        };
        assert_eq!(
            ParameterSpec::try_from(schema),
            Err(SpecError::MissingField("options"))
        );
    }

    #[test]
    fn test_integer_rejects_float_bounds() {
        let schema = ParameterSchema {
            kind: Some(ParameterKind::Integer),
            min: Some(SchemaBound::Float(0.5)),
            max: Some(SchemaBound::Int(3)),
            ..ParameterSchema::default()
        };
        assert_eq!(
            ParameterSpec::try_from(schema),
            Err(SpecError::BoundTypeMismatch)
        );
    }

    #[test]
    fn test_real_accepts_integer_bounds() {
        let schema = ParameterSchema {
            kind: Some(ParameterKind::Real),
            min: Some(SchemaBound::Int(0)),
            max: Some(SchemaBound::Int(1)),
            ..ParameterSchema::default()
        };
        assert!(ParameterSpec::try_from(schema).is_ok());
    }

    #[test]
    fn test_foreign_fields_rejected() {
        let mut schema = ParameterSchema::categorical(["a"]);
        schema.min = Some(SchemaBound::Int(0));
        assert_eq!(
            ParameterSpec::try_from(schema),
            Err(SpecError::UnexpectedField("min"))
        );

        let mut schema = ParameterSchema::integer(0, 3);
        schema.options = Some(vec!["a".into()]);
        assert_eq!(
            ParameterSpec::try_from(schema),
            Err(SpecError::UnexpectedField("options"))
        );

        let schema = ParameterSchema::real(0.0, 1.0).with_scale("cubic");
        assert_eq!(
            ParameterSpec::try_from(schema),
            Err(SpecError::UnexpectedField("scale"))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_short_kind_names() {
        let json = r#"{
            "learning_rate": {"type": "float", "min": 0.0001, "max": 0.1},
            "layers": {"type": "int", "min": 1, "max": 8},
            "activation": {"type": "choice", "options": ["relu", "tanh", "sigmoid"]}
        }"#;
        let records: std::collections::BTreeMap<String, ParameterSchema> =
            serde_json::from_str(json).unwrap();
        for (name, record) in records {
            assert!(
                ParameterSpec::try_from(record).is_ok(),
                "record {name} should convert"
            );
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_incomplete_record() {
        let record: ParameterSchema =
            serde_json::from_str(r#"{"kind": "Integer", "min": 1}"#).unwrap();
        assert_eq!(
            ParameterSpec::try_from(record),
            Err(SpecError::MissingField("max"))
        );
    }
}
