//! Candidate solutions and populations.
//!
//! A [`Candidate`] is one point of a [`SearchSpace`](crate::space::SearchSpace):
//! a value for every parameter plus an optional fitness. Candidates are
//! values; every "change" builds a new one, so two candidates never share
//! mutable state. Parameter names are shared with the space through an
//! `Arc`, which keeps cloning cheap and guarantees the key set matches.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::space::ParamValue;

/// Orders fitness values ascending (best first).
///
/// Uses a total order so that `+inf` (failed evaluation) sorts last.
pub fn fitness_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// One assignment of values to all parameters of a space.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    names: Arc<[String]>,
    values: Vec<ParamValue>,
    fitness: Option<f64>,
}

impl Candidate {
    pub(crate) fn from_parts(names: Arc<[String]>, values: Vec<ParamValue>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self {
            names,
            values,
            fitness: None,
        }
    }

    /// Value of parameter `name`.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.values[i])
    }

    /// Value at position `index` (space order).
    pub fn value(&self, index: usize) -> &ParamValue {
        &self.values[index]
    }

    pub fn values(&self) -> &[ParamValue] {
        &self.values
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fitness, or `None` if not evaluated yet.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Fitness for ordering purposes: unevaluated counts as worst.
    pub fn score(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }

    /// The same assignment with a fitness attached.
    pub fn with_fitness(self, fitness: f64) -> Self {
        Self {
            fitness: Some(fitness),
            ..self
        }
    }

    /// A new, unevaluated candidate differing only at `index`.
    pub fn with_value(&self, index: usize, value: ParamValue) -> Self {
        let mut values = self.values.clone();
        values[index] = value;
        Self::from_parts(Arc::clone(&self.names), values)
    }

    /// A new, unevaluated candidate with all values replaced.
    pub(crate) fn with_values(&self, values: Vec<ParamValue>) -> Self {
        Self::from_parts(Arc::clone(&self.names), values)
    }

    /// Whether both candidates assign the same parameters.
    pub fn same_shape(&self, other: &Candidate) -> bool {
        Arc::ptr_eq(&self.names, &other.names) || self.names == other.names
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")?;
        if let Some(fitness) = self.fitness {
            write!(f, " (fitness {fitness:.5})")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Candidate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let extra = usize::from(self.fitness.is_some());
        let mut map = serializer.serialize_map(Some(self.len() + extra))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        if let Some(fitness) = self.fitness {
            map.serialize_entry("fitness", &fitness)?;
        }
        map.end()
    }
}

/// Candidates kept ordered by ascending fitness.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Population {
    members: Vec<Candidate>,
}

impl Population {
    /// Wraps and sorts `members` (stable; ties keep their relative order).
    pub fn new(mut members: Vec<Candidate>) -> Self {
        sort_by_fitness(&mut members);
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The lowest-fitness member.
    pub fn best(&self) -> Option<&Candidate> {
        self.members.first()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.members.iter()
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.members
    }

    /// Mean of the finite fitness values, `None` if there are none.
    pub fn mean_fitness(&self) -> Option<f64> {
        let finite: Vec<f64> = self
            .members
            .iter()
            .map(Candidate::score)
            .filter(|f| f.is_finite())
            .collect();
        if finite.is_empty() {
            None
        } else {
            Some(finite.iter().sum::<f64>() / finite.len() as f64)
        }
    }
}

/// Stable ascending sort by fitness; unevaluated members go last.
pub fn sort_by_fitness(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| fitness_cmp(a.score(), b.score()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::SearchSpace;

    fn space() -> SearchSpace {
        SearchSpace::builder()
            .integer("x", 0, 10)
            .categorical("act", ["relu", "tanh"])
            .build()
            .unwrap()
    }

    fn make(space: &SearchSpace, x: i64, fitness: Option<f64>) -> Candidate {
        let c = space
            .candidate([("x", ParamValue::Integer(x)), ("act", "relu".into())])
            .unwrap();
        match fitness {
            Some(f) => c.with_fitness(f),
            None => c,
        }
    }

    #[test]
    fn test_with_value_leaves_original_untouched() {
        let space = space();
        let original = make(&space, 3, Some(1.0));
        let changed = original.with_value(0, ParamValue::Integer(4));
        assert_eq!(original.get("x"), Some(&ParamValue::Integer(3)));
        assert_eq!(changed.get("x"), Some(&ParamValue::Integer(4)));
        assert_eq!(changed.get("act"), original.get("act"));
        assert!(changed.fitness().is_none(), "new value needs re-evaluation");
        assert!(original.same_shape(&changed));
    }

    #[test]
    fn test_score_treats_unevaluated_as_worst() {
        let space = space();
        assert_eq!(make(&space, 1, None).score(), f64::INFINITY);
        assert_eq!(make(&space, 1, Some(2.5)).score(), 2.5);
    }

    #[test]
    fn test_population_sorted_ascending() {
        let space = space();
        let population = Population::new(vec![
            make(&space, 1, Some(3.0)),
            make(&space, 2, Some(f64::INFINITY)),
            make(&space, 3, Some(-1.0)),
            make(&space, 4, None),
            make(&space, 5, Some(0.5)),
        ]);
        let scores: Vec<f64> = population.iter().map(Candidate::score).collect();
        assert_eq!(scores[..3], [-1.0, 0.5, 3.0]);
        assert!(scores[3].is_infinite() && scores[4].is_infinite());
        assert_eq!(population.best().and_then(|c| c.get("x")), Some(&ParamValue::Integer(3)));
        let mean = population.mean_fitness().unwrap();
        assert!((mean - 2.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_fitness_all_failed() {
        let space = space();
        let population = Population::new(vec![make(&space, 1, Some(f64::INFINITY))]);
        assert_eq!(population.mean_fitness(), None);
    }

    #[test]
    fn test_display() {
        let space = space();
        let c = make(&space, 7, Some(0.0));
        assert_eq!(c.to_string(), "{x: 7, act: relu} (fitness 0.00000)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serializes_as_map() {
        let space = space();
        let json = serde_json::to_string(&make(&space, 7, Some(0.25))).unwrap();
        assert_eq!(json, r#"{"x":7,"act":"relu","fitness":0.25}"#);
    }
}
