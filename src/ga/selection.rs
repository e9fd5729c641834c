//! Parent and survivor selection.
//!
//! All strategies assume **minimization** (lower fitness = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::seq::index;
use rand::Rng;

use crate::candidate::{sort_by_fitness, Candidate};

/// Tournament selection without replacement.
///
/// Draws `k` distinct members uniformly at random and returns the index of
/// the one with the lowest fitness. Ties go to whichever was drawn first.
///
/// # Panics
/// Panics if `k` is zero or larger than the population.
///
/// # Complexity
/// O(k) per selection
pub fn tournament<R: Rng>(population: &[Candidate], k: usize, rng: &mut R) -> usize {
    assert!(
        k >= 1 && k <= population.len(),
        "tournament size {k} needs 1..={} candidates",
        population.len()
    );

    let mut drawn = index::sample(rng, population.len(), k).into_iter();
    // k >= 1, so there is a first draw
    let mut best = drawn.next().unwrap_or(0);
    for idx in drawn {
        if population[idx].score() < population[best].score() {
            best = idx;
        }
    }
    best
}

/// Elitist truncation: the best `n` of `combined`, ascending by fitness.
///
/// The sort is stable, so among equal fitness the earlier entry survives.
/// Applying it again to its own output changes nothing.
pub fn select_survivors(mut combined: Vec<Candidate>, n: usize) -> Vec<Candidate> {
    sort_by_fitness(&mut combined);
    combined.truncate(n);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::space::{ParamValue, SearchSpace};
    use proptest::prelude::*;

    fn make_population(fitnesses: &[f64]) -> Vec<Candidate> {
        let space = SearchSpace::builder().integer("id", 0, 1000).build().unwrap();
        fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                space
                    .candidate([("id", ParamValue::Integer(i as i64))])
                    .unwrap()
                    .with_fitness(f)
            })
            .collect()
    }

    fn id(c: &Candidate) -> i64 {
        c.get("id").and_then(ParamValue::as_int).unwrap()
    }

    #[test]
    fn test_tournament_of_whole_population_picks_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);
        // without replacement, k = n always sees the best member
        for _ in 0..100 {
            assert_eq!(tournament(&pop, 4, &mut rng), 2);
        }
    }

    #[test]
    fn test_tournament_never_picks_worst_two() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0, 3.0]);
        let mut rng = create_rng(7);
        for _ in 0..1000 {
            let idx = tournament(&pop, 3, &mut rng);
            // the two worst members can never beat two others in a draw of three
            assert!(idx != 0 && idx != 3, "picked {idx}");
        }
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_handles_failed_candidates() {
        let pop = make_population(&[f64::INFINITY, f64::INFINITY, 2.0]);
        let mut rng = create_rng(1);
        assert_eq!(tournament(&pop, 3, &mut rng), 2);
    }

    #[test]
    #[should_panic(expected = "tournament size 3")]
    fn test_tournament_larger_than_population_panics() {
        let pop = make_population(&[1.0, 2.0]);
        let mut rng = create_rng(42);
        tournament(&pop, 3, &mut rng);
    }

    #[test]
    fn test_select_survivors_truncates_worst() {
        let combined = make_population(&[4.0, 1.0, f64::INFINITY, 3.0, 2.0, 5.0]);
        let survivors = select_survivors(combined, 3);
        let ids: Vec<i64> = survivors.iter().map(id).collect();
        assert_eq!(ids, [1, 4, 3]);
    }

    #[test]
    fn test_select_survivors_stable_on_ties() {
        let combined = make_population(&[1.0, 1.0, 1.0, 0.0]);
        let ids: Vec<i64> = select_survivors(combined, 3).iter().map(id).collect();
        assert_eq!(ids, [3, 0, 1]);
    }

    proptest! {
        #[test]
        fn prop_select_survivors_idempotent(
            fitnesses in prop::collection::vec(prop_oneof![-100.0f64..100.0, Just(f64::INFINITY)], 1..40),
            n in 1usize..40,
        ) {
            let once = select_survivors(make_population(&fitnesses), n);
            let twice = select_survivors(once.clone(), n);
            prop_assert_eq!(once.len(), n.min(fitnesses.len()));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_survivors_are_the_best(
            fitnesses in prop::collection::vec(-100.0f64..100.0, 2..40),
        ) {
            let n = fitnesses.len() / 2;
            let survivors = select_survivors(make_population(&fitnesses), n);
            let mut sorted = fitnesses.clone();
            sorted.sort_by(f64::total_cmp);
            let kept: Vec<f64> = survivors.iter().map(Candidate::score).collect();
            prop_assert_eq!(kept, sorted[..n].to_vec());
        }
    }
}
