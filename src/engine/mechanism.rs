//! Differentially-private selection via the exponential mechanism.
//!
//! Given candidates with real-valued scores and a privacy parameter
//! `epsilon`, the mechanism samples a candidate with probability
//! proportional to `exp(epsilon * score)`. Higher `epsilon` sharpens the
//! distribution toward the maximum-score candidate (weaker privacy, higher
//! accuracy); as `epsilon` approaches 0 the distribution approaches
//! uniform (strong privacy, weak accuracy).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// The outcome of one mechanism draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Index of the chosen candidate in the input order.
    pub index: usize,
    /// The full selection distribution, one entry per candidate, summing
    /// to 1 within floating tolerance. Returned for downstream
    /// accuracy/welfare measurement.
    pub probabilities: Vec<f64>,
}

/// Exponential-mechanism selector with an owned random source.
#[derive(Debug)]
pub struct ExponentialMechanism {
    epsilon: f64,
    rng: StdRng,
}

impl ExponentialMechanism {
    /// Create a selector with the given privacy parameter and an
    /// entropy-seeded random source.
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            rng: StdRng::from_entropy(),
        }
    }

    /// Builder method: seed the selector's random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The privacy parameter.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The selection distribution over `candidates` without drawing.
    ///
    /// Weights are `exp(epsilon * (score - max_score))`; the shift by the
    /// maximum score leaves the normalized distribution unchanged and
    /// keeps the weights finite for large `epsilon * score`.
    ///
    /// # Panics
    /// Panics if `candidates` is empty.
    pub fn probabilities<C>(&self, candidates: &[C], score_fn: impl Fn(&C) -> f64) -> Vec<f64> {
        assert!(!candidates.is_empty(), "cannot select from an empty candidate set");

        let scores: Vec<f64> = candidates.iter().map(&score_fn).collect();
        let max_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let weights: Vec<f64> = scores
            .iter()
            .map(|s| (self.epsilon * (s - max_score)).exp())
            .collect();
        let total: f64 = weights.iter().sum();
        weights.iter().map(|w| w / total).collect()
    }

    /// Draw one candidate and return it together with the distribution.
    ///
    /// A single uniform draw in `[0, 1)` walks the cumulative probability
    /// sequence in candidate order; if floating-point rounding leaves the
    /// cumulative sum short of 1, the last candidate is returned. That
    /// fallback is expected behavior, not an error.
    ///
    /// # Panics
    /// Panics if `candidates` is empty.
    pub fn select<C>(&mut self, candidates: &[C], score_fn: impl Fn(&C) -> f64) -> SelectionResult {
        let probabilities = self.probabilities(candidates, score_fn);

        let r: f64 = self.rng.gen();
        let mut cum = 0.0;
        let mut index = candidates.len() - 1;
        for (i, p) in probabilities.iter().enumerate() {
            cum += p;
            if r <= cum {
                index = i;
                break;
            }
        }

        SelectionResult {
            index,
            probabilities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(xs: &[f64]) -> Vec<f64> {
        xs.to_vec()
    }

    #[test]
    fn test_probabilities_sum_to_one_and_are_nonnegative() {
        let mech = ExponentialMechanism::new(0.7);
        let candidates = scores(&[3.0, -2.0, 11.0, 0.0, 5.5]);
        let probs = mech.probabilities(&candidates, |&s| s);

        assert_eq!(probs.len(), candidates.len());
        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-9, "probabilities sum to {}", total);
        assert!(probs.iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn test_high_epsilon_concentrates_on_maximizer() {
        // Two candidates, scores 10 and 0, epsilon 5: the maximizer must
        // be picked with probability above 0.999.
        let mech = ExponentialMechanism::new(5.0);
        let candidates = scores(&[10.0, 0.0]);
        let probs = mech.probabilities(&candidates, |&s| s);
        assert!(probs[0] > 0.999, "maximizer probability {}", probs[0]);
    }

    #[test]
    fn test_epsilon_zero_is_uniform() {
        let mech = ExponentialMechanism::new(0.0);
        let candidates = scores(&[10.0, 0.0, -4.0, 2.0]);
        let probs = mech.probabilities(&candidates, |&s| s);
        for p in probs {
            assert!((p - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_maximizer_probability_monotone_in_epsilon() {
        let candidates = scores(&[4.0, 1.0, 0.0]);
        let mut previous = 0.0;
        for epsilon in [0.0, 0.1, 0.5, 1.0, 2.0, 5.0] {
            let mech = ExponentialMechanism::new(epsilon);
            let probs = mech.probabilities(&candidates, |&s| s);
            assert!(
                probs[0] >= previous,
                "maximizer probability dropped at epsilon {}: {} < {}",
                epsilon,
                probs[0],
                previous
            );
            previous = probs[0];
        }
        // Strict increase end to end.
        assert!(previous > 1.0 / 3.0);
    }

    #[test]
    fn test_select_respects_distribution() {
        let mut mech = ExponentialMechanism::new(2.0).with_seed(42);
        let candidates = scores(&[3.0, 0.0]);

        let trials = 5_000;
        let mut first = 0usize;
        for _ in 0..trials {
            let result = mech.select(&candidates, |&s| s);
            assert!((result.probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            if result.index == 0 {
                first += 1;
            }
        }

        // p(first) = e^6 / (e^6 + 1) ~ 0.9975.
        let frequency = first as f64 / trials as f64;
        assert!(
            frequency > 0.98,
            "high-score candidate drawn at frequency {}",
            frequency
        );
    }

    #[test]
    fn test_large_scores_stay_finite() {
        let mech = ExponentialMechanism::new(10.0);
        let candidates = scores(&[500.0, 100.0, 0.0]);
        let probs = mech.probabilities(&candidates, |&s| s);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(probs[0] > 0.999);
    }

    #[test]
    #[should_panic(expected = "empty candidate set")]
    fn test_empty_candidates_panic() {
        let mut mech = ExponentialMechanism::new(1.0);
        let empty: Vec<f64> = Vec::new();
        mech.select(&empty, |&s| s);
    }
}
