//! Empirical belief about an opponent's action frequencies.
//!
//! A `BeliefModel` counts how often each of the opponent's two actions has
//! been observed and exposes the empirical distribution `count / total`.
//! Before any observation the distribution is uniform, so fictitious play
//! starts from an uninformed prior without special-casing the first round.

use serde::{Deserialize, Serialize};

use crate::engine::game::ActionIdx;

/// Observation counts over an opponent's two actions.
///
/// Mutated only through [`observe`](BeliefModel::observe) (the agent's
/// outcome step) or the explicit [`set_counts`](BeliefModel::set_counts)
/// override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeliefModel {
    counts: [u64; 2],
}

impl BeliefModel {
    /// An empty belief (uniform distribution until the first observation).
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of an opponent action.
    pub fn observe(&mut self, action: ActionIdx) {
        self.counts[action.index()] += 1;
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Raw observation counts in action-index order.
    pub fn counts(&self) -> [u64; 2] {
        self.counts
    }

    /// Replace the counts wholesale (e.g. to seed a belief before play).
    pub fn set_counts(&mut self, counts: [u64; 2]) {
        self.counts = counts;
    }

    /// The empirical distribution `count / total`, uniform when empty.
    ///
    /// Always sums to 1 over the two actions.
    pub fn distribution(&self) -> [f64; 2] {
        let total = self.total();
        if total == 0 {
            return [0.5, 0.5];
        }
        [
            self.counts[0] as f64 / total as f64,
            self.counts[1] as f64 / total as f64,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_belief_is_uniform() {
        let belief = BeliefModel::new();
        assert_eq!(belief.total(), 0);
        assert_eq!(belief.distribution(), [0.5, 0.5]);
    }

    #[test]
    fn test_distribution_tracks_counts() {
        let mut belief = BeliefModel::new();
        belief.observe(ActionIdx::Cooperate);
        belief.observe(ActionIdx::Cooperate);
        belief.observe(ActionIdx::Defect);

        assert_eq!(belief.counts(), [2, 1]);
        let dist = belief.distribution();
        assert!((dist[0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((dist[1] - 1.0 / 3.0).abs() < 1e-12);
        assert!((dist[0] + dist[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_counts_override() {
        let mut belief = BeliefModel::new();
        belief.set_counts([10, 30]);
        assert_eq!(belief.distribution(), [0.25, 0.75]);
    }
}
