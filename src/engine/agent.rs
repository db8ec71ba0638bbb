//! Adaptive decision agents for repeated 2x2 privacy games.
//!
//! One engine covers every agent role in this crate (data owner, data
//! collector, adversary): the differences between roles live entirely in
//! the payoff matrices and labels the scenario hands in, and the
//! differences in behavior live in a single [`Policy`] variant chosen at
//! construction.
//!
//! An agent owns its belief state and its seedable random source, so two
//! agents never share mutable state and a seeded simulation replays
//! exactly.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::engine::belief::BeliefModel;
use crate::engine::game::{ActionIdx, ActionPair, PayoffMatrix};

/// How an agent selects its next action.
///
/// Each variant carries only the parameters it needs; dispatch happens in
/// one place, [`AdaptiveAgent::choose_action`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Policy {
    /// Sample from a fixed mixed strategy over the agent's two actions.
    Fixed {
        /// Probability of each own action, in action-index order.
        mix: [f64; 2],
    },
    /// Maximize expected payoff against a caller-supplied opponent
    /// distribution (uniform if none is supplied).
    BestResponse,
    /// Maximize expected payoff against the opponent's observed empirical
    /// frequencies (uniform before any observation).
    FictitiousPlay,
    /// With probability `epsilon` play a uniformly random action, else
    /// best-respond to the supplied distribution or the learned belief.
    EpsilonGreedy {
        /// Exploration probability in `[0, 1]`.
        epsilon: f64,
    },
    /// Play the protective action iff the decaying private value is at or
    /// below the threshold. Deterministic.
    Threshold {
        /// Private-value cutoff for cooperating.
        threshold: f64,
    },
}

/// Agent configuration and invocation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// The configured policy tag is not recognized.
    UnknownPolicy(String),
    /// Opponent action labels could neither be inferred nor were supplied.
    MissingOpponentActions,
    /// The threshold policy was selected without a threshold value.
    MissingThreshold,
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::UnknownPolicy(tag) => write!(f, "unknown policy '{}'", tag),
            AgentError::MissingOpponentActions => {
                write!(f, "opponent actions must be supplied for non-default action labels")
            }
            AgentError::MissingThreshold => {
                write!(f, "threshold policy requires a threshold value")
            }
        }
    }
}

impl std::error::Error for AgentError {}

/// Clip a distribution to non-negative entries and rescale to sum 1.
///
/// A total of zero (or less, after clipping) yields the uniform
/// distribution. Applied to every externally supplied distribution before
/// it is consumed.
pub fn normalize(dist: [f64; 2]) -> [f64; 2] {
    let clipped = [dist[0].max(0.0), dist[1].max(0.0)];
    let total = clipped[0] + clipped[1];
    if total <= 0.0 {
        return [0.5, 0.5];
    }
    [clipped[0] / total, clipped[1] / total]
}

/// A two-action agent with a fixed policy and learned opponent beliefs.
///
/// Scenario code drives the agent round by round:
///
/// 1. (threshold scenarios) [`decay_private_value`](Self::decay_private_value)
/// 2. [`choose_action`](Self::choose_action) with the current payoff view
/// 3. [`observe_outcome`](Self::observe_outcome) with the realized round
pub struct AdaptiveAgent {
    name: String,
    policy: Policy,
    actions: ActionPair,
    opponent_actions: Option<ActionPair>,
    belief: BeliefModel,
    /// Decaying private value `u` (current location-privacy payoff in the
    /// pseudonym game; last realized payoff elsewhere).
    private_value: f64,
    /// Decay rate applied by [`decay_private_value`](Self::decay_private_value).
    decay_rate: f64,
    total_score: f64,
    total_revenue: f64,
    total_spend: f64,
    rng: StdRng,
}

impl AdaptiveAgent {
    /// Create an agent with default `("C", "D")` labels and an
    /// entropy-seeded random source.
    pub fn new(name: impl Into<String>, policy: Policy) -> Self {
        Self {
            name: name.into(),
            policy,
            actions: ActionPair::default(),
            opponent_actions: None,
            belief: BeliefModel::new(),
            private_value: 0.0,
            decay_rate: 0.0,
            total_score: 0.0,
            total_revenue: 0.0,
            total_spend: 0.0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Builder method: seed the agent's random source for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Builder method: set the agent's own action labels.
    pub fn with_actions(mut self, actions: ActionPair) -> Self {
        self.actions = actions;
        self
    }

    /// Builder method: fix the opponent's action labels up front.
    pub fn with_opponent_actions(mut self, actions: ActionPair) -> Self {
        self.opponent_actions = Some(actions);
        self
    }

    /// Builder method: set the initial private value `u`.
    pub fn with_private_value(mut self, u: f64) -> Self {
        self.private_value = u;
        self
    }

    /// Builder method: set the decay rate for the private value.
    pub fn with_decay_rate(mut self, rate: f64) -> Self {
        self.decay_rate = rate;
        self
    }

    /// The agent's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The agent's own action labels.
    pub fn actions(&self) -> ActionPair {
        self.actions
    }

    /// The policy the agent was constructed with.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Current belief about the opponent's action frequencies.
    pub fn belief(&self) -> &BeliefModel {
        &self.belief
    }

    /// Explicitly override the belief counts (e.g. to seed a prior).
    pub fn override_belief(&mut self, counts: [u64; 2]) {
        self.belief.set_counts(counts);
    }

    /// Current private value `u`.
    pub fn private_value(&self) -> f64 {
        self.private_value
    }

    /// Cumulative realized payoff across observed rounds.
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Sum of non-negative realized payoffs.
    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    /// Sum of magnitudes of negative realized payoffs.
    pub fn total_spend(&self) -> f64 {
        self.total_spend
    }

    /// Replace the fixed mixed strategy (normalized on the way in).
    ///
    /// Only meaningful under [`Policy::Fixed`]; a no-op for other policies.
    pub fn set_mixed_strategy(&mut self, mix: [f64; 2]) {
        if let Policy::Fixed { mix: current } = &mut self.policy {
            *current = normalize(mix);
        }
    }

    /// Pick an action according to the agent's policy.
    ///
    /// `payoffs` is this agent's payoff view, indexed
    /// `[own action][opponent action]`. `opponent_actions` must be supplied
    /// (here or at construction) whenever the agent's own labels are not
    /// the defaults; the first resolved pair fixes the belief support.
    /// `opponent_mix` is an optional distribution over the opponent's
    /// actions, consumed by the best-response and epsilon-greedy policies
    /// and normalized before use.
    pub fn choose_action(
        &mut self,
        payoffs: &PayoffMatrix,
        opponent_actions: Option<&ActionPair>,
        opponent_mix: Option<[f64; 2]>,
    ) -> Result<ActionIdx, AgentError> {
        self.resolve_opponent_actions(opponent_actions)?;

        match self.policy {
            Policy::Threshold { threshold } => {
                // The private value just before the game decides directly.
                if self.private_value <= threshold {
                    Ok(ActionIdx::Cooperate)
                } else {
                    Ok(ActionIdx::Defect)
                }
            }
            Policy::Fixed { mix } => Ok(self.sample_from(normalize(mix))),
            Policy::FictitiousPlay => {
                let dist = self.belief.distribution();
                Ok(self.best_response(payoffs, dist))
            }
            Policy::EpsilonGreedy { epsilon } => {
                if self.rng.gen::<f64>() < epsilon {
                    let i = self.rng.gen_range(0..ActionIdx::BOTH.len());
                    return Ok(ActionIdx::from_index(i));
                }
                let dist = match opponent_mix {
                    Some(mix) => normalize(mix),
                    None => self.belief.distribution(),
                };
                Ok(self.best_response(payoffs, dist))
            }
            Policy::BestResponse => {
                let dist = match opponent_mix {
                    Some(mix) => normalize(mix),
                    None => [0.5, 0.5],
                };
                Ok(self.best_response(payoffs, dist))
            }
        }
    }

    /// Record a round: update beliefs, the private value, and bookkeeping.
    ///
    /// The belief counts the opponent's action; `u` becomes the realized
    /// payoff (the pre-game value for the next round); revenue and spend
    /// accumulate by payoff sign.
    pub fn observe_outcome(
        &mut self,
        _own_action: ActionIdx,
        opponent_action: ActionIdx,
        own_payoff: f64,
    ) {
        self.belief.observe(opponent_action);

        self.private_value = own_payoff;
        self.total_score += own_payoff;
        if own_payoff >= 0.0 {
            self.total_revenue += own_payoff;
        } else {
            self.total_spend += -own_payoff;
        }
    }

    /// Apply continuous privacy erosion: `u <- max(0, u - rate * dt)`.
    ///
    /// Called once per round before action selection in scenarios that
    /// model decay between games.
    pub fn decay_private_value(&mut self, dt: f64) {
        self.private_value = (self.private_value - self.decay_rate * dt).max(0.0);
    }

    /// Resolve the opponent's action labels, fixing them on first use.
    fn resolve_opponent_actions(
        &mut self,
        supplied: Option<&ActionPair>,
    ) -> Result<ActionPair, AgentError> {
        if let Some(pair) = supplied {
            self.opponent_actions.get_or_insert(*pair);
            return Ok(*pair);
        }
        if let Some(pair) = self.opponent_actions {
            return Ok(pair);
        }
        if self.actions.is_default() {
            let pair = ActionPair::default();
            self.opponent_actions = Some(pair);
            return Ok(pair);
        }
        Err(AgentError::MissingOpponentActions)
    }

    /// Expected-payoff maximization with uniform random tie-breaking.
    fn best_response(&mut self, payoffs: &PayoffMatrix, opp_dist: [f64; 2]) -> ActionIdx {
        let mut best_val = f64::NEG_INFINITY;
        let mut best_actions: Vec<ActionIdx> = Vec::with_capacity(2);

        for own in ActionIdx::BOTH {
            let row = payoffs.row(own);
            let expected = opp_dist[0] * row[0] + opp_dist[1] * row[1];
            if expected > best_val {
                best_val = expected;
                best_actions.clear();
                best_actions.push(own);
            } else if expected == best_val {
                best_actions.push(own);
            }
        }

        // Ties break uniformly at random, not lowest-index-first.
        best_actions[self.rng.gen_range(0..best_actions.len())]
    }

    /// Sample an action from a distribution by cumulative walk.
    fn sample_from(&mut self, dist: [f64; 2]) -> ActionIdx {
        let r: f64 = self.rng.gen();
        let mut cum = 0.0;
        for action in ActionIdx::BOTH {
            cum += dist[action.index()];
            if r <= cum {
                return action;
            }
        }
        // Fallback for floating point shortfall in the cumulative sum.
        ActionIdx::Defect
    }
}

impl fmt::Debug for AdaptiveAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveAgent")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("private_value", &self.private_value)
            .field("belief", &self.belief)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game::PayoffMatrix;
    use ActionIdx::{Cooperate as C, Defect as D};

    fn flat_payoffs() -> PayoffMatrix {
        PayoffMatrix::new([[1.0, 1.0], [1.0, 1.0]])
    }

    #[test]
    fn test_normalize_rules() {
        let dist = normalize([3.0, 1.0]);
        assert!((dist[0] - 0.75).abs() < 1e-12);
        assert!((dist[1] - 0.25).abs() < 1e-12);

        // Negative entries clip to zero before rescaling.
        assert_eq!(normalize([-1.0, 2.0]), [0.0, 1.0]);

        // A dead distribution falls back to uniform.
        assert_eq!(normalize([0.0, 0.0]), [0.5, 0.5]);
        assert_eq!(normalize([-3.0, -1.0]), [0.5, 0.5]);
    }

    #[test]
    fn test_best_response_maximizes_expected_payoff() {
        let mut agent = AdaptiveAgent::new("a", Policy::BestResponse).with_seed(7);
        // Cooperate pays more against either opponent action.
        let payoffs = PayoffMatrix::new([[3.0, 2.0], [1.0, 0.0]]);
        for _ in 0..20 {
            let action = agent.choose_action(&payoffs, None, None).unwrap();
            assert_eq!(action, C);
        }
    }

    #[test]
    fn test_best_response_uses_supplied_distribution() {
        let mut agent = AdaptiveAgent::new("a", Policy::BestResponse).with_seed(7);
        // Defect is better iff the opponent defects often.
        let payoffs = PayoffMatrix::new([[2.0, 0.0], [0.0, 3.0]]);

        let action = agent
            .choose_action(&payoffs, None, Some([0.9, 0.1]))
            .unwrap();
        assert_eq!(action, C);

        let action = agent
            .choose_action(&payoffs, None, Some([0.1, 0.9]))
            .unwrap();
        assert_eq!(action, D);
    }

    #[test]
    fn test_tie_breaking_is_uniform() {
        let mut agent = AdaptiveAgent::new("a", Policy::BestResponse).with_seed(42);
        let payoffs = flat_payoffs();

        let trials = 10_000;
        let mut cooperates = 0usize;
        for _ in 0..trials {
            if agent.choose_action(&payoffs, None, None).unwrap() == C {
                cooperates += 1;
            }
        }

        // Binomial(10_000, 0.5) should land well within 4 sigma (~200).
        let frequency = cooperates as f64 / trials as f64;
        assert!(
            (frequency - 0.5).abs() < 0.02,
            "tied actions not chosen uniformly: frequency {}",
            frequency
        );
    }

    #[test]
    fn test_fictitious_play_tracks_observed_frequencies() {
        let mut agent = AdaptiveAgent::new("a", Policy::FictitiousPlay).with_seed(3);
        let payoffs = PayoffMatrix::new([[2.0, 0.0], [0.0, 3.0]]);

        // Opponent defects every round; best response shifts to Defect.
        for _ in 0..10 {
            agent.observe_outcome(C, D, 0.0);
        }
        let action = agent.choose_action(&payoffs, None, None).unwrap();
        assert_eq!(action, D);
        assert_eq!(agent.belief().counts(), [0, 10]);
    }

    #[test]
    fn test_belief_converges_to_true_distribution() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut agent = AdaptiveAgent::new("a", Policy::FictitiousPlay).with_seed(11);
        let mut opponent_rng = StdRng::seed_from_u64(99);
        let true_dist = [0.7, 0.3];

        let n = 20_000;
        for _ in 0..n {
            let opp = if opponent_rng.gen::<f64>() < true_dist[0] { C } else { D };
            agent.observe_outcome(C, opp, 0.0);
        }

        let learned = agent.belief().distribution();
        let sup_norm = (learned[0] - true_dist[0])
            .abs()
            .max((learned[1] - true_dist[1]).abs());
        assert!(
            sup_norm < 0.02,
            "belief {:?} too far from {:?}",
            learned,
            true_dist
        );
    }

    #[test]
    fn test_fixed_policy_sampling_frequencies() {
        let mut agent = AdaptiveAgent::new(
            "a",
            Policy::Fixed { mix: [0.7, 0.3] },
        )
        .with_seed(5);
        let payoffs = flat_payoffs();

        let trials = 10_000;
        let mut cooperates = 0usize;
        for _ in 0..trials {
            if agent.choose_action(&payoffs, None, None).unwrap() == C {
                cooperates += 1;
            }
        }
        let frequency = cooperates as f64 / trials as f64;
        assert!(
            (frequency - 0.7).abs() < 0.02,
            "fixed mix sampled at {}",
            frequency
        );
    }

    #[test]
    fn test_epsilon_greedy_explores() {
        // With epsilon = 1 the agent ignores payoffs entirely.
        let mut agent = AdaptiveAgent::new(
            "a",
            Policy::EpsilonGreedy { epsilon: 1.0 },
        )
        .with_seed(8);
        // Cooperate strictly dominates; only exploration can pick Defect.
        let payoffs = PayoffMatrix::new([[5.0, 5.0], [0.0, 0.0]]);

        let mut defects = 0usize;
        for _ in 0..1000 {
            if agent.choose_action(&payoffs, None, None).unwrap() == D {
                defects += 1;
            }
        }
        assert!(defects > 400, "exploration picked Defect only {} times", defects);

        // With epsilon = 0 it never strays from the best response.
        let mut greedy = AdaptiveAgent::new(
            "a",
            Policy::EpsilonGreedy { epsilon: 0.0 },
        )
        .with_seed(8);
        for _ in 0..100 {
            assert_eq!(greedy.choose_action(&payoffs, None, None).unwrap(), C);
        }
    }

    #[test]
    fn test_threshold_policy_is_deterministic() {
        let mut agent = AdaptiveAgent::new(
            "a",
            Policy::Threshold { threshold: 0.5 },
        )
        .with_private_value(0.4)
        .with_seed(1);
        let payoffs = flat_payoffs();

        // u <= threshold: cooperate (change pseudonym).
        assert_eq!(agent.choose_action(&payoffs, None, None).unwrap(), C);

        // u above threshold: defect.
        agent.observe_outcome(C, C, 0.9);
        assert_eq!(agent.choose_action(&payoffs, None, None).unwrap(), D);
    }

    #[test]
    fn test_private_value_decay() {
        let mut agent = AdaptiveAgent::new("a", Policy::BestResponse)
            .with_private_value(1.0)
            .with_decay_rate(0.3);

        agent.decay_private_value(1.0);
        assert!((agent.private_value() - 0.7).abs() < 1e-12);

        // Clamped at zero.
        agent.decay_private_value(10.0);
        assert_eq!(agent.private_value(), 0.0);
    }

    #[test]
    fn test_observe_outcome_bookkeeping() {
        let mut agent = AdaptiveAgent::new("a", Policy::BestResponse);
        agent.observe_outcome(C, D, 3.0);
        agent.observe_outcome(D, C, -1.5);

        assert_eq!(agent.belief().counts(), [1, 1]);
        assert!((agent.total_score() - 1.5).abs() < 1e-12);
        assert!((agent.total_revenue() - 3.0).abs() < 1e-12);
        assert!((agent.total_spend() - 1.5).abs() < 1e-12);
        assert!((agent.private_value() - (-1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_missing_opponent_actions() {
        let mut agent = AdaptiveAgent::new("owner", Policy::BestResponse)
            .with_actions(ActionPair::new("Protect", "Defect"))
            .with_seed(2);
        let payoffs = flat_payoffs();

        // Non-default labels with no opponent pair anywhere: error.
        assert_eq!(
            agent.choose_action(&payoffs, None, None),
            Err(AgentError::MissingOpponentActions)
        );

        // Supplying the pair once fixes it for later calls.
        let adversary = ActionPair::new("Attack", "Abstain");
        assert!(agent.choose_action(&payoffs, Some(&adversary), None).is_ok());
        assert!(agent.choose_action(&payoffs, None, None).is_ok());
    }
}
