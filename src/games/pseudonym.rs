//! Repeated pseudonym-change game between two data owners.
//!
//! Each owner carries a location-privacy value `u` that erodes between
//! rounds. Changing pseudonyms in concert (both Cooperate) restores full
//! anonymity at cost `gamma`; changing alone wastes most of the cost;
//! keeping the pseudonym (Defect) preserves the current value. Payoff
//! matrices are rebuilt every round from the two current values, so the
//! game drifts as privacy erodes.

use serde::{Deserialize, Serialize};

use crate::engine::agent::{AdaptiveAgent, AgentError};
use crate::engine::game::{ActionIdx, ActionPair, Game2x2, PayoffMatrix};

/// Anonymity gained by a successful simultaneous pseudonym change:
/// log2 of the anonymity-set size, which is 2 for two participants.
pub const ANONYMITY_GAIN: f64 = 1.0;

/// Owner action labels: change pseudonym vs keep it.
pub const PSEUDONYM_ACTIONS: ActionPair = ActionPair::new("C", "D");

/// Shared parameters of the repeated game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PseudonymParams {
    /// Cost of changing a pseudonym.
    pub change_cost: f64,
    /// Privacy-loss rate per time step.
    pub loss_rate: f64,
    /// Initial location-privacy value.
    pub initial_privacy: f64,
    /// Number of rounds to play.
    pub rounds: u32,
}

impl Default for PseudonymParams {
    fn default() -> Self {
        Self {
            change_cost: 0.3,
            loss_rate: 0.05,
            initial_privacy: ANONYMITY_GAIN,
            rounds: 20,
        }
    }
}

impl PseudonymParams {
    /// The private value an owner starts with: the initial privacy minus
    /// one change cost, as if a successful change just happened.
    pub fn initial_value(&self) -> f64 {
        self.initial_privacy - self.change_cost
    }
}

/// Build one round's game from the two owners' current privacy values.
///
/// With `u1`, `u2` the pre-round values and `gamma` the change cost:
/// both changing yields `ANONYMITY_GAIN - gamma` each; changing alone
/// yields `max(0, u - gamma)` while the other keeps `u`; neither changing
/// keeps both values.
pub fn build_round_game(u1: f64, u2: f64, gamma: f64) -> Game2x2 {
    let both = ANONYMITY_GAIN - gamma;

    Game2x2::new(
        PayoffMatrix::new([[both, (u1 - gamma).max(0.0)], [u1, u1]]),
        PayoffMatrix::new([[both, (u2 - gamma).max(0.0)], [u2, u2]]),
    )
}

/// What happened in one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number.
    pub round: u32,
    /// First owner's action ("C" or "D").
    pub action1: String,
    /// Second owner's action.
    pub action2: String,
    /// First owner's realized payoff.
    pub payoff1: f64,
    /// Second owner's realized payoff.
    pub payoff2: f64,
}

/// Full transcript of a repeated match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Per-round transcript.
    pub rounds: Vec<RoundRecord>,
    /// Final private values `(u1, u2)`.
    pub final_values: (f64, f64),
    /// Cumulative scores across all rounds.
    pub total_scores: (f64, f64),
}

/// Play a repeated match between two agents.
///
/// Each round: both private values decay by one time step, the round game
/// is rebuilt from the current values, each agent chooses from its own
/// payoff view, and both observe the realized outcome.
///
/// Agents should be constructed with `initial_value()` as their private
/// value and `loss_rate` as their decay rate.
pub fn run_match(
    agent1: &mut AdaptiveAgent,
    agent2: &mut AdaptiveAgent,
    params: &PseudonymParams,
) -> Result<MatchOutcome, AgentError> {
    let mut rounds = Vec::with_capacity(params.rounds as usize);

    for round in 1..=params.rounds {
        agent1.decay_private_value(1.0);
        agent2.decay_private_value(1.0);

        let game = build_round_game(
            agent1.private_value(),
            agent2.private_value(),
            params.change_cost,
        );

        let a1 = agent1.choose_action(&game.row, Some(&PSEUDONYM_ACTIONS), None)?;
        let a2 = agent2.choose_action(&game.col, Some(&PSEUDONYM_ACTIONS), None)?;

        let (payoff1, payoff2) = game.payoffs((a1, a2));
        agent1.observe_outcome(a1, a2, payoff1);
        agent2.observe_outcome(a2, a1, payoff2);

        rounds.push(RoundRecord {
            round,
            action1: PSEUDONYM_ACTIONS.label(a1).to_string(),
            action2: PSEUDONYM_ACTIONS.label(a2).to_string(),
            payoff1,
            payoff2,
        });
    }

    Ok(MatchOutcome {
        rounds,
        final_values: (agent1.private_value(), agent2.private_value()),
        total_scores: (agent1.total_score(), agent2.total_score()),
    })
}
