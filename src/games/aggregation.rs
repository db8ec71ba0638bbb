//! Aggregation-threshold game (collector vs adversary, "hide-and-seek").
//!
//! A data collector chooses between protecting released data by
//! aggregating to a threshold `p` (action Protect) or staying transparent
//! (action Transparent). An adversary chooses between exploiting the
//! release to deanonymize a target (Exploit) or tolerating it (Tolerate).
//!
//! The economics are functions of `p`: the attack-success probability
//! decays exponentially as aggregation grows, while the collector's
//! privacy benefit and processing cost grow linearly. Sweeping `p` and
//! solving the mixed equilibrium at each point shows how aggregation
//! shifts equilibrium behavior and leakage.

use serde::{Deserialize, Serialize};

use crate::engine::equilibrium::{
    EquilibriumError, expected_outcome, mixed_equilibrium,
};
use crate::engine::game::{ActionPair, Game2x2, PayoffMatrix};

/// Collector action labels: aggregate/protect vs stay transparent.
pub const COLLECTOR_ACTIONS: ActionPair = ActionPair::new("Protect", "Transparent");

/// Adversary action labels.
pub const ADVERSARY_ACTIONS: ActionPair = ActionPair::new("Exploit", "Tolerate");

/// Economic and privacy parameters of the aggregation game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationParams {
    /// Adversary's value of a successful deanonymization.
    pub attack_value: f64,
    /// Adversary's cost of launching an attack.
    pub attack_cost: f64,
    /// Attack-success probability under weak protection (Transparent).
    pub base_success: f64,
    /// Collector's loss per successful deanonymization.
    pub leak_loss: f64,
    /// Collector's privacy benefit when Transparent (usually small).
    pub base_benefit: f64,
    /// Collector's query-processing cost when Transparent.
    pub base_cost: f64,
    /// How fast the success probability drops as `p` grows.
    pub alpha: f64,
    /// How fast the privacy benefit grows with `p`.
    pub beta: f64,
    /// How fast the processing cost grows with `p`.
    pub gamma: f64,
}

impl Default for AggregationParams {
    fn default() -> Self {
        Self {
            attack_value: 10.0,
            attack_cost: 6.0,
            base_success: 0.7,
            leak_loss: 8.0,
            base_benefit: 1.0,
            base_cost: 1.0,
            alpha: 0.25,
            beta: 0.1,
            gamma: 0.5,
        }
    }
}

impl AggregationParams {
    /// Attack-success probability when the collector protects at
    /// threshold `p`: `base_success * exp(-alpha * p)`.
    pub fn success_under_protection(&self, p: u32) -> f64 {
        self.base_success * (-self.alpha * p as f64).exp()
    }

    /// Collector's privacy benefit at threshold `p` (linear in `p`).
    pub fn privacy_benefit(&self, p: u32) -> f64 {
        self.base_benefit + self.beta * p as f64
    }

    /// Collector's processing cost at threshold `p` (linear in `p`).
    pub fn protection_cost(&self, p: u32) -> f64 {
        self.base_cost + self.gamma * p as f64
    }
}

/// Build the 2x2 game at aggregation threshold `p`.
///
/// The collector is the row player, the adversary the column player.
pub fn build_game(p: u32, params: &AggregationParams) -> Game2x2 {
    let q_p = params.success_under_protection(p);
    let benefit_p = params.privacy_benefit(p);
    let cost_p = params.protection_cost(p);

    // Row 0: collector protects.
    let dc_pe = benefit_p - cost_p - params.leak_loss * q_p;
    let adv_pe = params.attack_value * q_p - params.attack_cost;
    let dc_pt = benefit_p - cost_p;

    // Row 1: collector stays transparent.
    let dc_te = params.base_benefit - params.base_cost - params.leak_loss * params.base_success;
    let adv_te = params.attack_value * params.base_success - params.attack_cost;
    let dc_tt = params.base_benefit - params.base_cost;

    Game2x2::new(
        PayoffMatrix::new([[dc_pe, dc_pt], [dc_te, dc_tt]]),
        // Adversary's matrix, [adversary action][collector action]. The
        // adversary nets nothing when tolerating.
        PayoffMatrix::new([[adv_pe, adv_te], [0.0, 0.0]]),
    )
}

/// Equilibrium metrics for one aggregation threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMetrics {
    /// Aggregation threshold this row was computed at.
    pub p: u32,
    /// Equilibrium probability that the collector protects.
    pub x_star: f64,
    /// Equilibrium probability that the adversary exploits.
    pub y_star: f64,
    /// Expected probability of successful deanonymization at equilibrium:
    /// `y* * (x* * q_P(p) + (1 - x*) * q_T)`.
    pub leakage: f64,
    /// Collector's expected payoff at equilibrium.
    pub collector_payoff: f64,
    /// Adversary's expected payoff at equilibrium.
    pub adversary_payoff: f64,
}

/// Solve the game at threshold `p` and derive the equilibrium metrics.
pub fn threshold_metrics(
    p: u32,
    params: &AggregationParams,
) -> Result<ThresholdMetrics, EquilibriumError> {
    let game = build_game(p, params);
    let eq = mixed_equilibrium(&game)?;
    let outcome = expected_outcome(&game, &eq);

    // Attack-success rate blended over the collector's mix.
    let q_eff = eq.x_star * params.success_under_protection(p)
        + (1.0 - eq.x_star) * params.base_success;

    Ok(ThresholdMetrics {
        p,
        x_star: eq.x_star,
        y_star: eq.y_star,
        leakage: eq.y_star * q_eff,
        collector_payoff: outcome.row_payoff,
        adversary_payoff: outcome.col_payoff,
    })
}

/// Solve the game at each threshold in `thresholds`.
///
/// Fails on the first degenerate/no-interior threshold rather than
/// skipping it; callers choose the sweep range.
pub fn sweep_thresholds(
    thresholds: &[u32],
    params: &AggregationParams,
) -> Result<Vec<ThresholdMetrics>, EquilibriumError> {
    thresholds
        .iter()
        .map(|&p| threshold_metrics(p, params))
        .collect()
}
