//! Analytical core shared by every privacy-game scenario.
//!
//! Three engines, each independent of any particular scenario's economics:
//!
//! - **Equilibrium solving** ([`equilibrium`]): pure-equilibrium
//!   enumeration and the closed-form indifference-method mixed solver for
//!   2x2 normal-form games, with explicit degeneracy reporting.
//! - **Adaptive agents** ([`agent`], [`belief`]): a single decision engine
//!   dispatching on a [`Policy`] variant (fixed mix, best response,
//!   fictitious play, epsilon-greedy, threshold-on-private-state), with
//!   owned belief state and an owned seedable random source per agent.
//! - **Private selection** ([`mechanism`]): the exponential mechanism for
//!   differentially-private weighted sampling, returning the full
//!   distribution for accuracy/welfare measurement.
//!
//! Scenario modules under `crate::games` construct payoff matrices and
//! candidate scores from their domain parameters and call in here; nothing
//! in this module knows about thresholds, pseudonyms, or taxi rides.
//!
//! All operations are synchronous and single-threaded. The only mutable
//! state is each agent's/selector's own belief and RNG; parameter sweeps
//! over many independent games are safe to parallelize from the outside.

pub mod agent;
pub mod belief;
pub mod config;
pub mod equilibrium;
pub mod game;
pub mod mechanism;

// Re-export main types for convenient access
pub use agent::{AdaptiveAgent, AgentError, Policy, normalize};
pub use belief::BeliefModel;
pub use config::AgentConfig;
pub use equilibrium::{
    EquilibriumError, ExpectedOutcome, MixedEquilibrium, expected_outcome, mixed_equilibrium,
    pure_equilibria,
};
pub use game::{ActionIdx, ActionPair, Game2x2, PayoffMatrix, Profile};
pub use mechanism::{ExponentialMechanism, SelectionResult};
