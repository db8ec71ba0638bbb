//! # Privacy Games
//!
//! Game-theoretic analysis of strategic interactions between
//! privacy-sensitive actors: data owners, data collectors, adversaries,
//! and a ride-allocation broker.
//!
//! ## Features
//!
//! - **Closed-Form Equilibria**: pure-equilibrium enumeration and the
//!   indifference-method mixed solver for 2x2 normal-form games
//! - **Adaptive Agents**: one policy engine (fixed mix, best response,
//!   fictitious play, epsilon-greedy, threshold) with owned beliefs and
//!   seedable randomness
//! - **Private Selection**: the exponential mechanism with full
//!   probability-vector reporting for accuracy/welfare measurement
//! - **Scenario Sweeps**: aggregation thresholds, cost grids, repeated
//!   pseudonym matches, and epsilon tradeoff curves
//!
//! ## Quick Start
//!
//! ```
//! use privacy_games::engine::{mixed_equilibrium, Game2x2, PayoffMatrix};
//!
//! // Matching pennies: no pure equilibrium, mixes at one half.
//! let game = Game2x2::new(
//!     PayoffMatrix::new([[1.0, -1.0], [-1.0, 1.0]]),
//!     PayoffMatrix::new([[-1.0, 1.0], [1.0, -1.0]]),
//! );
//! let eq = mixed_equilibrium(&game).unwrap();
//! assert!((eq.x_star - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: the shared analytical core (solver, agents, mechanism)
//! - [`games`]: the four privacy scenarios built on it
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Analytical Core (engine)                    │
//! │  - 2x2 equilibrium solving   - Adaptive policy agents           │
//! │  - Belief tracking           - Exponential mechanism            │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ payoff matrices / scores
//!                               ▼
//!      ┌──────────────┬──────────────┬──────────────┬──────────────┐
//!      │ aggregation  │  protection  │  pseudonym   │  allocation  │
//!      │  (p sweep)   │ (cost sweep) │  (repeated)  │  (eps sweep) │
//!      └──────────────┴──────────────┴──────────────┴──────────────┘
//! ```

#![warn(missing_docs)]

/// Shared analytical core: equilibrium solver, adaptive agents, and the
/// exponential mechanism.
pub mod engine;

/// Privacy-game scenarios built on the core.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use engine::{
    ActionIdx, ActionPair, AdaptiveAgent, AgentConfig, AgentError, EquilibriumError,
    ExponentialMechanism, Game2x2, MixedEquilibrium, PayoffMatrix, Policy, SelectionResult,
};
