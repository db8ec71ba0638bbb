//! Scenario implementations built on the analytical core.
//!
//! Each module models one strategic privacy interaction: it derives payoff
//! numbers (or welfare scores) from its domain parameters and calls into
//! `crate::engine` for the actual analysis. The engine never sees domain
//! parameters; the scenarios never solve anything themselves.
//!
//! ## Available scenarios
//!
//! - [`aggregation`]: collector vs adversary over an aggregation threshold
//!   (mixed-equilibrium sweep, leakage).
//! - [`protection`]: data owner vs adversary (pure equilibria with explicit
//!   mixed fallback, cost-region sweep).
//! - [`pseudonym`]: repeated pseudonym-change game between two owners
//!   (decaying privacy, adaptive agents).
//! - [`allocation`]: privacy-preserving ride allocation (exponential
//!   mechanism, accuracy/welfare epsilon sweep).
//!
//! ## Adding a scenario
//!
//! 1. Create a module under `src/games/`
//! 2. Define its parameter types and a payoff/score builder
//! 3. Call the engine's solver, agents, or mechanism
//! 4. Add tests pinning the payoff construction and expected equilibria

pub mod aggregation;
pub mod allocation;
pub mod protection;
pub mod pseudonym;
