//! Closed-form equilibrium analysis for 2x2 games.
//!
//! Two solving paths are provided and deliberately kept separate:
//!
//! - [`pure_equilibria`] enumerates all pure Nash equilibria by intersecting
//!   best-response sets (ties kept).
//! - [`mixed_equilibrium`] computes the unique interior mixed equilibrium by
//!   the indifference method, failing explicitly when the game is degenerate
//!   or the candidate probabilities leave `[0, 1]`.
//!
//! There is no silent fallback from one path to the other. Callers that
//! want "pure first, then mixed" (the protection scenario does) make both
//! calls themselves, so the failure mode of each path stays visible.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::game::{ActionIdx, Game2x2, Profile};

/// Denominator magnitude below which an indifference condition is treated
/// as undefined.
pub const DEGENERACY_TOLERANCE: f64 = 1e-12;

/// Why the mixed-equilibrium computation failed.
#[derive(Debug, Clone, PartialEq)]
pub enum EquilibriumError {
    /// An indifference-condition denominator is numerically zero; the game
    /// has no well-defined interior candidate via this method.
    Degenerate,
    /// The candidate probabilities fall outside `[0, 1]`; the game's unique
    /// candidate is not a valid mixed strategy. Consult [`pure_equilibria`]
    /// instead.
    NoInterior {
        /// Candidate probability that the row player plays action 0.
        x_star: f64,
        /// Candidate probability that the column player plays action 0.
        y_star: f64,
    },
}

impl fmt::Display for EquilibriumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquilibriumError::Degenerate => {
                write!(f, "no interior mixed equilibrium: indifference denominator is zero")
            }
            EquilibriumError::NoInterior { x_star, y_star } => {
                write!(
                    f,
                    "no interior mixed equilibrium: candidate x*={}, y*={} outside [0, 1]",
                    x_star, y_star
                )
            }
        }
    }
}

impl std::error::Error for EquilibriumError {}

/// An interior mixed-strategy equilibrium of a 2x2 game.
///
/// Both probabilities refer to action 0 (the protective action) and lie in
/// `[0, 1]` whenever this struct is returned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixedEquilibrium {
    /// Probability that the row player plays action 0.
    pub x_star: f64,
    /// Probability that the column player plays action 0.
    pub y_star: f64,
}

/// Probability-weighted payoffs at a mixed-strategy profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedOutcome {
    /// Expected payoff for the row player.
    pub row_payoff: f64,
    /// Expected payoff for the column player.
    pub col_payoff: f64,
}

/// The row player's best-response set against a fixed column action.
///
/// Ties are kept: if both actions pay the same, both are returned.
fn row_best_responses(game: &Game2x2, opp: ActionIdx) -> Vec<ActionIdx> {
    best_of(|own| game.row.get(own, opp))
}

/// The column player's best-response set against a fixed row action.
fn col_best_responses(game: &Game2x2, opp: ActionIdx) -> Vec<ActionIdx> {
    best_of(|own| game.col.get(own, opp))
}

fn best_of(payoff: impl Fn(ActionIdx) -> f64) -> Vec<ActionIdx> {
    let best = ActionIdx::BOTH
        .iter()
        .map(|&a| payoff(a))
        .fold(f64::NEG_INFINITY, f64::max);
    ActionIdx::BOTH
        .iter()
        .copied()
        .filter(|&a| payoff(a) == best)
        .collect()
}

/// Enumerate all pure Nash equilibria of a 2x2 game.
///
/// A profile `(r, c)` is a pure equilibrium iff `r` is in the row player's
/// best-response set against `c` and `c` is in the column player's
/// best-response set against `r`. The result may be empty or hold several
/// profiles; enumeration order is row-major over the 2x2 grid.
pub fn pure_equilibria(game: &Game2x2) -> Vec<Profile> {
    let mut equilibria = Vec::new();
    for r in ActionIdx::BOTH {
        for c in ActionIdx::BOTH {
            if row_best_responses(game, c).contains(&r)
                && col_best_responses(game, r).contains(&c)
            {
                equilibria.push((r, c));
            }
        }
    }
    equilibria
}

/// Compute the unique interior mixed equilibrium by the indifference method.
///
/// With the row player's payoffs `a, b, c, d` and the column player's
/// `e, f, g, h` at the profiles `(0,0), (0,1), (1,0), (1,1)`:
///
/// ```text
/// y* = (d - b) / ((a - c) - (b - d))   row player indifferent
/// x* = (h - g) / ((e - g) - (f - h))   column player indifferent
/// ```
///
/// # Errors
/// - [`EquilibriumError::Degenerate`] when either denominator's magnitude
///   is below [`DEGENERACY_TOLERANCE`].
/// - [`EquilibriumError::NoInterior`] when either probability leaves
///   `[0, 1]`.
pub fn mixed_equilibrium(game: &Game2x2) -> Result<MixedEquilibrium, EquilibriumError> {
    use ActionIdx::{Cooperate as C, Defect as D};

    // Row player's payoffs at the four profiles.
    let a = game.row.get(C, C);
    let b = game.row.get(C, D);
    let c = game.row.get(D, C);
    let d = game.row.get(D, D);

    // Column player's payoffs at the same profiles (own action second in
    // the profile, first in its matrix).
    let e = game.col.get(C, C);
    let f = game.col.get(D, C);
    let g = game.col.get(C, D);
    let h = game.col.get(D, D);

    let denom_row = (a - c) - (b - d);
    let denom_col = (e - g) - (f - h);
    if denom_row.abs() < DEGENERACY_TOLERANCE || denom_col.abs() < DEGENERACY_TOLERANCE {
        return Err(EquilibriumError::Degenerate);
    }

    let y_star = (d - b) / denom_row;
    let x_star = (h - g) / denom_col;

    if !(0.0..=1.0).contains(&x_star) || !(0.0..=1.0).contains(&y_star) {
        return Err(EquilibriumError::NoInterior { x_star, y_star });
    }

    Ok(MixedEquilibrium { x_star, y_star })
}

/// Expected payoffs for both players at a mixed-strategy profile.
///
/// Enumerates the four joint-action probabilities `x*y*`, `x*(1-y*)`,
/// `(1-x*)y*`, `(1-x*)(1-y*)` against the corresponding payoff cells.
/// Scenario-specific derived quantities (e.g. a blended attack-success
/// rate) are computed by the caller from `x*` and `y*`.
pub fn expected_outcome(game: &Game2x2, eq: &MixedEquilibrium) -> ExpectedOutcome {
    let x = eq.x_star;
    let y = eq.y_star;

    let mut row_payoff = 0.0;
    let mut col_payoff = 0.0;
    for r in ActionIdx::BOTH {
        for c in ActionIdx::BOTH {
            let pr = if r == ActionIdx::Cooperate { x } else { 1.0 - x };
            let pc = if c == ActionIdx::Cooperate { y } else { 1.0 - y };
            let (u_row, u_col) = game.payoffs((r, c));
            row_payoff += pr * pc * u_row;
            col_payoff += pr * pc * u_col;
        }
    }

    ExpectedOutcome {
        row_payoff,
        col_payoff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game::PayoffMatrix;
    use ActionIdx::{Cooperate as C, Defect as D};

    /// Owner-vs-adversary game with a single pure equilibrium at
    /// (Protect, Attack): protect/attack = (1.6, 1.5),
    /// protect/abstain = (2.6, 0), defect/attack = (-7, 24),
    /// defect/abstain = (3, 0).
    fn protection_game() -> Game2x2 {
        Game2x2::new(
            PayoffMatrix::new([[1.6, 2.6], [-7.0, 3.0]]),
            // Adversary payoffs, [adversary action][owner action].
            PayoffMatrix::new([[1.5, 24.0], [0.0, 0.0]]),
        )
    }

    #[test]
    fn test_single_pure_equilibrium() {
        let eqs = pure_equilibria(&protection_game());
        assert_eq!(eqs, vec![(C, C)], "expected exactly (Protect, Attack)");
    }

    #[test]
    fn test_pure_equilibria_keep_ties() {
        // Constant game: every profile is an equilibrium.
        let flat = Game2x2::new(
            PayoffMatrix::new([[1.0, 1.0], [1.0, 1.0]]),
            PayoffMatrix::new([[1.0, 1.0], [1.0, 1.0]]),
        );
        let eqs = pure_equilibria(&flat);
        assert_eq!(eqs, vec![(C, C), (C, D), (D, C), (D, D)]);
    }

    #[test]
    fn test_no_pure_equilibrium_in_matching_pennies() {
        let pennies = Game2x2::new(
            PayoffMatrix::new([[1.0, -1.0], [-1.0, 1.0]]),
            PayoffMatrix::new([[-1.0, 1.0], [1.0, -1.0]]),
        );
        assert!(pure_equilibria(&pennies).is_empty());
        let eq = mixed_equilibrium(&pennies).unwrap();
        assert!((eq.x_star - 0.5).abs() < 1e-12);
        assert!((eq.y_star - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_coordination_mixes_at_half() {
        let coordination = Game2x2::new(
            PayoffMatrix::new([[2.0, 0.0], [0.0, 2.0]]),
            PayoffMatrix::new([[2.0, 0.0], [0.0, 2.0]]),
        );
        let eq = mixed_equilibrium(&coordination).unwrap();
        assert!((eq.x_star - 0.5).abs() < 1e-12);
        assert!((eq.y_star - 0.5).abs() < 1e-12);

        // Both players split the diagonal payoff evenly.
        let outcome = expected_outcome(&coordination, &eq);
        assert!((outcome.row_payoff - 1.0).abs() < 1e-12);
        assert!((outcome.col_payoff - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dominant_strategy_game_is_degenerate() {
        // Action 0 strictly dominates for both players, so both
        // indifference denominators are exactly zero.
        let dominant = Game2x2::new(
            PayoffMatrix::new([[8.0, 2.0], [6.0, 0.0]]),
            PayoffMatrix::new([[8.0, 2.0], [6.0, 0.0]]),
        );
        assert_eq!(mixed_equilibrium(&dominant), Err(EquilibriumError::Degenerate));
    }

    #[test]
    fn test_no_interior_candidate_reported() {
        // Generic denominators but a candidate probability outside [0, 1].
        let game = Game2x2::new(
            PayoffMatrix::new([[5.0, 4.0], [1.0, 3.0]]),
            PayoffMatrix::new([[5.0, 4.0], [1.0, 3.0]]),
        );
        // denom = (5-1) - (4-3) = 3, y* = (3-4)/3 < 0.
        match mixed_equilibrium(&game) {
            Err(EquilibriumError::NoInterior { y_star, .. }) => assert!(y_star < 0.0),
            other => panic!("expected NoInterior, got {:?}", other),
        }
    }

    #[test]
    fn test_indifference_property_holds() {
        // Wherever the mixed solve succeeds, each player is indifferent
        // between its two actions under the opponent's equilibrium mix.
        let games = [
            Game2x2::new(
                PayoffMatrix::new([[1.0, -1.0], [-1.0, 1.0]]),
                PayoffMatrix::new([[-1.0, 1.0], [1.0, -1.0]]),
            ),
            Game2x2::new(
                PayoffMatrix::new([[3.0, 0.0], [1.0, 2.0]]),
                PayoffMatrix::new([[2.0, 0.5], [0.0, 3.0]]),
            ),
        ];

        for game in games {
            let eq = match mixed_equilibrium(&game) {
                Ok(eq) => eq,
                Err(_) => continue,
            };
            assert!((0.0..=1.0).contains(&eq.x_star));
            assert!((0.0..=1.0).contains(&eq.y_star));

            let y = eq.y_star;
            let ev_row_0 = y * game.row.get(C, C) + (1.0 - y) * game.row.get(C, D);
            let ev_row_1 = y * game.row.get(D, C) + (1.0 - y) * game.row.get(D, D);
            assert!(
                (ev_row_0 - ev_row_1).abs() < 1e-9,
                "row player not indifferent: {} vs {}",
                ev_row_0,
                ev_row_1
            );

            let x = eq.x_star;
            let ev_col_0 = x * game.col.get(C, C) + (1.0 - x) * game.col.get(C, D);
            let ev_col_1 = x * game.col.get(D, C) + (1.0 - x) * game.col.get(D, D);
            assert!(
                (ev_col_0 - ev_col_1).abs() < 1e-9,
                "column player not indifferent: {} vs {}",
                ev_col_0,
                ev_col_1
            );
        }
    }

    #[test]
    fn test_expected_outcome_at_pure_corner() {
        let game = protection_game();
        let corner = MixedEquilibrium {
            x_star: 1.0,
            y_star: 1.0,
        };
        let outcome = expected_outcome(&game, &corner);
        assert!((outcome.row_payoff - 1.6).abs() < 1e-12);
        assert!((outcome.col_payoff - 1.5).abs() < 1e-12);
    }
}
