//! Core vocabulary for 2x2 normal-form games.
//!
//! Every scenario in this crate is a two-player, two-action interaction:
//! one "protective" move (protect, cooperate, aggregate, change pseudonym)
//! and one "defecting" move (stay transparent, defect, abstain). This module
//! provides the small typed vocabulary the analysis engines are written
//! against: action indices, display label pairs, payoff matrices, and the
//! two-matrix game container.

use serde::{Deserialize, Serialize};

/// Index into a player's two actions.
///
/// Index 0 is always the protective/cooperative action and index 1 the
/// defecting/tolerant one, for every role in every scenario. Scenario
/// modules attach their own display labels via [`ActionPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionIdx {
    /// The protective / cooperative action (row or column 0).
    Cooperate,
    /// The defecting / tolerant action (row or column 1).
    Defect,
}

impl ActionIdx {
    /// Both actions in index order.
    pub const BOTH: [ActionIdx; 2] = [ActionIdx::Cooperate, ActionIdx::Defect];

    /// Numeric index (0 for cooperate, 1 for defect).
    pub fn index(self) -> usize {
        match self {
            ActionIdx::Cooperate => 0,
            ActionIdx::Defect => 1,
        }
    }

    /// The action at a numeric index.
    ///
    /// # Panics
    /// Panics if `i` is not 0 or 1.
    pub fn from_index(i: usize) -> ActionIdx {
        match i {
            0 => ActionIdx::Cooperate,
            1 => ActionIdx::Defect,
            _ => panic!("action index {} out of range for a 2-action game", i),
        }
    }

    /// The other action.
    pub fn other(self) -> ActionIdx {
        match self {
            ActionIdx::Cooperate => ActionIdx::Defect,
            ActionIdx::Defect => ActionIdx::Cooperate,
        }
    }
}

/// Display labels for a role's two actions.
///
/// The default pair is `("C", "D")`; scenario modules substitute their own
/// (e.g. `("Protect", "Defect")` for a data owner, `("Attack", "Abstain")`
/// for an adversary). Labels are cosmetic: all payoff indexing goes through
/// [`ActionIdx`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionPair {
    labels: [&'static str; 2],
}

impl ActionPair {
    /// A label pair with `cooperate` at index 0 and `defect` at index 1.
    pub const fn new(cooperate: &'static str, defect: &'static str) -> Self {
        Self {
            labels: [cooperate, defect],
        }
    }

    /// The label for an action.
    pub fn label(&self, action: ActionIdx) -> &'static str {
        self.labels[action.index()]
    }

    /// Whether this is the default `("C", "D")` pair.
    pub fn is_default(&self) -> bool {
        *self == ActionPair::default()
    }
}

impl Default for ActionPair {
    fn default() -> Self {
        ActionPair::new("C", "D")
    }
}

/// A 2x2 payoff matrix for one player, indexed `[own action][opponent action]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffMatrix([[f64; 2]; 2]);

impl PayoffMatrix {
    /// Build a matrix from rows in `[own][opponent]` order.
    pub fn new(cells: [[f64; 2]; 2]) -> Self {
        Self(cells)
    }

    /// Payoff when this player plays `own` against `opp`.
    pub fn get(&self, own: ActionIdx, opp: ActionIdx) -> f64 {
        self.0[own.index()][opp.index()]
    }

    /// The two payoffs for `own`, in opponent-action order.
    pub fn row(&self, own: ActionIdx) -> [f64; 2] {
        self.0[own.index()]
    }
}

/// A joint action profile `(row player's action, column player's action)`.
pub type Profile = (ActionIdx, ActionIdx);

/// A two-player 2x2 normal-form game.
///
/// Both matrices are indexed `[own action][opponent action]`: `row` from the
/// row player's perspective and `col` from the column player's. A profile
/// `(r, c)` therefore pays `row.get(r, c)` to the row player and
/// `col.get(c, r)` to the column player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Game2x2 {
    /// Row player's payoffs, `[row action][column action]`.
    pub row: PayoffMatrix,
    /// Column player's payoffs, `[column action][row action]`.
    pub col: PayoffMatrix,
}

impl Game2x2 {
    /// Build a game from the two payoff matrices.
    pub fn new(row: PayoffMatrix, col: PayoffMatrix) -> Self {
        Self { row, col }
    }

    /// Both players' payoffs at a joint profile.
    pub fn payoffs(&self, profile: Profile) -> (f64, f64) {
        let (r, c) = profile;
        (self.row.get(r, c), self.col.get(c, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_indexing() {
        assert_eq!(ActionIdx::Cooperate.index(), 0);
        assert_eq!(ActionIdx::Defect.index(), 1);
        assert_eq!(ActionIdx::from_index(0), ActionIdx::Cooperate);
        assert_eq!(ActionIdx::from_index(1), ActionIdx::Defect);
        assert_eq!(ActionIdx::Cooperate.other(), ActionIdx::Defect);
        assert_eq!(ActionIdx::BOTH.len(), 2);
    }

    #[test]
    fn test_action_pair_labels() {
        let pair = ActionPair::new("Protect", "Defect");
        assert_eq!(pair.label(ActionIdx::Cooperate), "Protect");
        assert_eq!(pair.label(ActionIdx::Defect), "Defect");
        assert!(!pair.is_default());
        assert!(ActionPair::default().is_default());
    }

    #[test]
    fn test_profile_payoffs() {
        let game = Game2x2::new(
            PayoffMatrix::new([[1.0, 2.0], [3.0, 4.0]]),
            PayoffMatrix::new([[10.0, 20.0], [30.0, 40.0]]),
        );

        // Row plays Defect, column plays Cooperate: row reads [1][0],
        // column reads its own matrix at [0][1].
        let (r, c) = game.payoffs((ActionIdx::Defect, ActionIdx::Cooperate));
        assert_eq!(r, 3.0);
        assert_eq!(c, 20.0);
    }
}
