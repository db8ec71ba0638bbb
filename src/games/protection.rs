//! Owner/adversary protection game.
//!
//! A data owner derives utility `U` from sharing data and stands to lose
//! privacy value `P` to a successful attack; protecting costs `C_p` and
//! damps the attack through the discount `gamma`. The adversary gains `G`
//! from a successful attack at cost `C_a`.
//!
//! Analysis follows a two-step protocol: pure equilibria are enumerated
//! first, and only when none exist is the mixed solver consulted. A mixed
//! failure is reported, never papered over.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::engine::equilibrium::{
    EquilibriumError, MixedEquilibrium, mixed_equilibrium, pure_equilibria,
};
use crate::engine::game::{ActionPair, Game2x2, PayoffMatrix, Profile};

/// Owner action labels.
pub const OWNER_ACTIONS: ActionPair = ActionPair::new("Protect", "Defect");

/// Adversary action labels.
pub const ADVERSARY_ACTIONS: ActionPair = ActionPair::new("Attack", "Abstain");

/// The data owner's economics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OwnerParams {
    /// Utility from sharing data.
    pub utility: f64,
    /// Privacy value lost to a successful attack.
    pub privacy_loss: f64,
    /// Cost of protecting.
    pub protection_cost: f64,
    /// Attack effectiveness remaining under protection, in `[0, 1]`.
    pub gamma: f64,
}

/// The adversary's economics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdversaryParams {
    /// Gain from a successful attack.
    pub gain: f64,
    /// Cost of attacking.
    pub attack_cost: f64,
}

/// Build the 2x2 game; the owner is the row player.
///
/// Profiles pay:
/// - (Protect, Attack): `(U - C_p - gamma*P, gamma*G - C_a)`
/// - (Protect, Abstain): `(U - C_p, 0)`
/// - (Defect, Attack): `(U - P, G - C_a)`
/// - (Defect, Abstain): `(U, 0)`
pub fn build_game(owner: &OwnerParams, adversary: &AdversaryParams) -> Game2x2 {
    let pa_owner = owner.utility - owner.protection_cost - owner.gamma * owner.privacy_loss;
    let pa_adv = owner.gamma * adversary.gain - adversary.attack_cost;
    let da_owner = owner.utility - owner.privacy_loss;
    let da_adv = adversary.gain - adversary.attack_cost;

    Game2x2::new(
        PayoffMatrix::new([
            [pa_owner, owner.utility - owner.protection_cost],
            [da_owner, owner.utility],
        ]),
        // Adversary's matrix, [adversary action][owner action]; abstaining
        // nets zero either way.
        PayoffMatrix::new([[pa_adv, da_adv], [0.0, 0.0]]),
    )
}

/// Result of the two-step equilibrium analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// At least one pure equilibrium exists (all of them, row-major order).
    Pure(Vec<Profile>),
    /// No pure equilibrium; the interior mixed equilibrium.
    Mixed(MixedEquilibrium),
}

/// Analyze a game: pure equilibria first, mixed only if none exist.
///
/// # Errors
/// Propagates the mixed solver's failure when the game has neither a pure
/// equilibrium nor a valid interior mixed one.
pub fn analyze(game: &Game2x2) -> Result<Analysis, EquilibriumError> {
    let pure = pure_equilibria(game);
    if !pure.is_empty() {
        return Ok(Analysis::Pure(pure));
    }
    mixed_equilibrium(game).map(Analysis::Mixed)
}

/// One cell of the cost-sweep grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCell {
    /// Owner's protection cost at this cell.
    pub protection_cost: f64,
    /// Adversary's attack cost at this cell.
    pub attack_cost: f64,
    /// Region label: a `Owner_Adversary` profile name for a unique pure
    /// equilibrium, `"multiple"`, or `"no_pure_eq"`.
    pub label: String,
}

/// Sweep the (protection cost, attack cost) grid and label each cell by
/// its pure-equilibrium structure.
pub fn sweep_costs(
    base_owner: &OwnerParams,
    base_adversary: &AdversaryParams,
    protection_costs: &[f64],
    attack_costs: &[f64],
) -> Vec<CostCell> {
    let mut cells = Vec::with_capacity(protection_costs.len() * attack_costs.len());
    for &c_p in protection_costs {
        for &c_a in attack_costs {
            let owner = OwnerParams {
                protection_cost: c_p,
                ..*base_owner
            };
            let adversary = AdversaryParams {
                attack_cost: c_a,
                ..*base_adversary
            };
            let game = build_game(&owner, &adversary);
            let equilibria = pure_equilibria(&game);

            let label = match equilibria.as_slice() {
                [] => "no_pure_eq".to_string(),
                [(o, a)] => format!(
                    "{}_{}",
                    OWNER_ACTIONS.label(*o),
                    ADVERSARY_ACTIONS.label(*a)
                ),
                _ => "multiple".to_string(),
            };
            cells.push(CostCell {
                protection_cost: c_p,
                attack_cost: c_a,
                label,
            });
        }
    }
    cells
}

/// Tally how often each region label occurs in a sweep.
pub fn label_counts(cells: &[CostCell]) -> FxHashMap<String, usize> {
    let mut counts = FxHashMap::default();
    for cell in cells {
        *counts.entry(cell.label.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game::ActionIdx::{Cooperate as C, Defect as D};

    fn default_owner() -> OwnerParams {
        OwnerParams {
            utility: 3.0,
            privacy_loss: 10.0,
            protection_cost: 0.4,
            gamma: 0.1,
        }
    }

    fn default_adversary() -> AdversaryParams {
        AdversaryParams {
            gain: 25.0,
            attack_cost: 1.0,
        }
    }

    #[test]
    fn test_payoff_construction() {
        let game = build_game(&default_owner(), &default_adversary());

        assert_eq!(game.payoffs((C, C)), (1.6, 1.5)); // Protect, Attack
        assert_eq!(game.payoffs((C, D)), (2.6, 0.0)); // Protect, Abstain
        assert_eq!(game.payoffs((D, C)), (-7.0, 24.0)); // Defect, Attack
        assert_eq!(game.payoffs((D, D)), (3.0, 0.0)); // Defect, Abstain
    }

    #[test]
    fn test_unique_pure_equilibrium() {
        let game = build_game(&default_owner(), &default_adversary());
        let equilibria = pure_equilibria(&game);
        assert_eq!(equilibria, vec![(C, C)], "expected exactly (Protect, Attack)");
    }

    #[test]
    fn test_analyze_prefers_pure() {
        let game = build_game(&default_owner(), &default_adversary());
        match analyze(&game).unwrap() {
            Analysis::Pure(equilibria) => assert_eq!(equilibria, vec![(C, C)]),
            Analysis::Mixed(_) => panic!("pure equilibrium exists, mixed returned"),
        }
    }

    #[test]
    fn test_analyze_falls_back_to_mixed() {
        // Cheap protection, attack profitable only against the unprotected:
        // the players cycle, so no pure equilibrium.
        let owner = OwnerParams {
            utility: 3.0,
            privacy_loss: 10.0,
            protection_cost: 0.4,
            gamma: 0.0,
        };
        let adversary = AdversaryParams {
            gain: 25.0,
            attack_cost: 1.0,
        };
        let game = build_game(&owner, &adversary);
        assert!(pure_equilibria(&game).is_empty());

        match analyze(&game).unwrap() {
            Analysis::Mixed(eq) => {
                assert!((0.0..=1.0).contains(&eq.x_star));
                assert!((0.0..=1.0).contains(&eq.y_star));
            }
            Analysis::Pure(equilibria) => panic!("unexpected pure equilibria {:?}", equilibria),
        }
    }

    #[test]
    fn test_cost_sweep_labels() {
        let cells = sweep_costs(
            &default_owner(),
            &default_adversary(),
            &[0.4, 5.0],
            &[1.0, 30.0],
        );
        assert_eq!(cells.len(), 4);

        // Defaults give (Protect, Attack).
        assert_eq!(cells[0].label, "Protect_Attack");

        // An attack cost above any possible gain makes the adversary
        // abstain and the owner defect.
        let expensive_attack = cells
            .iter()
            .find(|cell| cell.attack_cost == 30.0 && cell.protection_cost == 0.4)
            .unwrap();
        assert_eq!(expensive_attack.label, "Defect_Abstain");

        let counts = label_counts(&cells);
        assert_eq!(counts.values().sum::<usize>(), 4);
        assert!(counts.contains_key("Protect_Attack"));
    }
}
