//! Privacy-preserving ride allocation (taxi auction).
//!
//! A broker must assign a single ride among candidate passengers. The
//! welfare score of a passenger is their declared value minus the distance
//! cost of reaching them. Two winner rules are compared:
//!
//! - a deterministic VCG-style argmax, which leaks the scores, and
//! - the exponential mechanism, which trades accuracy for privacy via
//!   `epsilon`.
//!
//! The epsilon sweep measures that tradeoff empirically: accuracy
//! (probability the private winner is the true best) and average welfare,
//! over many independently sampled worlds. Worlds are independent, so the
//! sweep parallelizes over runs with no shared state.

use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::engine::mechanism::{ExponentialMechanism, SelectionResult};

/// A candidate passenger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    /// Stable identifier within one world.
    pub id: usize,
    /// Declared value of the ride to this passenger.
    pub value: f64,
    /// Position on the line the broker serves.
    pub location: f64,
}

/// The broker (taxi service) assigning the ride.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Broker {
    /// The taxi's current position.
    pub location: f64,
}

impl Broker {
    /// A broker at position 0.
    pub fn new() -> Self {
        Self { location: 0.0 }
    }

    /// Distance cost of serving a passenger.
    pub fn distance_cost(&self, p: &Passenger) -> f64 {
        (p.location - self.location).abs()
    }

    /// Welfare score: declared value minus distance cost.
    pub fn score(&self, p: &Passenger) -> f64 {
        p.value - self.distance_cost(p)
    }
}

impl Default for Broker {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample `n` passengers with value in `[5, 15)` and location in `[0, 10)`.
pub fn generate_passengers(n: usize, rng: &mut StdRng) -> Vec<Passenger> {
    (0..n)
        .map(|id| Passenger {
            id,
            value: rng.gen_range(5.0..15.0),
            location: rng.gen_range(0.0..10.0),
        })
        .collect()
}

/// Deterministic winner: the passenger with the highest welfare score
/// (first such passenger on an exact tie).
///
/// # Panics
/// Panics if `passengers` is empty.
pub fn vcg_winner<'a>(broker: &Broker, passengers: &'a [Passenger]) -> &'a Passenger {
    passengers
        .iter()
        .reduce(|best, p| if broker.score(p) > broker.score(best) { p } else { best })
        .expect("winner selection requires at least one passenger")
}

/// Differentially-private winner via the exponential mechanism.
pub fn dp_winner(
    broker: &Broker,
    passengers: &[Passenger],
    mechanism: &mut ExponentialMechanism,
) -> SelectionResult {
    mechanism.select(passengers, |p| broker.score(p))
}

/// Aggregated measurements for one epsilon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpsilonStats {
    /// The privacy parameter these runs used.
    pub epsilon: f64,
    /// Fraction of runs where the private winner was the true best.
    pub accuracy: f64,
    /// Average welfare score of the private winner.
    pub avg_dp_welfare: f64,
    /// Average welfare score of the true best passenger.
    pub avg_optimal_welfare: f64,
}

/// Sweep configuration for [`sweep_epsilons`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Passengers per sampled world.
    pub num_passengers: usize,
    /// Privacy parameters to measure.
    pub epsilons: Vec<f64>,
    /// Independent worlds per epsilon.
    pub runs_per_epsilon: usize,
    /// Base seed; each (epsilon, run) derives its own stream from it.
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            num_passengers: 3,
            epsilons: vec![0.01, 0.1, 0.5, 1.0, 2.0],
            runs_per_epsilon: 1000,
            seed: 0,
        }
    }
}

/// One sampled world's outcome under a fixed epsilon.
fn run_world(num_passengers: usize, epsilon: f64, seed: u64) -> (bool, f64, f64) {
    let broker = Broker::new();
    let mut rng = StdRng::seed_from_u64(seed);
    let passengers = generate_passengers(num_passengers, &mut rng);

    let best = vcg_winner(&broker, &passengers);
    let mut mechanism = ExponentialMechanism::new(epsilon).with_seed(seed ^ 0x9e37_79b9_7f4a_7c15);
    let selection = dp_winner(&broker, &passengers, &mut mechanism);
    let chosen = &passengers[selection.index];

    (
        chosen.id == best.id,
        broker.score(chosen),
        broker.score(best),
    )
}

/// Measure accuracy and welfare for each epsilon in the config.
///
/// Runs within one epsilon are independent worlds and evaluated in
/// parallel; results are deterministic for a fixed config.
pub fn sweep_epsilons(config: &SweepConfig) -> Vec<EpsilonStats> {
    config
        .epsilons
        .iter()
        .enumerate()
        .map(|(eps_index, &epsilon)| {
            let runs = config.runs_per_epsilon;
            let (correct, dp_welfare, optimal_welfare) = (0..runs)
                .into_par_iter()
                .map(|run| {
                    let seed = config
                        .seed
                        .wrapping_add((eps_index as u64) << 32)
                        .wrapping_add(run as u64);
                    let (hit, dp, opt) = run_world(config.num_passengers, epsilon, seed);
                    (u64::from(hit), dp, opt)
                })
                .reduce(
                    || (0u64, 0.0, 0.0),
                    |a, b| (a.0 + b.0, a.1 + b.1, a.2 + b.2),
                );

            EpsilonStats {
                epsilon,
                accuracy: correct as f64 / runs as f64,
                avg_dp_welfare: dp_welfare / runs as f64,
                avg_optimal_welfare: optimal_welfare / runs as f64,
            }
        })
        .collect()
}

/// Count how often each passenger id wins under a fixed epsilon.
///
/// The histogram flattens toward uniform as `epsilon` shrinks.
pub fn winner_histogram(
    num_passengers: usize,
    epsilon: f64,
    runs: usize,
    seed: u64,
) -> FxHashMap<usize, u64> {
    let mut histogram = FxHashMap::default();
    let broker = Broker::new();

    // One fixed world; only the mechanism draws vary between runs.
    let mut rng = StdRng::seed_from_u64(seed);
    let passengers = generate_passengers(num_passengers, &mut rng);
    let mut mechanism = ExponentialMechanism::new(epsilon).with_seed(seed);

    for _ in 0..runs {
        let selection = dp_winner(&broker, &passengers, &mut mechanism);
        *histogram.entry(passengers[selection.index].id).or_insert(0) += 1;
    }
    histogram
}
