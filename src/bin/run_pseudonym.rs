//! Repeated pseudonym-change game driver.
//!
//! Usage:
//!   cargo run --release --bin run_pseudonym -- [OPTIONS]
//!
//! Options:
//!   --rounds <N>         Number of rounds (default: 20)
//!   --policy <TAG>       Policy for both owners: best_response,
//!                        fictitious_play, epsilon_greedy, fixed_mixed,
//!                        or threshold (default: best_response)
//!   --threshold <X>      Cutoff for the threshold policy (default: 0.4)
//!   --change-cost <X>    Pseudonym change cost gamma (default: 0.3)
//!   --loss-rate <X>      Privacy loss rate lambda (default: 0.05)
//!   --seed <N>           Base random seed (default: entropy)

use std::env;

use privacy_games::engine::config::AgentConfig;
use privacy_games::games::pseudonym::{self, PseudonymParams};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut params = PseudonymParams::default();
    let mut policy = "best_response".to_string();
    let mut threshold: f64 = 0.4;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rounds" | "-r" => {
                i += 1;
                if i < args.len() {
                    params.rounds = args[i].parse().unwrap_or(params.rounds);
                }
            }
            "--policy" | "-p" => {
                i += 1;
                if i < args.len() {
                    policy = args[i].clone();
                }
            }
            "--threshold" => {
                i += 1;
                if i < args.len() {
                    threshold = args[i].parse().unwrap_or(threshold);
                }
            }
            "--change-cost" => {
                i += 1;
                if i < args.len() {
                    params.change_cost = args[i].parse().unwrap_or(params.change_cost);
                }
            }
            "--loss-rate" => {
                i += 1;
                if i < args.len() {
                    params.loss_rate = args[i].parse().unwrap_or(params.loss_rate);
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    println!("=================================================");
    println!("  Pseudonym Change Game ({} policy)", policy);
    println!("=================================================");
    println!();

    let build_agent = |name: &str, agent_seed: Option<u64>| {
        let mut config = AgentConfig::new(name, policy.clone());
        config.threshold = Some(threshold);
        config.initial_private_value = Some(params.initial_value());
        config.decay_rate = Some(params.loss_rate);
        config.seed = agent_seed;
        config.build()
    };

    let mut agent1 = match build_agent("P1", seed) {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("Failed to configure P1: {}", e);
            return;
        }
    };
    let mut agent2 = match build_agent("P2", seed.map(|s| s.wrapping_add(1))) {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("Failed to configure P2: {}", e);
            return;
        }
    };

    let outcome = match pseudonym::run_match(&mut agent1, &mut agent2, &params) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Match failed: {}", e);
            return;
        }
    };

    for r in &outcome.rounds {
        println!(
            "Round {:02}: P1={} (u={:.3}) | P2={} (u={:.3})",
            r.round, r.action1, r.payoff1, r.action2, r.payoff2
        );
    }

    println!();
    println!(
        "Final privacy values: P1={:.3}, P2={:.3}",
        outcome.final_values.0, outcome.final_values.1
    );
    println!(
        "Cumulative scores:    P1={:.3}, P2={:.3}",
        outcome.total_scores.0, outcome.total_scores.1
    );
}

fn print_help() {
    println!("Repeated pseudonym-change game driver");
    println!();
    println!("Options:");
    println!("  --rounds <N>       Number of rounds (default: 20)");
    println!("  --policy <TAG>     Policy for both owners (default: best_response)");
    println!("  --threshold <X>    Cutoff for the threshold policy (default: 0.4)");
    println!("  --change-cost <X>  Pseudonym change cost (default: 0.3)");
    println!("  --loss-rate <X>    Privacy loss rate (default: 0.05)");
    println!("  --seed <N>         Base random seed (default: entropy)");
    println!("  --help             Show this help");
}
