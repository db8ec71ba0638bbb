//! Owner/adversary protection game analyzer.
//!
//! Usage:
//!   cargo run --release --bin analyze_protection -- [OPTIONS]
//!
//! Options:
//!   --utility <X>         Owner's sharing utility (default: 3.0)
//!   --privacy-loss <X>    Owner's loss to a successful attack (default: 10.0)
//!   --protection-cost <X> Owner's cost of protecting (default: 0.4)
//!   --gamma <X>           Residual attack effectiveness (default: 0.1)
//!   --gain <X>            Adversary's attack gain (default: 25.0)
//!   --attack-cost <X>     Adversary's attack cost (default: 1.0)
//!   --sweep               Also run the cost-grid sweep and tally regions

use std::env;

use privacy_games::engine::game::ActionIdx;
use privacy_games::games::protection::{
    self, ADVERSARY_ACTIONS, AdversaryParams, Analysis, OWNER_ACTIONS, OwnerParams,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut owner = OwnerParams {
        utility: 3.0,
        privacy_loss: 10.0,
        protection_cost: 0.4,
        gamma: 0.1,
    };
    let mut adversary = AdversaryParams {
        gain: 25.0,
        attack_cost: 1.0,
    };
    let mut run_sweep = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--utility" => {
                i += 1;
                if i < args.len() {
                    owner.utility = args[i].parse().unwrap_or(owner.utility);
                }
            }
            "--privacy-loss" => {
                i += 1;
                if i < args.len() {
                    owner.privacy_loss = args[i].parse().unwrap_or(owner.privacy_loss);
                }
            }
            "--protection-cost" => {
                i += 1;
                if i < args.len() {
                    owner.protection_cost = args[i].parse().unwrap_or(owner.protection_cost);
                }
            }
            "--gamma" => {
                i += 1;
                if i < args.len() {
                    owner.gamma = args[i].parse().unwrap_or(owner.gamma);
                }
            }
            "--gain" => {
                i += 1;
                if i < args.len() {
                    adversary.gain = args[i].parse().unwrap_or(adversary.gain);
                }
            }
            "--attack-cost" => {
                i += 1;
                if i < args.len() {
                    adversary.attack_cost = args[i].parse().unwrap_or(adversary.attack_cost);
                }
            }
            "--sweep" => {
                run_sweep = true;
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
    println!("  Protection Game: Owner vs Adversary");
    println!("=================================================");
    println!();

    let game = protection::build_game(&owner, &adversary);

    println!("All profiles:");
    for o in ActionIdx::BOTH {
        for a in ActionIdx::BOTH {
            let (u_owner, u_adv) = game.payoffs((o, a));
            println!(
                "  {:8} | {:8} | owner {:+7.2} | adversary {:+7.2}",
                OWNER_ACTIONS.label(o),
                ADVERSARY_ACTIONS.label(a),
                u_owner,
                u_adv
            );
        }
    }
    println!();

    match protection::analyze(&game) {
        Ok(Analysis::Pure(equilibria)) => {
            println!("Pure Nash equilibria:");
            for (o, a) in equilibria {
                println!("  ({}, {})", OWNER_ACTIONS.label(o), ADVERSARY_ACTIONS.label(a));
            }
        }
        Ok(Analysis::Mixed(eq)) => {
            println!("No pure equilibrium; mixed equilibrium:");
            println!("  P(owner protects)    = {:.3}", eq.x_star);
            println!("  P(owner defects)     = {:.3}", 1.0 - eq.x_star);
            println!("  P(adversary attacks) = {:.3}", eq.y_star);
            println!("  P(adversary abstains)= {:.3}", 1.0 - eq.y_star);
        }
        Err(e) => {
            eprintln!("Equilibrium analysis failed: {}", e);
            return;
        }
    }

    if run_sweep {
        let protection_costs: Vec<f64> = (0..=10).map(|i| i as f64 * 0.5).collect();
        let attack_costs: Vec<f64> = (0..=10).map(|i| i as f64 * 3.0).collect();
        let cells = protection::sweep_costs(&owner, &adversary, &protection_costs, &attack_costs);
        let counts = protection::label_counts(&cells);

        println!();
        println!(
            "Cost sweep over {} x {} grid:",
            protection_costs.len(),
            attack_costs.len()
        );
        let mut labels: Vec<_> = counts.iter().collect();
        labels.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        for (label, count) in labels {
            println!("  {:20} {:4} cells", label, count);
        }
    }
}

fn print_help() {
    println!("Owner/adversary protection game analyzer");
    println!();
    println!("Options:");
    println!("  --utility <X>          Owner's sharing utility (default: 3.0)");
    println!("  --privacy-loss <X>     Owner's loss to a successful attack (default: 10.0)");
    println!("  --protection-cost <X>  Owner's cost of protecting (default: 0.4)");
    println!("  --gamma <X>            Residual attack effectiveness (default: 0.1)");
    println!("  --gain <X>             Adversary's attack gain (default: 25.0)");
    println!("  --attack-cost <X>      Adversary's attack cost (default: 1.0)");
    println!("  --sweep                Also run the cost-grid sweep");
    println!("  --help                 Show this help");
}
