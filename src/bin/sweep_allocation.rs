//! Allocation-auction epsilon sweep binary.
//!
//! Measures the privacy/accuracy tradeoff of the exponential mechanism:
//! for each epsilon, many independent worlds are sampled and the private
//! winner is compared against the true welfare maximizer.
//!
//! Usage:
//!   cargo run --release --bin sweep_allocation -- [OPTIONS]
//!
//! Options:
//!   --passengers <N>     Passengers per world (default: 3)
//!   --runs <N>           Worlds per epsilon (default: 1000)
//!   --seed <N>           Base random seed (default: 0)
//!   --output <FILE>      Write stats as JSON (optional)

use std::env;
use std::fs;

use indicatif::{ProgressBar, ProgressStyle};

use privacy_games::games::allocation::{self, SweepConfig};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut config = SweepConfig::default();
    let mut output_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--passengers" | "-p" => {
                i += 1;
                if i < args.len() {
                    config.num_passengers = args[i].parse().unwrap_or(config.num_passengers);
                }
            }
            "--runs" | "-r" => {
                i += 1;
                if i < args.len() {
                    config.runs_per_epsilon = args[i].parse().unwrap_or(config.runs_per_epsilon);
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    config.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_file = Some(args[i].clone());
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
    println!("  Allocation Auction: Accuracy vs Epsilon");
    println!("=================================================");
    println!();
    println!(
        "{} passengers per world, {} worlds per epsilon",
        config.num_passengers, config.runs_per_epsilon
    );
    println!();

    let bar = ProgressBar::new(config.epsilons.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} epsilons {msg}")
            .expect("valid progress template"),
    );

    let mut stats = Vec::with_capacity(config.epsilons.len());
    for &epsilon in &config.epsilons {
        bar.set_message(format!("eps={}", epsilon));
        let single = SweepConfig {
            epsilons: vec![epsilon],
            ..config.clone()
        };
        stats.extend(allocation::sweep_epsilons(&single));
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!("Accuracy of picking the true best passenger vs epsilon:");
    for s in &stats {
        println!(
            "  epsilon={:5.2}: accuracy={:.3} | DP welfare={:6.3} | optimal welfare={:6.3}",
            s.epsilon, s.accuracy, s.avg_dp_welfare, s.avg_optimal_welfare
        );
    }

    if let Some(path) = output_file {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    eprintln!("Failed to write {}: {}", path, e);
                } else {
                    println!("\nStats written to {}", path);
                }
            }
            Err(e) => eprintln!("Serialization failed: {}", e),
        }
    }
}

fn print_help() {
    println!("Allocation-auction epsilon sweep");
    println!();
    println!("Options:");
    println!("  --passengers <N>  Passengers per world (default: 3)");
    println!("  --runs <N>        Worlds per epsilon (default: 1000)");
    println!("  --seed <N>        Base random seed (default: 0)");
    println!("  --output <FILE>   Write stats as JSON");
    println!("  --help            Show this help");
}
