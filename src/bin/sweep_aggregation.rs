//! Aggregation-threshold sweep binary.
//!
//! Usage:
//!   cargo run --release --bin sweep_aggregation -- [OPTIONS]
//!
//! Options:
//!   --min-p <N>          Smallest aggregation threshold (default: 1)
//!   --max-p <N>          Largest aggregation threshold (default: 8)
//!   --output <FILE>      Write metrics as JSON (optional)

use std::env;
use std::fs;

use privacy_games::games::aggregation::{self, AggregationParams};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut min_p: u32 = 1;
    let mut max_p: u32 = 8;
    let mut output_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--min-p" => {
                i += 1;
                if i < args.len() {
                    min_p = args[i].parse().unwrap_or(1);
                }
            }
            "--max-p" => {
                i += 1;
                if i < args.len() {
                    max_p = args[i].parse().unwrap_or(8);
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
    println!("  Aggregation Game: Equilibrium vs Threshold");
    println!("=================================================");
    println!();

    let params = AggregationParams::default();
    let thresholds: Vec<u32> = (min_p..=max_p).collect();

    let metrics = match aggregation::sweep_thresholds(&thresholds, &params) {
        Ok(metrics) => metrics,
        Err(e) => {
            eprintln!("Sweep failed: {}", e);
            return;
        }
    };

    println!("Mixed equilibrium & leakage vs p:");
    for row in &metrics {
        println!(
            "  p={:2} | x*={:.3} (collector protects) | y*={:.3} (adversary exploits) \
             | leak={:.3} | DC={:+.3} | ADV={:+.3}",
            row.p, row.x_star, row.y_star, row.leakage, row.collector_payoff, row.adversary_payoff
        );
    }

    if let Some(path) = output_file {
        match serde_json::to_string_pretty(&metrics) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    eprintln!("Failed to write {}: {}", path, e);
                } else {
                    println!("\nMetrics written to {}", path);
                }
            }
            Err(e) => eprintln!("Serialization failed: {}", e),
        }
    }
}

fn print_help() {
    println!("Aggregation-threshold equilibrium sweep");
    println!();
    println!("Options:");
    println!("  --min-p <N>       Smallest aggregation threshold (default: 1)");
    println!("  --max-p <N>       Largest aggregation threshold (default: 8)");
    println!("  --output <FILE>   Write metrics as JSON");
    println!("  --help            Show this help");
}
