//! Headless gameplay simulator CLI.
//!
//! Plays the game with a scripted nose sweep and no camera or terminal.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # One 100k-tick run at 640x480
//!   cargo run --bin simulate -- -n 20 -t 36000     # 20 ten-minute games
//!   cargo run --bin simulate -- --seed 42 --json   # Reproducible, machine readable

use std::env;
use webcam_invaders::simulator::{run_simulation, SimConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, json) = parse_args(&args);

    if !json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              WEBCAM INVADERS SIMULATOR                        ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Ticks per Run:  {}", config.ticks_per_run);
        println!("  Field:          {}x{}", config.width, config.height);
        println!("  Sweep Period:   {} ticks", config.sweep_period);
        println!("  Render:         {}", config.render);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config);

    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.ticks_per_run = args[i + 1].parse().unwrap_or(100_000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--size" => {
                if i + 1 < args.len() {
                    match webcam_invaders::config::parse_size(&args[i + 1]) {
                        Ok((w, h)) => {
                            config.width = w;
                            config.height = h;
                        }
                        Err(e) => eprintln!("{}", e),
                    }
                    i += 1;
                }
            }
            "--sweep" => {
                if i + 1 < args.len() {
                    config.sweep_period = args[i + 1].parse().unwrap_or(config.sweep_period).max(1);
                    i += 1;
                }
            }
            "--render" => {
                config.render = true;
            }
            "--json" => {
                json = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_help();
                std::process::exit(2);
            }
        }
        i += 1;
    }

    if json {
        config.verbosity = 0;
    }

    (config, json)
}

fn print_help() {
    println!("Webcam Invaders Simulator");
    println!();
    println!("Usage: simulate [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -n, --runs <N>      Number of simulation runs (default: 1)");
    println!("  -t, --ticks <N>     Ticks per run (default: 100000)");
    println!("  -s, --seed <N>      Random seed for reproducibility");
    println!("      --size <WxH>    Play field size (default: 640x480)");
    println!("      --sweep <N>     Ticks per nose sweep (default: 240)");
    println!("      --render        Rasterize every tick off-screen");
    println!("      --json          Print the report as JSON");
    println!("  -v, --verbose       Show each run");
    println!("  -q, --quiet         Summary only");
    println!("  -h, --help          Show this help message");
}
