//! rtp-runner: headless Monte-Carlo RTP runner.
//!
//! Usage:
//!   rtp-runner --preset payline --spins 200000 --seed 0123abcd
//!   rtp-runner --preset cluster --spins 100000 --seed random
//!   rtp-runner --config game.json --target 96.5 --eval-spins 20000 --confirm-spins 200000
//!   rtp-runner --preset payline --target 94 --print-tables

use anyhow::{bail, Result};
use slotlab_core::{
    GameConfig, RngBank, RtpEstimator, RtpSummary, ScaleSolver, SeedSpec, SpinRng,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let spins = parse_arg(&args, "--spins", 100_000u64);
    let eval_spins = parse_arg(&args, "--eval-spins", 20_000u64);
    let confirm_spins = parse_arg(&args, "--confirm-spins", 200_000u64);
    let seed = flag_value(&args, "--seed").unwrap_or("random");
    let target: Option<f64> = flag_value(&args, "--target").and_then(|v| v.parse().ok());
    let print_tables = args.iter().any(|a| a == "--print-tables");

    let config = load_config(&args)?;
    let seed_spec = SeedSpec::parse(seed);

    println!("rtp-runner");
    println!("  grid:   {}x{}", config.rows, config.cols);
    println!("  bet:    {:.2}/spin", config.bet_per_spin());
    println!("  seed:   {seed}");
    println!();

    match target {
        Some(target_pct) => {
            let solver = ScaleSolver::new(&config, target_pct, eval_spins, confirm_spins)?;
            let bank = RngBank::from_seed_spec(&seed_spec)?;
            let solution = solver.solve(&bank)?;

            println!("=== SCALE SOLUTION ===");
            println!("  target:    {target_pct:.4}%");
            println!("  factor:    {:.6}", solution.factor);
            println!("  converged: {}", solution.converged);
            if !solution.converged {
                println!("  (ceiling reached — target may be unreachable)");
            }
            println!("  probes:    {}", solution.probes);
            println!();
            print_summary("CONFIRMATION", &solution.confirm);

            if print_tables {
                let scaled = config.scaled(solution.factor);
                println!();
                println!("Scaled paytable:");
                println!("{}", serde_json::to_string_pretty(&scaled.paytable)?);
                println!("Scaled scatter table:");
                println!("{}", serde_json::to_string_pretty(&scaled.scatter_paytable)?);
            }
        }
        None => {
            let estimator = RtpEstimator::new(&config)?;
            let mut rng = SpinRng::from_seed_spec(&seed_spec)?;
            let summary = estimator.run(spins, &mut rng)?;
            print_summary("RUN SUMMARY", &summary);
        }
    }

    Ok(())
}

fn load_config(args: &[String]) -> Result<GameConfig> {
    if let Some(path) = flag_value(args, "--config") {
        return Ok(GameConfig::from_json_file(path)?);
    }
    match flag_value(args, "--preset").unwrap_or("payline") {
        "payline" => Ok(GameConfig::payline_classic()),
        "cluster" => Ok(GameConfig::cluster_tumbler()),
        other => bail!("unknown preset '{other}' (expected payline|cluster)"),
    }
}

fn print_summary(title: &str, s: &RtpSummary) {
    println!("=== {title} ===");
    println!("  spins:       {}", s.spins);
    println!("  total bet:   {:.2}", s.total_bet);
    println!("  total win:   {:.2}", s.total_win);
    println!("  RTP:         {:.4}%", s.rtp_percent);
    println!("  stddev:      {:.4}", s.stddev);
    println!("  stderr:      {:.6}", s.stderr);
    println!("  95% CI:      [{:.4}%, {:.4}%]", s.ci95_low, s.ci95_high);
    println!("  win range:   [{:.2}, {:.2}]", s.min_win, s.max_win);
    println!("  bonus spins: {}", s.bonus_spins);
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
