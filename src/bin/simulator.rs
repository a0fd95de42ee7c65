//! Flapper Headless Balance Simulator
//!
//! Plays the scene without any UI using a scripted autopilot, and reports
//! how far it gets. Uses the same `tick_scene()` as the real game.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --runs N        Number of runs with incrementing seeds (default: 100, max: 100000)
//!   --seed N        Base RNG seed (default: random)
//!   --max-secs S    Scene seconds before a run is cut off (default: 120, max: 3600)
//!   --config FILE   Game tuning JSON (default: ~/.flapper/config.json)
//!   --json          Print the report as JSON
//!   --quiet         Only final summary line

use anyhow::{bail, Context, Result};
use flapper::config::Config;
use flapper::logging::{init_stderr_logging, parse_level};
use flapper::simulator::{run_simulation, SimConfig};
use std::path::PathBuf;
use tracing::Level;

// ── CLI Configuration ────────────────────────────────────────────────

const MAX_RUNS: u32 = 100_000;
const MAX_SECS: f64 = 3600.0;

struct CliArgs {
    runs: u32,
    seed: Option<u64>,
    max_secs: f64,
    config_path: Option<PathBuf>,
    json: bool,
    quiet: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            runs: 100,
            seed: None,
            max_secs: 120.0,
            config_path: None,
            json: false,
            quiet: false,
        }
    }
}

/// `None` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<CliArgs>> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--runs" => {
                let value = iter.next().context("--runs requires a number")?;
                cli.runs = value
                    .parse()
                    .with_context(|| format!("invalid --runs value '{value}'"))?;
                if cli.runs > MAX_RUNS {
                    bail!("--runs must be at most {MAX_RUNS}");
                }
            }
            "--seed" => {
                let value = iter.next().context("--seed requires a number")?;
                cli.seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid --seed value '{value}'"))?,
                );
            }
            "--max-secs" => {
                let value = iter.next().context("--max-secs requires a number")?;
                cli.max_secs = value
                    .parse()
                    .with_context(|| format!("invalid --max-secs value '{value}'"))?;
                if !cli.max_secs.is_finite() || !(0.0..=MAX_SECS).contains(&cli.max_secs) {
                    bail!("--max-secs must be between 0 and {MAX_SECS}");
                }
            }
            "--config" => {
                let value = iter.next().context("--config requires a path")?;
                cli.config_path = Some(PathBuf::from(value));
            }
            "--json" => cli.json = true,
            "--quiet" => cli.quiet = true,
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument: {other} (see --help)"),
        }
    }
    Ok(Some(cli))
}

fn print_usage() {
    eprintln!(
        "Flapper Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 100, max: 100000)\n\
         \x20 --seed N        Base RNG seed (default: random)\n\
         \x20 --max-secs S    Scene seconds before a run is cut off (default: 120, max: 3600)\n\
         \x20 --config FILE   Game tuning JSON (default: ~/.flapper/config.json)\n\
         \x20 --json          Print the report as JSON\n\
         \x20 --quiet         Only final summary line\n\
         \x20 --help, -h      Show this help"
    );
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(cli) = parse_args(&args)? else {
        print_usage();
        return Ok(());
    };

    let game = Config::load(cli.config_path.as_deref()).context("failed to load config")?;

    let level = if cli.quiet {
        Level::WARN
    } else {
        parse_level(&game.log_level).unwrap_or(Level::INFO)
    };
    init_stderr_logging(level).context("failed to initialise logging")?;

    let config = SimConfig {
        num_runs: cli.runs,
        seed: cli.seed,
        max_secs: cli.max_secs,
        game,
        ..SimConfig::default()
    };

    if !cli.quiet {
        eprintln!(
            "Flapper Simulator: {} run(s), cap {:.0}s, seed={}",
            config.num_runs,
            config.max_secs,
            config
                .seed
                .map_or_else(|| "random".to_string(), |s| s.to_string()),
        );
    }

    let report = run_simulation(&config);

    if cli.json {
        println!("{}", report.to_json());
    } else if cli.quiet {
        println!("{}", report.summary_line());
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
