mod simulation;

use clap::Parser;
use std::path::PathBuf;
use threshold_blackjack::Rule;
use threshold_blackjack_drivers::{parse_config_from_file, ConfigError};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "~/.threshold_blackjack.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Number of games played with every threshold config (overrides the file)
    #[arg(short, long)]
    iterations: Option<u64>,

    /// Seed of the random stream (overrides the file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Worker threads, 1 for a single reproducible stream, 0 for all cores (overrides the file)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Write every result, including its running totals, to this YAML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = CommandLineArgs::parse();
    init_logging(&args.log_level);

    if let Err(err) = run(args) {
        eprintln!("threshold_simulator failed: {err}");
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config_path(config: &str) -> Result<PathBuf, ConfigError> {
    if config != DEFAULT_CONFIG_PATH {
        return Ok(PathBuf::from(config));
    }
    let home_dir = home::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(home_dir.join(".threshold_blackjack.yml"))
}

fn run(args: CommandLineArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = resolve_config_path(&args.config)?;
    let mut config = parse_config_from_file(&config_path)?;
    if let Some(iterations) = args.iterations {
        config.simulator.iterations = iterations;
    }
    if let Some(seed) = args.seed {
        config.simulator.seed = seed;
    }
    if let Some(threads) = args.threads {
        config.simulator.number_of_threads = threads;
    }

    let rule: Rule = config.rule.clone().try_into()?;
    let thresholds = config.threshold_configs()?;
    tracing::info!(
        config = %config_path.display(),
        thresholds = thresholds.len(),
        iterations = config.simulator.iterations,
        seed = config.simulator.seed,
        "configuration loaded"
    );

    let reports = simulation::simulate_thresholds(&rule, &thresholds, &config.simulator)?;
    simulation::print_reports(&reports);

    if let Some(output) = args.output {
        simulation::write_results(&output, &reports)?;
        tracing::info!(output = %output.display(), "results written");
    }
    Ok(())
}
