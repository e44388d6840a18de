use std::path::PathBuf;

use clap::Parser;

use daifugo_sim::config::RosterConfig;
use daifugo_sim::logging::init_logging;
use daifugo_sim::runner::SimRunner;

/// Headless simulation harness for four-seat shedding-game matches.
#[derive(Debug, Parser)]
#[command(
    name = "daifugo-sim",
    author,
    version,
    about = "Deterministic headless match harness"
)]
struct Cli {
    /// Path to the YAML roster file.
    #[arg(short, long, value_name = "FILE", default_value = "sim/roster.yaml")]
    config: PathBuf,

    /// Number of rounds to play.
    #[arg(long, value_name = "ROUNDS", default_value_t = 8)]
    rounds: u32,

    /// RNG seed for the whole run; a random seed is drawn when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the roster (no rounds are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = RosterConfig::from_path(&cli.config)?;

    let names: Vec<&str> = config.players.iter().map(|p| p.name.as_str()).collect();
    println!(
        "Loaded roster with {} players: {}",
        names.len(),
        names.join(", ")
    );

    if cli.validate_only {
        println!("Validation-only mode: no rounds played.");
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let _logging_guard = init_logging(&config.logging, &config.output.jsonl_path())?;

    let runner = SimRunner::new(config);
    let summary = runner.run(cli.rounds, seed)?;

    println!(
        "Run complete: {} rounds (seed {}) → {} rows at {}",
        summary.rounds_played,
        summary.seed,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Standings (Daifugo/Fugo/Hinmin/Daihinmin):");
    for standing in &summary.standings {
        let [first, second, third, fourth] = standing.placing_counts;
        println!(
            "  {:<12} {first:>3} / {second:>3} / {third:>3} / {fourth:>3}",
            standing.name
        );
    }

    Ok(())
}
