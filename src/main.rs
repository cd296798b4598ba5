use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use safe_cracker::core::config::DEFAULT_BET;
use safe_cracker::{play_round, simulate, ConsolePresenter, RoundConfig, RoundEngine};

#[derive(Parser, Debug)]
#[command(
    name = "safe-cracker",
    about = "Open safes, match two multipliers, win your bet times the multiplier",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Options for the default `play` command
    #[command(flatten)]
    play: PlayArgs,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one round in the terminal (the default)
    Play(PlayArgs),
    /// Play many rounds without a terminal and report the totals
    Simulate {
        #[arg(long, default_value_t = 10_000)]
        rounds: u64,
        #[arg(long, default_value_t = DEFAULT_BET, allow_negative_numbers = true)]
        bet: i64,
        /// Seed for the whole run; random if omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Amount staked on the round
    #[arg(long, default_value_t = DEFAULT_BET, allow_negative_numbers = true)]
    bet: i64,
    /// Seed to replay a specific round
    #[arg(long)]
    seed: Option<u64>,
    /// Do not clear the screen or wait for key presses
    #[arg(long)]
    auto: bool,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn play(args: PlayArgs) -> anyhow::Result<()> {
    let mut config = RoundConfig::new().with_bet(args.bet);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut engine = RoundEngine::from_config(&config).context("cannot start a round")?;
    info!(seed = engine.seed(), bet = engine.bet_amount(), "round started");

    let mut presenter = ConsolePresenter::stdout().with_auto(args.auto);
    match play_round(&mut engine, &mut presenter) {
        Ok(_) => {
            println!("Round seed: {}", engine.seed());
            Ok(())
        }
        Err(err) if err.is_interrupted() => {
            println!("\nRound abandoned.");
            Ok(())
        }
        Err(err) => Err(err).context("round failed"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        None => play(cli.play),
        Some(Commands::Play(args)) => play(args),
        Some(Commands::Simulate {
            rounds,
            bet,
            seed,
            json,
        }) => {
            let seed = seed.unwrap_or_else(|| safe_cracker::GameRng::from_entropy().seed());
            let report = simulate(rounds, bet, seed).context("simulation failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
            Ok(())
        }
    }
}
