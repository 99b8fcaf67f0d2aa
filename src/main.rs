use std::io;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use coup_round::{CardSet, Config, Console, Game};

/// Hotseat Coup for 2-6 players at one terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Play with the Inquisitor in place of the Ambassador
    #[arg(long)]
    inquisitor: bool,

    /// Seed for the court deck; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Print the board as JSON lines
    #[arg(long)]
    json: bool,

    /// Don't clear the screen between players
    #[arg(long)]
    no_clear: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let card_set = if args.inquisitor { CardSet::Inquisitor } else { CardSet::Standard };
    let config = Config::default().with_card_set(card_set);

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), card_set)
        .json(args.json)
        .clear_screen(!args.no_clear);

    let count = console.ask_player_count()?;
    let names = console.ask_names(count)?;

    let mut game = match args.seed {
        Some(seed) => Game::new(config, names, seed)?,
        None => Game::from_entropy(config, names)?,
    };

    let winner = game.run(&mut console)?;
    tracing::info!(winner = %game.players()[winner].name(), turns = game.turn(), "exiting");

    Ok(())
}
