//! Sternhalma CLI - Command-line interface
//!
//! Commands:
//! - board: Print the opening position
//! - moves: List the legal moves of one piece
//! - replay: Play a scripted game through the rules engine
//! - bench: Time move generation

mod benchmark;
mod board_cmd;
mod moves_cmd;
mod render;
mod replay;
mod setup;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sternhalma")]
#[command(about = "Chinese Checkers rules engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the opening position
    Board(board_cmd::BoardArgs),
    /// List the legal moves of the piece on a cell
    Moves(moves_cmd::MovesArgs),
    /// Play a scripted move sequence
    Replay(replay::ReplayArgs),
    /// Time move generation
    Bench(benchmark::BenchmarkArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Board(args) => board_cmd::run(args),
        Commands::Moves(args) => moves_cmd::run(args),
        Commands::Replay(args) => replay::run(args),
        Commands::Bench(args) => benchmark::run(args),
    }
}
