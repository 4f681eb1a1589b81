//! Moves command - list the legal moves of one piece on the opening board

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use sternhalma_core::{GameState, Hex, Move, MoveKind};

use crate::render::render_board;
use crate::setup::SetupArgs;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct MovesArgs {
    /// Cell holding the piece, as "q,r"
    #[arg(long, value_name = "Q,R", allow_hyphen_values = true)]
    pub at: Hex,

    #[command(flatten)]
    pub setup: SetupArgs,

    /// Output moves as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct MovesReport {
    from: Hex,
    owner: u8,
    moves: Vec<Move>,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run moves command
pub fn run(args: MovesArgs) -> Result<()> {
    let config = args.setup.resolve()?;
    let state = GameState::with_players(config.normalized_player_count());
    let report = collect_moves(&state, args.at)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let targets: Vec<Hex> = report.moves.iter().map(|mv| mv.to).collect();
        print!("{}", render_board(&state.snapshot(), &targets));
        print_text_moves(&report);
    }

    Ok(())
}

fn collect_moves(state: &GameState, at: Hex) -> Result<MovesReport> {
    if !state.is_on_board(at) {
        bail!("{} is not on the board", at);
    }
    let Some(piece) = state.board().piece_at(at) else {
        bail!("no piece at {}", at);
    };

    let moves = state.valid_moves(at)?;
    tracing::debug!("{} moves from {}", moves.len(), at);

    Ok(MovesReport {
        from: at,
        owner: piece.owner,
        moves,
    })
}

fn print_text_moves(report: &MovesReport) {
    println!(
        "\n{} legal moves for triangle {}'s piece at {}",
        report.moves.len(),
        report.owner,
        report.from
    );
    for mv in &report.moves {
        let path: Vec<String> = mv.path.iter().map(Hex::key).collect();
        match mv.kind {
            MoveKind::Step => println!("  step -> {}", mv.to),
            MoveKind::Jump => println!("  jump -> {} via [{}]", mv.to, path.join(" ")),
        }
    }
}
