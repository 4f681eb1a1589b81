//! Board command - print the opening position

use anyhow::Result;
use clap::Args;

use sternhalma_core::GameState;

use crate::render::render_board;
use crate::setup::SetupArgs;

#[derive(Args)]
pub struct BoardArgs {
    #[command(flatten)]
    pub setup: SetupArgs,

    /// Output the board snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run board command
pub fn run(args: BoardArgs) -> Result<()> {
    let config = args.setup.resolve()?;
    let state = GameState::with_players(config.normalized_player_count());
    let snapshot = state.snapshot();

    if args.json {
        println!("{}", snapshot.to_json()?);
    } else {
        print!("{}", render_board(&snapshot, &[]));
        println!("Turn order: {:?}", snapshot.turn_order);
    }

    Ok(())
}
