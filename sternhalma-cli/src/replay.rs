//! Replay command - play a scripted game through the rules engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_script(), play_script(), report_results()
//! - Level 3: play_turn()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use sternhalma_core::{
    BoardSnapshot, EventKind, GameConfig, GameEvent, GameState, Hex, TriangleIndex, TurnOutcome,
};

use crate::render::render_board;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReplayArgs {
    /// Replay script JSON file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Override the script's player count
    #[arg(long)]
    pub players: Option<usize>,

    /// Print the waypoints of every move
    #[arg(long)]
    pub waypoints: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// A scripted game: setup plus `[from, to]` pairs in canonical key form
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(flatten)]
    pub config: GameConfig,
    pub moves: Vec<[Hex; 2]>,
}

/// Result of a single scripted move
#[derive(Clone, Debug, Serialize)]
struct TurnRecord {
    turn: usize,
    player: TriangleIndex,
    from: Hex,
    to: Hex,
    waypoints: Vec<Hex>,
}

/// Aggregated replay results
#[derive(Clone, Debug, Serialize)]
struct ReplayResults {
    player_count: usize,
    turns: Vec<TurnRecord>,
    winner: Option<TriangleIndex>,
    unplayed: usize,
    final_board: BoardSnapshot,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run replay command
///
/// 1. Load the script
/// 2. Play every move through the turn rules
/// 3. Report results
pub fn run(args: ReplayArgs) -> Result<()> {
    let mut script = load_script(&args.file)?;
    if let Some(players) = args.players {
        script.config.player_count = players;
    }

    tracing::info!(
        "Replaying {} moves with {} players",
        script.moves.len(),
        script.config.normalized_player_count()
    );

    let results = play_script(&script)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load a replay script from JSON
pub fn load_script(path: &Path) -> Result<ReplayScript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay script: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse replay script: {}", path.display()))
}

/// Play all scripted moves, stopping early if someone wins
fn play_script(script: &ReplayScript) -> Result<ReplayResults> {
    let player_count = script.config.normalized_player_count();
    let mut state = GameState::new();
    state.subscribe(EventKind::TurnChanged, |event| {
        if let GameEvent::TurnChanged { current, .. } = event {
            tracing::debug!("Triangle {} to move", current);
        }
    });
    state.reset(player_count);

    let mut turns = Vec::with_capacity(script.moves.len());
    let mut winner = None;

    for (index, &[from, to]) in script.moves.iter().enumerate() {
        let player = state.current_home().unwrap_or_default();
        let (outcome, waypoints) = play_turn(&mut state, from, to)
            .with_context(|| format!("Move {} ({} -> {}) rejected", index + 1, from, to))?;

        turns.push(TurnRecord {
            turn: index + 1,
            player,
            from,
            to,
            waypoints,
        });

        if let Some(won) = outcome.winner {
            tracing::info!("Triangle {} wins on move {}", won, index + 1);
            winner = Some(won);
            break;
        }
    }

    let unplayed = script.moves.len() - turns.len();
    if unplayed > 0 {
        tracing::warn!("{} moves after the winning move were ignored", unplayed);
    }

    Ok(ReplayResults {
        player_count,
        turns,
        winner,
        unplayed,
        final_board: state.snapshot(),
    })
}

/// Report replay results
fn report_results(results: &ReplayResults, args: &ReplayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results, args.waypoints);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Lift the piece, collect its waypoints, then commit the move
fn play_turn(state: &mut GameState, from: Hex, to: Hex) -> Result<(TurnOutcome, Vec<Hex>)> {
    let plan = state.begin_motion(from, to)?;
    let outcome = state.finish_motion()?;
    Ok((outcome, plan.waypoints))
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Print results as JSON
fn print_json_results(results: &ReplayResults) {
    if let Ok(json) = serde_json::to_string_pretty(results) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &ReplayResults, waypoints: bool) {
    println!("=== Replay ({} players) ===", results.player_count);
    for turn in &results.turns {
        if waypoints {
            let path: Vec<String> = turn.waypoints.iter().map(Hex::key).collect();
            println!(
                "  {:>3}. triangle {}: {}",
                turn.turn,
                turn.player,
                path.join(" -> ")
            );
        } else {
            println!(
                "  {:>3}. triangle {}: {} -> {}",
                turn.turn, turn.player, turn.from, turn.to
            );
        }
    }

    println!();
    print!("{}", render_board(&results.final_board, &[]));

    match results.winner {
        Some(winner) => println!("Winner: triangle {}", winner),
        None => println!(
            "No winner yet; triangle {} to move",
            results
                .final_board
                .current_player
                .map_or_else(|| "-".to_string(), |p| p.to_string())
        ),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn script(player_count: usize, moves: &[(&str, &str)]) -> ReplayScript {
        ReplayScript {
            config: GameConfig::new(player_count),
            moves: moves
                .iter()
                .map(|(from, to)| [from.parse().unwrap(), to.parse().unwrap()])
                .collect(),
        }
    }

    #[test]
    fn test_script_json_shape() {
        let json = r#"{"player_count": 3, "moves": [["-1,5", "-1,4"]]}"#;
        let parsed: ReplayScript = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.config.player_count, 3);
        assert_eq!(parsed.moves, vec![[Hex::new(-1, 5), Hex::new(-1, 4)]]);
    }

    #[test]
    fn test_play_script_alternates_players() {
        let results = play_script(&script(
            2,
            &[("-1,5", "-1,4"), ("1,-5", "1,-4"), ("-2,6", "-2,4")],
        ))
        .unwrap();

        let players: Vec<TriangleIndex> = results.turns.iter().map(|t| t.player).collect();
        assert_eq!(players, vec![3, 0, 3]);
        assert_eq!(results.turns[2].waypoints, vec![Hex::new(-2, 6), Hex::new(-2, 4)]);
        assert_eq!(results.winner, None);
        assert_eq!(results.final_board.current_player, Some(0));
    }

    #[test]
    fn test_play_script_reports_rejected_move() {
        let err = play_script(&script(2, &[("1,-5", "1,-4")])).unwrap_err();
        assert!(err.to_string().contains("Move 1"));
    }
}
