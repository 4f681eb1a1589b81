//! Sternhalma Core - Chinese Checkers rules engine
//!
//! This crate provides the core game logic:
//! - Hex geometry (axial coordinates, rotation, pixel conversion)
//! - Star board topology with six home triangles
//! - Board occupancy and per-player piece tracking
//! - Move generation with chained jumps
//! - Turn order, player layouts and win detection

pub mod hex;
pub mod topology;
pub mod board;
pub mod movegen;
pub mod layout;
pub mod player;
pub mod rules;
pub mod events;
pub mod game;
pub mod snapshot;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use hex::{Direction, Hex, DIRECTIONS};
pub use topology::{goal_triangle, home_triangle, Topology, TriangleIndex, BOARD_CELLS};
pub use board::{Board, Cell, Piece};
pub use movegen::{find_valid_moves, Move, MoveKind};
pub use layout::{active_triangles, turn_order};
pub use player::Player;
pub use events::{EventKind, GameEvent, PieceMoved, SubscriptionId};
pub use game::{GameState, MatchPhase, MotionPlan, TurnOutcome};
pub use snapshot::{BoardSnapshot, CellView};
pub use config::GameConfig;
pub use error::{GameError, ParseHexError};
