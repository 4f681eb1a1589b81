//! Error types for board mutation and coordinate parsing

use thiserror::Error;

use crate::hex::Hex;
use crate::topology::TriangleIndex;

/// Failure to parse a canonical `"q,r"` coordinate key
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseHexError {
    #[error("expected a coordinate key of the form \"q,r\", got {0:?}")]
    Malformed(String),
    #[error("invalid integer component {component:?} in coordinate key {key:?}")]
    BadComponent { key: String, component: String },
}

/// Rejected mutation or query against the game state
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{0} is not on the board")]
    OffBoard(Hex),
    #[error("no piece at {0}")]
    EmptyOrigin(Hex),
    #[error("{0} is already occupied")]
    OccupiedTarget(Hex),
    #[error("piece at {pos} belongs to triangle {owner}, but it is triangle {current}'s turn")]
    NotYourPiece {
        pos: Hex,
        owner: TriangleIndex,
        current: TriangleIndex,
    },
    #[error("{to} is not a legal destination from {from}")]
    IllegalDestination { from: Hex, to: Hex },
    #[error("the game is not in progress")]
    GameNotInProgress,
    #[error("a piece is already in motion")]
    PieceInMotion,
    #[error("no piece is in motion")]
    NoMotion,
    #[error("triangle {0} has no player in this game")]
    InactiveTriangle(TriangleIndex),
}
