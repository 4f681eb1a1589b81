//! Read-only board view for renderers

use serde::{Deserialize, Serialize};

use crate::game::{GameState, MatchPhase};
use crate::hex::Hex;
use crate::topology::TriangleIndex;

/// One cell as a renderer sees it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub pos: Hex,
    pub home: Option<TriangleIndex>,
    /// Owner of the occupying piece, if any
    pub owner: Option<TriangleIndex>,
    pub selected: bool,
}

/// Full board plus turn information, cells ordered row by row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub cells: Vec<CellView>,
    pub phase: MatchPhase,
    pub current_player: Option<TriangleIndex>,
    pub turn_order: Vec<TriangleIndex>,
    pub turn_index: usize,
}

impl BoardSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let mut cells: Vec<CellView> = state
            .board()
            .cells()
            .map(|(pos, cell)| CellView {
                pos,
                home: cell.home,
                owner: cell.occupant.map(|piece| piece.owner),
                selected: cell.occupant.is_some_and(|piece| piece.selected),
            })
            .collect();
        cells.sort_by_key(|cell| (cell.pos.r, cell.pos.q));

        Self {
            cells,
            phase: state.phase(),
            current_player: state.current_home(),
            turn_order: state.turn_order().to_vec(),
            turn_index: state.turn_index(),
        }
    }

    pub fn cell(&self, pos: Hex) -> Option<&CellView> {
        self.cells.iter().find(|cell| cell.pos == pos)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl GameState {
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(self)
    }
}
