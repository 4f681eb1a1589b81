//! Board cells and piece occupancy

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::hex::Hex;
use crate::topology::{Topology, TriangleIndex, TRIANGLE_SIZE};

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Mirrors the key of the cell holding the piece
    pub pos: Hex,
    /// Home triangle of the owning player
    pub owner: TriangleIndex,
    /// UI highlight only; never consulted by the rules
    pub selected: bool,
}

impl Piece {
    pub fn new(pos: Hex, owner: TriangleIndex) -> Self {
        Self {
            pos,
            owner,
            selected: false,
        }
    }
}

/// A single board cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Home triangle this cell belongs to, `None` for the neutral center
    pub home: Option<TriangleIndex>,
    pub occupant: Option<Piece>,
}

/// Fixed set of cells with their current occupancy
#[derive(Clone, Debug)]
pub struct Board {
    /// Board: hex -> cell (every on-board hex has an entry)
    cells: FxHashMap<Hex, Cell>,
    topology: Topology,
}

impl Board {
    /// Empty standard board
    pub fn new() -> Self {
        let topology = Topology::standard();
        let cells = topology
            .cells()
            .iter()
            .map(|&(hex, home)| (hex, Cell { home, occupant: None }))
            .collect();
        Self { cells, topology }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn is_on_board(&self, pos: Hex) -> bool {
        self.cells.contains_key(&pos)
    }

    /// Off-board positions are never occupied
    pub fn is_occupied(&self, pos: Hex) -> bool {
        self.piece_at(pos).is_some()
    }

    pub fn cell(&self, pos: Hex) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    pub fn piece_at(&self, pos: Hex) -> Option<&Piece> {
        self.cells.get(&pos).and_then(|cell| cell.occupant.as_ref())
    }

    pub(crate) fn piece_at_mut(&mut self, pos: Hex) -> Option<&mut Piece> {
        self.cells
            .get_mut(&pos)
            .and_then(|cell| cell.occupant.as_mut())
    }

    /// Iterate cells in no particular order
    pub fn cells(&self) -> impl Iterator<Item = (Hex, &Cell)> + '_ {
        self.cells.iter().map(|(&hex, cell)| (hex, cell))
    }

    /// Iterate pieces in no particular order
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.values().filter_map(|cell| cell.occupant.as_ref())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn triangle(&self, index: TriangleIndex) -> &[Hex; TRIANGLE_SIZE] {
        self.topology.triangle(index)
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Put a piece on a cell, replacing any occupant. Setup only.
    ///
    /// Returns the replaced piece, if any.
    pub fn place(&mut self, pos: Hex, owner: TriangleIndex) -> Result<Option<Piece>, GameError> {
        self.put(Piece::new(pos, owner))
    }

    /// Put an existing piece back at its recorded position
    pub(crate) fn put(&mut self, piece: Piece) -> Result<Option<Piece>, GameError> {
        let cell = self
            .cells
            .get_mut(&piece.pos)
            .ok_or(GameError::OffBoard(piece.pos))?;
        Ok(cell.occupant.replace(piece))
    }

    /// Take a piece out of the map, leaving the cell empty
    pub fn remove_at(&mut self, pos: Hex) -> Option<Piece> {
        self.cells
            .get_mut(&pos)
            .and_then(|cell| cell.occupant.take())
    }

    /// Move the piece at `from` onto the empty cell `to`
    pub fn relocate(&mut self, from: Hex, to: Hex) -> Result<Piece, GameError> {
        if !self.is_on_board(from) {
            return Err(GameError::OffBoard(from));
        }
        if !self.is_on_board(to) {
            return Err(GameError::OffBoard(to));
        }
        if self.is_occupied(to) {
            return Err(GameError::OccupiedTarget(to));
        }

        let mut piece = self.remove_at(from).ok_or(GameError::EmptyOrigin(from))?;
        piece.pos = to;
        self.put(piece)?;

        tracing::debug!(%from, %to, owner = piece.owner, "piece relocated");
        Ok(piece)
    }

    /// Remove every piece; the cell set itself never changes
    pub fn clear(&mut self) {
        for cell in self.cells.values_mut() {
            cell.occupant = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::BOARD_CELLS;

    #[test]
    fn test_board_creation() {
        let board = Board::new();
        assert_eq!(board.len(), BOARD_CELLS);
        assert_eq!(board.pieces().count(), 0);
        assert!(board.is_on_board(Hex::ORIGIN));
        assert!(board.is_on_board(Hex::new(4, -8)));
        assert!(!board.is_on_board(Hex::new(5, -5)));
        assert_eq!(board.cell(Hex::ORIGIN).unwrap().home, None);
        assert_eq!(board.cell(Hex::new(-4, 8)).unwrap().home, Some(3));
    }

    #[test]
    fn test_occupancy_off_board_is_false() {
        let board = Board::new();
        assert!(!board.is_occupied(Hex::new(40, 40)));
        assert!(board.piece_at(Hex::new(40, 40)).is_none());
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::new();
        assert_eq!(board.place(Hex::ORIGIN, 2), Ok(None));
        assert!(board.is_occupied(Hex::ORIGIN));
        assert_eq!(board.piece_at(Hex::ORIGIN).unwrap().owner, 2);

        let replaced = board.place(Hex::ORIGIN, 4).unwrap();
        assert_eq!(replaced.map(|p| p.owner), Some(2));

        assert_eq!(board.place(Hex::new(9, 9), 0), Err(GameError::OffBoard(Hex::new(9, 9))));

        let removed = board.remove_at(Hex::ORIGIN).unwrap();
        assert_eq!(removed.owner, 4);
        assert!(!board.is_occupied(Hex::ORIGIN));
        assert!(board.remove_at(Hex::ORIGIN).is_none());
    }

    #[test]
    fn test_relocate() {
        let mut board = Board::new();
        board.place(Hex::ORIGIN, 0).unwrap();
        board.place(Hex::new(1, 0), 3).unwrap();

        let moved = board.relocate(Hex::ORIGIN, Hex::new(0, 1)).unwrap();
        assert_eq!(moved.pos, Hex::new(0, 1));
        assert_eq!(board.piece_at(Hex::new(0, 1)).unwrap().pos, Hex::new(0, 1));
        assert!(!board.is_occupied(Hex::ORIGIN));

        assert_eq!(
            board.relocate(Hex::ORIGIN, Hex::new(-1, 0)),
            Err(GameError::EmptyOrigin(Hex::ORIGIN))
        );
        assert_eq!(
            board.relocate(Hex::new(0, 1), Hex::new(1, 0)),
            Err(GameError::OccupiedTarget(Hex::new(1, 0)))
        );
        assert_eq!(
            board.relocate(Hex::new(0, 1), Hex::new(0, 20)),
            Err(GameError::OffBoard(Hex::new(0, 20)))
        );
        // failed moves leave the board untouched
        assert_eq!(board.pieces().count(), 2);
    }

    #[test]
    fn test_clear_keeps_cells() {
        let mut board = Board::new();
        board.place(Hex::ORIGIN, 0).unwrap();
        board.clear();
        assert_eq!(board.pieces().count(), 0);
        assert_eq!(board.len(), BOARD_CELLS);
    }
}
