//! Move generation: single steps and chained jumps
//!
//! Jumps are symmetric "long" hops: the first occupied cell along a line
//! at distance `d` is the pivot, cells `d+1 .. 2d-1` must be empty, and the
//! piece lands at exactly `2d`. From every landing spot the search keeps
//! hopping, depth first, until no new landing spot is reachable.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::hex::{Hex, DIRECTIONS};

/// How a move reaches its destination
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// One cell to an empty neighbor
    Step,
    /// One or more chained hops
    Jump,
}

/// A legal move
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Hex,
    pub to: Hex,
    pub kind: MoveKind,
    /// Landing cells in order, ending at `to`; a step has just `[to]`
    pub path: Vec<Hex>,
}

impl Move {
    pub fn is_jump(&self) -> bool {
        self.kind == MoveKind::Jump
    }

    /// Number of hops (1 for a step)
    pub fn hops(&self) -> usize {
        self.path.len()
    }

    /// `from` followed by every landing cell, for animated playback
    pub fn waypoints(&self) -> Vec<Hex> {
        std::iter::once(self.from)
            .chain(self.path.iter().copied())
            .collect()
    }
}

/// Every legal destination for the piece at `start`.
///
/// Each destination appears once. When several jump sequences reach the
/// same cell, the first one found in direction order is kept. An
/// off-board start yields no moves.
pub fn find_valid_moves(board: &Board, start: Hex) -> Vec<Move> {
    if !board.is_on_board(start) {
        return Vec::new();
    }

    let mut search = JumpSearch::new(board, start);
    search.collect_steps();
    search.explore(start, &[]);

    tracing::debug!(
        %start,
        moves = search.moves.len(),
        landings = search.visited.len(),
        "generated moves"
    );
    search.moves
}

/// Landing spot for a hop from `from` along `dir`, if any.
///
/// `origin` is the square the moving piece started on; it stays occupied
/// for the whole search, so it must never serve as a pivot.
pub fn jump_landing(board: &Board, origin: Hex, from: Hex, dir: Hex) -> Option<Hex> {
    let mut distance = 1;
    let pivot_distance = loop {
        let cell = from + dir * distance;
        if !board.is_on_board(cell) {
            return None;
        }
        if board.is_occupied(cell) {
            if cell == origin {
                return None;
            }
            break distance;
        }
        distance += 1;
    };

    for d in pivot_distance + 1..2 * pivot_distance {
        let cell = from + dir * d;
        if !board.is_on_board(cell) || board.is_occupied(cell) {
            return None;
        }
    }

    let landing = from + dir * (2 * pivot_distance);
    (board.is_on_board(landing) && !board.is_occupied(landing)).then_some(landing)
}

// ============================================================================
// SEARCH
// ============================================================================

struct JumpSearch<'a> {
    board: &'a Board,
    origin: Hex,
    /// Landing spots already explored (the origin included)
    visited: FxHashSet<Hex>,
    /// Destinations already reported
    targets: FxHashSet<Hex>,
    moves: Vec<Move>,
}

impl<'a> JumpSearch<'a> {
    fn new(board: &'a Board, origin: Hex) -> Self {
        Self {
            board,
            origin,
            visited: FxHashSet::default(),
            targets: FxHashSet::default(),
            moves: Vec::new(),
        }
    }

    /// Steps only exist from the origin and are never chained
    fn collect_steps(&mut self) {
        for &dir in &DIRECTIONS {
            let to = self.origin + dir;
            if self.board.is_on_board(to) && !self.board.is_occupied(to) {
                self.record(to, MoveKind::Step, vec![to]);
            }
        }
    }

    fn explore(&mut self, current: Hex, path: &[Hex]) {
        if !self.visited.insert(current) {
            return;
        }

        for &dir in &DIRECTIONS {
            let Some(landing) = jump_landing(self.board, self.origin, current, dir) else {
                continue;
            };
            if self.visited.contains(&landing) {
                continue;
            }

            let mut next_path = path.to_vec();
            next_path.push(landing);
            self.record(landing, MoveKind::Jump, next_path.clone());
            self.explore(landing, &next_path);
        }
    }

    fn record(&mut self, to: Hex, kind: MoveKind, path: Vec<Hex>) {
        if self.targets.insert(to) {
            self.moves.push(Move {
                from: self.origin,
                to,
                kind,
                path,
            });
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
