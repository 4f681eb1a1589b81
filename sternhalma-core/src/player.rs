//! Players and their piece index

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::hex::Hex;
use crate::topology::{goal_triangle, TriangleIndex};

/// A seated player.
///
/// `pieces` is a derived index of the cells this player occupies; the board
/// stays the source of truth and the game keeps the two in step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Position in the turn order
    pub order: usize,
    pub home: TriangleIndex,
    pub goal: TriangleIndex,
    pieces: FxHashSet<Hex>,
}

impl Player {
    pub fn new(order: usize, home: TriangleIndex) -> Self {
        Self {
            order,
            home,
            goal: goal_triangle(home),
            pieces: FxHashSet::default(),
        }
    }

    pub fn occupies(&self, pos: Hex) -> bool {
        self.pieces.contains(&pos)
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Occupied cells, sorted for stable output
    pub fn pieces(&self) -> Vec<Hex> {
        let mut pieces: Vec<Hex> = self.pieces.iter().copied().collect();
        pieces.sort();
        pieces
    }

    /// Occupied cells as canonical keys
    pub fn piece_keys(&self) -> Vec<String> {
        self.pieces().iter().map(Hex::key).collect()
    }

    pub(crate) fn add_piece(&mut self, pos: Hex) {
        self.pieces.insert(pos);
    }

    pub(crate) fn remove_piece(&mut self, pos: Hex) -> bool {
        self.pieces.remove(&pos)
    }

    pub(crate) fn relocate(&mut self, from: Hex, to: Hex) {
        self.pieces.remove(&from);
        self.pieces.insert(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_is_opposite() {
        assert_eq!(Player::new(0, 0).goal, 3);
        assert_eq!(Player::new(0, 4).goal, 1);
        assert_eq!(Player::new(0, 3).goal, 0);
    }

    #[test]
    fn test_piece_index() {
        let mut player = Player::new(1, 2);
        player.add_piece(Hex::new(1, 2));
        player.add_piece(Hex::new(0, 3));
        assert_eq!(player.piece_count(), 2);
        assert_eq!(player.piece_keys(), vec!["0,3".to_string(), "1,2".to_string()]);

        player.relocate(Hex::new(1, 2), Hex::new(2, 2));
        assert!(player.occupies(Hex::new(2, 2)));
        assert!(!player.occupies(Hex::new(1, 2)));
        assert_eq!(player.piece_count(), 2);

        assert!(player.remove_piece(Hex::new(0, 3)));
        assert!(!player.remove_piece(Hex::new(0, 3)));
        assert_eq!(player.piece_count(), 1);
    }
}
