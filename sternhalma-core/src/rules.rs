//! Turn sequencing and win detection

use crate::board::Board;
use crate::player::Player;
use crate::topology::TriangleIndex;

/// True iff every cell of `player`'s goal triangle holds one of their pieces
pub fn has_won(board: &Board, player: &Player) -> bool {
    board
        .triangle(player.goal)
        .iter()
        .all(|&hex| board.piece_at(hex).is_some_and(|piece| piece.owner == player.home))
}

/// First player, in list order, whose goal triangle is filled
pub fn find_winner(board: &Board, players: &[Player]) -> Option<TriangleIndex> {
    players
        .iter()
        .find(|player| has_won(board, player))
        .map(|player| player.home)
}

/// Turn index after `current`, wrapping over `player_count` seats
pub fn next_turn(current: usize, player_count: usize) -> usize {
    if player_count == 0 {
        0
    } else {
        (current + 1) % player_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::home_triangle;

    fn fill(board: &mut Board, triangle: TriangleIndex, owner: TriangleIndex) {
        for hex in home_triangle(triangle) {
            board.place(hex, owner).unwrap();
        }
    }

    #[test]
    fn test_full_goal_wins() {
        let mut board = Board::new();
        fill(&mut board, 3, 0);
        assert!(has_won(&board, &Player::new(0, 0)));
        assert!(!has_won(&board, &Player::new(1, 3)));
    }

    #[test]
    fn test_missing_piece_does_not_win() {
        let mut board = Board::new();
        fill(&mut board, 3, 0);
        for hex in home_triangle(3) {
            let piece = board.remove_at(hex).unwrap();
            assert!(!has_won(&board, &Player::new(0, 0)));
            board.place(hex, piece.owner).unwrap();
        }
        assert!(has_won(&board, &Player::new(0, 0)));
    }

    #[test]
    fn test_opponent_in_goal_blocks_win() {
        let mut board = Board::new();
        fill(&mut board, 3, 0);
        board.place(home_triangle(3)[0], 3).unwrap();
        assert!(!has_won(&board, &Player::new(0, 0)));
    }

    #[test]
    fn test_find_winner_uses_list_order() {
        let mut board = Board::new();
        fill(&mut board, 3, 0);
        fill(&mut board, 0, 3);
        let players = vec![Player::new(0, 3), Player::new(1, 0)];
        assert_eq!(find_winner(&board, &players), Some(3));
        assert_eq!(find_winner(&board, &players[1..]), Some(0));
        assert_eq!(find_winner(&Board::new(), &players), None);
    }

    #[test]
    fn test_next_turn_wraps() {
        assert_eq!(next_turn(0, 3), 1);
        assert_eq!(next_turn(2, 3), 0);
        assert_eq!(next_turn(0, 0), 0);
        for count in 1..=6 {
            let mut turn = 0;
            for _ in 0..count {
                turn = next_turn(turn, count);
            }
            assert_eq!(turn, 0);
        }
    }
}
