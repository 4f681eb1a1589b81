//! Player count to active home triangles, and seating order

use crate::topology::TriangleIndex;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

/// Clockwise seating starting from the 6 o'clock triangle
pub const SEATING_ORDER: [TriangleIndex; 6] = [3, 4, 5, 0, 1, 2];

const TWO: &[TriangleIndex] = &[0, 3];
const THREE: &[TriangleIndex] = &[1, 3, 5];
const FOUR: &[TriangleIndex] = &[0, 1, 3, 4];
const FIVE: &[TriangleIndex] = &[0, 1, 2, 3, 4];
const SIX: &[TriangleIndex] = &[0, 1, 2, 3, 4, 5];

/// Whether `count` is a supported player count
pub fn is_supported(count: usize) -> bool {
    (MIN_PLAYERS..=MAX_PLAYERS).contains(&count)
}

/// Player count actually used for `count`; anything unsupported plays six
pub fn effective_player_count(count: usize) -> usize {
    if is_supported(count) {
        count
    } else {
        MAX_PLAYERS
    }
}

/// Home triangles in play, ascending, spread as far apart as possible
pub fn active_triangles(count: usize) -> &'static [TriangleIndex] {
    match count {
        2 => TWO,
        3 => THREE,
        4 => FOUR,
        5 => FIVE,
        _ => SIX,
    }
}

/// Seating order restricted to the active triangles
pub fn turn_order(active: &[TriangleIndex]) -> Vec<TriangleIndex> {
    SEATING_ORDER
        .iter()
        .copied()
        .filter(|index| active.contains(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::goal_triangle;

    #[test]
    fn test_active_triangles() {
        assert_eq!(active_triangles(2), &[0, 3]);
        assert_eq!(active_triangles(3), &[1, 3, 5]);
        assert_eq!(active_triangles(4), &[0, 1, 3, 4]);
        assert_eq!(active_triangles(5), &[0, 1, 2, 3, 4]);
        assert_eq!(active_triangles(6), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_out_of_range_defaults_to_six() {
        assert_eq!(active_triangles(0), active_triangles(6));
        assert_eq!(active_triangles(1), active_triangles(6));
        assert_eq!(active_triangles(9), active_triangles(6));
        assert_eq!(effective_player_count(1), 6);
        assert_eq!(effective_player_count(7), 6);
        assert_eq!(effective_player_count(4), 4);
    }

    #[test]
    fn test_turn_order() {
        assert_eq!(turn_order(active_triangles(2)), vec![3, 0]);
        assert_eq!(turn_order(active_triangles(3)), vec![3, 5, 1]);
        assert_eq!(turn_order(active_triangles(4)), vec![3, 4, 0, 1]);
        assert_eq!(turn_order(active_triangles(6)), vec![3, 4, 5, 0, 1, 2]);
    }

    #[test]
    fn test_layouts_pair_opposites() {
        // every layout except three and five players seats opposite pairs
        for count in [2, 4, 6] {
            let active = active_triangles(count);
            for &home in active {
                assert!(active.contains(&goal_triangle(home)));
            }
        }
        // three players face empty triangles
        for &home in active_triangles(3) {
            assert!(!active_triangles(3).contains(&goal_triangle(home)));
        }
    }
}
