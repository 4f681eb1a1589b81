//! Star-shaped board layout: central hexagon plus six home triangles
//!
//! Triangle indices run clockwise from the top: 0 = 12 o'clock,
//! 1 = 2 o'clock, 2 = 4 o'clock, 3 = 6 o'clock, 4 = 8 o'clock,
//! 5 = 10 o'clock.

use crate::hex::Hex;

/// Index of one of the six home triangles (0-5)
pub type TriangleIndex = u8;

/// Cube radius of the neutral center hexagon
pub const CENTER_RADIUS: i32 = 4;

/// Number of home triangles
pub const TRIANGLE_COUNT: usize = 6;

/// Cells per home triangle (rows of 4, 3, 2, 1)
pub const TRIANGLE_SIZE: usize = 10;

/// Total cells on the standard board
pub const BOARD_CELLS: usize = 121;

/// Triangle geometrically opposite `home`
pub fn goal_triangle(home: TriangleIndex) -> TriangleIndex {
    (home + 3) % TRIANGLE_COUNT as TriangleIndex
}

/// Every cell within [`CENTER_RADIUS`] of the origin, row by row
pub fn center_cells() -> Vec<Hex> {
    let mut cells = Vec::with_capacity(61);
    for r in -CENTER_RADIUS..=CENTER_RADIUS {
        for q in -CENTER_RADIUS..=CENTER_RADIUS {
            let hex = Hex::new(q, r);
            if hex.distance_to_center() <= CENTER_RADIUS {
                cells.push(hex);
            }
        }
    }
    cells
}

/// The top (index 0) triangle.
///
/// Row `n` sits at `r = -(5 + n)` and spans `q = 1 + n ..= 4`, giving a
/// wedge whose tip is at `(4, -8)`.
pub fn base_triangle() -> [Hex; TRIANGLE_SIZE] {
    let mut cells = [Hex::ORIGIN; TRIANGLE_SIZE];
    let mut i = 0;
    for row in 0..4 {
        let r = -(CENTER_RADIUS + 1 + row);
        for q in (1 + row)..=CENTER_RADIUS {
            cells[i] = Hex::new(q, r);
            i += 1;
        }
    }
    cells
}

/// Home triangle `index`, obtained by rotating the base triangle clockwise
/// by `index * 60` degrees.
///
/// The rotation is realised as a counter-clockwise rotation by
/// `(6 - index) % 6` steps; both land on the same cells, but mixing the
/// two up mirrors the board left-to-right.
pub fn home_triangle(index: TriangleIndex) -> [Hex; TRIANGLE_SIZE] {
    let ccw_steps = (TRIANGLE_COUNT as u32 - index as u32 % TRIANGLE_COUNT as u32)
        % TRIANGLE_COUNT as u32;
    base_triangle().map(|hex| hex.rotate_ccw(ccw_steps))
}

/// Static cell layout of the standard board
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    cells: Vec<(Hex, Option<TriangleIndex>)>,
    triangles: [[Hex; TRIANGLE_SIZE]; TRIANGLE_COUNT],
}

impl Topology {
    pub fn standard() -> Self {
        let triangles: [[Hex; TRIANGLE_SIZE]; TRIANGLE_COUNT] =
            std::array::from_fn(|i| home_triangle(i as TriangleIndex));

        let mut cells: Vec<(Hex, Option<TriangleIndex>)> =
            center_cells().into_iter().map(|hex| (hex, None)).collect();
        for (index, triangle) in triangles.iter().enumerate() {
            cells.extend(triangle.iter().map(|&hex| (hex, Some(index as TriangleIndex))));
        }

        Self { cells, triangles }
    }

    /// Every cell with its home triangle (`None` for neutral center cells)
    pub fn cells(&self) -> &[(Hex, Option<TriangleIndex>)] {
        &self.cells
    }

    pub fn triangle(&self, index: TriangleIndex) -> &[Hex; TRIANGLE_SIZE] {
        &self.triangles[index as usize % TRIANGLE_COUNT]
    }

    pub fn triangles(&self) -> &[[Hex; TRIANGLE_SIZE]; TRIANGLE_COUNT] {
        &self.triangles
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_center_is_radius_four_hexagon() {
        let center = center_cells();
        assert_eq!(center.len(), 61);
        assert!(center.iter().all(|h| h.distance_to_center() <= 4));
    }

    #[test]
    fn test_base_triangle_shape() {
        let base = base_triangle();
        assert!(base.contains(&Hex::new(4, -8)));
        assert!(base.contains(&Hex::new(1, -5)));
        assert!(base.contains(&Hex::new(4, -5)));
        // every cell lies outside the center with both q and s in 1..=4
        for hex in base {
            assert!(hex.distance_to_center() > CENTER_RADIUS);
            assert!((1..=4).contains(&hex.q));
            assert!((1..=4).contains(&hex.s()));
        }
        let rows: Vec<usize> = (5..=8)
            .map(|d| base.iter().filter(|h| h.r == -d).count())
            .collect();
        assert_eq!(rows, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_triangles_increase_clockwise() {
        // Tip of triangle 1 sits up and to the right of the center
        let tips: Vec<Hex> = (0..6).map(|i| home_triangle(i)[TRIANGLE_SIZE - 1]).collect();
        assert_eq!(tips[0], Hex::new(4, -8));
        assert_eq!(tips[1], Hex::new(8, -4));
        assert_eq!(tips[2], Hex::new(4, 4));
        assert_eq!(tips[3], Hex::new(-4, 8));
        assert_eq!(tips[4], Hex::new(-8, 4));
        assert_eq!(tips[5], Hex::new(-4, -4));
        let (x, y) = tips[1].to_pixel(1.0);
        assert!(x > 0.0 && y < 0.0);
    }

    #[test]
    fn test_opposite_triangles_are_negated() {
        for home in 0..6 {
            let goal = goal_triangle(home);
            let mirrored: FxHashSet<Hex> = home_triangle(home).iter().map(|&h| -h).collect();
            let goal_cells: FxHashSet<Hex> = home_triangle(goal).iter().copied().collect();
            assert_eq!(mirrored, goal_cells);
        }
    }

    #[test]
    fn test_standard_board_cells_are_unique() {
        let topology = Topology::standard();
        assert_eq!(topology.cells().len(), BOARD_CELLS);
        let unique: FxHashSet<Hex> = topology.cells().iter().map(|&(h, _)| h).collect();
        assert_eq!(unique.len(), BOARD_CELLS);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(Topology::standard(), Topology::standard());
        assert_eq!(home_triangle(4), home_triangle(4));
    }
}
