//! 3x3 arrangement of segment ids around a fixed center.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::segment::SegmentId;

pub const GRID_SIZE: usize = 3;
pub const CENTER: (usize, usize) = (1, 1);

/// Ids placed in a 3x3 grid, indexed `[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cells: [[SegmentId; GRID_SIZE]; GRID_SIZE],
}

/// The eight non-center positions in row-major order.
pub fn outer_positions() -> impl Iterator<Item = (usize, usize)> {
    (0..GRID_SIZE)
        .flat_map(|r| (0..GRID_SIZE).map(move |c| (r, c)))
        .filter(|&pos| pos != CENTER)
}

/// All ids except `center`, ascending.
pub fn others(center: SegmentId) -> Vec<SegmentId> {
    SegmentId::all().filter(|&id| id != center).collect()
}

impl Grid {
    /// Places `center` in the middle and a uniform shuffle of the other ids around it.
    pub fn arrange<R: Rng + ?Sized>(center: SegmentId, rng: &mut R) -> Self {
        let mut rest = others(center);
        rest.shuffle(rng);
        Self::from_outer(center, &rest)
    }

    /// Builds a grid from `center` and the outer ids in row-major order.
    fn from_outer(center: SegmentId, outer: &[SegmentId]) -> Self {
        let mut cells = [[center; GRID_SIZE]; GRID_SIZE];
        for ((r, c), &id) in outer_positions().zip(outer) {
            cells[r][c] = id;
        }
        Self { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> SegmentId {
        self.cells[row][col]
    }

    pub fn center(&self) -> SegmentId {
        self.cells[CENTER.0][CENTER.1]
    }

    pub fn rows(&self) -> &[[SegmentId; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn id(n: u8) -> SegmentId {
        SegmentId::new(n).unwrap()
    }

    #[test]
    fn test_outer_positions_skip_center() {
        let positions: Vec<_> = outer_positions().collect();
        assert_eq!(positions.len(), 8);
        assert!(!positions.contains(&CENTER));
        assert_eq!(positions[0], (0, 0));
        assert_eq!(positions[7], (2, 2));
    }

    #[test]
    fn test_center_always_fixed() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let grid = Grid::arrange(id(8), &mut rng);
            assert_eq!(grid.center(), id(8));
            assert_eq!(grid.get(1, 1), id(8));
        }
    }

    #[test]
    fn test_every_id_once() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let grid = Grid::arrange(id(8), &mut rng);
            let seen: HashSet<SegmentId> = grid.rows().iter().flatten().copied().collect();
            assert_eq!(seen.len(), 9);
        }
    }

    #[test]
    fn test_other_center_ids() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = Grid::arrange(id(1), &mut rng);
        assert_eq!(grid.center(), id(1));
        assert!(outer_positions().all(|(r, c)| grid.get(r, c) != id(1)));
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = Grid::arrange(id(8), &mut StdRng::seed_from_u64(42));
        let b = Grid::arrange(id(8), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_distribution_roughly_uniform() {
        const TRIALS: usize = 16_000;
        let mut rng = StdRng::seed_from_u64(2024);
        let ids = others(id(8));
        // counts[position][id index]
        let mut counts = [[0usize; 8]; 8];

        for _ in 0..TRIALS {
            let grid = Grid::arrange(id(8), &mut rng);
            for (p, (r, c)) in outer_positions().enumerate() {
                let idx = ids.iter().position(|&x| x == grid.get(r, c)).unwrap();
                counts[p][idx] += 1;
            }
        }

        // Expected 2000 per bucket; allow a wide margin.
        for row in counts {
            for n in row {
                assert!((1700..=2300).contains(&n), "bucket count {n}");
            }
        }
    }
}
