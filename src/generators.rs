use error_chain::bail;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::errors::*;
use crate::maze_grid::{CellSmallVec, MazeGrid};
use crate::tiles::{OPEN, WALL};
use crate::units::{ColumnsCount, RowsCount};

/// Smallest number of rows or columns that leaves a non-empty interior inside the wall ring.
pub const MIN_DIMENSION: usize = 3;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum BorderEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl BorderEdge {
    pub const ALL: [BorderEdge; 4] = [BorderEdge::Top,
                                      BorderEdge::Right,
                                      BorderEdge::Bottom,
                                      BorderEdge::Left];
}

fn check_dimensions(rows: RowsCount, cols: ColumnsCount) -> Result<()> {
    if rows.0 < MIN_DIMENSION || cols.0 < MIN_DIMENSION {
        bail!(ErrorKind::InvalidDimensions(rows.0, cols.0));
    }
    Ok(())
}

/// Pick a border edge uniformly at random, then a cell just inside that edge.
///
/// The interior spans `[1, cols - 2]` by `[1, rows - 2]`; the coordinate along the edge is uniform
/// over that range. Returns the `(x, z)` start cell.
pub fn border_start<R: Rng>(rows: RowsCount,
                            cols: ColumnsCount,
                            rng: &mut R)
                            -> Result<(BorderEdge, (usize, usize))> {
    check_dimensions(rows, cols)?;

    let (max_x, max_z) = (cols.0 - 2, rows.0 - 2);
    let edge = BorderEdge::ALL[rng.gen_range(0..BorderEdge::ALL.len())];
    let start = match edge {
        BorderEdge::Top => (rng.gen_range(1..=max_x), 1),
        BorderEdge::Right => (max_x, rng.gen_range(1..=max_z)),
        BorderEdge::Bottom => (rng.gen_range(1..=max_x), max_z),
        BorderEdge::Left => (1, rng.gen_range(1..=max_z)),
    };

    Ok((edge, start))
}

/// Carve a perfect maze into a `rows x cols` grid of walls.
///
/// Randomised iterative depth first search ("recursive backtracker") over the interior, starting
/// from a cell next to a random border edge. Carving jumps two cells at a time and opens the cell
/// in between, so the open cells form a spanning tree. The outer ring is always wall.
pub fn carve<R: Rng>(rows: RowsCount, cols: ColumnsCount, rng: &mut R) -> Result<MazeGrid> {
    let (edge, start) = border_start(rows, cols, rng)?;
    debug!(rows = rows.0, cols = cols.0, ?edge, "carving maze from {:?}", start);

    let mut maze = MazeGrid::walled(rows, cols);
    maze.set(start.0, start.1, OPEN);

    let mut stack = vec![start];
    let mut passages = 0usize;
    while let Some(&(x, z)) = stack.last() {
        let unvisited = unvisited_neighbours(&maze, x, z);

        if let Some(&(nx, nz)) = unvisited.choose(rng) {
            maze.set(nx, nz, OPEN);
            maze.set((x + nx) / 2, (z + nz) / 2, OPEN);
            stack.push((nx, nz));
            passages += 1;
        } else {
            stack.pop();
        }
    }

    seal_border(&mut maze);
    debug!(passages, open_cells = maze.open_count(), "maze carved");

    Ok(maze)
}

/// Cells two steps away (down, up, right, left) that are inside the interior and still walls.
fn unvisited_neighbours(maze: &MazeGrid, x: usize, z: usize) -> CellSmallVec {
    let (max_x, max_z) = (maze.columns().0 - 2, maze.rows().0 - 2);
    let mut candidates = CellSmallVec::new();
    if z + 2 <= max_z {
        candidates.push((x, z + 2));
    }
    if z >= 3 {
        candidates.push((x, z - 2));
    }
    if x + 2 <= max_x {
        candidates.push((x + 2, z));
    }
    if x >= 3 {
        candidates.push((x - 2, z));
    }

    candidates.retain(|cell| maze.code_at(cell.0, cell.1) == Some(WALL));
    candidates
}

fn seal_border(maze: &mut MazeGrid) {
    let (cols, rows) = (maze.columns().0, maze.rows().0);
    for x in 0..cols {
        maze.set(x, 0, WALL);
        maze.set(x, rows - 1, WALL);
    }
    for z in 0..rows {
        maze.set(0, z, WALL);
        maze.set(cols - 1, z, WALL);
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn rng(seed: u64) -> XorShiftRng {
        XorShiftRng::seed_from_u64(seed)
    }

    #[test]
    fn five_by_five_has_border_and_open_interior() {
        let mut rng = rng(5);
        for _ in 0..50 {
            let maze = carve(RowsCount(5), ColumnsCount(5), &mut rng).unwrap();
            assert!(maze.is_border_walled());
            assert!(maze.open_count() >= 1);
            assert!(maze.is_perfect_maze());
        }
    }

    #[test]
    fn three_by_three_opens_only_the_centre() {
        let maze = carve(RowsCount(3), ColumnsCount(3), &mut rng(1)).unwrap();
        assert_eq!(maze.open_cells().collect::<Vec<_>>(), vec![(1, 1)]);
    }

    #[test]
    fn too_small_dimensions_rejected() {
        let mut rng = rng(2);
        for &(rows, cols) in &[(0, 0), (2, 5), (5, 2), (1, 1), (2, 2), (3, 0)] {
            match carve(RowsCount(rows), ColumnsCount(cols), &mut rng) {
                Err(Error(ErrorKind::InvalidDimensions(r, c), _)) => {
                    assert_eq!((r, c), (rows, cols));
                }
                other => panic!("expected InvalidDimensions for {}x{}, got {:?}", rows, cols, other),
            }
        }
    }

    #[test]
    fn start_is_next_to_its_edge() {
        let (rows, cols) = (RowsCount(9), ColumnsCount(13));
        let mut rng = rng(3);
        let mut seen = vec![];
        for _ in 0..400 {
            let (edge, (x, z)) = border_start(rows, cols, &mut rng).unwrap();
            assert!(x >= 1 && x <= 11, "x {} outside interior", x);
            assert!(z >= 1 && z <= 7, "z {} outside interior", z);
            match edge {
                BorderEdge::Top => assert_eq!(z, 1),
                BorderEdge::Right => assert_eq!(x, 11),
                BorderEdge::Bottom => assert_eq!(z, 7),
                BorderEdge::Left => assert_eq!(x, 1),
            }
            if !seen.contains(&edge) {
                seen.push(edge);
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = carve(RowsCount(21), ColumnsCount(17), &mut rng(42)).unwrap();
        let b = carve(RowsCount(21), ColumnsCount(17), &mut rng(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn even_dimensions_still_perfect() {
        let mut rng = rng(8);
        for &(rows, cols) in &[(4, 4), (6, 10), (10, 6), (8, 8), (3, 12), (12, 3)] {
            let maze = carve(RowsCount(rows), ColumnsCount(cols), &mut rng).unwrap();
            assert!(maze.is_border_walled(), "{}x{}\n{}", rows, cols, maze);
            assert!(maze.is_perfect_maze(), "{}x{}\n{}", rows, cols, maze);
        }
    }

    #[test]
    fn odd_square_maze_reaches_every_lattice_cell() {
        // The first open cell in row-major order shares the start cell's parity. From an odd/odd
        // start every odd/odd interior cell gets carved.
        let mut odd_starts = 0;
        for seed in 0..32 {
            let maze = carve(RowsCount(11), ColumnsCount(11), &mut rng(seed)).unwrap();
            let first_open = maze.open_cells().next().unwrap();
            if (first_open.0 % 2, first_open.1 % 2) != (1, 1) {
                continue;
            }
            odd_starts += 1;
            for z in (1..10).step_by(2) {
                for x in (1..10).step_by(2) {
                    assert!(maze.is_open(x, z), "({}, {}) closed\n{}", x, z, maze);
                }
            }
        }
        assert!(odd_starts > 0);
    }

    quickcheck! {
        fn carved_mazes_are_walled_spanning_trees(rows: u8, cols: u8, seed: u64) -> TestResult {
            let rows = MIN_DIMENSION + rows as usize % 40;
            let cols = MIN_DIMENSION + cols as usize % 40;
            let maze = match carve(RowsCount(rows), ColumnsCount(cols), &mut rng(seed)) {
                Ok(maze) => maze,
                Err(_) => return TestResult::failed(),
            };
            TestResult::from_bool(maze.size() == rows * cols &&
                                  maze.is_border_walled() &&
                                  maze.is_perfect_maze())
        }
    }
}
