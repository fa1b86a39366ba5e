use std::fmt;

use bit_set::BitSet;
use error_chain::bail;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::errors::*;
use crate::tiles::{TileType, GOAL, OPEN, WALL};
use crate::units::{ColumnsCount, RowsCount};

pub type CellSmallVec = SmallVec<[(usize, usize); 4]>;

/// Rectangular grid of raw cell codes (`0` open, `1` wall, `2` goal), stored row-major.
///
/// The size is fixed at construction. Cells are addressed as `(x, z)`: column then row.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct MazeGrid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl MazeGrid {
    /// A grid where every cell is a wall.
    pub(crate) fn walled(rows: RowsCount, cols: ColumnsCount) -> MazeGrid {
        MazeGrid {
            rows: rows.0,
            cols: cols.0,
            cells: vec![WALL; rows.0 * cols.0],
        }
    }

    /// Build a grid from nested rows of raw codes, checking that it is rectangular
    /// and only holds known codes.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<MazeGrid> {
        let cols = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => { bail!(ErrorKind::MalformedGrid("grid has no cells".to_string())) }
        };

        if let Some((z, row)) = rows.iter().find_position(|row| row.len() != cols) {
            bail!(ErrorKind::MalformedGrid(format!(
                "row {} has {} cells, expected {}",
                z,
                row.len(),
                cols
            )));
        }

        let row_count = rows.len();
        let cells: Vec<u8> = rows.into_iter().flatten().collect();
        if let Some((index, code)) = cells
            .iter()
            .find_position(|code| TileType::from_code(**code).is_none())
        {
            bail!(ErrorKind::MalformedGrid(format!(
                "unknown cell code {} at ({}, {})",
                code,
                index % cols,
                index / cols
            )));
        }

        Ok(MazeGrid {
            rows: row_count,
            cols,
            cells,
        })
    }

    /// Nested rows of raw codes, the shape handed to `TileGraph::build`.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.to_vec())
            .collect()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.cols)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_valid_coordinate(&self, x: usize, z: usize) -> bool {
        x < self.cols && z < self.rows
    }

    #[inline]
    pub fn code_at(&self, x: usize, z: usize) -> Option<u8> {
        if self.is_valid_coordinate(x, z) {
            Some(self.cells[z * self.cols + x])
        } else {
            None
        }
    }

    pub fn tile_type_at(&self, x: usize, z: usize) -> Option<TileType> {
        self.code_at(x, z).and_then(TileType::from_code)
    }

    /// Open or goal. Out of range cells are not open.
    #[inline]
    pub fn is_open(&self, x: usize, z: usize) -> bool {
        self.code_at(x, z).map_or(false, |code| code != WALL)
    }

    #[inline]
    pub(crate) fn set(&mut self, x: usize, z: usize, code: u8) {
        let index = z * self.cols + x;
        self.cells[index] = code;
    }

    /// Overlay the goal marker on an open cell.
    ///
    /// Marking more than one goal is allowed, the graph builder keeps the last one in row-major
    /// order.
    pub fn mark_goal(&mut self, x: usize, z: usize) -> Result<()> {
        match self.code_at(x, z) {
            None => { bail!(ErrorKind::OutOfBounds(x as isize, z as isize)) }
            Some(WALL) => { bail!(ErrorKind::BlockedCell(x, z)) }
            Some(_) => {
                self.set(x, z, GOAL);
                Ok(())
            }
        }
    }

    /// Coordinates of every non-wall cell in row-major order.
    pub fn open_cells<'a>(&'a self) -> impl Iterator<Item = (usize, usize)> + 'a {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &code)| code != WALL)
            .map(move |(index, _)| (index % cols, index / cols))
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&code| code != WALL).count()
    }

    /// In-range orthogonal neighbours, west, east, north, south.
    pub fn neighbours(&self, x: usize, z: usize) -> CellSmallVec {
        let mut neighbours = CellSmallVec::new();
        if x > 0 {
            neighbours.push((x - 1, z));
        }
        if x + 1 < self.cols {
            neighbours.push((x + 1, z));
        }
        if z > 0 {
            neighbours.push((x, z - 1));
        }
        if z + 1 < self.rows {
            neighbours.push((x, z + 1));
        }
        neighbours
    }

    /// Row-major indices of all open cells reachable from `(x, z)` through orthogonal steps.
    ///
    /// Empty if the start cell is a wall.
    pub fn reachable_from(&self, x: usize, z: usize) -> Result<BitSet> {
        if !self.is_valid_coordinate(x, z) {
            bail!(ErrorKind::OutOfBounds(x as isize, z as isize));
        }

        let mut visited = BitSet::with_capacity(self.size());
        if !self.is_open(x, z) {
            return Ok(visited);
        }

        visited.insert(z * self.cols + x);
        let mut frontier = vec![(x, z)];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for &(cx, cz) in &frontier {
                for (nx, nz) in self.neighbours(cx, cz) {
                    if self.is_open(nx, nz) && visited.insert(nz * self.cols + nx) {
                        new_frontier.push((nx, nz));
                    }
                }
            }
            frontier = new_frontier;
        }

        Ok(visited)
    }

    /// Do the open cells form a spanning tree: one connected component with no cycles?
    ///
    /// An open set with `n` cells is a tree exactly when it is connected and has `n - 1`
    /// adjacent pairs.
    pub fn is_perfect_maze(&self) -> bool {
        let open_count = self.open_count();
        let (start_x, start_z) = match self.open_cells().next() {
            Some(cell) => cell,
            None => return false,
        };

        let connected = self
            .reachable_from(start_x, start_z)
            .map(|reached| reached.len() == open_count)
            .unwrap_or(false);

        let adjacent_pairs: usize = self
            .open_cells()
            .map(|(x, z)| {
                let east = self.is_open(x + 1, z) as usize;
                let south = self.is_open(x, z + 1) as usize;
                east + south
            })
            .sum();

        connected && adjacent_pairs == open_count - 1
    }

    /// Is every cell of the outermost ring a wall?
    pub fn is_border_walled(&self) -> bool {
        let (last_x, last_z) = (self.cols - 1, self.rows - 1);
        (0..self.cols).all(|x| !self.is_open(x, 0) && !self.is_open(x, last_z)) &&
        (0..self.rows).all(|z| !self.is_open(0, z) && !self.is_open(last_x, z))
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row
                .iter()
                .map(|&code| match code {
                    OPEN => ' ',
                    GOAL => 'G',
                    _ => '#',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
