use error_chain::bail;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::errors::*;
use crate::generators::MIN_DIMENSION;
use crate::units::{ColumnsCount, RowsCount, TileSize};

/// Inputs for generating a level.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    pub tile_size: f32,
    /// Fixed seed for reproducible levels. Fresh entropy when unset.
    pub seed: Option<u64>,
    /// Overlay a goal on a random open cell before building the graph.
    pub place_goal: bool,
}

impl Default for MazeConfig {
    fn default() -> Self {
        MazeConfig {
            rows: 21,
            cols: 21,
            tile_size: 1.0,
            seed: None,
            place_goal: true,
        }
    }
}

impl MazeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows < MIN_DIMENSION || self.cols < MIN_DIMENSION {
            bail!(ErrorKind::InvalidDimensions(self.rows, self.cols));
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            bail!(ErrorKind::InvalidTileSize(self.tile_size));
        }
        Ok(())
    }

    #[inline]
    pub fn rows_count(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns_count(&self) -> ColumnsCount {
        ColumnsCount(self.cols)
    }

    #[inline]
    pub fn tile_size(&self) -> TileSize {
        TileSize(self.tile_size)
    }

    /// The generator for carving and sampling, seeded when `seed` is set.
    pub fn rng(&self) -> XorShiftRng {
        match self.seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed),
            None => XorShiftRng::from_entropy(),
        }
    }
}
