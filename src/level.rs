use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::debug;

use crate::config::MazeConfig;
use crate::errors::*;
use crate::generators;
use crate::maze_grid::MazeGrid;
use crate::tile_graph::TileGraph;

/// A carved maze with its overlays, and the tile graph built from it.
#[derive(Clone, Debug)]
pub struct Level {
    pub maze: MazeGrid,
    pub graph: TileGraph,
}

impl Level {
    /// Carve, overlay the goal if configured, then build the graph.
    pub fn generate<R: Rng>(config: &MazeConfig, rng: &mut R) -> Result<Level> {
        config.validate()?;

        let mut maze = generators::carve(config.rows_count(), config.columns_count(), rng)?;
        if config.place_goal {
            place_goal(&mut maze, rng)?;
        }

        let graph = TileGraph::from_maze(&maze, config.tile_size())
            .chain_err(|| "failed to build the tile graph for a carved maze")?;

        Ok(Level { maze, graph })
    }
}

/// Mark a uniformly chosen open cell as the goal. Returns its `(x, z)`.
pub fn place_goal<R: Rng>(maze: &mut MazeGrid, rng: &mut R) -> Result<(usize, usize)> {
    let (x, z) = maze.open_cells()
        .choose(rng)
        .ok_or(ErrorKind::NoOpenTiles)?;
    maze.mark_goal(x, z)?;
    debug!(x, z, "goal placed");
    Ok((x, z))
}
