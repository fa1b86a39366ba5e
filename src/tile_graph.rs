use error_chain::bail;
use itertools::iproduct;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::errors::*;
use crate::maze_grid::MazeGrid;
use crate::tiles::{can_connect, TileEdge, TileNode, TileType};
use crate::units::{ColumnsCount, RowsCount, TileSize};

pub type EdgeSmallVec = SmallVec<[TileEdge; 4]>;

/// Graph of every grid tile with weighted edges between traversable orthogonal neighbours.
///
/// Node `i` is the cell at `x = i % cols`, `z = i / cols`. Edges are stored directed, but every
/// edge is added together with its reverse so the relation is symmetric. The graph is read-only
/// once built.
#[derive(Clone, Debug)]
pub struct TileGraph {
    graph: DiGraph<TileNode, f32>,
    rows: usize,
    cols: usize,
    tile_size: TileSize,
    goal_node: Option<usize>,
    open_tiles: Vec<usize>,
}

impl TileGraph {
    /// Build the graph from nested rows of raw cell codes.
    ///
    /// All nodes are allocated first, then connected. Fails without a partial graph if the grid
    /// does not match `cols x rows`, holds an unknown code, or the tile size is not positive.
    pub fn build(typed_grid: &[Vec<u8>],
                 cols: ColumnsCount,
                 rows: RowsCount,
                 tile_size: TileSize)
                 -> Result<TileGraph> {

        if !(tile_size.0.is_finite() && tile_size.0 > 0.0) {
            bail!(ErrorKind::InvalidTileSize(tile_size.0));
        }
        check_shape(typed_grid, cols, rows)?;

        let cells_count = rows.0 * cols.0;
        let mut tile_graph = TileGraph {
            graph: DiGraph::with_capacity(cells_count, 4 * cells_count),
            rows: rows.0,
            cols: cols.0,
            tile_size,
            goal_node: None,
            open_tiles: vec![],
        };

        tile_graph.allocate_nodes(typed_grid)?;
        tile_graph.connect_nodes();

        debug!(nodes = tile_graph.len(),
               edges = tile_graph.edge_count(),
               open_tiles = tile_graph.open_tiles.len(),
               goal = ?tile_graph.goal_node,
               "tile graph built");

        Ok(tile_graph)
    }

    pub fn from_maze(maze: &MazeGrid, tile_size: TileSize) -> Result<TileGraph> {
        TileGraph::build(&maze.to_rows(), maze.columns(), maze.rows(), tile_size)
    }

    /// Phase one: a node per cell in row-major order.
    fn allocate_nodes(&mut self, typed_grid: &[Vec<u8>]) -> Result<()> {
        for (z, x) in iproduct!(0..self.rows, 0..self.cols) {
            let code = typed_grid[z][x];
            let tile_type = match TileType::from_code(code) {
                Some(tile_type) => tile_type,
                None => {
                    bail!(ErrorKind::MalformedGrid(format!("unknown cell code {} at ({}, {})",
                                                           code,
                                                           x,
                                                           z)))
                }
            };

            let index = self.graph.node_count();
            match tile_type {
                TileType::Goal => {
                    if let Some(previous) = self.goal_node {
                        warn!(previous, replacement = index, "grid has more than one goal cell");
                    }
                    self.goal_node = Some(index);
                }
                TileType::Ground => self.open_tiles.push(index),
                TileType::Wall => {}
            }

            let node_index = self.graph.add_node(TileNode::new(index, x, z, tile_type));
            debug_assert_eq!(node_index.index(), index);
        }
        Ok(())
    }

    /// Phase two: every ground tile tries to link west, east, north and south.
    ///
    /// Requires every node to exist already.
    fn connect_nodes(&mut self) {
        let weight = self.tile_size.0;
        for index in 0..self.graph.node_count() {
            let TileNode { x, z, tile_type, .. } = self.graph[NodeIndex::new(index)];
            if tile_type != TileType::Ground {
                continue;
            }

            if x > 0 {
                self.try_add_edge(index, index - 1, weight);
            }
            if x < self.cols - 1 {
                self.try_add_edge(index, index + 1, weight);
            }
            if z > 0 {
                self.try_add_edge(index, index - self.cols, weight);
            }
            if z < self.rows - 1 {
                self.try_add_edge(index, index + self.cols, weight);
            }
        }
    }

    /// Link `a` and `b` in both directions unless `can_connect` refuses their tile types.
    ///
    /// Existing edges are not duplicated. Returns whether the pair is linked.
    fn try_add_edge(&mut self, a: usize, b: usize, weight: f32) -> bool {
        let (a_index, b_index) = (NodeIndex::new(a), NodeIndex::new(b));
        if !can_connect(self.graph[a_index].tile_type, self.graph[b_index].tile_type) {
            return false;
        }

        let _ = self.graph.update_edge(a_index, b_index, weight);
        let _ = self.graph.update_edge(b_index, a_index, weight);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
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
    pub fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    /// Nodes in index order.
    pub fn nodes<'a>(&'a self) -> impl Iterator<Item = &'a TileNode> + 'a {
        self.graph.raw_nodes().iter().map(|node| &node.weight)
    }

    #[inline]
    pub fn node(&self, index: usize) -> Option<&TileNode> {
        self.graph.node_weight(NodeIndex::new(index))
    }

    /// The node at column `x`, row `z`.
    pub fn get_node(&self, x: isize, z: isize) -> Result<&TileNode> {
        if x < 0 || z < 0 || x as usize >= self.cols || z as usize >= self.rows {
            bail!(ErrorKind::OutOfBounds(x, z));
        }
        let index = z as usize * self.cols + x as usize;
        Ok(&self.graph[NodeIndex::new(index)])
    }

    /// Outgoing edges of node `index` in the order they were created. Empty for unknown indices.
    pub fn edges(&self, index: usize) -> EdgeSmallVec {
        let mut edges: SmallVec<[(EdgeIndex, TileEdge); 4]> = self.graph
            .edges(NodeIndex::new(index))
            .map(|edge| {
                (edge.id(),
                 TileEdge {
                     from: edge.source().index(),
                     to: edge.target().index(),
                     weight: *edge.weight(),
                 })
            })
            .collect();
        edges.sort_by_key(|&(id, _)| id);
        edges.into_iter().map(|(_, edge)| edge).collect()
    }

    /// The goal tile, the last one in row-major order if the grid marked several.
    pub fn goal_node(&self) -> Option<&TileNode> {
        self.goal_node.and_then(|index| self.node(index))
    }

    /// Indices of every ground tile, ascending.
    #[inline]
    pub fn open_tiles(&self) -> &[usize] {
        &self.open_tiles
    }

    /// A uniformly chosen ground tile. Walls and the goal are never returned.
    pub fn random_empty_tile<R: Rng>(&self, rng: &mut R) -> Result<&TileNode> {
        match self.open_tiles.choose(rng) {
            Some(&index) => Ok(&self.graph[NodeIndex::new(index)]),
            None => { bail!(ErrorKind::NoOpenTiles) }
        }
    }

    /// Read-only petgraph view for search algorithms. Node indices match tile indices and edge
    /// weights are traversal costs.
    #[inline]
    pub fn graph(&self) -> &DiGraph<TileNode, f32> {
        &self.graph
    }

    /// World-space centre of a tile, relative to the map's corner.
    pub fn world_position(&self, node: &TileNode) -> (f32, f32) {
        let size = self.tile_size.0;
        ((node.x as f32 + 0.5) * size, (node.z as f32 + 0.5) * size)
    }

    /// The tile containing a world-space point.
    pub fn quantize(&self, world_x: f32, world_z: f32) -> Result<&TileNode> {
        let size = self.tile_size.0;
        self.get_node(world_to_grid(world_x, size), world_to_grid(world_z, size))
    }
}

fn world_to_grid(value: f32, tile_size: f32) -> isize {
    if value.is_finite() {
        (value / tile_size).floor() as isize
    } else {
        -1
    }
}

fn check_shape(typed_grid: &[Vec<u8>], cols: ColumnsCount, rows: RowsCount) -> Result<()> {
    if rows.0 == 0 || cols.0 == 0 {
        bail!(ErrorKind::MalformedGrid(format!("{}x{} grid has no cells", rows.0, cols.0)));
    }
    if typed_grid.len() != rows.0 {
        bail!(ErrorKind::MalformedGrid(format!("expected {} rows, found {}",
                                               rows.0,
                                               typed_grid.len())));
    }
    if let Some((z, row)) = typed_grid.iter().enumerate().find(|&(_, row)| row.len() != cols.0) {
        bail!(ErrorKind::MalformedGrid(format!("row {} has {} cells, expected {}",
                                               z,
                                               row.len(),
                                               cols.0)));
    }
    Ok(())
}
