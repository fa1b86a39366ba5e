//! **tilemaze** carves procedural mazes into tile grids and turns them into weighted tile graphs
//! for gameplay and pathfinding code to run on.
//!
//! Typical flow: `generators::carve` a grid, overlay a goal with `MazeGrid::mark_goal`, then
//! `TileGraph::build` (or `level::Level::generate` to do all three from a `MazeConfig`).

#![recursion_limit = "1024"] // error_chain

pub mod config;
pub mod errors;
pub mod generators;
pub mod level;
pub mod maze_grid;
pub mod tile_graph;
pub mod tiles;
pub mod units;

pub use crate::config::MazeConfig;
pub use crate::level::Level;
pub use crate::maze_grid::MazeGrid;
pub use crate::tile_graph::TileGraph;
pub use crate::tiles::{can_connect, TileEdge, TileNode, TileType};
