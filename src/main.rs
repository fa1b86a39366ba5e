use docopt::Docopt;
use serde_derive::Deserialize;
use tilemaze::{Level, MazeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Tilemaze

Generates a maze level, prints it as text and summarises its tile graph.
Set RUST_LOG=tilemaze=debug to trace generation.

Usage:
    tilemaze_driver -h | --help
    tilemaze_driver [--rows=<n>] [--cols=<n>] [--tile-size=<s>] [--seed=<n>] [--no-goal] [--samples=<n>]

Options:
    -h --help           Show this screen.
    --rows=<n>          Number of grid rows, at least 3 [default: 21].
    --cols=<n>          Number of grid columns, at least 3 [default: 21].
    --tile-size=<s>     World size of one tile and the cost of one step [default: 1.0].
    --seed=<n>          Seed the generator for a reproducible level.
    --no-goal           Do not overlay a goal cell.
    --samples=<n>       Print n randomly sampled open tiles [default: 0].
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    flag_rows: usize,
    flag_cols: usize,
    flag_tile_size: f32,
    flag_seed: Option<u64>,
    flag_no_goal: bool,
    flag_samples: usize,
}

impl DriverArgs {
    fn maze_config(&self) -> MazeConfig {
        MazeConfig {
            rows: self.flag_rows,
            cols: self.flag_cols,
            tile_size: self.flag_tile_size,
            seed: self.flag_seed,
            place_goal: !self.flag_no_goal,
        }
    }
}

mod errors {
    use error_chain::*;
    error_chain! {
        links {
            Maze(::tilemaze::errors::Error, ::tilemaze::errors::ErrorKind);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: DriverArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let config = args.maze_config();
    let mut rng = config.rng();
    let level = Level::generate(&config, &mut rng)
        .chain_err(|| format!("Failed to generate a {}x{} level", config.rows, config.cols))?;

    info!(rows = config.rows, cols = config.cols, seed = ?config.seed, "level generated");

    print!("{}", level.maze);
    println!("tiles: {}  open: {}  edges: {}  perfect: {}",
             level.graph.len(),
             level.graph.open_tiles().len(),
             level.graph.edge_count(),
             level.maze.is_perfect_maze());

    if let Some(goal) = level.graph.goal_node() {
        println!("goal: {} at {:?}", goal, level.graph.world_position(goal));
    }

    for _ in 0..args.flag_samples {
        let tile = level.graph.random_empty_tile(&mut rng)?;
        println!("sample: {} at {:?}", tile, level.graph.world_position(tile));
    }

    Ok(())
}
