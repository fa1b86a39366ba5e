// Create the Error, ErrorKind, ResultExt, and Result types for the library.
// Callers match on `err.kind()` to decide whether to regenerate with other parameters.
use error_chain::*;

error_chain! {

    errors {
        InvalidDimensions(rows: usize, cols: usize) {
            description("grid dimensions too small to carve")
            display("cannot carve a {}x{} grid, rows and columns must both be at least 3", rows, cols)
        }

        OutOfBounds(x: isize, z: isize) {
            description("coordinate outside the grid")
            display("coordinate ({}, {}) is outside the grid", x, z)
        }

        NoOpenTiles {
            description("no open tile to sample")
            display("the graph has no ground tiles to sample from")
        }

        MalformedGrid(reason: String) {
            description("malformed typed grid")
            display("malformed grid: {}", reason)
        }

        BlockedCell(x: usize, z: usize) {
            description("cell is a wall")
            display("cell ({}, {}) is a wall and cannot hold an overlay", x, z)
        }

        InvalidTileSize(size: f32) {
            description("tile size must be finite and positive")
            display("invalid tile size {}", size)
        }
    }
}
