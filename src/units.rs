#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

/// World-space side length of one tile. Also the traversal cost of a single step.
#[derive(PartialEq, PartialOrd, Copy, Clone, Debug)]
pub struct TileSize(pub f32);
