use std::fmt;

/// Raw cell code for an open cell.
pub const OPEN: u8 = 0;
/// Raw cell code for a wall cell.
pub const WALL: u8 = 1;
/// Raw cell code for the goal overlay. Only ever placed on a previously open cell.
pub const GOAL: u8 = 2;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum TileType {
    Ground,
    Wall,
    Goal,
}

impl TileType {
    /// Interpret a raw grid code. Returns None for unrecognised codes.
    pub fn from_code(code: u8) -> Option<TileType> {
        match code {
            OPEN => Some(TileType::Ground),
            WALL => Some(TileType::Wall),
            GOAL => Some(TileType::Goal),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            TileType::Ground => OPEN,
            TileType::Wall => WALL,
            TileType::Goal => GOAL,
        }
    }

    #[inline]
    pub fn is_traversable(self) -> bool {
        self != TileType::Wall
    }
}

/// Whether an edge may exist between tiles of type `a` and `b`.
///
/// |  a \ b  | Ground | Wall | Goal |
/// |---------|--------|------|------|
/// | Ground  |  yes   |  no  | yes  |
/// | Wall    |  no    |  no  |  no  |
/// | Goal    |  yes   |  no  | yes  |
///
/// Walls never take part in an edge, in either direction.
#[inline]
pub fn can_connect(a: TileType, b: TileType) -> bool {
    a.is_traversable() && b.is_traversable()
}

/// A single grid cell as a graph vertex.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct TileNode {
    /// Row-major index, `z * cols + x`.
    pub index: usize,
    /// Column.
    pub x: usize,
    /// Row.
    pub z: usize,
    pub tile_type: TileType,
}

impl TileNode {
    pub fn new(index: usize, x: usize, z: usize, tile_type: TileType) -> TileNode {
        TileNode {
            index,
            x,
            z,
            tile_type,
        }
    }
}

impl fmt::Display for TileNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}#{} ({}, {})", self.tile_type, self.index, self.x, self.z)
    }
}

/// An outgoing connection from one tile to an orthogonally adjacent tile.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct TileEdge {
    pub from: usize,
    pub to: usize,
    pub weight: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TileType; 3] = [TileType::Ground, TileType::Wall, TileType::Goal];

    #[test]
    fn codes_map_to_types() {
        assert_eq!(TileType::from_code(0), Some(TileType::Ground));
        assert_eq!(TileType::from_code(1), Some(TileType::Wall));
        assert_eq!(TileType::from_code(2), Some(TileType::Goal));
        assert_eq!(TileType::from_code(3), None);
        assert_eq!(TileType::from_code(255), None);
        for tile_type in &ALL {
            assert_eq!(TileType::from_code(tile_type.code()), Some(*tile_type));
        }
    }

    #[test]
    fn connection_truth_table() {
        use self::TileType::*;
        let expected = [
            (Ground, Ground, true),
            (Ground, Wall, false),
            (Ground, Goal, true),
            (Wall, Ground, false),
            (Wall, Wall, false),
            (Wall, Goal, false),
            (Goal, Ground, true),
            (Goal, Wall, false),
            (Goal, Goal, true),
        ];
        for &(a, b, connects) in &expected {
            assert_eq!(can_connect(a, b), connects, "{:?} -> {:?}", a, b);
        }
    }

    #[test]
    fn connection_is_symmetric() {
        for &a in &ALL {
            for &b in &ALL {
                assert_eq!(can_connect(a, b), can_connect(b, a));
            }
        }
    }
}
