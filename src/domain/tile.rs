//! Map cells and their properties.
//! Properties are queried via methods, not stored as flags,
//! so cell semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Floor,
    Wall,     // Blocks movement; also returned for every off-map coordinate
    Gold,     // Pickup target
    ExitTile, // Where a winning QUIT must happen
}

impl Cell {
    /// Decode a map character. Anything outside the legend becomes Floor.
    pub fn from_char(ch: char) -> Self {
        match ch {
            '#' => Cell::Wall,
            'G' => Cell::Gold,
            'E' => Cell::ExitTile,
            _ => Cell::Floor,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Floor => '.',
            Cell::Wall => '#',
            Cell::Gold => 'G',
            Cell::ExitTile => 'E',
        }
    }

    /// Can an actor occupy this cell?
    pub fn is_passable(self) -> bool {
        !matches!(self, Cell::Wall)
    }

    /// Can an actor be spawned on this cell at game start?
    pub fn is_spawnable(self) -> bool {
        matches!(self, Cell::Floor | Cell::ExitTile)
    }

    /// Is `ch` one of the characters with a meaning on the map?
    pub fn is_map_char(ch: char) -> bool {
        matches!(ch, '.' | '#' | 'G' | 'E')
    }
}
