//! Actors: the shared position/symbol record plus the Explorer's gold purse.
//! The Hunter lives in `ai.rs` because its state machine is the bulk of it.

/// Absolute map coordinate. Signed so that off-map neighbours are representable.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Position { x: self.x + dx, y: self.y + dy }
    }
}

/// Compass direction used by `MOVE`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Draw order for random wandering.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit delta: north is up (y - 1).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    /// Parse an upper-case direction token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "N" => Some(Direction::North),
            "S" => Some(Direction::South),
            "E" => Some(Direction::East),
            "W" => Some(Direction::West),
            _ => None,
        }
    }
}

/// Which participant is acting. The engine's dispatch table keys off this.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActorId {
    Explorer,
    Hunter,
}

/// Shared state for every participant. Movement here is unchecked:
/// the turn engine validates against the map before calling `move_by`.
#[derive(Clone, Debug)]
pub struct Actor {
    pos: Position,
    symbol: char,
}

impl Actor {
    pub fn new(symbol: char) -> Self {
        Actor { pos: Position::default(), symbol }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn set_position(&mut self, pos: Position) {
        self.pos = pos;
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.pos = self.pos.offset(dx, dy);
    }
}

/// The human-controlled actor.
#[derive(Clone, Debug)]
pub struct Explorer {
    pub actor: Actor,
    gold: u32,
}

impl Explorer {
    pub fn new(symbol: char) -> Self {
        Explorer { actor: Actor::new(symbol), gold: 0 }
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    /// Only a successful pickup calls this; the count never goes down.
    pub fn add_gold(&mut self) {
        self.gold += 1;
    }
}
