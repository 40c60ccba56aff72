//! Events emitted while dispatching commands.
//! The round loop consumes these for logging; they carry values only.

use crate::domain::entity::ActorId;
use super::world::GameEnd;

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum GameEvent {
    Moved { who: ActorId, x: i32, y: i32 },
    Bumped { who: ActorId, x: i32, y: i32 },
    GoldPicked { x: i32, y: i32, total: u32 },
    Looked { who: ActorId, x: i32, y: i32 },
    Spotted { dx: i32, dy: i32 },
    Quit { end: GameEnd },
    Caught { x: i32, y: i32 },
}
