//! WorldState: the complete snapshot of a running game.
//!
//! Owns the map and both actors. All mutation goes through the turn engine
//! (`step::dispatch` and `spawn::place_actors`), one command at a time.

use crate::domain::ai::Hunter;
use crate::domain::entity::{Actor, ActorId, Explorer};
use crate::domain::grid::GridMap;

/// How a finished game ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEnd {
    Win,
    Lose,
    Caught,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    Over(GameEnd),
}

/// Fixed turn order. Also the overlay priority for window views.
pub const TURN_ORDER: [ActorId; 2] = [ActorId::Explorer, ActorId::Hunter];

#[derive(Clone, Debug)]
pub struct WorldState {
    pub map: GridMap,
    pub explorer: Explorer,
    pub hunter: Hunter,
    pub phase: Phase,
    /// Commands dispatched so far, both actors included.
    pub tick: u64,
}

impl WorldState {
    pub fn new(map: GridMap, explorer_symbol: char, hunter_symbol: char) -> Self {
        WorldState {
            map,
            explorer: Explorer::new(explorer_symbol),
            hunter: Hunter::new(hunter_symbol),
            phase: Phase::Playing,
            tick: 0,
        }
    }

    #[allow(dead_code)]
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn outcome(&self) -> Option<GameEnd> {
        match self.phase {
            Phase::Playing => None,
            Phase::Over(end) => Some(end),
        }
    }

    /// Mark the game over. The first ending sticks.
    pub fn finish(&mut self, end: GameEnd) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Over(end);
        }
    }

    pub fn actor(&self, id: ActorId) -> &Actor {
        match id {
            ActorId::Explorer => &self.explorer.actor,
            ActorId::Hunter => &self.hunter.actor,
        }
    }

    pub fn actor_mut(&mut self, id: ActorId) -> &mut Actor {
        match id {
            ActorId::Explorer => &mut self.explorer.actor,
            ActorId::Hunter => &mut self.hunter.actor,
        }
    }

    /// All actors in overlay priority order.
    pub fn actors(&self) -> [&Actor; 2] {
        TURN_ORDER.map(|id| self.actor(id))
    }

    /// Explorer and Hunter share a cell.
    pub fn is_caught(&self) -> bool {
        self.explorer.actor.position() == self.hunter.actor.position()
    }
}
