//! Random start positions.
//!
//! Each actor, in turn order, draws uniform in-bounds coordinates until it
//! finds a cell that is spawnable (not Wall, not Gold) and not taken by an
//! actor placed before it. A bounded number of attempts per actor; running
//! out means the map is too crowded and the game cannot start.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::ai::RandomSource;
use crate::domain::entity::Position;
use crate::error::GameError;
use super::world::{WorldState, TURN_ORDER};

/// Default attempt budget per actor.
pub const PLACEMENT_ATTEMPTS: u32 = 1000;

/// Production random source. Seeded when a seed is configured,
/// from OS entropy otherwise.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        SeededRandom { rng }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Place every actor on a free, spawnable cell.
pub fn place_actors(
    world: &mut WorldState,
    rng: &mut dyn RandomSource,
    attempts: u32,
) -> Result<(), GameError> {
    let mut placed: Vec<Position> = Vec::with_capacity(TURN_ORDER.len());
    for id in TURN_ORDER {
        let pos = find_spawn(world, rng, attempts, &placed).ok_or_else(|| {
            GameError::Placement { symbol: world.actor(id).symbol(), attempts }
        })?;
        world.actor_mut(id).set_position(pos);
        placed.push(pos);
        info!("placed {:?} '{}' at ({}, {})", id, world.actor(id).symbol(), pos.x, pos.y);
    }
    Ok(())
}

fn find_spawn(
    world: &WorldState,
    rng: &mut dyn RandomSource,
    attempts: u32,
    taken: &[Position],
) -> Option<Position> {
    let (w, h) = (world.map.width(), world.map.height());
    for attempt in 0..attempts {
        let pos = Position::new(rng.next_index(w) as i32, rng.next_index(h) as i32);
        if taken.contains(&pos) {
            continue;
        }
        if !world.map.cell(pos).is_spawnable() {
            continue;
        }
        debug!("spawn found after {} attempt(s)", attempt + 1);
        return Some(pos);
    }
    None
}
