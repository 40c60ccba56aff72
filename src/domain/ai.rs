//! Hunter AI: search/chase state machine driven by periodic LOOKs.
//!
//! Two modes:
//!   1. **Searching**: every 4th command is a LOOK, the rest are random moves.
//!   2. **Chasing**: walk the remembered offset down to zero, horizontal axis
//!      first, then LOOK again and fall back to Searching.
//!
//! The Hunter never sees the map directly. Its only input is the window view
//! returned by its own LOOK, fed back through `observe`.

use log::{debug, trace};

use super::command::Command;
use super::entity::{Actor, Direction};
use super::grid::{ViewCell, WindowView};

/// A LOOK is issued whenever the search cycle is a multiple of this.
pub const LOOK_PERIOD: u32 = 4;

/// Source of randomness for wandering and spawning. Injected so tests can
/// replay exact sequences.
pub trait RandomSource {
    /// Uniform index in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HunterMode {
    Searching,
    Chasing,
}

#[derive(Clone, Debug)]
pub struct Hunter {
    pub actor: Actor,
    mode: HunterMode,
    /// Remembered (dx, dy) from the Hunter to where the Explorer was last seen.
    target: (i32, i32),
    cycle: u32,
}

impl Hunter {
    pub fn new(symbol: char) -> Self {
        Hunter {
            actor: Actor::new(symbol),
            mode: HunterMode::Searching,
            target: (0, 0),
            cycle: 0,
        }
    }

    #[allow(dead_code)]
    pub fn mode(&self) -> HunterMode {
        self.mode
    }

    pub fn target_offset(&self) -> (i32, i32) {
        self.target
    }

    #[allow(dead_code)]
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Enter Chasing with a known offset, as if a LOOK had just spotted the Explorer.
    pub fn chase(&mut self, dx: i32, dy: i32) {
        self.mode = HunterMode::Chasing;
        self.target = (dx, dy);
    }

    /// Produce the Hunter's command for this turn.
    pub fn next_command(&mut self, rng: &mut dyn RandomSource) -> Command {
        let command = match self.mode {
            HunterMode::Searching => {
                let cmd = self.search_command(rng);
                self.cycle += 1;
                cmd
            }
            HunterMode::Chasing => self.chase_command(),
        };
        debug!(
            "hunter {:?} cycle={} target={:?} -> {}",
            self.mode, self.cycle, self.target, command
        );
        command
    }

    fn search_command(&self, rng: &mut dyn RandomSource) -> Command {
        if self.cycle % LOOK_PERIOD == 0 {
            Command::Look
        } else {
            let dir = Direction::ALL[rng.next_index(Direction::ALL.len())];
            Command::Move(dir)
        }
    }

    fn chase_command(&mut self) -> Command {
        let (dx, dy) = &mut self.target;
        if *dx < 0 {
            *dx += 1;
            Command::Move(Direction::West)
        } else if *dx > 0 {
            *dx -= 1;
            Command::Move(Direction::East)
        } else if *dy < 0 {
            *dy += 1;
            Command::Move(Direction::North)
        } else if *dy > 0 {
            *dy -= 1;
            Command::Move(Direction::South)
        } else {
            // Reached the last sighting. Counter restarts at 1 so the next
            // search command is a move, not a second LOOK.
            self.mode = HunterMode::Searching;
            self.cycle = 1;
            Command::Look
        }
    }

    /// Scan a LOOK result for `target_symbol`.
    ///
    /// Row-major scan; if the symbol appears more than once the last match wins.
    /// Returns true if the Explorer was spotted.
    pub fn observe(&mut self, view: &WindowView, target_symbol: char) -> bool {
        let r = view.radius() as i32;
        let mut spotted = None;
        for (col, row, cell) in view.cells() {
            if cell == ViewCell::Actor(target_symbol) {
                spotted = Some((col as i32 - r, row as i32 - r));
            }
        }
        match spotted {
            Some((dx, dy)) => {
                trace!("hunter spotted {target_symbol} at offset ({dx},{dy})");
                self.chase(dx, dy);
                true
            }
            None => {
                trace!("hunter look found nothing");
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::domain::entity::Position;
    use crate::domain::grid::GridMap;

    /// Replays a fixed list of indices, then repeats zero.
    pub(crate) struct ScriptedRandom {
        pub queue: VecDeque<usize>,
    }

    impl ScriptedRandom {
        pub(crate) fn new(values: &[usize]) -> Self {
            ScriptedRandom { queue: values.iter().copied().collect() }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_index(&mut self, bound: usize) -> usize {
            self.queue.pop_front().unwrap_or(0) % bound
        }
    }

    fn open_map() -> GridMap {
        GridMap::parse(&["name Open", "win 0", ".....", ".....", ".....", ".....", "....."])
            .unwrap()
    }

    #[test]
    fn search_cycle_looks_every_fourth_command() {
        let mut h = Hunter::new('B');
        let mut rng = ScriptedRandom::new(&[0, 1, 2, 3, 0, 1]);
        let cmds: Vec<Command> = (0..8).map(|_| h.next_command(&mut rng)).collect();
        assert_eq!(
            cmds,
            vec![
                Command::Look,
                Command::Move(Direction::North),
                Command::Move(Direction::South),
                Command::Move(Direction::East),
                Command::Look,
                Command::Move(Direction::West),
                Command::Move(Direction::North),
                Command::Move(Direction::South),
            ]
        );
        assert_eq!(h.mode(), HunterMode::Searching);
        assert_eq!(h.cycle(), 8);
    }

    #[test]
    fn chase_resolves_horizontal_first() {
        let mut h = Hunter::new('B');
        let mut rng = ScriptedRandom::new(&[]);
        h.chase(2, -1);
        let cmds: Vec<Command> = (0..4).map(|_| h.next_command(&mut rng)).collect();
        assert_eq!(
            cmds,
            vec![
                Command::Move(Direction::East),
                Command::Move(Direction::East),
                Command::Move(Direction::North),
                Command::Look,
            ]
        );
        assert_eq!(h.mode(), HunterMode::Searching);
        assert_eq!(h.target_offset(), (0, 0));
    }

    #[test]
    fn chase_west_and_south() {
        let mut h = Hunter::new('B');
        let mut rng = ScriptedRandom::new(&[]);
        h.chase(-1, 2);
        let cmds: Vec<Command> = (0..4).map(|_| h.next_command(&mut rng)).collect();
        assert_eq!(
            cmds,
            vec![
                Command::Move(Direction::West),
                Command::Move(Direction::South),
                Command::Move(Direction::South),
                Command::Look,
            ]
        );
    }

    #[test]
    fn after_chase_next_command_is_a_move() {
        let mut h = Hunter::new('B');
        let mut rng = ScriptedRandom::new(&[2, 2, 2]);
        h.chase(0, 0);
        assert_eq!(h.next_command(&mut rng), Command::Look);
        assert_eq!(h.cycle(), 1);
        // cycle 1, 2, 3 are moves; 4 is the next look
        for _ in 0..3 {
            assert_eq!(h.next_command(&mut rng), Command::Move(Direction::East));
        }
        assert_eq!(h.next_command(&mut rng), Command::Look);
    }

    #[test]
    fn observe_records_offset_from_center() {
        let map = open_map();
        let mut explorer = Actor::new('P');
        explorer.set_position(Position::new(0, 3));
        let mut h = Hunter::new('B');
        h.actor.set_position(Position::new(2, 2));
        let view = map.window_view(h.actor.position(), 2, &[&explorer, &h.actor]);
        assert!(h.observe(&view, 'P'));
        assert_eq!(h.mode(), HunterMode::Chasing);
        assert_eq!(h.target_offset(), (-2, 1));
    }

    #[test]
    fn observe_without_sighting_keeps_searching() {
        let map = open_map();
        let mut h = Hunter::new('B');
        h.actor.set_position(Position::new(2, 2));
        let view = map.window_view(h.actor.position(), 2, &[&h.actor]);
        assert!(!h.observe(&view, 'P'));
        assert_eq!(h.mode(), HunterMode::Searching);
        assert_eq!(h.target_offset(), (0, 0));
    }

    #[test]
    fn last_match_in_scan_order_wins() {
        let map = open_map();
        let mut first = Actor::new('P');
        first.set_position(Position::new(3, 0));
        let mut second = Actor::new('P');
        second.set_position(Position::new(1, 4));
        let mut h = Hunter::new('B');
        h.actor.set_position(Position::new(2, 2));
        let view = map.window_view(h.actor.position(), 2, &[&first, &second]);
        assert!(h.observe(&view, 'P'));
        assert_eq!(h.target_offset(), (-1, 2));
    }
}
