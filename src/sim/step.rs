//! Command dispatch: applies one command from one actor to the world.
//!
//! ## Dispatch table
//! ┌──────────┬─────────────────┬──────────────────────────────────────────┐
//! │ Command  │ Who             │ Effect                                   │
//! ├──────────┼─────────────────┼──────────────────────────────────────────┤
//! │ HELLO    │ anyone          │ report gold target                       │
//! │ GOLD     │ anyone          │ report the Explorer's gold               │
//! │ LOOK     │ anyone          │ 5×5 view; the Hunter also observes it    │
//! │ PICKUP   │ Explorer only   │ take gold if standing on it              │
//! │ QUIT     │ Explorer only   │ end game: WIN on exit with enough gold   │
//! │ MOVE d   │ anyone          │ step unless the destination is a wall    │
//! │ other    │                 │ Invalid, no state change                 │
//! └──────────┴─────────────────┴──────────────────────────────────────────┘
//!
//! Dispatch never fails: bad input is an `Invalid` outcome, not an error.

use std::fmt;

use log::debug;

use crate::domain::command::Command;
use crate::domain::entity::{ActorId, Direction};
use crate::domain::grid::WindowView;
use crate::domain::tile::Cell;
use super::event::GameEvent;
use super::world::{GameEnd, WorldState};

/// LOOK always shows a 5×5 window.
pub const LOOK_RADIUS: usize = 2;

/// Result of one dispatched command. `Display` gives the exact reply text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    GoldTarget(u32),
    GoldOwned(u32),
    Moved { success: bool },
    PickedUp { success: bool, gold: u32 },
    View(WindowView),
    Quit(GameEnd),
    Invalid,
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::GoldTarget(n) => write!(f, "Gold to win: {n}"),
            CommandOutcome::GoldOwned(n) => write!(f, "Gold owned: {n}"),
            CommandOutcome::Moved { success } => f.write_str(verdict(*success)),
            CommandOutcome::PickedUp { success, gold } => {
                write!(f, "{}. Gold owned: {gold}", verdict(*success))
            }
            CommandOutcome::View(view) => write!(f, "{view}"),
            CommandOutcome::Quit(GameEnd::Win) => f.write_str("WIN"),
            CommandOutcome::Quit(_) => f.write_str("LOSE"),
            CommandOutcome::Invalid => f.write_str("Invalid command"),
        }
    }
}

fn verdict(success: bool) -> &'static str {
    if success { "SUCCESS" } else { "FAIL" }
}

// ══════════════════════════════════════════════════════════════
// Main entry points
// ══════════════════════════════════════════════════════════════

/// Apply `command` issued by `who`.
pub fn dispatch(
    world: &mut WorldState,
    who: ActorId,
    command: Command,
    events: &mut Vec<GameEvent>,
) -> CommandOutcome {
    world.tick += 1;
    let outcome = match (command, who) {
        (Command::Hello, _) => CommandOutcome::GoldTarget(world.map.gold_required()),
        (Command::Gold, _) => CommandOutcome::GoldOwned(world.explorer.gold()),
        (Command::Look, _) => look(world, who, events),
        (Command::Pickup, ActorId::Explorer) => pickup(world, events),
        (Command::Quit, ActorId::Explorer) => quit(world, events),
        (Command::Move(dir), _) => move_actor(world, who, dir, events),
        _ => CommandOutcome::Invalid,
    };
    debug!("tick {} {:?} {} -> {:?}", world.tick, who, command, outcome);
    outcome
}

/// End the game if the Hunter stands on the Explorer. Returns true if caught.
pub fn resolve_catch(world: &mut WorldState, events: &mut Vec<GameEvent>) -> bool {
    if !world.is_caught() {
        return false;
    }
    let pos = world.explorer.actor.position();
    world.finish(GameEnd::Caught);
    events.push(GameEvent::Caught { x: pos.x, y: pos.y });
    true
}

// ══════════════════════════════════════════════════════════════
// Commands
// ══════════════════════════════════════════════════════════════

fn look(world: &mut WorldState, who: ActorId, events: &mut Vec<GameEvent>) -> CommandOutcome {
    let center = world.actor(who).position();
    let view = world.map.window_view(center, LOOK_RADIUS, &world.actors());
    events.push(GameEvent::Looked { who, x: center.x, y: center.y });

    if who == ActorId::Hunter {
        let target = world.explorer.actor.symbol();
        if world.hunter.observe(&view, target) {
            let (dx, dy) = world.hunter.target_offset();
            events.push(GameEvent::Spotted { dx, dy });
        }
    }
    CommandOutcome::View(view)
}

fn pickup(world: &mut WorldState, events: &mut Vec<GameEvent>) -> CommandOutcome {
    let pos = world.explorer.actor.position();
    let success = world.map.cell(pos) == Cell::Gold;
    if success {
        world.explorer.add_gold();
        world.map.clear_to_floor(pos.x, pos.y);
        events.push(GameEvent::GoldPicked { x: pos.x, y: pos.y, total: world.explorer.gold() });
    }
    CommandOutcome::PickedUp { success, gold: world.explorer.gold() }
}

fn quit(world: &mut WorldState, events: &mut Vec<GameEvent>) -> CommandOutcome {
    let pos = world.explorer.actor.position();
    let on_exit = world.map.cell(pos) == Cell::ExitTile;
    let enough = world.explorer.gold() >= world.map.gold_required();
    let end = if on_exit && enough { GameEnd::Win } else { GameEnd::Lose };
    world.finish(end);
    events.push(GameEvent::Quit { end });
    CommandOutcome::Quit(end)
}

fn move_actor(
    world: &mut WorldState,
    who: ActorId,
    dir: Direction,
    events: &mut Vec<GameEvent>,
) -> CommandOutcome {
    let (dx, dy) = dir.delta();
    let dest = world.actor(who).position().offset(dx, dy);
    if !world.map.cell(dest).is_passable() {
        events.push(GameEvent::Bumped { who, x: dest.x, y: dest.y });
        return CommandOutcome::Moved { success: false };
    }
    world.actor_mut(who).move_by(dx, dy);
    events.push(GameEvent::Moved { who, x: dest.x, y: dest.y });
    CommandOutcome::Moved { success: true }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ai::HunterMode;
    use crate::domain::entity::Position;
    use crate::domain::grid::GridMap;

    /// Build a world from a diagram and put the actors down explicitly.
    fn world_from(win: u32, rows: &[&str], explorer: (i32, i32), hunter: (i32, i32)) -> WorldState {
        let mut lines = vec!["name Step".to_string(), format!("win {win}")];
        lines.extend(rows.iter().map(|r| r.to_string()));
        let mut w = WorldState::new(GridMap::parse(&lines).unwrap(), 'P', 'B');
        w.explorer.actor.set_position(Position::new(explorer.0, explorer.1));
        w.hunter.actor.set_position(Position::new(hunter.0, hunter.1));
        w
    }

    fn run(w: &mut WorldState, who: ActorId, line: &str) -> String {
        let mut events = Vec::new();
        dispatch(w, who, Command::parse(line), &mut events).to_string()
    }

    // ── Reports ──

    #[test]
    fn hello_and_gold_report() {
        let mut w = world_from(4, &["...."], (0, 0), (3, 0));
        assert_eq!(run(&mut w, ActorId::Explorer, "hello"), "Gold to win: 4");
        assert_eq!(run(&mut w, ActorId::Explorer, "GOLD"), "Gold owned: 0");
        // Hunter may ask too; it hears the Explorer's purse.
        assert_eq!(run(&mut w, ActorId::Hunter, "GOLD"), "Gold owned: 0");
        assert_eq!(run(&mut w, ActorId::Hunter, "HELLO"), "Gold to win: 4");
    }

    #[test]
    fn malformed_commands_are_invalid() {
        let mut w = world_from(0, &["...."], (0, 0), (3, 0));
        for line in ["", "JUMP", "MOVE", "MOVE Q", "LOOK NOW", "GOLD 5"] {
            assert_eq!(run(&mut w, ActorId::Explorer, line), "Invalid command", "{line:?}");
        }
        assert_eq!(w.explorer.actor.position(), Position::new(0, 0));
        assert!(w.is_active());
    }

    // ── Movement ──

    #[test]
    fn move_onto_open_cells() {
        let mut w = world_from(0, &["...", "...", "..."], (1, 1), (0, 0));
        for (line, expect) in [("MOVE N", (1, 0)), ("MOVE S", (1, 1)), ("MOVE E", (2, 1)), ("MOVE W", (1, 1))] {
            assert_eq!(run(&mut w, ActorId::Explorer, line), "SUCCESS");
            assert_eq!(w.explorer.actor.position(), Position::new(expect.0, expect.1));
        }
    }

    #[test]
    fn move_into_wall_fails() {
        let mut w = world_from(0, &[".#", ".."], (0, 0), (1, 1));
        assert_eq!(run(&mut w, ActorId::Explorer, "MOVE E"), "FAIL");
        assert_eq!(run(&mut w, ActorId::Explorer, "MOVE N"), "FAIL"); // off-map
        assert_eq!(run(&mut w, ActorId::Explorer, "MOVE W"), "FAIL"); // off-map
        assert_eq!(w.explorer.actor.position(), Position::new(0, 0));
        assert_eq!(run(&mut w, ActorId::Hunter, "MOVE N"), "FAIL");
        assert_eq!(w.hunter.actor.position(), Position::new(1, 1));
    }

    #[test]
    fn move_onto_gold_and_exit() {
        let mut w = world_from(0, &["GE."], (2, 0), (0, 0));
        assert_eq!(run(&mut w, ActorId::Explorer, "MOVE W"), "SUCCESS");
        assert_eq!(w.explorer.actor.position(), Position::new(1, 0));
        assert_eq!(run(&mut w, ActorId::Hunter, "MOVE E"), "SUCCESS");
    }

    // ── Pickup ──

    #[test]
    fn pickup_clears_gold_once() {
        let mut w = world_from(0, &["...", ".G.", "..."], (1, 1), (0, 0));
        assert_eq!(run(&mut w, ActorId::Explorer, "PICKUP"), "SUCCESS. Gold owned: 1");
        assert_eq!(w.map.cell_at(1, 1), Cell::Floor);
        assert_eq!(run(&mut w, ActorId::Explorer, "PICKUP"), "FAIL. Gold owned: 1");
        assert_eq!(w.explorer.gold(), 1);
    }

    #[test]
    fn pickup_off_gold_fails() {
        let mut w = world_from(0, &["G.."], (1, 0), (2, 0));
        assert_eq!(run(&mut w, ActorId::Explorer, "pickup"), "FAIL. Gold owned: 0");
        assert_eq!(w.map.cell_at(0, 0), Cell::Gold);
    }

    #[test]
    fn hunter_cannot_pickup_or_quit() {
        let mut w = world_from(0, &["GE"], (1, 0), (0, 0));
        assert_eq!(run(&mut w, ActorId::Hunter, "PICKUP"), "Invalid command");
        assert_eq!(w.map.cell_at(0, 0), Cell::Gold);
        assert_eq!(run(&mut w, ActorId::Hunter, "QUIT"), "Invalid command");
        assert!(w.is_active());
    }

    // ── Quit ──

    #[test]
    fn quit_needs_exit_and_gold() {
        let mut w = world_from(1, &["E.G"], (0, 0), (2, 0));
        assert_eq!(run(&mut w, ActorId::Explorer, "QUIT"), "LOSE");
        assert_eq!(w.outcome(), Some(GameEnd::Lose));

        let mut w = world_from(1, &["E.G"], (0, 0), (2, 0));
        w.explorer.add_gold();
        assert_eq!(run(&mut w, ActorId::Explorer, "QUIT"), "WIN");
        assert_eq!(w.outcome(), Some(GameEnd::Win));

        let mut w = world_from(0, &["E.G"], (1, 0), (2, 0));
        assert_eq!(run(&mut w, ActorId::Explorer, "QUIT"), "LOSE"); // not on exit
    }

    // ── Look ──

    #[test]
    fn look_shows_actors_and_walls() {
        let mut w = world_from(0, &["...", ".G.", "..E"], (0, 0), (2, 1));
        assert_eq!(
            run(&mut w, ActorId::Explorer, "LOOK"),
            "#####\n#####\n##P..\n##.GB\n##..E"
        );
    }

    #[test]
    fn hunter_look_feeds_observation() {
        let mut w = world_from(0, &[".....", ".....", "....."], (0, 0), (2, 1));
        let mut events = Vec::new();
        let out = dispatch(&mut w, ActorId::Hunter, Command::Look, &mut events);
        assert!(matches!(out, CommandOutcome::View(_)));
        assert_eq!(w.hunter.mode(), HunterMode::Chasing);
        assert_eq!(w.hunter.target_offset(), (-2, -1));
        assert!(events.contains(&GameEvent::Spotted { dx: -2, dy: -1 }));
    }

    #[test]
    fn explorer_look_does_not_touch_hunter() {
        let mut w = world_from(0, &["....."], (0, 0), (1, 0));
        run(&mut w, ActorId::Explorer, "LOOK");
        assert_eq!(w.hunter.mode(), HunterMode::Searching);
    }

    // ── Catch ──

    #[test]
    fn catch_ends_game() {
        let mut w = world_from(0, &["..."], (0, 0), (1, 0));
        let mut events = Vec::new();
        assert!(!resolve_catch(&mut w, &mut events));
        dispatch(&mut w, ActorId::Hunter, Command::Move(Direction::West), &mut events);
        assert!(resolve_catch(&mut w, &mut events));
        assert_eq!(w.outcome(), Some(GameEnd::Caught));
        assert_eq!(events.last(), Some(&GameEvent::Caught { x: 0, y: 0 }));
    }
}
