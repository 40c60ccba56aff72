//! TurnEngine: the round-robin game loop.
//!
//! Each round the Explorer acts, then the Hunter. After every single command
//! the catch condition is checked, and the loop stops as soon as the game is
//! over, even mid-round. Only the Explorer's results are shown to the player.

use log::{debug, info};

use crate::config::GameSettings;
use crate::domain::ai::RandomSource;
use crate::domain::command::Command;
use crate::domain::entity::ActorId;
use crate::domain::grid::GridMap;
use crate::error::GameError;
use crate::logutil::escape_log;
use crate::ui::input::LineSource;
use crate::ui::renderer::Console;
use super::event::GameEvent;
use super::spawn;
use super::step::{self, CommandOutcome};
use super::world::{GameEnd, WorldState, TURN_ORDER};

pub const COMMAND_PROMPT: &str = "Enter a command: ";
pub const CAUGHT_MESSAGE: &str = "GAME OVER. The bot caught you";

pub struct TurnEngine<R: RandomSource> {
    pub world: WorldState,
    rng: R,
}

impl<R: RandomSource> TurnEngine<R> {
    /// Build the world and place both actors.
    pub fn new(map: GridMap, settings: &GameSettings, mut rng: R) -> Result<Self, GameError> {
        let mut world = WorldState::new(map, settings.explorer_symbol, settings.hunter_symbol);
        spawn::place_actors(&mut world, &mut rng, settings.placement_attempts)?;
        Ok(TurnEngine { world, rng })
    }

    /// Wrap an already-populated world (actors positioned by the caller).
    #[cfg(test)]
    pub fn from_world(world: WorldState, rng: R) -> Self {
        TurnEngine { world, rng }
    }

    /// Play until the game ends. Returns how it ended.
    pub fn run(
        &mut self,
        input: &mut dyn LineSource,
        console: &mut dyn Console,
    ) -> Result<GameEnd, GameError> {
        let welcome = format!("Welcome to the {}", self.world.map.name());
        console.print(&welcome).map_err(GameError::Output)?;
        info!(
            "game start on '{}' ({}x{}, win {})",
            self.world.map.name(),
            self.world.map.width(),
            self.world.map.height(),
            self.world.map.gold_required()
        );

        let mut round = 0u64;
        loop {
            round += 1;
            debug!("round {round}");
            if let Some(end) = self.play_round(input, console)? {
                info!("game over after {round} round(s): {end:?}");
                return Ok(end);
            }
        }
    }

    /// One round in turn order. Returns the ending if the game finished.
    pub fn play_round(
        &mut self,
        input: &mut dyn LineSource,
        console: &mut dyn Console,
    ) -> Result<Option<GameEnd>, GameError> {
        for who in TURN_ORDER {
            let command = self.next_command(who, input, console)?;
            let mut events = Vec::new();
            let outcome = step::dispatch(&mut self.world, who, command, &mut events);

            if who == ActorId::Explorer {
                show_outcome(console, &outcome).map_err(GameError::Output)?;
            }

            if step::resolve_catch(&mut self.world, &mut events) {
                console.alert(CAUGHT_MESSAGE).map_err(GameError::Output)?;
            }
            log_events(&events);

            if let Some(end) = self.world.outcome() {
                return Ok(Some(end));
            }
        }
        Ok(None)
    }

    /// Ask an actor for its command. Blocks on player input for the Explorer.
    fn next_command(
        &mut self,
        who: ActorId,
        input: &mut dyn LineSource,
        console: &mut dyn Console,
    ) -> Result<Command, GameError> {
        match who {
            ActorId::Explorer => {
                console.prompt(COMMAND_PROMPT).map_err(GameError::Output)?;
                match input.read_line().map_err(GameError::Input)? {
                    Some(line) => {
                        debug!("explorer typed: {}", escape_log(&line));
                        Ok(Command::parse(&line))
                    }
                    None => {
                        info!("input closed, treating as QUIT");
                        Ok(Command::Quit)
                    }
                }
            }
            ActorId::Hunter => Ok(self.world.hunter.next_command(&mut self.rng)),
        }
    }
}

fn show_outcome(console: &mut dyn Console, outcome: &CommandOutcome) -> std::io::Result<()> {
    match outcome {
        CommandOutcome::View(view) => console.show_view(view)?,
        other => console.print(&other.to_string())?,
    }
    console.print("")
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::GoldPicked { .. } | GameEvent::Spotted { .. } | GameEvent::Caught { .. } => {
                info!("{event:?}")
            }
            _ => debug!("{event:?}"),
        }
    }
}
