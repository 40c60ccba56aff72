//! Fatal errors. Anything here ends the process from `main`; recoverable
//! command failures are ordinary `CommandOutcome` values instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::grid::MapError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid file format: {0}")]
    Map(#[from] MapError),

    #[error("could not read map file {}: {source}", .path.display())]
    ReadMap {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The map has no legal spawn cell left for this actor.
    #[error("Player can't be placed ('{symbol}' gave up after {attempts} attempts)")]
    Placement { symbol: char, attempts: u32 },

    #[error("input error: {0}")]
    Input(#[source] io::Error),

    #[error("output error: {0}")]
    Output(#[source] io::Error),
}
