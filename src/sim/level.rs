//! Map file loading.
//!
//! ## Map file format (`.txt`):
//!   Line 1: `name <map display name>`
//!   Line 2: `win <gold needed to win>`
//!   Lines:  map rows, all the same length
//!
//! ## Tile legend:
//!   '.' = Floor     '#' = Wall
//!   'G' = Gold      'E' = Exit
//!   anything else is read as Floor
//!
//! Reading the file and parsing it are separate steps so a parse failure
//! can be told apart from an unreadable file.

use std::path::Path;

use log::info;

use crate::domain::grid::GridMap;
use crate::error::GameError;

/// Read a map file into its lines (terminators stripped).
/// Undecodable bytes become U+FFFD, which the grid then reads as Floor.
pub fn read_map_lines(path: &Path) -> Result<Vec<String>, GameError> {
    let bytes = std::fs::read(path).map_err(|source| GameError::ReadMap {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect())
}

/// Read and parse a map file.
pub fn load_map(path: &Path) -> Result<GridMap, GameError> {
    let lines = read_map_lines(path)?;
    let map = GridMap::parse(&lines)?;
    info!(
        "loaded map '{}' from {} ({}x{}, win {})",
        map.name(),
        path.display(),
        map.width(),
        map.height(),
        map.gold_required()
    );
    Ok(map)
}
