//! GridMap: the maze layout plus its metadata.
//!
//! ## Source format
//!   ```text
//!   name <map display name>
//!   win <non-negative integer>
//!   <row>
//!   <row>
//!   ```
//! Every row must have the same length as the first one. Characters outside
//! the legend (`.` `#` `G` `E`) are read as floor, which is deliberate.
//!
//! After parsing, the only mutation is `clear_to_floor` (gold pickup).

use std::fmt;

use thiserror::Error;

use super::entity::{Actor, Position};
use super::tile::Cell;

/// Why a map source was rejected. All of these are fatal for a game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("missing `{expected}` line")]
    MissingHeader { expected: &'static str },

    #[error("line {line}: expected `{expected} <value>`")]
    BadHeader { line: usize, expected: &'static str },

    #[error("gold target `{0}` is not a non-negative integer")]
    BadGoldTarget(String),

    #[error("map has no rows")]
    NoRows,

    #[error("map rows are empty")]
    EmptyRow,

    #[error("row {row} has length {found}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
}

#[derive(Clone, Debug)]
pub struct GridMap {
    name: String,
    width: usize,
    height: usize,
    gold_required: u32,
    cells: Vec<Vec<Cell>>,
}

impl GridMap {
    /// Build a map from the ordered lines of a map file.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self, MapError> {
        let name_line = lines
            .first()
            .ok_or(MapError::MissingHeader { expected: "name" })?;
        let name = header_value(name_line.as_ref(), "name", 1)?.to_string();

        let win_line = lines
            .get(1)
            .ok_or(MapError::MissingHeader { expected: "win" })?;
        let win = header_value(win_line.as_ref(), "win", 2)?;
        let gold_required = win
            .parse::<u32>()
            .map_err(|_| MapError::BadGoldTarget(win.to_string()))?;

        let rows = &lines[2..];
        let first = rows.first().ok_or(MapError::NoRows)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(MapError::EmptyRow);
        }

        let mut cells = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(MapError::RaggedRow { row: y, expected: width, found });
            }
            cells.push(row.chars().map(Cell::from_char).collect());
        }

        Ok(GridMap {
            name,
            width,
            height: cells.len(),
            gold_required,
            cells,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn gold_required(&self) -> u32 {
        self.gold_required
    }

    /// Grid index for an in-bounds coordinate.
    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (ux, uy) = (x as usize, y as usize);
        if ux >= self.width || uy >= self.height {
            return None;
        }
        Some((ux, uy))
    }

    /// Cell at (x, y). The map is surrounded by an implicit wall,
    /// so every out-of-bounds coordinate reads as `Wall`.
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        match self.index(x, y) {
            Some((ux, uy)) => self.cells[uy][ux],
            None => Cell::Wall,
        }
    }

    pub fn cell(&self, pos: Position) -> Cell {
        self.cell_at(pos.x, pos.y)
    }

    /// Reset a cell to floor. Out-of-bounds coordinates are ignored.
    pub fn clear_to_floor(&mut self, x: i32, y: i32) {
        if let Some((ux, uy)) = self.index(x, y) {
            self.cells[uy][ux] = Cell::Floor;
        }
    }

    /// Square snapshot of side `2 * radius + 1` around `center`.
    ///
    /// Actors are drawn over the terrain. When two actors share a cell the one
    /// earlier in `actors` wins.
    pub fn window_view(&self, center: Position, radius: usize, actors: &[&Actor]) -> WindowView {
        let side = 2 * radius + 1;
        let r = radius as i32;
        let mut rows = Vec::with_capacity(side);
        for vy in 0..side as i32 {
            let mut row = Vec::with_capacity(side);
            for vx in 0..side as i32 {
                let abs = center.offset(vx - r, vy - r);
                let cell = match actors.iter().find(|a| a.position() == abs) {
                    Some(a) => ViewCell::Actor(a.symbol()),
                    None => ViewCell::Terrain(self.cell(abs)),
                };
                row.push(cell);
            }
            rows.push(row);
        }
        WindowView { radius, rows }
    }
}

/// Extract the value after `<header> `. The value must be non-empty.
fn header_value<'a>(line: &'a str, header: &'static str, line_no: usize) -> Result<&'a str, MapError> {
    match line.strip_prefix(header).and_then(|rest| rest.strip_prefix(' ')) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(MapError::BadHeader { line: line_no, expected: header }),
    }
}

// ── Window views ──

/// One cell of a window view: either terrain or an actor standing on it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ViewCell {
    Terrain(Cell),
    Actor(char),
}

impl ViewCell {
    pub fn to_char(self) -> char {
        match self {
            ViewCell::Terrain(c) => c.to_char(),
            ViewCell::Actor(sym) => sym,
        }
    }
}

/// Owned snapshot of the map around a point. Holds no references to live state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowView {
    radius: usize,
    rows: Vec<Vec<ViewCell>>,
}

impl WindowView {
    pub fn radius(&self) -> usize {
        self.radius
    }

    #[allow(dead_code)]
    pub fn side(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<ViewCell>] {
        &self.rows
    }

    #[allow(dead_code)]
    pub fn at(&self, col: usize, row: usize) -> Option<ViewCell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    #[allow(dead_code)]
    pub fn center(&self) -> ViewCell {
        self.rows[self.radius][self.radius]
    }

    /// Every cell with its (col, row) index, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, ViewCell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().map(move |(col, &c)| (col, row, c))
        })
    }
}

/// Rows joined by newlines, no trailing newline.
impl fmt::Display for WindowView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            let line: String = row.iter().map(|c| c.to_char()).collect();
            f.write_str(&line)?;
        }
        Ok(())
    }
}
