//! Presentation layer: line-oriented console output.
//!
//! Plain text goes out as-is. Window views are colored per cell when the
//! output is a terminal; every command is batched with `queue!` and
//! flushed once per message.

use std::io::{self, IsTerminal, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::domain::grid::{ViewCell, WindowView};
use crate::domain::tile::Cell;

pub trait Console {
    /// Print a message followed by a newline.
    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Print without a newline and flush, for input prompts.
    fn prompt(&mut self, text: &str) -> io::Result<()>;

    /// Game-ending banner.
    fn alert(&mut self, text: &str) -> io::Result<()> {
        self.print(text)
    }

    /// A LOOK result. Same text as `view.to_string()`.
    fn show_view(&mut self, view: &WindowView) -> io::Result<()> {
        self.print(&view.to_string())
    }
}

pub struct TerminalConsole<W: Write> {
    writer: W,
    styled: bool,
    explorer_symbol: char,
}

impl TerminalConsole<io::Stdout> {
    /// Console on stdout; styling only when stdout is a terminal.
    pub fn stdout(explorer_symbol: char) -> Self {
        let out = io::stdout();
        let styled = out.is_terminal();
        TerminalConsole::new(out, styled, explorer_symbol)
    }
}

impl<W: Write> TerminalConsole<W> {
    pub fn new(writer: W, styled: bool, explorer_symbol: char) -> Self {
        TerminalConsole { writer, styled, explorer_symbol }
    }

    fn cell_color(&self, cell: ViewCell) -> Color {
        match cell {
            ViewCell::Actor(sym) if sym == self.explorer_symbol => Color::Cyan,
            ViewCell::Actor(_) => Color::Red,
            ViewCell::Terrain(Cell::Wall) => Color::DarkGrey,
            ViewCell::Terrain(Cell::Gold) => Color::Yellow,
            ViewCell::Terrain(Cell::ExitTile) => Color::Green,
            ViewCell::Terrain(Cell::Floor) => Color::Grey,
        }
    }
}

impl<W: Write> Console for TerminalConsole<W> {
    fn print(&mut self, text: &str) -> io::Result<()> {
        queue!(self.writer, Print(text), Print("\n"))?;
        self.writer.flush()
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        queue!(self.writer, Print(text))?;
        self.writer.flush()
    }

    fn alert(&mut self, text: &str) -> io::Result<()> {
        if !self.styled {
            return self.print(text);
        }
        queue!(
            self.writer,
            SetAttribute(Attribute::Bold),
            SetForegroundColor(Color::Red),
            Print(text),
            ResetColor,
            SetAttribute(Attribute::Reset),
            Print("\n")
        )?;
        self.writer.flush()
    }

    fn show_view(&mut self, view: &WindowView) -> io::Result<()> {
        if !self.styled {
            return self.print(&view.to_string());
        }
        for row in view.rows() {
            for &cell in row {
                let fg = self.cell_color(cell);
                queue!(self.writer, SetForegroundColor(fg), Print(cell.to_char()))?;
            }
            queue!(self.writer, ResetColor, Print("\n"))?;
        }
        self.writer.flush()
    }
}

/// Collects everything printed, for assertions in tests.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingConsole {
    pub lines: Vec<String>,
    pub prompts: usize,
}

#[cfg(test)]
impl Console for RecordingConsole {
    fn print(&mut self, text: &str) -> io::Result<()> {
        self.lines.push(text.to_string());
        Ok(())
    }

    fn prompt(&mut self, _text: &str) -> io::Result<()> {
        self.prompts += 1;
        Ok(())
    }
}
